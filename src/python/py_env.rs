//! Environment bindings for Python.
//!
//! Shaped like a PettingZoo AEC environment: agents are addressed by name,
//! `step` acts for `agent_selection`, and per-agent dictionaries expose
//! rewards, terminations, truncations and infos.

use std::collections::HashMap;

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{Action, ActionKind, AgentId, GameConfig, Role};
use crate::games::avalon::{AvalonEnv, StepInfo};
use crate::rules::AgentEnvironment;

fn agent_by_name(name: &str) -> PyResult<AgentId> {
    Role::from_name(name)
        .map(Role::agent)
        .ok_or_else(|| PyValueError::new_err(format!("unknown agent {name}")))
}

/// Decode `(kind, payload)` into an action. `Err` carries a reason for the
/// diagnostic channel; the turn is still consumed.
fn decode_action(kind: &str, payload: Option<&Bound<'_, PyAny>>) -> Result<Action, String> {
    let kind = ActionKind::from_tag(kind).ok_or_else(|| format!("unknown action kind {kind}"))?;
    let payload = payload.ok_or_else(|| format!("{kind} needs a payload"))?;
    let bad = |e: PyErr| format!("bad {kind} payload: {e}");

    Ok(match kind {
        ActionKind::Propose => {
            let ids: Vec<u8> = payload.extract().map_err(bad)?;
            Action::Propose(ids.into_iter().map(AgentId::new).collect())
        }
        ActionKind::Vote => Action::Vote(payload.extract().map_err(bad)?),
        ActionKind::Quest => Action::Quest(payload.extract().map_err(bad)?),
        ActionKind::Guess => {
            let probabilities: Vec<f32> = payload.extract().map_err(bad)?;
            Action::guess(&probabilities)
        }
        ActionKind::Assassinate => Action::Assassinate(AgentId::new(payload.extract().map_err(bad)?)),
    })
}

fn info_dict<'py>(py: Python<'py>, info: &StepInfo) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    if let Some(summary) = info.mission {
        dict.set_item("mission_number", summary.mission_number)?;
        dict.set_item("success", summary.success)?;
        dict.set_item("fail_count", summary.fail_count)?;
    }
    if let Some(error) = &info.rejection {
        dict.set_item("rejected", error.to_string())?;
    }
    Ok(dict)
}

/// Python wrapper for the six-agent environment.
#[pyclass(name = "AvalonEnv")]
pub struct PyAvalonEnv {
    env: AvalonEnv,
}

#[pymethods]
impl PyAvalonEnv {
    /// Create an environment.
    ///
    /// # Arguments
    /// - seed: RNG seed for the first game
    /// - max_rejections: consecutive rejections that hand Evil the game (default: 5)
    #[new]
    #[pyo3(signature = (seed = 42, max_rejections = 5))]
    fn new(seed: u64, max_rejections: u8) -> PyResult<Self> {
        let config = GameConfig::default().with_max_rejections(max_rejections);
        let env = AvalonEnv::new(config, seed).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { env })
    }

    /// Start a new game. `None` draws a fresh seed.
    #[pyo3(signature = (seed = None))]
    fn reset(&mut self, seed: Option<u64>) {
        self.env.reset(seed);
    }

    /// Act for `agent_selection`.
    ///
    /// Payloads: list of agent indices for "propose", bool for "vote" and
    /// "quest", list of six floats for "guess", agent index for
    /// "assassinate". Anything unusable is ignored and the turn passes.
    #[pyo3(signature = (kind, payload = None))]
    fn step(&mut self, kind: &str, payload: Option<&Bound<'_, PyAny>>) {
        match decode_action(kind, payload) {
            Ok(action) => self.env.step(action),
            Err(reason) => self.env.step_malformed(reason),
        }
    }

    /// Seat-relative observation of `agent` as a flat float32 array.
    fn observe<'py>(&self, py: Python<'py>, agent: &str) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let agent = agent_by_name(agent)?;
        let view = self
            .env
            .try_observe(agent)
            .ok_or_else(|| PyValueError::new_err(format!("{agent} is not seated")))?;
        Ok(PyArray1::from_vec_bound(py, view.to_tensor()))
    }

    /// `(observation, reward, terminated, truncated, info)` for `agent_selection`.
    #[allow(clippy::type_complexity)]
    fn last<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f32, bool, bool, Bound<'py, PyDict>)> {
        let last = self.env.last();
        Ok((
            PyArray1::from_vec_bound(py, last.view.to_tensor()),
            last.reward,
            last.terminated,
            last.truncated,
            info_dict(py, &last.info)?,
        ))
    }

    #[getter]
    fn agent_selection(&self) -> String {
        self.env.current_agent().to_string()
    }

    /// Agent names in seating order.
    #[getter]
    fn agents(&self) -> Vec<String> {
        self.env.state().seating().iter().map(ToString::to_string).collect()
    }

    #[getter]
    fn rewards(&self) -> HashMap<String, f32> {
        self.env.rewards().iter().map(|(a, &r)| (a.to_string(), r)).collect()
    }

    #[getter]
    fn terminations(&self) -> HashMap<String, bool> {
        self.env.terminations().iter().map(|(a, &t)| (a.to_string(), t)).collect()
    }

    #[getter]
    fn truncations(&self) -> HashMap<String, bool> {
        self.env.truncations().iter().map(|(a, &t)| (a.to_string(), t)).collect()
    }

    #[getter]
    fn infos<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for (agent, info) in self.env.infos().iter() {
            dict.set_item(agent.to_string(), info_dict(py, info)?)?;
        }
        Ok(dict)
    }

    /// Zero the cumulative rewards.
    fn clear_rewards(&mut self) {
        self.env.clear_rewards();
    }

    /// Action kind `agent` may submit now, or None.
    fn expected_action(&self, agent: &str) -> PyResult<Option<&'static str>> {
        let agent = agent_by_name(agent)?;
        Ok(self.env.expected_action(agent).map(ActionKind::tag))
    }

    #[getter]
    fn phase(&self) -> String {
        self.env.state().phase().to_string()
    }

    /// `(winner, condition)` once the game is over.
    #[getter]
    fn outcome(&self) -> Option<(String, &'static str)> {
        self.env
            .outcome()
            .map(|o| (o.winner.to_string(), o.condition.tag()))
    }

    #[getter]
    fn ignored_actions(&self) -> u64 {
        self.env.diagnostics().ignored
    }

    #[getter]
    fn observation_dim(&self) -> usize {
        crate::nn::OBSERVATION_DIM
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }

    fn __repr__(&self) -> String {
        format!(
            "AvalonEnv(seed={}, phase={}, mission={}, step={})",
            self.env.seed(),
            self.env.state().phase(),
            self.env.state().mission_number(),
            self.env.step_count()
        )
    }
}
