//! Training data type bindings for Python.

use std::collections::HashMap;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::training::{GameRecord, Trajectory};

/// Python wrapper for Trajectory.
#[pyclass(name = "Trajectory")]
#[derive(Clone)]
pub struct PyTrajectory(pub Trajectory);

#[pymethods]
impl PyTrajectory {
    /// Final reward per agent name.
    #[getter]
    fn outcome(&self) -> HashMap<String, f32> {
        self.0
            .outcome
            .iter()
            .map(|(agent, &r)| (agent.to_string(), r))
            .collect()
    }

    /// Turns consumed by the game.
    #[getter]
    fn game_length(&self) -> u32 {
        self.0.game_length
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Accepted steps as batched numpy arrays.
    ///
    /// Returns (states, values, agents):
    /// - states: [N, observation_dim] float32
    /// - values: [N] float32, final reward of the acting agent
    /// - agents: [N] uint8, roster index of the acting agent
    fn to_numpy_batch<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray1<f32>>,
        Bound<'py, PyArray1<u8>>,
    )> {
        let samples = self.0.to_training_samples();
        let n = samples.len();
        let state_dim = crate::nn::OBSERVATION_DIM;

        let mut states_flat: Vec<f32> = Vec::with_capacity(n * state_dim);
        let mut values = Vec::with_capacity(n);
        let mut agents = Vec::with_capacity(n);
        for sample in &samples {
            if sample.state.len() != state_dim {
                return Err(PyValueError::new_err(format!(
                    "state has {} features, expected {}",
                    sample.state.len(),
                    state_dim
                )));
            }
            states_flat.extend_from_slice(&sample.state.tensor);
            values.push(sample.value);
            agents.push(sample.agent.0);
        }

        let states = PyArray1::from_vec_bound(py, states_flat)
            .reshape([n, state_dim])
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((
            states,
            PyArray1::from_vec_bound(py, values),
            PyArray1::from_vec_bound(py, agents),
        ))
    }

    fn __repr__(&self) -> String {
        format!(
            "Trajectory(length={}, steps={}, seed={})",
            self.0.game_length,
            self.0.steps.len(),
            self.0.seed
        )
    }
}

/// Python wrapper for GameRecord.
#[pyclass(name = "GameRecord")]
#[derive(Clone)]
pub struct PyGameRecord(pub GameRecord);

#[pymethods]
impl PyGameRecord {
    /// Decode a record written by `to_bytes`.
    #[staticmethod]
    fn from_bytes(bytes: &[u8]) -> PyResult<Self> {
        GameRecord::from_bytes(bytes)
            .map(Self)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .0
            .to_bytes()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[getter]
    fn game_id(&self) -> u64 {
        self.0.game_id
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    /// Agent names in seating order.
    #[getter]
    fn seating(&self) -> Vec<String> {
        self.0.seating.iter().map(ToString::to_string).collect()
    }

    #[getter]
    fn winner(&self) -> String {
        self.0.winner.to_string()
    }

    #[getter]
    fn win_condition(&self) -> &'static str {
        self.0.win_condition.tag()
    }

    /// 2 for each mission Good won, 0 for each Evil won.
    #[getter]
    fn mission_scores(&self) -> Vec<u8> {
        self.0.mission_scores.clone()
    }

    #[getter]
    fn assassination_target(&self) -> Option<String> {
        self.0.assassination_target.map(|a| a.to_string())
    }

    #[getter]
    fn final_rewards(&self) -> HashMap<String, f32> {
        self.0
            .final_rewards
            .iter()
            .map(|(agent, &r)| (agent.to_string(), r))
            .collect()
    }

    #[getter]
    fn turn_count(&self) -> u32 {
        self.0.turn_count
    }

    #[getter]
    fn rejected_proposals(&self) -> usize {
        self.0.rejected_proposals()
    }

    fn __repr__(&self) -> String {
        format!(
            "GameRecord(id={}, winner={}, condition={}, turns={})",
            self.0.game_id,
            self.0.winner,
            self.0.win_condition.tag(),
            self.0.turn_count
        )
    }
}
