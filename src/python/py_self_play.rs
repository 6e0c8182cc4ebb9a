//! Self-play bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::GameConfig;
use crate::nn::RandomPolicy;
use crate::training::{encode_batch, GameRecord, SelfPlayConfig, SelfPlayWorker};

use super::py_training::{PyGameRecord, PyTrajectory};

/// Python wrapper for SelfPlayConfig.
#[pyclass(name = "SelfPlayConfig")]
#[derive(Clone)]
pub struct PySelfPlayConfig(pub SelfPlayConfig);

#[pymethods]
impl PySelfPlayConfig {
    /// Create a new self-play configuration.
    ///
    /// # Arguments
    /// - max_steps: turns before a game counts as stuck (default: 2000)
    /// - seed_offset: seed of the first game (default: 0)
    /// - record_steps: keep encoded observations for every turn (default: True)
    #[new]
    #[pyo3(signature = (max_steps = 2000, seed_offset = 0, record_steps = true))]
    fn new(max_steps: usize, seed_offset: u64, record_steps: bool) -> Self {
        Self(
            SelfPlayConfig::default()
                .with_max_steps(max_steps)
                .with_seed_offset(seed_offset)
                .with_record_steps(record_steps),
        )
    }

    #[getter]
    fn max_steps(&self) -> usize {
        self.0.max_steps
    }

    #[getter]
    fn seed_offset(&self) -> u64 {
        self.0.seed_offset
    }

    #[getter]
    fn record_steps(&self) -> bool {
        self.0.record_steps
    }

    fn __repr__(&self) -> String {
        format!(
            "SelfPlayConfig(max_steps={}, seed_offset={}, record_steps={})",
            self.0.max_steps, self.0.seed_offset, self.0.record_steps
        )
    }
}

/// Self-play worker with every agent controlled by the random baseline.
#[pyclass(name = "RandomSelfPlay")]
pub struct PyRandomSelfPlay {
    inner: SelfPlayWorker<RandomPolicy>,
}

#[pymethods]
impl PyRandomSelfPlay {
    /// # Arguments
    /// - config: Self-play configuration
    /// - approve_probability: chance of approving any team (default: 0.5)
    #[new]
    #[pyo3(signature = (config, approve_probability = 0.5))]
    fn new(config: &PySelfPlayConfig, approve_probability: f64) -> PyResult<Self> {
        let game = GameConfig::default();
        let policy = RandomPolicy::new(game.clone()).with_approve_probability(approve_probability);
        let inner = SelfPlayWorker::new(game, policy, config.0.clone())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Play one game. Returns (record, trajectory).
    fn play_game(&mut self, game_id: u64, seed: u64) -> PyResult<(PyGameRecord, PyTrajectory)> {
        self.inner
            .play_game(game_id, seed)
            .map(|(record, trajectory)| (PyGameRecord(record), PyTrajectory(trajectory)))
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Play `count` games with consecutive seeds from the configured offset.
    fn play_games(&mut self, count: usize) -> PyResult<Vec<PyGameRecord>> {
        let games = self
            .inner
            .play_games(count)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(games
            .into_iter()
            .map(|(record, _)| PyGameRecord(record))
            .collect())
    }

    fn __repr__(&self) -> String {
        format!("RandomSelfPlay(config={:?})", self.inner.config())
    }
}

/// Play `count` random games and return their records as one bincode blob.
#[pyfunction]
#[pyo3(signature = (count, seed_offset = 0))]
pub fn play_random_games(py: Python<'_>, count: usize, seed_offset: u64) -> PyResult<Py<PyBytes>> {
    let config = SelfPlayConfig::default()
        .with_seed_offset(seed_offset)
        .with_record_steps(false);
    let mut worker = SelfPlayWorker::new(GameConfig::default(), RandomPolicy::default(), config)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let records: Vec<GameRecord> = worker
        .play_games(count)
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?
        .into_iter()
        .map(|(record, _)| record)
        .collect();
    let bytes = encode_batch(&records).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(PyBytes::new_bound(py, &bytes).unbind())
}
