//! Python bindings for the avalon-env environment.
//!
//! # Quick Start
//!
//! ```python
//! import avalon_env
//! import numpy as np
//!
//! env = avalon_env.AvalonEnv(seed=42)
//! env.reset()
//!
//! while not env.is_done():
//!     obs, reward, terminated, truncated, info = env.last()
//!     kind = env.expected_action(env.agent_selection)
//!     if kind == "vote":
//!         env.step("vote", True)
//!     elif kind == "propose":
//!         env.step("propose", [0, 1])
//!     else:
//!         env.step("quest", True)
//!
//! print(env.outcome, env.rewards)
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_self_play;
mod py_training;

pub use py_env::*;
pub use py_self_play::*;
pub use py_training::*;

/// avalon_env: a six-agent hidden-role environment for multi-agent RL.
#[pymodule]
fn avalon_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAvalonEnv>()?;

    // Training types
    m.add_class::<PyTrajectory>()?;
    m.add_class::<PyGameRecord>()?;

    // Self-play
    m.add_class::<PySelfPlayConfig>()?;
    m.add_class::<PyRandomSelfPlay>()?;
    m.add_function(wrap_pyfunction!(play_random_games, m)?)?;

    m.add("OBSERVATION_DIM", crate::nn::OBSERVATION_DIM)?;

    Ok(())
}
