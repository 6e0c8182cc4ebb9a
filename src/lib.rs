//! # avalon-env
//!
//! A six-agent hidden-role mission game packaged as a turn-based
//! multi-agent environment for reinforcement-learning self-play.
//!
//! ## Design Principles
//!
//! 1. **Step Never Fails**: Every call to `step` consumes one scheduler tick.
//!    Actions that do not fit the current phase are recorded as diagnostics
//!    and leave the game untouched.
//!
//! 2. **Relative Views**: Observations are expressed relative to the observing
//!    agent's seat, so a policy cannot learn anything from roster order.
//!
//! 3. **Deterministic Replay**: All randomness flows from a seeded ChaCha8
//!    generator. The same seed and action stream reproduce the same game.
//!
//! ## Modules
//!
//! - `core`: Agents, roles, actions, state, scheduling, RNG, configuration
//! - `rules`: The `AgentEnvironment` contract and pure scoring rules
//! - `games`: The phase state machine and environment (`games::avalon`)
//! - `nn`: Observation encoding and the `Policy` seam
//! - `training`: Trajectories, game records and the self-play loop

pub mod core;
pub mod games;
pub mod nn;
pub mod rules;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, AgentId, AgentMap, AvalonError, ConfigError,
    Faction, GameConfig, GameRng, GameRngState, GameState, Outcome, Phase, RejectionKind, Role,
    TurnScheduler, WinCondition, AGENT_COUNT,
};

pub use crate::games::avalon::{AvalonEnv, Diagnostics, MissionSummary, StepInfo, Transition};

pub use crate::nn::{
    EncodedState, ObservationEncoder, Policy, RandomPolicy, StateEncoder, View, OBSERVATION_DIM,
};

pub use crate::rules::{AgentEnvironment, LastStep};

pub use crate::training::{GameRecord, SelfPlayConfig, SelfPlayWorker, Trajectory};
