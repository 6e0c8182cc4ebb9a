//! Core engine types: agents, actions, state, scheduling, RNG, configuration.
//!
//! Everything here is passive data plus small helpers. The rules that move a
//! game forward live in `games::avalon`; the pure scoring rules in `rules`.

pub mod agent;
pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod scheduler;
pub mod state;

pub use agent::{AgentId, AgentMap, Faction, Role, AGENT_COUNT};
pub use action::{Action, ActionKind, ActionRecord, Team};
pub use config::{GameConfig, MISSION_COUNT, SIX_PLAYER_MISSION_SIZES};
pub use error::{ActionError, AvalonError, ConfigError, RejectionKind, Result};
pub use rng::{GameRng, GameRngState};
pub use scheduler::TurnScheduler;
pub use state::{GameState, MissionRecord, Outcome, Phase, ProposalRecord, WinCondition};
