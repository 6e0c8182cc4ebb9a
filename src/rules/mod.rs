//! Environment contract and scoring rules.
//!
//! - `engine`: the `AgentEnvironment` trait drivers program against
//!   (reset / step / observe plus per-agent reward and termination flags).
//! - `tally`: pure functions for majorities, mission success and rewards.
//!
//! Nothing in this module mutates a game; `games::avalon` does that.

pub mod engine;
pub mod tally;

pub use engine::{AgentEnvironment, LastStep};
pub use tally::{
    faction_reward, majority_threshold, mission_succeeds, resolve_quest_card, vote_approved,
};
