//! Six-agent hidden-role mission game.
//!
//! Four Good agents (Merlin, Percival and two generic agents) face two Evil
//! agents (Morgana and the Assassin). Each mission a leader proposes a team,
//! everyone votes, and an approved team plays quest cards. Good needs three
//! successful missions and then has to survive the Assassin's guess at
//! Merlin; Evil wins on three failed missions or five rejected proposals in
//! a row.
//!
//! - `setup`: seating and team assignment
//! - `phases`: the phase state machine
//! - `game`: `AvalonEnv`, the driver-facing environment

mod game;
pub mod phases;
pub mod setup;

pub use game::{AvalonEnv, Diagnostics, StepInfo};
pub use phases::{MissionSummary, Transition};
