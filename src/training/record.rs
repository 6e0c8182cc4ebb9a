//! Finished-game records.
//!
//! A `GameRecord` is a self-contained summary of one completed game, meant
//! for offline analysis. Records are persisted with bincode; aggregation
//! across records is left to the consumer.

use serde::{Deserialize, Serialize};

use crate::core::{
    AgentId, AgentMap, AvalonError, Faction, MissionRecord, ProposalRecord, Result, Role,
    WinCondition,
};
use crate::games::avalon::{phases, setup, AvalonEnv};

/// Mission score for a mission Good won.
pub const GOOD_MISSION_SCORE: u8 = 2;

/// Mission score for a mission Evil won.
pub const EVIL_MISSION_SCORE: u8 = 0;

/// Summary of one completed game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub seed: u64,
    /// Seat 0 first.
    pub seating: Vec<AgentId>,
    /// Role of each seated agent, in seating order.
    pub roles: Vec<Role>,
    pub good_team: Vec<AgentId>,
    pub evil_team: Vec<AgentId>,
    pub missions: Vec<MissionRecord>,
    pub proposals: Vec<ProposalRecord>,
    /// One entry per played mission: 2 if Good won it, 0 if Evil did.
    pub mission_scores: Vec<u8>,
    pub assassination_target: Option<AgentId>,
    pub winner: Faction,
    pub win_condition: WinCondition,
    pub final_rewards: AgentMap<f32>,
    pub turn_count: u32,
}

impl GameRecord {
    /// Summarise the game `env` just finished.
    ///
    /// Fails with [`AvalonError::GameNotFinished`] while the game is running.
    pub fn from_env(game_id: u64, env: &AvalonEnv) -> Result<Self> {
        let state = env.state();
        let outcome = state
            .outcome()
            .ok_or(AvalonError::GameNotFinished { seed: env.seed() })?;

        Ok(Self {
            game_id,
            seed: env.seed(),
            seating: state.seating().to_vec(),
            roles: state.seating().iter().filter_map(|a| a.role()).collect(),
            good_team: setup::team(Faction::Good),
            evil_team: setup::team(Faction::Evil),
            missions: state.missions().iter().cloned().collect(),
            proposals: state.proposals().iter().cloned().collect(),
            mission_scores: state
                .missions()
                .iter()
                .map(|m| {
                    if m.success {
                        GOOD_MISSION_SCORE
                    } else {
                        EVIL_MISSION_SCORE
                    }
                })
                .collect(),
            assassination_target: outcome.assassination_target,
            winner: outcome.winner,
            win_condition: outcome.condition,
            // Rebuilt from the outcome; the env's reward counter may have been drained.
            final_rewards: phases::terminal_rewards(outcome),
            turn_count: env.step_count(),
        })
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Rejected proposals across the whole game.
    #[must_use]
    pub fn rejected_proposals(&self) -> usize {
        self.proposals.iter().filter(|p| !p.approved).count()
    }
}

/// Encode a batch of records as one bincode blob.
pub fn encode_batch(records: &[GameRecord]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(records)?)
}

/// Decode a blob written by [`encode_batch`].
pub fn decode_batch(bytes: &[u8]) -> Result<Vec<GameRecord>> {
    Ok(bincode::deserialize(bytes)?)
}
