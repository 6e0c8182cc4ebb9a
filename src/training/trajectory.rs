//! Trajectories for training data collection.
//!
//! A trajectory records a complete self-play game, capturing:
//! - Encoded observations at each turn
//! - Actions submitted and whether the game accepted them
//! - Final rewards for value targets

use serde::{Deserialize, Serialize};

use crate::core::{Action, AgentId, AgentMap};
use crate::nn::EncodedState;

/// One turn in a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Observation of the acting agent, encoded before it acted.
    pub encoded_state: EncodedState,

    pub action_taken: Action,

    /// The agent whose turn it was.
    pub agent: AgentId,

    /// Turn number in the game (0-indexed).
    pub step_number: u32,

    /// False if the game ignored the action.
    pub accepted: bool,
}

impl Step {
    pub fn new(
        encoded_state: EncodedState,
        action_taken: Action,
        agent: AgentId,
        step_number: u32,
        accepted: bool,
    ) -> Self {
        Self {
            encoded_state,
            action_taken,
            agent,
            step_number,
            accepted,
        }
    }
}

/// A complete self-play game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub steps: Vec<Step>,

    /// Final reward for each agent.
    pub outcome: AgentMap<f32>,

    /// Turns consumed, including turns not recorded in `steps`.
    pub game_length: u32,

    /// Random seed used for this game.
    pub seed: u64,
}

impl Trajectory {
    pub fn new(seed: u64) -> Self {
        Self {
            steps: Vec::new(),
            outcome: AgentMap::with_value(0.0),
            game_length: 0,
            seed,
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn set_outcome(&mut self, outcome: AgentMap<f32>) {
        self.outcome = outcome;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps taken by one agent.
    pub fn agent_steps(&self, agent: AgentId) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.agent == agent)
    }

    #[must_use]
    pub fn agent_outcome(&self, agent: AgentId) -> f32 {
        self.outcome[agent]
    }

    /// Accepted steps as (observation, action, final reward) samples.
    ///
    /// Ignored actions carry no signal about the game and are skipped.
    pub fn to_training_samples(&self) -> Vec<TrainingSample> {
        self.steps
            .iter()
            .filter(|step| step.accepted)
            .map(|step| TrainingSample {
                state: step.encoded_state.clone(),
                action: step.action_taken.clone(),
                value: self.outcome[step.agent],
                agent: step.agent,
            })
            .collect()
    }
}

/// A single training sample extracted from a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub state: EncodedState,
    pub action: Action,
    /// Final reward from this agent's point of view.
    pub value: f32,
    pub agent: AgentId,
}
