//! Environment contract for turn-based multi-agent games.
//!
//! Drivers (self-play loops, Python wrappers) program against
//! `AgentEnvironment` instead of a concrete game:
//!
//! ```text
//! env.reset(seed)
//! while !env.is_done() {
//!     let last = env.last();          // view, reward, flags for current agent
//!     let action = policy(last.view);
//!     env.step(action);               // never fails; bad input is a no-op
//! }
//! ```
//!
//! ## Implementation Notes
//!
//! - `step` consumes exactly one scheduler tick per call, even when the
//!   action is ignored.
//! - `observe` must be pure and must hide everything the agent may not see.
//! - Rewards are cumulative since the last `clear_rewards`.

use crate::core::{AgentId, AgentMap};

/// What the current agent sees before acting.
#[derive(Clone, Debug, PartialEq)]
pub struct LastStep<O, I> {
    pub agent: AgentId,
    pub view: O,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}

/// A turn-based, partially observable multi-agent environment.
pub trait AgentEnvironment {
    /// Per-agent partial view.
    type Observation;

    /// Action submitted by the current agent.
    type Action;

    /// Per-agent step metadata.
    type Info: Clone;

    /// Start a fresh game and return the first scheduled agent's view.
    ///
    /// `None` derives a new seed from the environment's own generator.
    fn reset(&mut self, seed: Option<u64>) -> Self::Observation;

    /// Apply `action` on behalf of [`current_agent`](Self::current_agent).
    fn step(&mut self, action: Self::Action);

    /// Partial view for `agent`. No side effects.
    ///
    /// Implementations may panic when `agent` is not on the roster. Drivers
    /// holding ids from outside the game should use a checked accessor such
    /// as `AvalonEnv::try_observe`.
    fn observe(&self, agent: AgentId) -> Self::Observation;

    /// Agent whose turn it is.
    fn current_agent(&self) -> AgentId;

    /// Cumulative rewards since the last [`clear_rewards`](Self::clear_rewards).
    fn rewards(&self) -> &AgentMap<f32>;

    /// Zero the cumulative rewards.
    fn clear_rewards(&mut self);

    fn terminations(&self) -> &AgentMap<bool>;

    fn truncations(&self) -> &AgentMap<bool>;

    fn infos(&self) -> &AgentMap<Self::Info>;

    // === Convenience Methods ===

    /// True once every agent is terminated or truncated.
    fn is_done(&self) -> bool {
        self.terminations()
            .values()
            .zip(self.truncations().values())
            .all(|(&term, &trunc)| term || trunc)
    }

    /// Return and zero the cumulative rewards.
    fn take_rewards(&mut self) -> AgentMap<f32> {
        let rewards = self.rewards().clone();
        self.clear_rewards();
        rewards
    }

    /// Everything the current agent needs to choose an action.
    fn last(&self) -> LastStep<Self::Observation, Self::Info> {
        let agent = self.current_agent();
        LastStep {
            agent,
            view: self.observe(agent),
            reward: self.rewards()[agent],
            terminated: self.terminations()[agent],
            truncated: self.truncations()[agent],
            info: self.infos()[agent].clone(),
        }
    }
}
