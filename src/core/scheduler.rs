//! Round-robin turn scheduling.
//!
//! The scheduler knows nothing about phases. It advances exactly once per
//! submitted action, whether or not the state machine used it, so agents with
//! nothing to do in the current phase still burn a tick.

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, Role};

/// Deterministic cyclic pointer over the seating order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScheduler {
    order: Vec<AgentId>,
    cursor: usize,
}

impl TurnScheduler {
    /// Create a scheduler pointing at seat 0 of `order`.
    #[must_use]
    pub fn new(order: Vec<AgentId>) -> Self {
        assert!(!order.is_empty(), "Seating order must not be empty");
        Self { order, cursor: 0 }
    }

    /// Replace the seating order and point at seat 0.
    pub fn reset(&mut self, order: Vec<AgentId>) {
        assert!(!order.is_empty(), "Seating order must not be empty");
        self.order = order;
        self.cursor = 0;
    }

    /// Agent whose turn it is.
    #[must_use]
    pub fn current(&self) -> AgentId {
        self.order[self.cursor]
    }

    /// Advance one seat, wrapping after the last, and return the new agent.
    pub fn next(&mut self) -> AgentId {
        self.cursor = (self.cursor + 1) % self.order.len();
        self.current()
    }

    /// Seat index of the agent whose turn it is.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Seating order, seat 0 first.
    #[must_use]
    pub fn order(&self) -> &[AgentId] {
        &self.order
    }

    /// Seat index of `agent`, `None` if not seated.
    #[must_use]
    pub fn seat_of(&self, agent: AgentId) -> Option<usize> {
        self.order.iter().position(|&a| a == agent)
    }
}

impl Default for TurnScheduler {
    /// Roster order, seat 0 first.
    fn default() -> Self {
        Self::new(Role::ROSTER.iter().map(|r| r.agent()).collect())
    }
}
