//! Role and team assignment.
//!
//! Roles never move: agent `i` always holds `Role::ROSTER[i]`. What changes
//! per game is the seating, which sets turn order, seat-relative views and,
//! through seat 0, the first leader.

use crate::core::{AgentId, ConfigError, Faction, GameRng, GameState, Role, AGENT_COUNT};

/// Draw a fresh seating order from `rng`.
pub fn shuffled_seating(rng: &mut GameRng) -> Vec<AgentId> {
    let mut seating: Vec<AgentId> = AgentId::all().collect();
    rng.shuffle(&mut seating);
    seating
}

/// Check that `seating` seats every roster agent exactly once.
pub fn validate_seating(seating: &[AgentId]) -> Result<(), ConfigError> {
    if seating.len() != AGENT_COUNT {
        return Err(ConfigError::Seating);
    }
    let mut seen = [false; AGENT_COUNT];
    for agent in seating {
        match seen.get_mut(agent.index()) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(ConfigError::Seating),
        }
    }
    Ok(())
}

/// Initial state for a validated seating order.
pub fn deal(seating: &[AgentId]) -> Result<GameState, ConfigError> {
    validate_seating(seating)?;
    Ok(GameState::new(seating.to_vec()))
}

/// Agents of `faction`, in roster order.
#[must_use]
pub fn team(faction: Faction) -> Vec<AgentId> {
    Role::members(faction).map(Role::agent).collect()
}
