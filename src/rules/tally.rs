//! Vote, quest and reward arithmetic.
//!
//! Kept free of game state so each rule can be checked in isolation.

use crate::core::Faction;

/// Smallest table size at which one mission tolerates a single fail card.
pub const TWO_FAIL_MIN_AGENTS: usize = 7;

/// The mission (1-based) that tolerates a single fail card at larger tables.
pub const TWO_FAIL_MISSION: u8 = 4;

/// Approvals needed to pass a proposal: `floor(n / 2) + 1`.
#[must_use]
pub const fn majority_threshold(agent_count: usize) -> usize {
    agent_count / 2 + 1
}

/// Does `approvals` out of `agent_count` votes approve the team?
#[must_use]
pub const fn vote_approved(approvals: usize, agent_count: usize) -> bool {
    approvals >= majority_threshold(agent_count)
}

/// Does a mission with `fail_count` fail cards succeed?
///
/// Zero fails are required, except on mission 4 at tables of seven or more,
/// where a single fail is tolerated.
///
/// ```
/// use avalon_env::rules::mission_succeeds;
///
/// assert!(mission_succeeds(6, 4, 0));
/// assert!(!mission_succeeds(6, 4, 1));
/// assert!(mission_succeeds(7, 4, 1));
/// assert!(!mission_succeeds(7, 4, 2));
/// ```
#[must_use]
pub const fn mission_succeeds(agent_count: usize, mission_number: u8, fail_count: usize) -> bool {
    if agent_count >= TWO_FAIL_MIN_AGENTS && mission_number == TWO_FAIL_MISSION {
        fail_count < 2
    } else {
        fail_count == 0
    }
}

/// The card that actually counts. Good agents cannot fail a mission.
#[must_use]
pub const fn resolve_quest_card(faction: Faction, submitted_success: bool) -> bool {
    match faction {
        Faction::Good => true,
        Faction::Evil => submitted_success,
    }
}

/// Terminal reward for a member of `faction` when `winner` wins.
#[must_use]
pub fn faction_reward(winner: Faction, faction: Faction) -> f32 {
    if winner == faction {
        1.0
    } else {
        -1.0
    }
}
