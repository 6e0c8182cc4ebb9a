//! Game state: the single aggregate the phase state machine mutates.
//!
//! ## GameState
//!
//! - Seating order and leader pointer
//! - Mission counter, reject counter, current phase
//! - Proposed and frozen teams
//! - Transient vote / quest / guess buffers
//! - Append-only mission ledger and proposal history
//! - Evil probability table and final outcome
//!
//! Fields are crate-private: only `games::avalon::phases` writes them. Every
//! other consumer (the observation encoder, records, drivers) reads through
//! accessors. Ledgers use `im::Vector`, so cloning a state is O(1) and a clone
//! is a cheap snapshot.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, Team};
use super::agent::{AgentId, AgentMap, Faction, AGENT_COUNT};

/// Phases of a game, in the order they are normally visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    TeamProposal,
    TeamVote,
    Quest,
    EvilDiscussion,
    Assassination,
    GameOver,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::TeamProposal,
        Phase::TeamVote,
        Phase::Quest,
        Phase::EvilDiscussion,
        Phase::Assassination,
        Phase::GameOver,
    ];

    /// Position in [`Phase::ALL`], used for one-hot encoding.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The only action kind this phase accepts.
    #[must_use]
    pub const fn accepted_kind(self) -> Option<ActionKind> {
        match self {
            Phase::TeamProposal => Some(ActionKind::Propose),
            Phase::TeamVote => Some(ActionKind::Vote),
            Phase::Quest => Some(ActionKind::Quest),
            Phase::EvilDiscussion => Some(ActionKind::Guess),
            Phase::Assassination => Some(ActionKind::Assassinate),
            Phase::GameOver => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::TeamProposal => "team proposal",
            Phase::TeamVote => "team vote",
            Phase::Quest => "quest",
            Phase::EvilDiscussion => "evil discussion",
            Phase::Assassination => "assassination",
            Phase::GameOver => "game over",
        })
    }
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinCondition {
    /// Evil failed enough missions.
    MissionsFailed,
    /// Too many consecutive proposals were rejected.
    ProposalsRejected,
    /// Good won the missions but the Assassin found Merlin.
    MerlinAssassinated,
    /// Good won the missions and the Assassin missed.
    AssassinationFailed,
}

impl WinCondition {
    /// Stable tag for logs and records.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            WinCondition::MissionsFailed => "3_missions",
            WinCondition::ProposalsRejected => "5_rejections",
            WinCondition::MerlinAssassinated => "assassinated_merlin",
            WinCondition::AssassinationFailed => "failed_assassination",
        }
    }

    /// Faction that wins under this condition.
    #[must_use]
    pub const fn winner(self) -> Faction {
        match self {
            WinCondition::AssassinationFailed => Faction::Good,
            WinCondition::MissionsFailed
            | WinCondition::ProposalsRejected
            | WinCondition::MerlinAssassinated => Faction::Evil,
        }
    }
}

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Faction,
    pub condition: WinCondition,
    pub assassination_target: Option<AgentId>,
}

/// One resolved vote round, approved or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub mission_number: u8,
    pub leader: AgentId,
    pub team: Team,
    /// Votes in seating order at resolution time. `true` = approve.
    pub votes: Vec<(AgentId, bool)>,
    pub approved: bool,
    /// Reject counter after this round was resolved.
    pub reject_count: u8,
}

impl ProposalRecord {
    /// Number of approve votes.
    #[must_use]
    pub fn approvals(&self) -> usize {
        self.votes.iter().filter(|(_, v)| *v).count()
    }

    /// Vote cast by `agent`, if any.
    #[must_use]
    pub fn vote_of(&self, agent: AgentId) -> Option<bool> {
        self.votes.iter().find(|(a, _)| *a == agent).map(|(_, v)| *v)
    }
}

/// One completed mission. Never mutated once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub mission_number: u8,
    pub team_size: usize,
    pub leader: AgentId,
    pub team: Team,
    /// Votes of the round that approved this team, in seating order.
    pub votes: Vec<(AgentId, bool)>,
    pub approved: bool,
    /// Resolved quest cards in team order. `true` = success.
    pub quest_results: Vec<(AgentId, bool)>,
    pub fail_count: usize,
    pub success: bool,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) seating: Vec<AgentId>,
    pub(crate) phase: Phase,
    /// 1-based.
    pub(crate) mission_number: u8,
    /// Index into the fixed roster, not into the seating.
    pub(crate) leader: usize,
    pub(crate) reject_count: u8,

    pub(crate) proposed_team: Option<Team>,
    pub(crate) mission_team: Option<Team>,

    pub(crate) vote_buffer: FxHashMap<AgentId, bool>,
    pub(crate) quest_buffer: FxHashMap<AgentId, bool>,
    pub(crate) guess_buffer: FxHashMap<AgentId, [f32; AGENT_COUNT]>,

    /// Rows: submitting agent. Columns: guessed agent. Both roster-indexed.
    pub(crate) evil_guesses: AgentMap<[f32; AGENT_COUNT]>,

    pub(crate) missions: Vector<MissionRecord>,
    pub(crate) proposals: Vector<ProposalRecord>,

    pub(crate) outcome: Option<Outcome>,
}

impl GameState {
    /// Fresh state for mission 1. The leader is whoever sits in seat 0.
    #[must_use]
    pub fn new(seating: Vec<AgentId>) -> Self {
        assert!(!seating.is_empty(), "Seating order must not be empty");
        let leader = seating[0].index();

        Self {
            seating,
            phase: Phase::TeamProposal,
            mission_number: 1,
            leader,
            reject_count: 0,
            proposed_team: None,
            mission_team: None,
            vote_buffer: FxHashMap::default(),
            quest_buffer: FxHashMap::default(),
            guess_buffer: FxHashMap::default(),
            evil_guesses: AgentMap::with_value([0.0; AGENT_COUNT]),
            missions: Vector::new(),
            proposals: Vector::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.seating.len()
    }

    /// Seating order, seat 0 first.
    #[must_use]
    pub fn seating(&self) -> &[AgentId] {
        &self.seating
    }

    /// Seat index of `agent`, `None` if not seated.
    #[must_use]
    pub fn seat_of(&self, agent: AgentId) -> Option<usize> {
        self.seating.iter().position(|&a| a == agent)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn mission_number(&self) -> u8 {
        self.mission_number
    }

    /// Current leader.
    #[must_use]
    pub fn leader(&self) -> AgentId {
        AgentId::new(self.leader as u8)
    }

    /// Raw leader pointer (roster index).
    #[must_use]
    pub fn leader_index(&self) -> usize {
        self.leader
    }

    #[must_use]
    pub fn reject_count(&self) -> u8 {
        self.reject_count
    }

    #[must_use]
    pub fn proposed_team(&self) -> Option<&[AgentId]> {
        self.proposed_team.as_deref()
    }

    #[must_use]
    pub fn mission_team(&self) -> Option<&[AgentId]> {
        self.mission_team.as_deref()
    }

    /// Votes collected so far in the current vote round.
    #[must_use]
    pub fn pending_votes(&self) -> usize {
        self.vote_buffer.len()
    }

    /// Quest cards collected so far in the current quest.
    #[must_use]
    pub fn pending_quest_cards(&self) -> usize {
        self.quest_buffer.len()
    }

    /// Guesses collected so far in the evil discussion.
    #[must_use]
    pub fn pending_guesses(&self) -> usize {
        self.guess_buffer.len()
    }

    /// Row of the probability table submitted by `agent`. All zeros for
    /// agents that never submitted.
    #[must_use]
    pub fn evil_guess(&self, agent: AgentId) -> Option<&[f32; AGENT_COUNT]> {
        self.evil_guesses.get(agent)
    }

    /// Completed missions, in order.
    #[must_use]
    pub fn missions(&self) -> &Vector<MissionRecord> {
        &self.missions
    }

    /// Every resolved vote round, in order.
    #[must_use]
    pub fn proposals(&self) -> &Vector<ProposalRecord> {
        &self.proposals
    }

    /// Success flags of completed missions, in order.
    #[must_use]
    pub fn mission_results(&self) -> Vec<bool> {
        self.missions.iter().map(|m| m.success).collect()
    }

    #[must_use]
    pub fn good_wins(&self) -> usize {
        self.missions.iter().filter(|m| m.success).count()
    }

    #[must_use]
    pub fn evil_wins(&self) -> usize {
        self.missions.iter().filter(|m| !m.success).count()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Is `agent` on the currently frozen mission team?
    #[must_use]
    pub fn on_mission(&self, agent: AgentId) -> bool {
        self.mission_team
            .as_ref()
            .is_some_and(|team| team.contains(&agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seating() -> Vec<AgentId> {
        [3u8, 0, 5, 1, 4, 2].into_iter().map(AgentId::new).collect()
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(seating());

        assert_eq!(state.phase(), Phase::TeamProposal);
        assert_eq!(state.mission_number(), 1);
        assert_eq!(state.reject_count(), 0);
        assert_eq!(state.agent_count(), 6);
        assert!(state.missions().is_empty());
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_leader_is_seat_zero() {
        let state = GameState::new(seating());

        assert_eq!(state.leader(), AgentId::new(3));
        assert_eq!(state.leader_index(), 3);
    }

    #[test]
    fn test_seat_of() {
        let state = GameState::new(seating());

        assert_eq!(state.seat_of(AgentId::new(3)), Some(0));
        assert_eq!(state.seat_of(AgentId::new(2)), Some(5));
        assert_eq!(state.seat_of(AgentId::new(8)), None);
    }

    #[test]
    fn test_phase_accepted_kinds() {
        assert_eq!(Phase::TeamProposal.accepted_kind(), Some(ActionKind::Propose));
        assert_eq!(Phase::Assassination.accepted_kind(), Some(ActionKind::Assassinate));
        assert_eq!(Phase::GameOver.accepted_kind(), None);

        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_win_condition_winners() {
        assert_eq!(WinCondition::MissionsFailed.winner(), Faction::Evil);
        assert_eq!(WinCondition::ProposalsRejected.winner(), Faction::Evil);
        assert_eq!(WinCondition::MerlinAssassinated.winner(), Faction::Evil);
        assert_eq!(WinCondition::AssassinationFailed.winner(), Faction::Good);
        assert_eq!(WinCondition::ProposalsRejected.tag(), "5_rejections");
    }

    #[test]
    fn test_proposal_record_helpers() {
        let record = ProposalRecord {
            mission_number: 1,
            leader: AgentId::new(0),
            team: Team::from_slice(&[AgentId::new(0), AgentId::new(1)]),
            votes: vec![(AgentId::new(0), true), (AgentId::new(1), false), (AgentId::new(2), true)],
            approved: false,
            reject_count: 1,
        };

        assert_eq!(record.approvals(), 2);
        assert_eq!(record.vote_of(AgentId::new(1)), Some(false));
        assert_eq!(record.vote_of(AgentId::new(5)), None);
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let state = GameState::new(seating());
        let mut changed = state.clone();
        changed.reject_count = 2;

        assert_ne!(state, changed);
        assert_eq!(state.reject_count(), 0);
    }

    #[test]
    fn test_state_serde() {
        let state = GameState::new(seating());
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
