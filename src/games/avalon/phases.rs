//! Phase state machine.
//!
//! `apply` is the only writer of [`GameState`]. Each handler validates the
//! whole action first and mutates only once it is known to be acceptable,
//! so a refused action leaves the state exactly as it was.
//!
//! ```text
//! TEAM_PROPOSAL --propose--> TEAM_VOTE --all voted, approved--> QUEST
//!       ^                        |                                |
//!       +-------rejected---------+        all cards in, mission < target
//!       +---------------------------------------------------------+
//!
//! QUEST --good reaches target--> EVIL_DISCUSSION --all evil guessed--> ASSASSINATION
//! any terminal condition ------> GAME_OVER
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    Action, ActionError, ActionKind, AgentId, AgentMap, Faction, GameConfig, GameState,
    MissionRecord, Outcome, Phase, ProposalRecord, Role, Team, WinCondition, AGENT_COUNT,
};
use crate::rules::{faction_reward, mission_succeeds, resolve_quest_card, vote_approved};

/// Result of one completed mission, broadcast to every agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub mission_number: u8,
    pub success: bool,
    pub fail_count: usize,
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Set when this action completed a mission.
    pub mission: Option<MissionSummary>,
    /// Set when this action ended the game.
    pub outcome: Option<Outcome>,
}

impl Transition {
    fn new(from: Phase) -> Self {
        Self {
            from,
            to: from,
            mission: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn changed_phase(&self) -> bool {
        self.from != self.to
    }
}

/// Apply `action` on behalf of `agent`.
///
/// `Err` means the action was ignored and `state` is unchanged.
pub fn apply(
    config: &GameConfig,
    state: &mut GameState,
    agent: AgentId,
    action: Action,
) -> Result<Transition, ActionError> {
    let mut transition = Transition::new(state.phase);

    match (state.phase, action) {
        (Phase::GameOver, _) => return Err(ActionError::PostTermination { agent }),
        (Phase::TeamProposal, Action::Propose(team)) => propose(config, state, agent, team)?,
        (Phase::TeamVote, Action::Vote(approve)) => {
            vote(config, state, agent, approve, &mut transition)?
        }
        (Phase::Quest, Action::Quest(success)) => {
            quest(config, state, agent, success, &mut transition)?
        }
        (Phase::EvilDiscussion, Action::Guess(probabilities)) => {
            guess(state, agent, &probabilities)?
        }
        (Phase::Assassination, Action::Assassinate(target)) => {
            assassinate(state, agent, target, &mut transition)?
        }
        (phase, action) => {
            return Err(ActionError::WrongPhase {
                phase,
                kind: action.kind(),
            })
        }
    }

    transition.to = state.phase;
    Ok(transition)
}

/// May `agent` act in the current phase?
#[must_use]
pub fn is_eligible(state: &GameState, agent: AgentId) -> bool {
    match state.phase {
        Phase::TeamProposal => agent == state.leader(),
        Phase::TeamVote => state.seat_of(agent).is_some(),
        Phase::Quest => state.on_mission(agent),
        Phase::EvilDiscussion => agent.faction() == Some(Faction::Evil),
        Phase::Assassination => agent.role() == Some(Role::Assassin),
        Phase::GameOver => false,
    }
}

/// The action kind `agent` should submit now, or `None` if any action
/// would be ignored.
#[must_use]
pub fn expected_action(state: &GameState, agent: AgentId) -> Option<ActionKind> {
    if is_eligible(state, agent) {
        state.phase.accepted_kind()
    } else {
        None
    }
}

/// Terminal reward per agent for `outcome`.
#[must_use]
pub fn terminal_rewards(outcome: &Outcome) -> AgentMap<f32> {
    let mut rewards = AgentMap::with_default();
    for agent in AgentId::all() {
        if let Some(faction) = agent.faction() {
            rewards[agent] = faction_reward(outcome.winner, faction);
        }
    }
    rewards
}

fn not_eligible(state: &GameState, agent: AgentId) -> ActionError {
    ActionError::NotEligible {
        agent,
        phase: state.phase,
    }
}

fn propose(
    config: &GameConfig,
    state: &mut GameState,
    agent: AgentId,
    team: Team,
) -> Result<(), ActionError> {
    if agent != state.leader() {
        return Err(not_eligible(state, agent));
    }

    let expected = config.mission_size(state.mission_number).unwrap_or(0);
    if team.len() != expected {
        return Err(ActionError::InvalidProposalSize {
            expected,
            actual: team.len(),
        });
    }
    for (i, &member) in team.iter().enumerate() {
        if state.seat_of(member).is_none() {
            return Err(ActionError::InvalidTeamMember { agent: member });
        }
        if team[..i].contains(&member) {
            return Err(ActionError::DuplicateTeamMember { agent: member });
        }
    }

    debug!(
        mission = state.mission_number,
        leader = %agent,
        team = ?team.as_slice(),
        "team proposed"
    );
    state.proposed_team = Some(team);
    state.vote_buffer.clear();
    state.phase = Phase::TeamVote;
    Ok(())
}

fn vote(
    config: &GameConfig,
    state: &mut GameState,
    agent: AgentId,
    approve: bool,
    transition: &mut Transition,
) -> Result<(), ActionError> {
    if state.seat_of(agent).is_none() {
        return Err(not_eligible(state, agent));
    }

    // A second vote from the same agent replaces the first.
    state.vote_buffer.insert(agent, approve);
    if state.vote_buffer.len() == state.agent_count() {
        resolve_vote(config, state, transition);
    }
    Ok(())
}

fn resolve_vote(config: &GameConfig, state: &mut GameState, transition: &mut Transition) {
    let votes: Vec<(AgentId, bool)> = state
        .seating
        .iter()
        .filter_map(|agent| state.vote_buffer.get(agent).map(|&v| (*agent, v)))
        .collect();
    state.vote_buffer.clear();

    let approvals = votes.iter().filter(|(_, v)| *v).count();
    let approved = vote_approved(approvals, state.agent_count());
    let team = state.proposed_team.take().unwrap_or_default();
    let leader = state.leader();

    if approved {
        state.reject_count = 0;
        state.quest_buffer.clear();
        state.mission_team = Some(team.clone());
        state.phase = Phase::Quest;
    } else {
        state.reject_count = state.reject_count.saturating_add(1);
    }

    debug!(
        mission = state.mission_number,
        approvals,
        approved,
        reject_count = state.reject_count,
        "vote resolved"
    );

    state.proposals.push_back(ProposalRecord {
        mission_number: state.mission_number,
        leader,
        team,
        votes,
        approved,
        reject_count: state.reject_count,
    });

    if !approved {
        if state.reject_count >= config.max_rejections {
            finish(state, WinCondition::ProposalsRejected, None, transition);
        } else {
            rotate_leader(state);
            state.phase = Phase::TeamProposal;
        }
    }
}

fn quest(
    config: &GameConfig,
    state: &mut GameState,
    agent: AgentId,
    success: bool,
    transition: &mut Transition,
) -> Result<(), ActionError> {
    let faction = match agent.faction() {
        Some(faction) if state.on_mission(agent) => faction,
        _ => return Err(not_eligible(state, agent)),
    };

    state
        .quest_buffer
        .insert(agent, resolve_quest_card(faction, success));

    let team_size = state.mission_team.as_ref().map_or(0, |team| team.len());
    if state.quest_buffer.len() == team_size {
        resolve_mission(config, state, transition);
    }
    Ok(())
}

fn resolve_mission(config: &GameConfig, state: &mut GameState, transition: &mut Transition) {
    let team = state.mission_team.take().unwrap_or_default();
    let quest_results: Vec<(AgentId, bool)> = team
        .iter()
        .filter_map(|agent| state.quest_buffer.get(agent).map(|&card| (*agent, card)))
        .collect();
    state.quest_buffer.clear();

    let fail_count = quest_results.iter().filter(|(_, card)| !card).count();
    let success = mission_succeeds(state.agent_count(), state.mission_number, fail_count);

    let (leader, votes) = state
        .proposals
        .last()
        .map(|p| (p.leader, p.votes.clone()))
        .unwrap_or_else(|| (state.leader(), Vec::new()));

    state.missions.push_back(MissionRecord {
        mission_number: state.mission_number,
        team_size: team.len(),
        leader,
        team,
        votes,
        approved: true,
        quest_results,
        fail_count,
        success,
    });

    let summary = MissionSummary {
        mission_number: state.mission_number,
        success,
        fail_count,
    };
    debug!(
        mission = summary.mission_number,
        success, fail_count, "mission resolved"
    );
    transition.mission = Some(summary);

    let target = usize::from(config.missions_to_win);
    if state.good_wins() >= target {
        state.phase = Phase::EvilDiscussion;
        state.guess_buffer.clear();
    } else if state.evil_wins() >= target {
        finish(state, WinCondition::MissionsFailed, None, transition);
    } else {
        state.mission_number += 1;
        state.reject_count = 0;
        rotate_leader(state);
        state.phase = Phase::TeamProposal;
    }
}

fn guess(state: &mut GameState, agent: AgentId, probabilities: &[f32]) -> Result<(), ActionError> {
    if agent.faction() != Some(Faction::Evil) {
        return Err(not_eligible(state, agent));
    }
    if probabilities.len() != AGENT_COUNT {
        return Err(ActionError::InvalidGuess {
            reason: format!(
                "expected {} probabilities, got {}",
                AGENT_COUNT,
                probabilities.len()
            ),
        });
    }
    // NaN fails the range check too.
    if let Some(bad) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(ActionError::InvalidGuess {
            reason: format!("probability {bad} outside [0, 1]"),
        });
    }

    let mut row = [0.0; AGENT_COUNT];
    row.copy_from_slice(probabilities);
    state.guess_buffer.insert(agent, row);

    if state.guess_buffer.len() == Role::members(Faction::Evil).count() {
        let rows: SmallVec<[(AgentId, [f32; AGENT_COUNT]); 2]> = state.guess_buffer.drain().collect();
        for (submitter, row) in rows {
            state.evil_guesses[submitter] = row;
        }
        debug!("evil discussion closed");
        state.phase = Phase::Assassination;
    }
    Ok(())
}

fn assassinate(
    state: &mut GameState,
    agent: AgentId,
    target: AgentId,
    transition: &mut Transition,
) -> Result<(), ActionError> {
    if agent.role() != Some(Role::Assassin) {
        return Err(not_eligible(state, agent));
    }
    let condition = match target.role() {
        Some(Role::Merlin) => WinCondition::MerlinAssassinated,
        Some(_) => WinCondition::AssassinationFailed,
        None => return Err(ActionError::OutOfRangeTarget { target }),
    };

    finish(state, condition, Some(target), transition);
    Ok(())
}

/// Hand leadership to the next roster index. The seating does not take part.
fn rotate_leader(state: &mut GameState) {
    state.leader = (state.leader + 1) % state.agent_count();
}

fn finish(
    state: &mut GameState,
    condition: WinCondition,
    assassination_target: Option<AgentId>,
    transition: &mut Transition,
) {
    let outcome = Outcome {
        winner: condition.winner(),
        condition,
        assassination_target,
    };
    state.phase = Phase::GameOver;
    state.proposed_team = None;
    state.vote_buffer.clear();
    state.quest_buffer.clear();
    state.guess_buffer.clear();
    state.outcome = Some(outcome);
    transition.outcome = Some(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SIX_PLAYER_MISSION_SIZES;

    fn agents(ids: &[u8]) -> Vec<AgentId> {
        ids.iter().copied().map(AgentId::new).collect()
    }

    fn roster_state() -> GameState {
        GameState::new(AgentId::all().collect())
    }

    fn vote_all(config: &GameConfig, state: &mut GameState, approve: bool) -> Transition {
        let mut last = None;
        for agent in AgentId::all() {
            last = Some(apply(config, state, agent, Action::Vote(approve)).unwrap());
        }
        last.unwrap()
    }

    /// Propose a team of Good agents and get it approved.
    fn approve_good_team(config: &GameConfig, state: &mut GameState) -> Team {
        let size = config.mission_size(state.mission_number).unwrap();
        let team: Team = [0u8, 2, 4, 5][..size].iter().copied().map(AgentId::new).collect();
        let leader = state.leader();
        apply(config, state, leader, Action::Propose(team.clone())).unwrap();
        vote_all(config, state, true);
        team
    }

    #[test]
    fn test_propose_moves_to_vote() {
        let config = GameConfig::default();
        let mut state = roster_state();

        let t = apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1]))).unwrap();

        assert_eq!(t.from, Phase::TeamProposal);
        assert_eq!(t.to, Phase::TeamVote);
        assert_eq!(state.proposed_team(), Some(agents(&[0, 1]).as_slice()));
    }

    #[test]
    fn test_invalid_proposals_leave_state_unchanged() {
        let config = GameConfig::default();
        let mut state = roster_state();
        let before = state.clone();

        let cases = [
            (AgentId::new(1), Action::propose(&agents(&[0, 1]))),
            (AgentId::new(0), Action::propose(&agents(&[0]))),
            (AgentId::new(0), Action::propose(&agents(&[0, 0]))),
            (AgentId::new(0), Action::propose(&agents(&[0, 9]))),
            (AgentId::new(0), Action::Vote(true)),
        ];
        for (agent, action) in cases {
            assert!(apply(&config, &mut state, agent, action).is_err());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_proposal_error_kinds() {
        let config = GameConfig::default();
        let mut state = roster_state();

        assert_eq!(
            apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1, 2]))),
            Err(ActionError::InvalidProposalSize { expected: 2, actual: 3 })
        );
        assert_eq!(
            apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[3, 3]))),
            Err(ActionError::DuplicateTeamMember { agent: AgentId::new(3) })
        );
        assert_eq!(
            apply(&config, &mut state, AgentId::new(2), Action::propose(&agents(&[0, 1]))),
            Err(ActionError::NotEligible {
                agent: AgentId::new(2),
                phase: Phase::TeamProposal
            })
        );
    }

    #[test]
    fn test_rejection_rotates_leader() {
        let config = GameConfig::default();
        let mut state = roster_state();

        apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1]))).unwrap();
        let t = vote_all(&config, &mut state, false);

        assert_eq!(t.to, Phase::TeamProposal);
        assert_eq!(state.reject_count(), 1);
        assert_eq!(state.leader(), AgentId::new(1));
        assert!(state.proposed_team().is_none());
        assert_eq!(state.proposals().len(), 1);
        assert!(!state.proposals()[0].approved);
    }

    #[test]
    fn test_leadership_walks_the_roster_not_the_seating() {
        let config = GameConfig::default();
        let mut state = GameState::new(agents(&[3, 5, 0, 2, 4, 1]));
        assert_eq!(state.leader_index(), 3);

        // Four rejections rotate by roster index, wrapping past the last agent.
        for expected in [4, 5, 0, 1] {
            let leader = state.leader();
            apply(&config, &mut state, leader, Action::propose(&agents(&[0, 1]))).unwrap();
            vote_all(&config, &mut state, false);
            assert_eq!(state.leader_index(), expected);
        }

        // An approved mission hands leadership on as well.
        let leader = state.leader();
        apply(&config, &mut state, leader, Action::propose(&agents(&[0, 1]))).unwrap();
        vote_all(&config, &mut state, true);
        for member in agents(&[0, 1]) {
            apply(&config, &mut state, member, Action::Quest(true)).unwrap();
        }
        assert_eq!(state.mission_number(), 2);
        assert_eq!(state.leader(), AgentId::new(2));
        assert_eq!(state.missions()[0].leader, AgentId::new(1));
    }

    #[test]
    fn test_exact_majority_approves() {
        let config = GameConfig::default();
        let mut state = roster_state();
        apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1]))).unwrap();

        for (i, agent) in AgentId::all().enumerate() {
            apply(&config, &mut state, agent, Action::Vote(i < 4)).unwrap();
        }

        assert_eq!(state.phase(), Phase::Quest);
        assert_eq!(state.reject_count(), 0);
        assert_eq!(state.mission_team(), Some(agents(&[0, 1]).as_slice()));
    }

    #[test]
    fn test_three_approvals_reject() {
        let config = GameConfig::default();
        let mut state = roster_state();
        apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1]))).unwrap();

        for (i, agent) in AgentId::all().enumerate() {
            apply(&config, &mut state, agent, Action::Vote(i < 3)).unwrap();
        }

        assert_eq!(state.phase(), Phase::TeamProposal);
        assert_eq!(state.reject_count(), 1);
    }

    #[test]
    fn test_revote_overwrites() {
        let config = GameConfig::default();
        let mut state = roster_state();
        apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 1]))).unwrap();

        apply(&config, &mut state, AgentId::new(0), Action::Vote(false)).unwrap();
        apply(&config, &mut state, AgentId::new(0), Action::Vote(true)).unwrap();
        assert_eq!(state.pending_votes(), 1);
        assert_eq!(state.phase(), Phase::TeamVote);
    }

    #[test]
    fn test_five_rejections_end_game() {
        let config = GameConfig::default();
        let mut state = roster_state();

        let mut last = None;
        for _ in 0..5 {
            let leader = state.leader();
            apply(&config, &mut state, leader, Action::propose(&agents(&[0, 1]))).unwrap();
            last = Some(vote_all(&config, &mut state, false));
        }

        let t = last.unwrap();
        assert_eq!(t.to, Phase::GameOver);
        let outcome = t.outcome.unwrap();
        assert_eq!(outcome.winner, Faction::Evil);
        assert_eq!(outcome.condition, WinCondition::ProposalsRejected);
        assert_eq!(state.reject_count(), 5);
    }

    #[test]
    fn test_good_fail_card_is_overridden() {
        let config = GameConfig::default();
        let mut state = roster_state();
        approve_good_team(&config, &mut state);

        apply(&config, &mut state, AgentId::new(0), Action::Quest(false)).unwrap();
        let t = apply(&config, &mut state, AgentId::new(2), Action::Quest(false)).unwrap();

        let summary = t.mission.unwrap();
        assert!(summary.success);
        assert_eq!(summary.fail_count, 0);
        assert_eq!(state.mission_number(), 2);
        assert_eq!(state.leader(), AgentId::new(1));
        assert_eq!(state.phase(), Phase::TeamProposal);
    }

    #[test]
    fn test_evil_fail_card_fails_mission() {
        let config = GameConfig::default();
        let mut state = roster_state();
        apply(&config, &mut state, AgentId::new(0), Action::propose(&agents(&[0, 3]))).unwrap();
        vote_all(&config, &mut state, true);

        apply(&config, &mut state, AgentId::new(3), Action::Quest(false)).unwrap();
        let t = apply(&config, &mut state, AgentId::new(0), Action::Quest(true)).unwrap();

        let summary = t.mission.unwrap();
        assert!(!summary.success);
        assert_eq!(summary.fail_count, 1);
        assert_eq!(state.missions()[0].quest_results.len(), 2);
        assert_eq!(state.evil_wins(), 1);
    }

    #[test]
    fn test_off_team_quest_card_ignored() {
        let config = GameConfig::default();
        let mut state = roster_state();
        approve_good_team(&config, &mut state);
        let before = state.clone();

        let err = apply(&config, &mut state, AgentId::new(3), Action::Quest(false)).unwrap_err();
        assert_eq!(err.category(), crate::core::RejectionKind::InvalidActionForPhase);
        assert_eq!(state, before);
    }

    #[test]
    fn test_three_successes_open_discussion_then_assassination() {
        let config = GameConfig::default();
        let mut state = roster_state();

        for _ in 0..3 {
            let team = approve_good_team(&config, &mut state);
            for agent in team {
                apply(&config, &mut state, agent, Action::Quest(true)).unwrap();
            }
        }
        assert_eq!(state.phase(), Phase::EvilDiscussion);
        assert_eq!(state.good_wins(), 3);

        // Good agents cannot guess.
        assert!(apply(&config, &mut state, AgentId::new(0), Action::guess(&[0.5; 6])).is_err());
        // Bad guesses are ignored.
        assert!(apply(&config, &mut state, AgentId::new(1), Action::guess(&[0.5; 5])).is_err());
        assert!(apply(&config, &mut state, AgentId::new(1), Action::guess(&[1.5; 6])).is_err());
        assert!(apply(&config, &mut state, AgentId::new(1), Action::guess(&[f32::NAN; 6])).is_err());

        apply(&config, &mut state, AgentId::new(1), Action::guess(&[0.9, 0.0, 0.1, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(state.phase(), Phase::EvilDiscussion);
        let t = apply(&config, &mut state, AgentId::new(3), Action::guess(&[0.2; 6])).unwrap();

        assert_eq!(t.to, Phase::Assassination);
        assert_eq!(state.evil_guess(AgentId::new(1)).unwrap()[0], 0.9);
        assert_eq!(state.evil_guess(AgentId::new(3)).unwrap()[5], 0.2);
        assert_eq!(state.evil_guess(AgentId::new(0)).unwrap(), &[0.0; 6]);
    }

    fn at_assassination() -> (GameConfig, GameState) {
        let config = GameConfig::default();
        let mut state = roster_state();
        for _ in 0..3 {
            let team = approve_good_team(&config, &mut state);
            for agent in team {
                apply(&config, &mut state, agent, Action::Quest(true)).unwrap();
            }
        }
        apply(&config, &mut state, AgentId::new(1), Action::guess(&[0.1; 6])).unwrap();
        apply(&config, &mut state, AgentId::new(3), Action::guess(&[0.1; 6])).unwrap();
        (config, state)
    }

    #[test]
    fn test_assassinating_merlin_wins_for_evil() {
        let (config, mut state) = at_assassination();

        let t = apply(&config, &mut state, AgentId::new(3), Action::Assassinate(AgentId::new(0))).unwrap();

        let outcome = t.outcome.unwrap();
        assert_eq!(outcome.winner, Faction::Evil);
        assert_eq!(outcome.condition, WinCondition::MerlinAssassinated);
        assert_eq!(outcome.assassination_target, Some(AgentId::new(0)));
    }

    #[test]
    fn test_missed_assassination_wins_for_good() {
        let (config, mut state) = at_assassination();

        // Only the Assassin may strike, and only at seated agents.
        assert!(apply(&config, &mut state, AgentId::new(1), Action::Assassinate(AgentId::new(0))).is_err());
        assert_eq!(
            apply(&config, &mut state, AgentId::new(3), Action::Assassinate(AgentId::new(6))),
            Err(ActionError::OutOfRangeTarget { target: AgentId::new(6) })
        );

        let t = apply(&config, &mut state, AgentId::new(3), Action::Assassinate(AgentId::new(2))).unwrap();
        let outcome = t.outcome.unwrap();
        assert_eq!(outcome.winner, Faction::Good);
        assert_eq!(outcome.condition, WinCondition::AssassinationFailed);

        assert_eq!(
            apply(&config, &mut state, AgentId::new(0), Action::Vote(true)),
            Err(ActionError::PostTermination { agent: AgentId::new(0) })
        );
    }

    #[test]
    fn test_three_failed_missions_end_game() {
        let config = GameConfig::default();
        let mut state = roster_state();

        for _ in 0..3 {
            let size = config.mission_size(state.mission_number()).unwrap();
            let mut team = agents(&[1, 3]);
            team.extend(agents(&[0, 2, 4])[..size - 2].iter().copied());
            let leader = state.leader();
            apply(&config, &mut state, leader, Action::propose(&team)).unwrap();
            vote_all(&config, &mut state, true);
            for agent in team {
                apply(&config, &mut state, agent, Action::Quest(false)).unwrap();
            }
        }

        let outcome = state.outcome().unwrap();
        assert_eq!(outcome.condition, WinCondition::MissionsFailed);
        assert_eq!(outcome.winner, Faction::Evil);
        assert_eq!(state.missions().len(), 3);
        assert_eq!(
            state.missions().iter().map(|m| m.team_size).collect::<Vec<_>>(),
            SIX_PLAYER_MISSION_SIZES[..3].to_vec()
        );
    }

    #[test]
    fn test_expected_action() {
        let state = roster_state();
        assert_eq!(expected_action(&state, AgentId::new(0)), Some(ActionKind::Propose));
        assert_eq!(expected_action(&state, AgentId::new(1)), None);
    }

    #[test]
    fn test_terminal_rewards_split_by_faction() {
        let outcome = Outcome {
            winner: Faction::Good,
            condition: WinCondition::AssassinationFailed,
            assassination_target: Some(AgentId::new(2)),
        };
        let rewards = terminal_rewards(&outcome);

        assert_eq!(rewards[AgentId::new(0)], 1.0);
        assert_eq!(rewards[AgentId::new(1)], -1.0);
        assert_eq!(rewards[AgentId::new(3)], -1.0);
        assert_eq!(rewards.values().sum::<f32>(), 2.0);
    }
}
