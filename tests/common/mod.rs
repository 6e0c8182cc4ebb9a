//! Helpers for driving scripted games.
#![allow(dead_code)]

use avalon_env::core::{Action, AgentId, Phase, Role, SIX_PLAYER_MISSION_SIZES};
use avalon_env::games::avalon::AvalonEnv;
use avalon_env::rules::AgentEnvironment;

pub const MERLIN: AgentId = Role::Merlin.agent();
pub const MORGANA: AgentId = Role::Morgana.agent();
pub const PERCIVAL: AgentId = Role::Percival.agent();
pub const ASSASSIN: AgentId = Role::Assassin.agent();
pub const GOOD_1: AgentId = Role::GenericGood1.agent();
pub const GOOD_2: AgentId = Role::GenericGood2.agent();

/// Morgana's probability table in [`good_sweep`], by roster id.
pub const MORGANA_GUESS: [f32; 6] = [0.9, 0.0, 0.3, 0.0, 0.1, 0.1];
/// The Assassin's probability table in [`good_sweep`], by roster id.
pub const ASSASSIN_GUESS: [f32; 6] = [0.7, 0.0, 0.5, 0.0, 0.2, 0.2];

pub fn seated(seating: &[AgentId]) -> AvalonEnv {
    let mut env = AvalonEnv::from_seed(11);
    env.reset_with_seating(seating).unwrap();
    env
}

/// Seat `i` holds agent `i`; Merlin leads first.
pub fn roster_env() -> AvalonEnv {
    seated(&AgentId::all().collect::<Vec<_>>())
}

/// Pass turns until `agent` is up, then submit `action` for it.
pub fn act(env: &mut AvalonEnv, agent: AgentId, action: Action) {
    while env.current_agent() != agent {
        env.step_malformed("pass");
    }
    env.step(action);
}

/// The current leader proposes `team`, then every agent votes `approve`.
pub fn propose_and_vote(env: &mut AvalonEnv, team: &[AgentId], approve: bool) {
    let leader = env.state().leader();
    act(env, leader, Action::propose(team));
    assert_eq!(env.state().phase(), Phase::TeamVote);
    for agent in AgentId::all() {
        act(env, agent, Action::Vote(approve));
    }
}

pub fn play_mission(env: &mut AvalonEnv, team: &[AgentId], card: bool) {
    propose_and_vote(env, team, true);
    assert_eq!(env.state().phase(), Phase::Quest);
    for &member in team {
        act(env, member, Action::Quest(card));
    }
}

/// Good wins the first three missions with all-good teams.
pub fn win_three_missions(env: &mut AvalonEnv) {
    let good = [MERLIN, PERCIVAL, GOOD_1, GOOD_2];
    for size in &SIX_PLAYER_MISSION_SIZES[..3] {
        play_mission(env, &good[..*size], true);
    }
    assert_eq!(env.state().phase(), Phase::EvilDiscussion);
}

/// Three good missions followed by both evil guesses.
pub fn good_sweep(env: &mut AvalonEnv) {
    win_three_missions(env);
    act(env, MORGANA, Action::guess(&MORGANA_GUESS));
    act(env, ASSASSIN, Action::guess(&ASSASSIN_GUESS));
    assert_eq!(env.state().phase(), Phase::Assassination);
}
