//! Seat-relative partial views.
//!
//! A `View` is what one agent is allowed to know. Every per-seat array is
//! rotated so the requester sits at index 0 and the others follow in
//! clockwise seating order. Two agents with the same role in different seats
//! therefore see identical views whenever their situations match.
//!
//! ## Tensor layout
//!
//! | block               | size | contents                                 |
//! |---------------------|------|------------------------------------------|
//! | role                | 6    | one-hot roster role                      |
//! | faction             | 1    | 1.0 if evil                              |
//! | phase               | 6    | one-hot                                  |
//! | mission number      | 5    | one-hot, mission 1 first                 |
//! | reject count        | 1    | count / 5                                |
//! | mission outcomes    | 10   | (success, fail) flags per mission        |
//! | fail counts         | 5    | fail cards / 6                           |
//! | mission leaders     | 30   | one-hot relative seat per mission        |
//! | known spies         | 6    | relative                                 |
//! | merlin candidates   | 6    | relative                                 |
//! | proposed team       | 6    | relative                                 |
//! | mission team        | 6    | relative                                 |
//! | leader              | 6    | one-hot relative                         |
//! | latest votes        | 12   | (approve, reject) flags per relative seat |
//! | evil guesses        | 36   | relative rows by relative columns        |

use serde::{Deserialize, Serialize};

use crate::core::{
    AgentId, Faction, GameState, Phase, Role, AGENT_COUNT, MISSION_COUNT,
};

const OBS_ROLE: usize = AGENT_COUNT;
const OBS_FACTION: usize = 1;
const OBS_PHASE: usize = Phase::ALL.len();
const OBS_MISSION_NUMBER: usize = MISSION_COUNT;
const OBS_REJECT_COUNT: usize = 1;
const OBS_MISSION_OUTCOMES: usize = MISSION_COUNT * 2;
const OBS_FAIL_COUNTS: usize = MISSION_COUNT;
const OBS_MISSION_LEADERS: usize = MISSION_COUNT * AGENT_COUNT;
const OBS_KNOWN_SPIES: usize = AGENT_COUNT;
const OBS_MERLIN_CANDIDATES: usize = AGENT_COUNT;
const OBS_PROPOSED_TEAM: usize = AGENT_COUNT;
const OBS_MISSION_TEAM: usize = AGENT_COUNT;
const OBS_LEADER: usize = AGENT_COUNT;
const OBS_LAST_VOTES: usize = AGENT_COUNT * 2;
const OBS_EVIL_GUESSES: usize = AGENT_COUNT * AGENT_COUNT;

/// Length of [`View::to_tensor`].
pub const OBSERVATION_DIM: usize = OBS_ROLE
    + OBS_FACTION
    + OBS_PHASE
    + OBS_MISSION_NUMBER
    + OBS_REJECT_COUNT
    + OBS_MISSION_OUTCOMES
    + OBS_FAIL_COUNTS
    + OBS_MISSION_LEADERS
    + OBS_KNOWN_SPIES
    + OBS_MERLIN_CANDIDATES
    + OBS_PROPOSED_TEAM
    + OBS_MISSION_TEAM
    + OBS_LEADER
    + OBS_LAST_VOTES
    + OBS_EVIL_GUESSES;

/// Normalizer for the reject counter.
const REJECT_SCALE: f32 = 5.0;

/// One agent's partial view of the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub role: Role,
    pub faction: Faction,
    pub phase: Phase,
    pub mission_number: u8,
    pub reject_count: u8,

    /// `Some(true)` for a successful mission, `None` if not yet played.
    pub mission_outcomes: [Option<bool>; MISSION_COUNT],
    pub fail_counts: [usize; MISSION_COUNT],
    /// Relative seat of each completed mission's leader.
    pub mission_leaders: [Option<usize>; MISSION_COUNT],

    pub known_spies: [bool; AGENT_COUNT],
    /// Merlin and Morgana, indistinguishable. Percival only.
    pub merlin_candidates: [bool; AGENT_COUNT],
    pub proposed_team: [bool; AGENT_COUNT],
    pub mission_team: [bool; AGENT_COUNT],
    /// Relative seat of the current leader.
    pub leader: usize,
    /// Votes of the most recently resolved round.
    pub last_votes: [Option<bool>; AGENT_COUNT],
    /// Evil probability table. Evil requesters only.
    pub evil_guesses: [[f32; AGENT_COUNT]; AGENT_COUNT],
}

/// Maps roster agents to seats relative to one requester.
struct Perspective<'a> {
    state: &'a GameState,
    seat: usize,
}

impl<'a> Perspective<'a> {
    fn new(state: &'a GameState, agent: AgentId) -> Option<Self> {
        state.seat_of(agent).map(|seat| Self { state, seat })
    }

    /// Relative seat of `agent`, `None` if unseated.
    fn rel(&self, agent: AgentId) -> Option<usize> {
        let n = self.state.agent_count();
        self.state
            .seat_of(agent)
            .map(|abs| (abs + n - self.seat) % n)
    }

    fn mark(&self, agents: impl IntoIterator<Item = AgentId>) -> [bool; AGENT_COUNT] {
        let mut flags = [false; AGENT_COUNT];
        for rel in agents.into_iter().filter_map(|a| self.rel(a)) {
            flags[rel] = true;
        }
        flags
    }
}

impl View {
    /// Build `agent`'s view of `state`. `None` if `agent` is not seated.
    #[must_use]
    pub fn build(state: &GameState, agent: AgentId) -> Option<Self> {
        let role = agent.role()?;
        let me = Perspective::new(state, agent)?;
        let faction = role.faction();

        let known_spies = match role {
            Role::Merlin | Role::Morgana | Role::Assassin => {
                me.mark(Role::members(Faction::Evil).map(Role::agent))
            }
            _ => [false; AGENT_COUNT],
        };

        let merlin_candidates = if role == Role::Percival {
            me.mark([Role::Merlin.agent(), Role::Morgana.agent()])
        } else {
            [false; AGENT_COUNT]
        };

        let mut mission_outcomes = [None; MISSION_COUNT];
        let mut fail_counts = [0; MISSION_COUNT];
        let mut mission_leaders = [None; MISSION_COUNT];
        for (i, mission) in state.missions().iter().take(MISSION_COUNT).enumerate() {
            mission_outcomes[i] = Some(mission.success);
            fail_counts[i] = mission.fail_count;
            mission_leaders[i] = me.rel(mission.leader);
        }

        let mut last_votes = [None; AGENT_COUNT];
        if let Some(round) = state.proposals().last() {
            for &(voter, approve) in &round.votes {
                if let Some(rel) = me.rel(voter) {
                    last_votes[rel] = Some(approve);
                }
            }
        }

        let mut evil_guesses = [[0.0; AGENT_COUNT]; AGENT_COUNT];
        if faction == Faction::Evil {
            for &submitter in state.seating() {
                let (Some(row_rel), Some(row)) = (me.rel(submitter), state.evil_guess(submitter))
                else {
                    continue;
                };
                for (column, &p) in row.iter().enumerate() {
                    if let Some(col_rel) = me.rel(AgentId::new(column as u8)) {
                        evil_guesses[row_rel][col_rel] = p;
                    }
                }
            }
        }

        Some(Self {
            role,
            faction,
            phase: state.phase(),
            mission_number: state.mission_number(),
            reject_count: state.reject_count(),
            mission_outcomes,
            fail_counts,
            mission_leaders,
            known_spies,
            merlin_candidates,
            proposed_team: me.mark(state.proposed_team().unwrap_or_default().iter().copied()),
            mission_team: me.mark(state.mission_team().unwrap_or_default().iter().copied()),
            leader: me.rel(state.leader()).unwrap_or(0),
            last_votes,
            evil_guesses,
        })
    }

    #[must_use]
    pub fn is_evil(&self) -> bool {
        self.faction == Faction::Evil
    }

    /// Flatten into a vector of length [`OBSERVATION_DIM`].
    #[must_use]
    pub fn to_tensor(&self) -> Vec<f32> {
        let mut obs = Vec::with_capacity(OBSERVATION_DIM);

        push_one_hot(&mut obs, OBS_ROLE, Some(self.role as usize));
        obs.push(flag(self.is_evil()));
        push_one_hot(&mut obs, OBS_PHASE, Some(self.phase.index()));
        push_one_hot(
            &mut obs,
            OBS_MISSION_NUMBER,
            usize::from(self.mission_number).checked_sub(1),
        );
        obs.push((f32::from(self.reject_count) / REJECT_SCALE).min(1.0));

        for outcome in self.mission_outcomes {
            obs.push(flag(outcome == Some(true)));
            obs.push(flag(outcome == Some(false)));
        }
        for fails in self.fail_counts {
            obs.push(fails as f32 / AGENT_COUNT as f32);
        }
        for leader in self.mission_leaders {
            push_one_hot(&mut obs, AGENT_COUNT, leader);
        }

        for flags in [
            &self.known_spies,
            &self.merlin_candidates,
            &self.proposed_team,
            &self.mission_team,
        ] {
            obs.extend(flags.iter().map(|&f| flag(f)));
        }
        push_one_hot(&mut obs, OBS_LEADER, Some(self.leader));

        for vote in self.last_votes {
            obs.push(flag(vote == Some(true)));
            obs.push(flag(vote == Some(false)));
        }
        for row in &self.evil_guesses {
            obs.extend_from_slice(row);
        }

        debug_assert_eq!(obs.len(), OBSERVATION_DIM);
        obs
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn push_one_hot(obs: &mut Vec<f32>, width: usize, hot: Option<usize>) {
    let start = obs.len();
    obs.resize(start + width, 0.0);
    if let Some(i) = hot.filter(|&i| i < width) {
        obs[start + i] = 1.0;
    }
}
