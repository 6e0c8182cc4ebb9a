//! Action representation.
//!
//! Every action is one of five kinds, each legal in exactly one phase:
//!
//! | kind          | phase             | payload                        |
//! |---------------|-------------------|--------------------------------|
//! | `Propose`     | team proposal     | team of agents                 |
//! | `Vote`        | team vote         | approve / reject               |
//! | `Quest`       | quest             | success / fail                 |
//! | `Guess`       | evil discussion   | one Merlin probability per seat |
//! | `Assassinate` | assassination     | target agent                   |
//!
//! Payloads are not validated on construction: the state machine decides
//! whether an action is acceptable and silently ignores it otherwise.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::agent::{AgentId, AGENT_COUNT};

/// A proposed or frozen mission team.
///
/// The largest mission needs 4 agents, so teams never spill to the heap.
pub type Team = SmallVec<[AgentId; 5]>;

/// A complete agent action.
///
/// ## Example
///
/// ```
/// use avalon_env::core::{Action, ActionKind, AgentId};
///
/// let propose = Action::propose(&[AgentId::new(0), AgentId::new(4)]);
/// assert_eq!(propose.kind(), ActionKind::Propose);
///
/// let vote = Action::Vote(true);
/// assert_eq!(vote.kind(), ActionKind::Vote);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Leader proposes a mission team.
    Propose(Team),
    /// Approve (`true`) or reject the proposed team.
    Vote(bool),
    /// Quest card: success (`true`) or fail.
    Quest(bool),
    /// Evil agent's guess of who is Merlin, indexed by roster id.
    Guess(SmallVec<[f32; AGENT_COUNT]>),
    /// Assassin's final guess.
    Assassinate(AgentId),
}

impl Action {
    /// Build a proposal from a slice of agents.
    #[must_use]
    pub fn propose(team: &[AgentId]) -> Self {
        Action::Propose(SmallVec::from_slice(team))
    }

    /// Build a guess from a slice of probabilities.
    #[must_use]
    pub fn guess(probabilities: &[f32]) -> Self {
        Action::Guess(SmallVec::from_slice(probabilities))
    }

    /// The tag of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Propose(_) => ActionKind::Propose,
            Action::Vote(_) => ActionKind::Vote,
            Action::Quest(_) => ActionKind::Quest,
            Action::Guess(_) => ActionKind::Guess,
            Action::Assassinate(_) => ActionKind::Assassinate,
        }
    }
}

/// Action tag without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Propose,
    Vote,
    Quest,
    Guess,
    Assassinate,
}

impl ActionKind {
    /// Parse the lowercase tag used by external drivers.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "propose" => Some(ActionKind::Propose),
            "vote" => Some(ActionKind::Vote),
            "quest" => Some(ActionKind::Quest),
            "guess" => Some(ActionKind::Guess),
            "assassinate" => Some(ActionKind::Assassinate),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ActionKind::Propose => "propose",
            ActionKind::Vote => "vote",
            ActionKind::Quest => "quest",
            ActionKind::Guess => "guess",
            ActionKind::Assassinate => "assassinate",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A recorded action with metadata for replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The agent whose turn it was.
    pub agent: AgentId,

    /// The action submitted.
    pub action: Action,

    /// Step number (one per scheduler tick, starting at 0).
    pub step: u32,

    /// Whether the state machine accepted the action.
    pub accepted: bool,
}

impl ActionRecord {
    #[must_use]
    pub fn new(agent: AgentId, action: Action, step: u32, accepted: bool) -> Self {
        Self {
            agent,
            action,
            step,
            accepted,
        }
    }
}
