//! Error types.
//!
//! Two families:
//!
//! - [`ActionError`]: why the state machine ignored an action. These never
//!   escape [`step`](crate::rules::AgentEnvironment::step); they are absorbed
//!   as no-ops and surfaced only through the diagnostic channel.
//! - [`AvalonError`]: failures of the fallible surfaces around the core
//!   (configuration, record codec, driver liveness).

use thiserror::Error;

use super::action::ActionKind;
use super::agent::AgentId;
use super::state::Phase;

/// An action the state machine refused. Game state is untouched.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ActionError {
    #[error("{kind} is not accepted during {phase}")]
    WrongPhase { phase: Phase, kind: ActionKind },

    #[error("{agent} may not act during {phase}")]
    NotEligible { agent: AgentId, phase: Phase },

    #[error("team must have {expected} members, got {actual}")]
    InvalidProposalSize { expected: usize, actual: usize },

    #[error("{agent} is not a seated agent")]
    InvalidTeamMember { agent: AgentId },

    #[error("{agent} appears more than once in the team")]
    DuplicateTeamMember { agent: AgentId },

    #[error("assassination target {target} is outside the roster")]
    OutOfRangeTarget { target: AgentId },

    #[error("invalid guess: {reason}")]
    InvalidGuess { reason: String },

    #[error("{agent} has already terminated")]
    PostTermination { agent: AgentId },

    #[error("malformed action: {reason}")]
    Malformed { reason: String },
}

impl ActionError {
    /// Coarse category used by diagnostic counters.
    #[must_use]
    pub fn category(&self) -> RejectionKind {
        match self {
            ActionError::WrongPhase { .. }
            | ActionError::NotEligible { .. }
            | ActionError::Malformed { .. } => RejectionKind::InvalidActionForPhase,
            ActionError::InvalidProposalSize { .. }
            | ActionError::InvalidTeamMember { .. }
            | ActionError::DuplicateTeamMember { .. } => RejectionKind::InvalidProposal,
            ActionError::OutOfRangeTarget { .. } => RejectionKind::OutOfRangeTarget,
            ActionError::InvalidGuess { .. } => RejectionKind::InvalidGuess,
            ActionError::PostTermination { .. } => RejectionKind::PostTermination,
        }
    }
}

/// Categories of ignored actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RejectionKind {
    InvalidActionForPhase,
    InvalidProposal,
    OutOfRangeTarget,
    InvalidGuess,
    PostTermination,
}

/// Invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("mission {mission} needs {size} agents, must be between 1 and {max}")]
    MissionSize { mission: usize, size: usize, max: usize },

    #[error("max rejections must be at least 1")]
    MaxRejections,

    #[error("missions to win must be between 1 and 3, got {0}")]
    MissionsToWin(u8),

    #[error("seating must be a permutation of the roster")]
    Seating,
}

/// Errors from the fallible surfaces around the engine.
#[derive(Debug, Error)]
pub enum AvalonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("record codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("game {seed} did not finish within {limit} steps")]
    StepLimitExceeded { seed: u64, limit: usize },

    #[error("game {seed} has not finished")]
    GameNotFinished { seed: u64 },
}

pub type Result<T> = std::result::Result<T, AvalonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::InvalidProposalSize { expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "team must have 3 members, got 2");

        let err = ActionError::NotEligible {
            agent: AgentId::new(1),
            phase: Phase::Quest,
        };
        assert_eq!(err.to_string(), "Morgana may not act during quest");

        let err = ActionError::OutOfRangeTarget { target: AgentId::new(17) };
        assert_eq!(err.to_string(), "assassination target Agent(17) is outside the roster");
    }

    #[test]
    fn test_categories() {
        let wrong_phase = ActionError::WrongPhase {
            phase: Phase::TeamVote,
            kind: ActionKind::Quest,
        };
        assert_eq!(wrong_phase.category(), RejectionKind::InvalidActionForPhase);

        let dup = ActionError::DuplicateTeamMember { agent: AgentId::new(0) };
        assert_eq!(dup.category(), RejectionKind::InvalidProposal);

        let dead = ActionError::PostTermination { agent: AgentId::new(0) };
        assert_eq!(dead.category(), RejectionKind::PostTermination);
    }

    #[test]
    fn test_config_error_converts() {
        let err: AvalonError = ConfigError::MaxRejections.into();
        assert!(matches!(err, AvalonError::Config(ConfigError::MaxRejections)));
        assert_eq!(err.to_string(), "max rejections must be at least 1");
    }
}
