//! Policy interface and encoded tensors.
//!
//! These traits define the interface between the environment and whatever
//! chooses actions: a learned network behind PyO3, a scripted bot, or the
//! random baseline used for testing.

use serde::{Deserialize, Serialize};

use crate::core::{Action, AgentId, GameConfig, GameRng, Phase, Team, AGENT_COUNT};
use crate::nn::view::View;

/// Encoded observation as a flat tensor for neural network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Zero-filled tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Chooses an action for the agent whose turn it is.
///
/// Implementations see only the agent's own [`View`]. Returning an action
/// the current phase does not accept is allowed; the environment ignores it.
pub trait Policy {
    fn act(&mut self, agent: AgentId, view: &View, rng: &mut GameRng) -> Action;
}

/// Uniform random baseline.
///
/// Always submits the kind of action the current phase accepts, with a
/// random payload of the right shape: a random team of the required size,
/// coin-flip votes and quest cards, random guesses, a random target.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    config: GameConfig,
    approve_probability: f64,
    success_probability: f64,
}

impl RandomPolicy {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            approve_probability: 0.5,
            success_probability: 0.5,
        }
    }

    /// Probability of approving a proposed team.
    #[must_use]
    pub fn with_approve_probability(mut self, p: f64) -> Self {
        self.approve_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Probability that an evil agent plays a success card.
    #[must_use]
    pub fn with_success_probability(mut self, p: f64) -> Self {
        self.success_probability = p.clamp(0.0, 1.0);
        self
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _agent: AgentId, view: &View, rng: &mut GameRng) -> Action {
        let roster: Vec<AgentId> = AgentId::all().collect();

        match view.phase {
            Phase::TeamProposal => {
                let size = self.config.mission_size(view.mission_number).unwrap_or(0);
                let team: Team = rng.choose_multiple(&roster, size).into_iter().collect();
                Action::Propose(team)
            }
            Phase::TeamVote => Action::Vote(rng.gen_bool(self.approve_probability)),
            Phase::Quest => Action::Quest(rng.gen_bool(self.success_probability)),
            Phase::EvilDiscussion => {
                let guess: [f32; AGENT_COUNT] = std::array::from_fn(|_| rng.gen_unit());
                Action::guess(&guess)
            }
            // Game over still needs a placeholder; it is ignored either way.
            Phase::Assassination | Phase::GameOver => {
                let target = rng.choose(&roster).copied().unwrap_or(AgentId::new(0));
                Action::Assassinate(target)
            }
        }
    }
}
