//! State encoding for neural network input.
//!
//! Transforms game state into tensor representations suitable for neural networks.

use crate::core::{AgentId, GameState};
use crate::nn::traits::EncodedState;
use crate::nn::view::{View, OBSERVATION_DIM};

/// Encodes game state into tensors for neural network input.
pub trait StateEncoder: Send + Sync {
    /// Encode the game state from an agent's perspective.
    ///
    /// The encoding must hide everything `perspective` may not see.
    /// Returns `None` if `perspective` is not seated.
    fn encode(&self, state: &GameState, perspective: AgentId) -> Option<EncodedState>;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;
}

/// Flat encoder over the seat-relative [`View`].
///
/// Total features = [`OBSERVATION_DIM`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ObservationEncoder;

impl ObservationEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode an already built view.
    #[must_use]
    pub fn encode_view(&self, view: &View) -> EncodedState {
        EncodedState::new(view.to_tensor(), self.output_shape())
    }
}

impl StateEncoder for ObservationEncoder {
    fn encode(&self, state: &GameState, perspective: AgentId) -> Option<EncodedState> {
        View::build(state, perspective).map(|view| self.encode_view(&view))
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_DIM]
    }
}
