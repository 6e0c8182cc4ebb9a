//! Observation and policy integration.
//!
//! ## Overview
//!
//! - **View**: `View`, the seat-relative partial view of one agent
//! - **Encoding**: `StateEncoder` trait and `ObservationEncoder`
//! - **Policies**: `Policy` trait and the `RandomPolicy` baseline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use avalon_env::nn::{ObservationEncoder, StateEncoder};
//!
//! let encoder = ObservationEncoder::new();
//! let encoded = encoder.encode(env.state(), agent).unwrap();
//! let logits = network.forward(&encoded.tensor);
//! ```

pub mod encoder;
pub mod traits;
pub mod view;

pub use encoder::{ObservationEncoder, StateEncoder};
pub use traits::{EncodedState, Policy, RandomPolicy};
pub use view::{View, OBSERVATION_DIM};
