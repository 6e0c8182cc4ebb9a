//! Training data generation.
//!
//! ## Overview
//!
//! - **GameRecord**: summary of a finished game, bincode-persistable
//! - **Trajectory**: per-turn encoded observations, actions and final rewards
//! - **SelfPlayWorker**: runs games with a `Policy` controlling every agent
//!
//! ## Usage
//!
//! ```rust,ignore
//! use avalon_env::core::GameConfig;
//! use avalon_env::nn::RandomPolicy;
//! use avalon_env::training::{SelfPlayConfig, SelfPlayWorker, encode_batch};
//!
//! let config = SelfPlayConfig::default().with_seed_offset(1000);
//! let mut worker = SelfPlayWorker::new(GameConfig::default(), RandomPolicy::default(), config)?;
//!
//! let games = worker.play_games(100)?;
//! let records: Vec<_> = games.into_iter().map(|(record, _)| record).collect();
//! std::fs::write("games.bin", encode_batch(&records)?)?;
//! ```

pub mod record;
pub mod self_play;
pub mod trajectory;

pub use record::{decode_batch, encode_batch, GameRecord};
pub use self_play::{SelfPlayConfig, SelfPlayWorker};
pub use trajectory::{Step, TrainingSample, Trajectory};
