//! Learning controller for the `rltris` board.
//!
//! - [`Policy`] - Action-value function, linear ([`LinearPolicy`]) or tabular ([`TabularPolicy`])
//! - [`LearningController`] - Epsilon-greedy TD learner implementing [`rltris_engine::Controller`]
//! - [`PolicyModel`] / [`ModelStore`] - Persisted policy and where it lives
//!
//! # Example
//!
//! ```
//! use rltris_engine::{Board, BoardConfig};
//! use rltris_learning::{LearningController, LearningParams, Policy, PolicyKind};
//!
//! let config = BoardConfig::default();
//! let mut board = Board::with_random_shapes(config, Some(1)).unwrap();
//! let mut learner = LearningController::new(
//!     LearningParams::default(),
//!     Policy::new(PolicyKind::Linear, config.encoded_len()),
//!     config.encoded_len(),
//! )
//! .unwrap()
//! .with_seed(1);
//!
//! for _ in 0..1_000 {
//!     let _ = board.step(&[], Some(&mut learner));
//! }
//! assert!(learner.episodes() > 0);
//! ```

pub use self::{controller::*, model::*, params::*, policy::*, progress::*, store::*};

mod controller;
mod model;
mod params;
mod policy;
mod progress;
mod store;
