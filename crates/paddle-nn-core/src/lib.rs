//! Two-layer perceptron controllers that pick a paddle movement from game state.
//!
//! [`ReactiveModel`] reads the current ball and paddle state (10 features).
//! [`PredictiveModel`] additionally reads look-ahead features (14 features) and blends
//! near-tied adjacent directions into diagonals.

pub mod action;
pub mod config;
pub mod dataset;
pub mod error;
pub mod math;
pub mod model;
pub mod nn;
pub mod predictive;
pub mod reactive;
pub mod snapshot;
pub mod state;

pub use action::{Action, ACTION_COUNT};
pub use config::{ConfigError, ModelConfig};
pub use error::NetError;
pub use model::PaddleModel;
pub use predictive::PredictiveModel;
pub use reactive::ReactiveModel;
pub use snapshot::WeightSnapshot;
pub use state::{FeatureVector, PredictiveState, ReactiveState};
