//! Controller fed with look-ahead features, with a diagonal tie-break on close calls.
//!
//! When the two most likely commands are within [`TIE_MARGIN`] of each other and one is
//! vertical while the other is horizontal, the paddle moves along the diagonal between them
//! instead of snapping to a single axis.

use crate::action::{Action, ACTION_COUNT};
use crate::config::{ConfigError, ModelConfig};
use crate::error::NetError;
use crate::model::{init_net, PaddleModel};
use crate::nn::PaddleNet;
use crate::snapshot::WeightSnapshot;
use crate::state::{PredictiveState, PREDICTIVE_INPUTS};
use rand::Rng;

/// Probability gap below which the top two outputs count as a tie.
pub const TIE_MARGIN: f64 = 0.2;

#[derive(Clone, Debug)]
pub struct PredictiveModel {
    net: PaddleNet<PREDICTIVE_INPUTS>,
    learning_rate: f64,
    epochs: usize,
}

impl PredictiveModel {
    pub fn new<R: Rng + ?Sized>(learning_rate: f64, rng: &mut R) -> Self {
        let defaults = ModelConfig::default();
        Self {
            net: PaddleNet::random(rng, defaults.init_range),
            learning_rate,
            epochs: defaults.epochs,
        }
    }

    pub fn with_weights(learning_rate: f64, weights: &WeightSnapshot) -> Result<Self, NetError> {
        Ok(Self {
            net: PaddleNet::from_snapshot(weights)?,
            learning_rate,
            epochs: ModelConfig::default().epochs,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            net: init_net(config)?,
            learning_rate: config.learning_rate,
            epochs: config.epochs,
        })
    }
}

/// Best and second-best indices from a single scan.
///
/// Equal scores keep the earlier index as best. `None` for the runner-up only when
/// fewer than two scores are comparable.
pub(crate) fn top_two(probs: &[f64]) -> Option<(usize, Option<usize>)> {
    let mut best: Option<usize> = None;
    let mut second: Option<usize> = None;
    for (i, &p) in probs.iter().enumerate() {
        if best.is_none_or(|b| p > probs[b]) {
            second = best;
            best = Some(i);
        } else if second.is_none_or(|s| p > probs[s]) {
            second = Some(i);
        }
    }
    best.map(|b| (b, second))
}

/// Top-1 action, or the diagonal between top-1 and top-2 when they are nearly tied.
pub fn tie_break(probs: &[f64; ACTION_COUNT]) -> Action {
    let Some((best, second)) = top_two(probs) else {
        return Action::None;
    };
    let top = Action::ALL[best];
    match second {
        Some(runner_up) if probs[best] - probs[runner_up] < TIE_MARGIN => {
            Action::diagonal_of(top, Action::ALL[runner_up]).unwrap_or(top)
        }
        _ => top,
    }
}

impl PaddleModel<PREDICTIVE_INPUTS> for PredictiveModel {
    type State = PredictiveState;

    fn net(&self) -> &PaddleNet<PREDICTIVE_INPUTS> {
        &self.net
    }

    fn net_mut(&mut self) -> &mut PaddleNet<PREDICTIVE_INPUTS> {
        &mut self.net
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn epochs(&self) -> usize {
        self.epochs
    }

    fn choose(&self, probs: &[f64; ACTION_COUNT]) -> Action {
        tie_break(probs)
    }
}
