//! Controller that reacts to the current ball and paddle state only.

use crate::action::{Action, ACTION_COUNT};
use crate::config::{ConfigError, ModelConfig};
use crate::error::NetError;
use crate::model::{init_net, PaddleModel};
use crate::nn::PaddleNet;
use crate::snapshot::WeightSnapshot;
use crate::state::{ReactiveState, REACTIVE_INPUTS};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct ReactiveModel {
    net: PaddleNet<REACTIVE_INPUTS>,
    learning_rate: f64,
    epochs: usize,
}

impl ReactiveModel {
    /// Fresh model with parameters drawn from `rng` in `[-0.5, 0.5]`.
    pub fn new<R: Rng + ?Sized>(learning_rate: f64, rng: &mut R) -> Self {
        let defaults = ModelConfig::default();
        Self {
            net: PaddleNet::random(rng, defaults.init_range),
            learning_rate,
            epochs: defaults.epochs,
        }
    }

    /// Model restored from a snapshot. Fails if any dimension disagrees with 10 → 12 → 9.
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

/// First index holding the maximum; earlier outputs win exact ties.
pub(crate) fn argmax(probs: &[f64; ACTION_COUNT]) -> usize {
    let mut best = 0;
    for (i, &p) in probs.iter().enumerate().skip(1) {
        if p > probs[best] {
            best = i;
        }
    }
    best
}

impl PaddleModel<REACTIVE_INPUTS> for ReactiveModel {
    type State = ReactiveState;

    fn net(&self) -> &PaddleNet<REACTIVE_INPUTS> {
        &self.net
    }

    fn net_mut(&mut self) -> &mut PaddleNet<REACTIVE_INPUTS> {
        &mut self.net
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn epochs(&self) -> usize {
        self.epochs
    }

    fn choose(&self, probs: &[f64; ACTION_COUNT]) -> Action {
        Action::ALL[argmax(probs)]
    }
}
