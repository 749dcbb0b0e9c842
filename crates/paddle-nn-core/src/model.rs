//! Behavior shared by the reactive and predictive controllers.
//!
//! A controller owns one [`PaddleNet`] and decides how to turn its output distribution
//! into an [`Action`]. Training, evaluation and weight I/O are identical for both.

use crate::action::{Action, ACTION_COUNT};
use crate::config::{ConfigError, ModelConfig};
use crate::error::NetError;
use crate::nn::PaddleNet;
use crate::snapshot::WeightSnapshot;
use crate::state::FeatureVector;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

pub trait PaddleModel<const N: usize> {
    type State: FeatureVector<N>;

    fn net(&self) -> &PaddleNet<N>;
    fn net_mut(&mut self) -> &mut PaddleNet<N>;
    fn learning_rate(&self) -> f64;
    /// Epoch budget used by [`PaddleModel::fit_default`].
    fn epochs(&self) -> usize;

    /// Map an output distribution to a command.
    fn choose(&self, probs: &[f64; ACTION_COUNT]) -> Action;

    fn probabilities(&self, state: &Self::State) -> [f64; ACTION_COUNT] {
        self.net().forward(&state.to_vector()).probs
    }

    fn predict(&self, state: &Self::State) -> Action {
        self.choose(&self.probabilities(state))
    }

    fn single_fit(&mut self, state: &Self::State, correct: Action) {
        let lr = self.learning_rate();
        self.net_mut().train_step(&state.to_vector(), correct, lr);
    }

    /// Repeat `single_fit` over every pair, in order, `epochs` times.
    fn fit(
        &mut self,
        states: &[Self::State],
        corrects: &[Action],
        epochs: usize,
    ) -> Result<(), NetError> {
        if states.len() != corrects.len() {
            return Err(NetError::LengthMismatch {
                states: states.len(),
                labels: corrects.len(),
            });
        }

        let lr = self.learning_rate();
        tracing::debug!(
            samples = states.len(),
            epochs,
            learning_rate = lr,
            "fitting paddle network"
        );

        let inputs: Vec<[f64; N]> = states.iter().map(|s| s.to_vector()).collect();
        for epoch in 0..epochs {
            let mut loss = 0.0;
            for (input, &correct) in inputs.iter().zip(corrects) {
                loss += self.net_mut().train_step(input, correct, lr);
            }
            if !inputs.is_empty() {
                tracing::trace!(epoch, mean_loss = loss / inputs.len() as f64, "epoch done");
            }
        }
        Ok(())
    }

    fn fit_default(&mut self, states: &[Self::State], corrects: &[Action]) -> Result<(), NetError> {
        let epochs = self.epochs();
        self.fit(states, corrects, epochs)
    }

    /// Fraction of states for which `predict` returns the given label. Empty input gives 0.
    fn accuracy(&self, states: &[Self::State], corrects: &[Action]) -> Result<f64, NetError> {
        if states.len() != corrects.len() {
            return Err(NetError::LengthMismatch {
                states: states.len(),
                labels: corrects.len(),
            });
        }
        if states.is_empty() {
            return Ok(0.0);
        }
        let hits = states
            .iter()
            .zip(corrects)
            .filter(|&(s, &c)| self.predict(s) == c)
            .count();
        Ok(hits as f64 / states.len() as f64)
    }

    /// Deep copy of the current parameters.
    fn export_weights(&self) -> WeightSnapshot {
        self.net().to_snapshot()
    }

    /// Replace every parameter. On a shape error the live weights are left untouched.
    fn load_weights(&mut self, snapshot: &WeightSnapshot) -> Result<(), NetError> {
        let net = PaddleNet::from_snapshot(snapshot)?;
        tracing::debug!(inputs = N, "loaded weight snapshot");
        *self.net_mut() = net;
        Ok(())
    }
}

/// Build a freshly initialized network as described by `config`.
pub(crate) fn init_net<const N: usize>(config: &ModelConfig) -> Result<PaddleNet<N>, ConfigError> {
    config.validate()?;
    let net = match config.seed {
        Some(seed) => PaddleNet::random(&mut ChaCha12Rng::seed_from_u64(seed), config.init_range),
        None => PaddleNet::random(&mut rand::rng(), config.init_range),
    };
    Ok(net)
}
