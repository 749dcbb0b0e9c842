//! Model hyperparameters, loadable from JSON with defaults for missing fields.

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Step size for every SGD update.
    pub learning_rate: f64,
    /// Number of full passes `fit_default` makes over the training set.
    pub epochs: usize,
    /// Fresh parameters are drawn uniformly from `[-init_range, init_range]`.
    pub init_range: f64,
    /// Seed for reproducible initialization. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 100,
            init_range: 0.5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidLearningRate,
    InvalidEpochs,
    InvalidInitRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLearningRate => {
                write!(f, "learning_rate must be positive and finite")
            }
            ConfigError::InvalidEpochs => write!(f, "epochs must be greater than 0"),
            ConfigError::InvalidInitRange => write!(f, "init_range must be positive and finite"),
        }
    }
}

impl Error for ConfigError {}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate);
        }
        if self.epochs == 0 {
            return Err(ConfigError::InvalidEpochs);
        }
        if !(self.init_range.is_finite() && self.init_range > 0.0) {
            return Err(ConfigError::InvalidInitRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ModelConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.learning_rate, 0.1);
        assert_eq!(cfg.epochs, 100);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ModelConfig =
            serde_json::from_str(r#"{ "learning_rate": 0.05, "seed": 9 }"#).expect("should parse");
        assert_eq!(cfg.learning_rate, 0.05);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.epochs, 100);
        assert_eq!(cfg.init_range, 0.5);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_lr = ModelConfig {
            learning_rate: f64::NAN,
            ..ModelConfig::default()
        };
        assert_eq!(bad_lr.validate(), Err(ConfigError::InvalidLearningRate));

        let bad_epochs = ModelConfig {
            epochs: 0,
            ..ModelConfig::default()
        };
        assert_eq!(bad_epochs.validate(), Err(ConfigError::InvalidEpochs));

        let bad_range = ModelConfig {
            init_range: -1.0,
            ..ModelConfig::default()
        };
        assert_eq!(bad_range.validate(), Err(ConfigError::InvalidInitRange));
    }
}
