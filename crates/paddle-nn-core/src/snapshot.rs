//! Owned, serializable copy of a network's parameters and its shape checks.

use crate::action::ACTION_COUNT;
use crate::error::NetError;
use crate::nn::HIDDEN_SIZE;
use serde::{Deserialize, Serialize};

/// Externally representable copy of a network's trainable parameters.
///
/// Owns its data; it never aliases a live model. JSON field names match the weight files
/// the game client persists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    /// hidden × inputs; row `i` holds the incoming weights of hidden unit `i`.
    #[serde(rename = "W_hidden_input")]
    pub w_hidden_input: Vec<Vec<f64>>,
    /// outputs × hidden; row `k` holds the incoming weights of output unit `k`.
    #[serde(rename = "W_hidden_output")]
    pub w_hidden_output: Vec<Vec<f64>>,
    #[serde(rename = "bias_hidden_layer")]
    pub bias_hidden: Vec<f64>,
    #[serde(rename = "bias_output_layer")]
    pub bias_output: Vec<f64>,
}

fn check(
    matrix: &'static str,
    dimension: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), NetError> {
    if expected != actual {
        return Err(NetError::ShapeMismatch {
            matrix,
            dimension,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_matrix(
    name: &'static str,
    rows: &[Vec<f64>],
    expected_rows: usize,
    expected_cols: usize,
) -> Result<(), NetError> {
    check(name, "rows", expected_rows, rows.len())?;
    for row in rows {
        check(name, "cols", expected_cols, row.len())?;
    }
    Ok(())
}

impl WeightSnapshot {
    /// Check every structure against the fixed architecture for `inputs` features.
    pub fn validate(&self, inputs: usize) -> Result<(), NetError> {
        check_matrix("W_hidden_input", &self.w_hidden_input, HIDDEN_SIZE, inputs)?;
        check_matrix("W_hidden_output", &self.w_hidden_output, ACTION_COUNT, HIDDEN_SIZE)?;
        check("bias_hidden_layer", "len", HIDDEN_SIZE, self.bias_hidden.len())?;
        check("bias_output_layer", "len", ACTION_COUNT, self.bias_output.len())?;
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
