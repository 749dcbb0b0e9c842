use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum NetError {
    /// Two vectors combined element-wise had different lengths.
    DimensionMismatch { left: usize, right: usize },
    /// A weight snapshot does not fit the fixed architecture.
    ShapeMismatch {
        matrix: &'static str,
        dimension: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Batch training was handed unequal state and label sequences.
    LengthMismatch { states: usize, labels: usize },
    /// A raw feature slice could not be turned into a typed state record.
    FeatureCount { expected: usize, actual: usize },
    UnknownAction(String),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::DimensionMismatch { left, right } => {
                write!(f, "vector length mismatch: {left} vs {right}")
            }
            NetError::ShapeMismatch {
                matrix,
                dimension,
                expected,
                actual,
            } => write!(
                f,
                "{matrix} {dimension} mismatch: expected {expected}, got {actual}"
            ),
            NetError::LengthMismatch { states, labels } => write!(
                f,
                "states.len() ({states}) must match labels.len() ({labels})"
            ),
            NetError::FeatureCount { expected, actual } => {
                write!(f, "expected {expected} features, got {actual}")
            }
            NetError::UnknownAction(label) => write!(f, "unknown action label: {label:?}"),
        }
    }
}

impl Error for NetError {}
