//! Scalar and vector primitives shared by both network variants.

use crate::error::NetError;

/// Inner product of two equal-length vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, NetError> {
    if a.len() != b.len() {
        return Err(NetError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(weighted_sum(a, b))
}

/// `dot` for operands whose equal length is guaranteed by their types.
pub(crate) fn dot_exact<const M: usize>(a: &[f64; M], b: &[f64; M]) -> f64 {
    weighted_sum(a, b)
}

fn weighted_sum(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Logistic function: 1 / (1 + exp(-x)).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative expressed through its output `s = sigmoid(z)`.
pub fn sigmoid_derivative(s: f64) -> f64 {
    s * (1.0 - s)
}

/// Normalize logits into a probability distribution, in place.
///
/// The maximum logit is subtracted before exponentiating so large inputs cannot overflow.
pub fn softmax_inplace(values: &mut [f64]) {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return;
    };

    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }

    let inv_sum = 1.0 / sum;
    for v in values.iter_mut() {
        *v *= inv_sum;
    }
}

/// Owned `softmax_inplace` over a copy of `logits`.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let mut out = logits.to_vec();
    softmax_inplace(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn dot_of_equal_lengths() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), Ok(12.0));
        assert_eq!(dot(&[], &[]), Ok(0.0));
    }

    #[test]
    fn dot_rejects_mismatched_lengths() {
        assert_eq!(
            dot(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(NetError::DimensionMismatch { left: 2, right: 3 })
        );
        assert_eq!(
            dot(&[1.0], &[]),
            Err(NetError::DimensionMismatch { left: 1, right: 0 })
        );
    }

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPSILON);
        assert!(sigmoid(4.0) > 0.5 && sigmoid(4.0) < 1.0);
        assert!(sigmoid(-4.0) > 0.0 && sigmoid(-4.0) < 0.5);
        assert!((sigmoid_derivative(0.5) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn softmax_of_huge_equal_logits_is_uniform() {
        let probs = softmax(&[1000.0, 1000.0, 1000.0]);
        for p in &probs {
            assert!((p - 1.0 / 3.0).abs() < EPSILON, "got {p}");
        }
    }

    #[test]
    fn softmax_all_zero_logits() {
        let probs = softmax(&[0.0; 9]);
        assert!(probs.iter().all(|p| (p - 1.0 / 9.0).abs() < EPSILON));
    }

    #[test]
    fn softmax_empty_is_empty() {
        assert!(softmax(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn proptest_softmax_is_a_distribution(
            logits in proptest::collection::vec(-10.0f64..10.0, 1..16),
        ) {
            let probs = softmax(&logits);
            let sum: f64 = probs.iter().sum();
            prop_assert!((sum - 1.0).abs() < EPSILON);
            prop_assert!(probs.iter().all(|p| *p > 0.0 && *p < 1.0 || logits.len() == 1));
        }

        #[test]
        fn proptest_softmax_stays_finite_for_extreme_logits(
            logits in proptest::collection::vec(-1.0e6f64..1.0e6, 1..16),
        ) {
            let probs = softmax(&logits);
            prop_assert!(probs.iter().all(|p| p.is_finite()));
            let sum: f64 = probs.iter().sum();
            prop_assert!((sum - 1.0).abs() < EPSILON);
        }
    }
}
