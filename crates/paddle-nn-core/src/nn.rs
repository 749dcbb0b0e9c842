//! Fixed-shape two-layer perceptron: N inputs → 12 hidden (sigmoid) → 9 outputs (softmax).
//! Parameters live in stack arrays owned by the network; nothing is shared.
//!
//! Row layout matches the persisted snapshot: `w_ih[i]` feeds hidden unit `i`,
//! `w_ho[k]` feeds output unit `k`.

use crate::action::{Action, ACTION_COUNT};
use crate::error::NetError;
use crate::math::{dot_exact, sigmoid, sigmoid_derivative, softmax_inplace};
use crate::snapshot::WeightSnapshot;
use rand::Rng;

pub const HIDDEN_SIZE: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct PaddleNet<const N: usize> {
    pub w_ih: [[f64; N]; HIDDEN_SIZE],          // hidden × inputs
    pub b_h: [f64; HIDDEN_SIZE],                // 12
    pub w_ho: [[f64; HIDDEN_SIZE]; ACTION_COUNT], // outputs × hidden
    pub b_o: [f64; ACTION_COUNT],                 // 9
}

/// Activations of one forward pass, kept for the backward pass.
#[derive(Clone, Debug)]
pub struct Forward {
    pub hidden: [f64; HIDDEN_SIZE],
    pub probs: [f64; ACTION_COUNT],
}

impl<const N: usize> PaddleNet<N> {
    pub const WEIGHT_COUNT: usize =
        HIDDEN_SIZE * N + HIDDEN_SIZE + ACTION_COUNT * HIDDEN_SIZE + ACTION_COUNT;

    /// Every parameter drawn uniformly from `[-range, range]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, range: f64) -> Self {
        let mut draw = || rng.random_range(-range..=range);

        let mut w_ih = [[0.0; N]; HIDDEN_SIZE];
        for row in &mut w_ih {
            for w in row.iter_mut() {
                *w = draw();
            }
        }

        let mut w_ho = [[0.0; HIDDEN_SIZE]; ACTION_COUNT];
        for row in &mut w_ho {
            for w in row.iter_mut() {
                *w = draw();
            }
        }

        let mut b_h = [0.0; HIDDEN_SIZE];
        for b in &mut b_h {
            *b = draw();
        }

        let mut b_o = [0.0; ACTION_COUNT];
        for b in &mut b_o {
            *b = draw();
        }

        Self {
            w_ih,
            b_h,
            w_ho,
            b_o,
        }
    }

    /// Copy a validated snapshot into owned arrays.
    pub fn from_snapshot(snapshot: &WeightSnapshot) -> Result<Self, NetError> {
        snapshot.validate(N)?;

        let mut w_ih = [[0.0; N]; HIDDEN_SIZE];
        for (dst, src) in w_ih.iter_mut().zip(&snapshot.w_hidden_input) {
            dst.copy_from_slice(src);
        }

        let mut w_ho = [[0.0; HIDDEN_SIZE]; ACTION_COUNT];
        for (dst, src) in w_ho.iter_mut().zip(&snapshot.w_hidden_output) {
            dst.copy_from_slice(src);
        }

        let mut b_h = [0.0; HIDDEN_SIZE];
        b_h.copy_from_slice(&snapshot.bias_hidden);
        let mut b_o = [0.0; ACTION_COUNT];
        b_o.copy_from_slice(&snapshot.bias_output);

        Ok(Self {
            w_ih,
            b_h,
            w_ho,
            b_o,
        })
    }

    pub fn to_snapshot(&self) -> WeightSnapshot {
        WeightSnapshot {
            w_hidden_input: self.w_ih.iter().map(|row| row.to_vec()).collect(),
            w_hidden_output: self.w_ho.iter().map(|row| row.to_vec()).collect(),
            bias_hidden: self.b_h.to_vec(),
            bias_output: self.b_o.to_vec(),
        }
    }

    /// Forward pass. Recomputed from scratch on every call.
    pub fn forward(&self, input: &[f64; N]) -> Forward {
        let mut hidden = [0.0; HIDDEN_SIZE];
        for (i, h) in hidden.iter_mut().enumerate() {
            *h = sigmoid(dot_exact(input, &self.w_ih[i]) + self.b_h[i]);
        }

        let mut probs = [0.0; ACTION_COUNT];
        for (k, p) in probs.iter_mut().enumerate() {
            *p = dot_exact(&hidden, &self.w_ho[k]) + self.b_o[k];
        }
        softmax_inplace(&mut probs);

        Forward { hidden, probs }
    }

    /// One online SGD step on a single labelled input.
    ///
    /// Both deltas are computed against the pre-update weights; only then are the
    /// parameters changed. Returns the cross-entropy loss of the pre-update prediction.
    pub fn train_step(&mut self, input: &[f64; N], correct: Action, learning_rate: f64) -> f64 {
        let Forward { hidden, probs } = self.forward(input);
        let target = correct.one_hot();

        // Softmax + cross-entropy gradient for a one-hot target.
        let mut delta_output = [0.0; ACTION_COUNT];
        for (k, d) in delta_output.iter_mut().enumerate() {
            *d = target[k] - probs[k];
        }

        let mut delta_hidden = [0.0; HIDDEN_SIZE];
        for (j, d) in delta_hidden.iter_mut().enumerate() {
            let back: f64 = delta_output
                .iter()
                .zip(&self.w_ho)
                .map(|(dk, row)| dk * row[j])
                .sum();
            *d = sigmoid_derivative(hidden[j]) * back;
        }

        for (k, row) in self.w_ho.iter_mut().enumerate() {
            let step = learning_rate * delta_output[k];
            for (w, h) in row.iter_mut().zip(&hidden) {
                *w += step * h;
            }
            self.b_o[k] += step;
        }

        for (j, row) in self.w_ih.iter_mut().enumerate() {
            let step = learning_rate * delta_hidden[j];
            for (w, x) in row.iter_mut().zip(input) {
                *w += step * x;
            }
            self.b_h[j] += step;
        }

        -probs[correct.index()].max(f64::MIN_POSITIVE).ln()
    }
}
