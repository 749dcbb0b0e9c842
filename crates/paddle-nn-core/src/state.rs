//! Game-state records and their fixed-order feature vectors.
//!
//! Field order in `to_vector` is the column order of `W_hidden_input`. It must not change
//! independently of trained weights.

use crate::error::NetError;
use serde::{Deserialize, Serialize};

pub const REACTIVE_INPUTS: usize = 10;
pub const PREDICTIVE_INPUTS: usize = 14;

/// A state record that maps onto exactly `N` network inputs.
pub trait FeatureVector<const N: usize>: Sized {
    fn to_vector(&self) -> [f64; N];

    /// Rebuild a record from raw features in `to_vector` order.
    fn from_slice(values: &[f64]) -> Result<Self, NetError>;
}

fn fixed<const N: usize>(values: &[f64]) -> Result<[f64; N], NetError> {
    values.try_into().map_err(|_| NetError::FeatureCount {
        expected: N,
        actual: values.len(),
    })
}

/// Raw kinematic and paddle state at one instant.
///
/// Serialized field names follow the game client's wire names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveState {
    #[serde(rename = "X_pos")]
    pub x_pos: f64,
    #[serde(rename = "Y_pos")]
    pub y_pos: f64,
    #[serde(rename = "Z_pos")]
    pub z_pos: f64,
    #[serde(rename = "Vx")]
    pub vx: f64,
    #[serde(rename = "Vy")]
    pub vy: f64,
    #[serde(rename = "Vz")]
    pub vz: f64,
    #[serde(rename = "X_paddle")]
    pub x_paddle: f64,
    #[serde(rename = "Y_paddle")]
    pub y_paddle: f64,
    pub paddle_speed: f64,
    pub paddle_height: f64,
}

impl FeatureVector<REACTIVE_INPUTS> for ReactiveState {
    fn to_vector(&self) -> [f64; REACTIVE_INPUTS] {
        [
            self.x_pos,
            self.y_pos,
            self.z_pos,
            self.vx,
            self.vy,
            self.vz,
            self.x_paddle,
            self.y_paddle,
            self.paddle_speed,
            self.paddle_height,
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self, NetError> {
        let [x_pos, y_pos, z_pos, vx, vy, vz, x_paddle, y_paddle, paddle_speed, paddle_height] =
            fixed::<REACTIVE_INPUTS>(values)?;
        Ok(Self {
            x_pos,
            y_pos,
            z_pos,
            vx,
            vy,
            vz,
            x_paddle,
            y_paddle,
            paddle_speed,
            paddle_height,
        })
    }
}

/// Raw state plus look-ahead features derived from the ball's projected path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictiveState {
    #[serde(flatten)]
    pub current: ReactiveState,
    pub time_to_wall_x: f64,
    pub time_to_wall_y: f64,
    pub x_dist_to_paddle: f64,
    pub y_dist_to_paddle: f64,
}

impl FeatureVector<PREDICTIVE_INPUTS> for PredictiveState {
    fn to_vector(&self) -> [f64; PREDICTIVE_INPUTS] {
        let mut out = [0.0; PREDICTIVE_INPUTS];
        out[..REACTIVE_INPUTS].copy_from_slice(&self.current.to_vector());
        out[REACTIVE_INPUTS..].copy_from_slice(&[
            self.time_to_wall_x,
            self.time_to_wall_y,
            self.x_dist_to_paddle,
            self.y_dist_to_paddle,
        ]);
        out
    }

    fn from_slice(values: &[f64]) -> Result<Self, NetError> {
        let all = fixed::<PREDICTIVE_INPUTS>(values)?;
        let current = ReactiveState::from_slice(&all[..REACTIVE_INPUTS])?;
        Ok(Self {
            current,
            time_to_wall_x: all[10],
            time_to_wall_y: all[11],
            x_dist_to_paddle: all[12],
            y_dist_to_paddle: all[13],
        })
    }
}
