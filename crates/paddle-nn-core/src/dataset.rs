//! Labelled training samples and a synthetic chase-the-ball oracle.
//!
//! The court is the cube [-1, 1] × [-1, 1] × [0, 1]; the controlled paddle sits in the
//! z = 0 plane and the ball approaches it with negative `vz`.

use crate::action::Action;
use crate::state::{PredictiveState, ReactiveState};
use rand::Rng;
use serde::{Deserialize, Serialize};

const COURT_HALF_WIDTH: f64 = 1.0;
const COURT_DEPTH: f64 = 1.0;
/// Cap for "never reaches the wall" so features stay in a trainable range.
const MAX_TIME: f64 = 100.0;
const PADDLE_HEIGHT: f64 = 0.3;
const PADDLE_SPEED: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample<S> {
    pub state: S,
    pub action: Action,
}

/// Split samples into the parallel sequences `fit` expects.
pub fn unzip<S: Clone>(samples: &[Sample<S>]) -> (Vec<S>, Vec<Action>) {
    samples.iter().map(|s| (s.state.clone(), s.action)).unzip()
}

/// Move toward `(dx, dy)` unless already within half a paddle height on both axes.
pub fn steer(dx: f64, dy: f64, paddle_height: f64) -> Action {
    let dead_zone = paddle_height / 2.0;
    let horizontal = if dx > dead_zone {
        Some(Action::Right)
    } else if dx < -dead_zone {
        Some(Action::Left)
    } else {
        None
    };
    let vertical = if dy > dead_zone {
        Some(Action::Up)
    } else if dy < -dead_zone {
        Some(Action::Down)
    } else {
        None
    };
    match (vertical, horizontal) {
        (Some(v), Some(h)) => Action::diagonal_of(v, h).unwrap_or(v),
        (Some(v), None) => v,
        (None, Some(h)) => h,
        (None, None) => Action::None,
    }
}

/// Chase the ball's current position.
pub fn reactive_oracle(state: &ReactiveState) -> Action {
    steer(
        state.x_pos - state.x_paddle,
        state.y_pos - state.y_paddle,
        state.paddle_height,
    )
}

/// Chase the point where the ball's projected path crosses the paddle plane.
pub fn predictive_oracle(state: &PredictiveState) -> Action {
    steer(
        state.x_dist_to_paddle,
        state.y_dist_to_paddle,
        state.current.paddle_height,
    )
}

fn time_to_wall(pos: f64, vel: f64) -> f64 {
    let t = if vel > 0.0 {
        (COURT_HALF_WIDTH - pos) / vel
    } else if vel < 0.0 {
        (pos + COURT_HALF_WIDTH) / -vel
    } else {
        MAX_TIME
    };
    t.min(MAX_TIME)
}

pub fn random_reactive_state<R: Rng + ?Sized>(rng: &mut R) -> ReactiveState {
    ReactiveState {
        x_pos: rng.random_range(-COURT_HALF_WIDTH..COURT_HALF_WIDTH),
        y_pos: rng.random_range(-COURT_HALF_WIDTH..COURT_HALF_WIDTH),
        z_pos: rng.random_range(0.1..COURT_DEPTH),
        vx: rng.random_range(-0.05..0.05),
        vy: rng.random_range(-0.05..0.05),
        vz: rng.random_range(-0.05..-0.01),
        x_paddle: rng.random_range(-COURT_HALF_WIDTH..COURT_HALF_WIDTH),
        y_paddle: rng.random_range(-COURT_HALF_WIDTH..COURT_HALF_WIDTH),
        paddle_speed: PADDLE_SPEED,
        paddle_height: PADDLE_HEIGHT,
    }
}

/// Derive look-ahead features for a raw state by straight-line projection (no bounces).
pub fn project(current: ReactiveState) -> PredictiveState {
    let time_to_paddle = if current.vz < 0.0 {
        (current.z_pos / -current.vz).min(MAX_TIME)
    } else {
        MAX_TIME
    };
    let projected_x = (current.x_pos + current.vx * time_to_paddle)
        .clamp(-COURT_HALF_WIDTH, COURT_HALF_WIDTH);
    let projected_y = (current.y_pos + current.vy * time_to_paddle)
        .clamp(-COURT_HALF_WIDTH, COURT_HALF_WIDTH);
    PredictiveState {
        current,
        time_to_wall_x: time_to_wall(current.x_pos, current.vx),
        time_to_wall_y: time_to_wall(current.y_pos, current.vy),
        x_dist_to_paddle: projected_x - current.x_paddle,
        y_dist_to_paddle: projected_y - current.y_paddle,
    }
}

pub fn synthetic_reactive<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Sample<ReactiveState>> {
    (0..count)
        .map(|_| {
            let state = random_reactive_state(rng);
            Sample {
                action: reactive_oracle(&state),
                state,
            }
        })
        .collect()
}

pub fn synthetic_predictive<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Vec<Sample<PredictiveState>> {
    (0..count)
        .map(|_| {
            let state = project(random_reactive_state(rng));
            Sample {
                action: predictive_oracle(&state),
                state,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn steer_covers_all_nine_actions() {
        assert_eq!(steer(0.0, 0.0, 0.3), Action::None);
        assert_eq!(steer(0.0, 0.5, 0.3), Action::Up);
        assert_eq!(steer(0.0, -0.5, 0.3), Action::Down);
        assert_eq!(steer(-0.5, 0.0, 0.3), Action::Left);
        assert_eq!(steer(0.5, 0.0, 0.3), Action::Right);
        assert_eq!(steer(0.5, 0.5, 0.3), Action::UpRight);
        assert_eq!(steer(-0.5, 0.5, 0.3), Action::UpLeft);
        assert_eq!(steer(0.5, -0.5, 0.3), Action::DownRight);
        assert_eq!(steer(-0.5, -0.5, 0.3), Action::DownLeft);
    }

    #[test]
    fn projection_reaches_paddle_plane() {
        let current = ReactiveState {
            x_pos: 0.0,
            y_pos: 0.0,
            z_pos: 0.5,
            vx: 0.01,
            vy: -0.02,
            vz: -0.05,
            x_paddle: 0.2,
            y_paddle: 0.0,
            paddle_speed: PADDLE_SPEED,
            paddle_height: PADDLE_HEIGHT,
        };
        let p = project(current);
        // 10 steps to the paddle plane.
        assert!((p.x_dist_to_paddle - (0.1 - 0.2)).abs() < 1e-12);
        assert!((p.y_dist_to_paddle - (-0.2)).abs() < 1e-12);
        assert!((p.time_to_wall_x - 100.0).abs() < 1e-9);
        assert!((p.time_to_wall_y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn synthetic_data_is_seeded_and_labelled_by_oracle() {
        let a = synthetic_predictive(&mut ChaCha12Rng::seed_from_u64(3), 32);
        let b = synthetic_predictive(&mut ChaCha12Rng::seed_from_u64(3), 32);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| predictive_oracle(&s.state) == s.action));

        let (states, labels) = unzip(&a);
        assert_eq!(states.len(), 32);
        assert_eq!(labels.len(), 32);
    }

    #[test]
    fn samples_deserialize_from_json() {
        let json = r#"[{
            "state": {
                "X_pos": 0.1, "Y_pos": 0.2, "Z_pos": 0.3,
                "Vx": 0.0, "Vy": 0.0, "Vz": -0.1,
                "X_paddle": 0.0, "Y_paddle": 0.0,
                "paddle_speed": 0.05, "paddle_height": 0.3
            },
            "action": "up-left"
        }]"#;
        let samples: Vec<Sample<ReactiveState>> = serde_json::from_str(json).unwrap();
        assert_eq!(samples[0].action, Action::UpLeft);
        assert_eq!(samples[0].state.z_pos, 0.3);
    }
}
