//! Paddle movement commands and their fixed output-neuron mapping.
//!
//! The discriminant of each variant is the index of the output unit that scores it.
//! Trained weights are only meaningful against this exact order:
//!
//! | index | action       |
//! |-------|--------------|
//! | 0     | `up`         |
//! | 1     | `down`       |
//! | 2     | `left`       |
//! | 3     | `right`      |
//! | 4     | `up-right`   |
//! | 5     | `up-left`    |
//! | 6     | `down-right` |
//! | 7     | `down-left`  |
//! | 8     | `none`       |

use crate::error::NetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ACTION_COUNT: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    UpRight = 4,
    UpLeft = 5,
    DownRight = 6,
    DownLeft = 7,
    None = 8,
}

impl Action {
    /// All actions in output-neuron order.
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::UpRight,
        Action::UpLeft,
        Action::DownRight,
        Action::DownLeft,
        Action::None,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::UpRight => "up-right",
            Action::UpLeft => "up-left",
            Action::DownRight => "down-right",
            Action::DownLeft => "down-left",
            Action::None => "none",
        }
    }

    /// The diagonal formed by one vertical and one horizontal command, in either order.
    ///
    /// Any other pairing (opposite directions, a diagonal, `none`) has no blend.
    pub fn diagonal_of(a: Action, b: Action) -> Option<Action> {
        use Action::*;
        match (a, b) {
            (Up, Right) | (Right, Up) => Some(UpRight),
            (Up, Left) | (Left, Up) => Some(UpLeft),
            (Down, Right) | (Right, Down) => Some(DownRight),
            (Down, Left) | (Left, Down) => Some(DownLeft),
            _ => Option::None,
        }
    }

    /// One-hot target vector with 1.0 at this action's output index.
    pub fn one_hot(self) -> [f64; ACTION_COUNT] {
        let mut target = [0.0; ACTION_COUNT];
        target[self.index()] = 1.0;
        target
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.label() == s)
            .ok_or_else(|| NetError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(ACTION_COUNT), Option::None);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for action in Action::ALL {
            assert_eq!(action.label().parse::<Action>(), Ok(action));
        }
        assert_eq!(
            "sideways".parse::<Action>(),
            Err(NetError::UnknownAction("sideways".into()))
        );
    }

    #[test]
    fn serde_uses_hyphenated_labels() {
        let json = serde_json::to_string(&Action::DownLeft).unwrap();
        assert_eq!(json, "\"down-left\"");
        let parsed: Action = serde_json::from_str("\"up-right\"").unwrap();
        assert_eq!(parsed, Action::UpRight);
    }

    #[test]
    fn diagonal_of_is_order_independent() {
        assert_eq!(Action::diagonal_of(Action::Up, Action::Right), Some(Action::UpRight));
        assert_eq!(Action::diagonal_of(Action::Right, Action::Up), Some(Action::UpRight));
        assert_eq!(Action::diagonal_of(Action::Left, Action::Up), Some(Action::UpLeft));
        assert_eq!(Action::diagonal_of(Action::Down, Action::Right), Some(Action::DownRight));
        assert_eq!(Action::diagonal_of(Action::Left, Action::Down), Some(Action::DownLeft));
    }

    #[test]
    fn non_adjacent_pairs_have_no_diagonal() {
        assert_eq!(Action::diagonal_of(Action::Up, Action::Down), Option::None);
        assert_eq!(Action::diagonal_of(Action::Left, Action::Right), Option::None);
        assert_eq!(Action::diagonal_of(Action::Up, Action::None), Option::None);
        assert_eq!(Action::diagonal_of(Action::UpRight, Action::Up), Option::None);
    }

    #[test]
    fn one_hot_marks_single_index() {
        let target = Action::Left.one_hot();
        assert_eq!(target.iter().sum::<f64>(), 1.0);
        assert_eq!(target[2], 1.0);
    }
}
