use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Direction the snake is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in clockwise order, starting from `Right`
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Next direction when turning clockwise (a right turn)
    pub fn clockwise(self) -> Direction {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    /// Next direction when turning counter-clockwise (a left turn)
    pub fn counter_clockwise(self) -> Direction {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.clockwise().clockwise() == other
    }

    /// Returns the pixel delta (dx, dy) of a one-cell move in this direction.
    /// Screen coordinates: y grows downwards.
    pub fn delta(self, block_size: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -block_size),
            Direction::Down => (0, block_size),
            Direction::Left => (-block_size, 0),
            Direction::Right => (block_size, 0),
        }
    }
}

/// Action relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Keep the current direction
    Straight,
    /// Turn one step clockwise
    TurnRight,
    /// Turn one step counter-clockwise
    TurnLeft,
}

impl Action {
    /// Number of discrete actions exposed to agents
    pub const COUNT: usize = 3;

    /// Decode the agent-side one-hot convention:
    /// `[1, 0, 0]` straight, `[0, 1, 0]` right turn, `[0, 0, 1]` left turn.
    ///
    /// Anything that is not exactly one-hot of length 3 is rejected.
    pub fn from_one_hot(encoded: &[u8]) -> Result<Self, GameError> {
        match encoded {
            [1, 0, 0] => Ok(Action::Straight),
            [0, 1, 0] => Ok(Action::TurnRight),
            [0, 0, 1] => Ok(Action::TurnLeft),
            _ => Err(GameError::InvalidAction(encoded.to_vec())),
        }
    }

    /// Inverse of [`Action::from_one_hot`]
    pub fn to_one_hot(self) -> [u8; 3] {
        let mut encoded = [0; 3];
        encoded[self.index()] = 1;
        encoded
    }

    /// Decode a discrete action index (0 straight, 1 right, 2 left)
    pub fn from_index(idx: usize) -> Result<Self, GameError> {
        match idx {
            0 => Ok(Action::Straight),
            1 => Ok(Action::TurnRight),
            2 => Ok(Action::TurnLeft),
            _ => Err(GameError::InvalidActionIndex(idx)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Action::Straight => 0,
            Action::TurnRight => 1,
            Action::TurnLeft => 2,
        }
    }

    /// Direction the snake will head after applying this action
    pub fn resolve(self, current: Direction) -> Direction {
        match self {
            Action::Straight => current,
            Action::TurnRight => current.clockwise(),
            Action::TurnLeft => current.counter_clockwise(),
        }
    }

    /// Relative action that turns `current` towards an absolute `desired`
    /// heading. A reversal request cannot be expressed and becomes `Straight`.
    pub fn toward(current: Direction, desired: Direction) -> Action {
        if desired == current.clockwise() {
            Action::TurnRight
        } else if desired == current.counter_clockwise() {
            Action::TurnLeft
        } else {
            Action::Straight
        }
    }
}

impl TryFrom<[u8; 3]> for Action {
    type Error = GameError;

    fn try_from(encoded: [u8; 3]) -> Result<Self, Self::Error> {
        Action::from_one_hot(&encoded)
    }
}
