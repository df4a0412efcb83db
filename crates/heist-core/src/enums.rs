//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Cardinal facing of a guard.
///
/// Screen space has +y pointing down, so Up is -90° and Down is +90°.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in clockwise order starting at Up.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Fixed screen-space heading in degrees.
    pub fn degrees(self) -> f32 {
        match self {
            Direction::Up => -90.0,
            Direction::Right => 0.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
        }
    }

    /// Position in the clockwise ring (Up = 0).
    fn ring_index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// The next direction clockwise.
    pub fn clockwise(self) -> Direction {
        Self::CLOCKWISE[(self.ring_index() + 1) % 4]
    }

    /// The next direction counter-clockwise.
    pub fn counter_clockwise(self) -> Direction {
        Self::CLOCKWISE[(self.ring_index() + 3) % 4]
    }

    /// Number of clockwise quarter turns from `self` to `other` (0..=3).
    pub fn quarter_turns_to(self, other: Direction) -> usize {
        (other.ring_index() + 4 - self.ring_index()) % 4
    }

    /// The three directions other than `self`, in clockwise order.
    pub fn others(self) -> [Direction; 3] {
        [
            self.clockwise(),
            self.clockwise().clockwise(),
            self.counter_clockwise(),
        ]
    }

    /// Parse a map-editor direction string. Unknown strings fall back to Down.
    pub fn from_name(name: &str) -> Direction {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Direction::Up,
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => Direction::Down,
        }
    }

    /// Facing derived from the dominant axis of a displacement.
    /// Ties go to the vertical axis.
    pub fn from_displacement(dx: f32, dy: f32) -> Direction {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Guard behavior variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardKind {
    /// Holds position and periodically turns.
    Stationary,
    /// Walks a cyclic waypoint route.
    Patrol,
}

/// Name of a guard behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardStateName {
    Idle,
    Rotating,
    Patrol,
    Alert,
}

/// Sprite sheet a guard is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteSheet {
    #[default]
    GuardIdle,
    GuardWalk,
}
