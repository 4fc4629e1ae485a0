//! The four supported gravity directions and their static lookup table.
//!
//! Every [`Direction`] maps to exactly one unit gravity axis and one target body
//! orientation. The orientation is chosen so the body's local up (+Y) points
//! against the gravity axis, i.e. the actor stands on whichever surface gravity
//! pulls toward.

use nalgebra::Vector3;

use crate::{angle::Euler, constants::DIRECTION_MATCH_DOT, constants::DIST_EPS};

/// Discriminator for the active gravity direction.
///
/// The numeric values are the cycle order used by [`Direction::next`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Down = 0,
    Up = 1,
    Left = 2,
    Right = 3,
}

struct DirectionEntry {
    axis: [f32; 3],
    orientation: [f32; 3],
    label: &'static str,
    indicator_roll: f32,
}

const TABLE: [DirectionEntry; 4] = [
    DirectionEntry {
        axis: [0.0, -1.0, 0.0],
        orientation: [0.0, 0.0, 0.0],
        label: "↓ DOWN",
        indicator_roll: 0.0,
    },
    DirectionEntry {
        axis: [0.0, 1.0, 0.0],
        orientation: [180.0, 0.0, 0.0],
        label: "↑ UP",
        indicator_roll: 180.0,
    },
    DirectionEntry {
        axis: [-1.0, 0.0, 0.0],
        orientation: [0.0, 0.0, -90.0],
        label: "← LEFT",
        indicator_roll: -90.0,
    },
    DirectionEntry {
        axis: [1.0, 0.0, 0.0],
        orientation: [0.0, 0.0, 90.0],
        label: "→ RIGHT",
        indicator_roll: 90.0,
    },
];

impl Direction {
    /// All directions in cycle order.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns `None` for indices outside `0..4`.
    pub const fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Cyclic successor: `(index + 1) mod 4`.
    #[inline]
    pub const fn next(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Down,
        }
    }

    #[inline]
    fn entry(self) -> &'static DirectionEntry {
        &TABLE[self as usize]
    }

    /// Unit vector gravity pulls along for this direction.
    #[inline]
    pub fn axis(self) -> Vector3<f32> {
        Vector3::from(self.entry().axis)
    }

    /// Target body orientation (degrees, already normalized).
    #[inline]
    pub fn orientation(self) -> Euler {
        Euler::from(self.entry().orientation)
    }

    /// Short label for HUD display.
    #[inline]
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Counter-clockwise roll (degrees, y-up screen space) that turns a down-pointing
    /// arrow so it points along this direction's gravity.
    #[inline]
    pub fn indicator_roll_degrees(self) -> f32 {
        self.entry().indicator_roll
    }

    /// Classifies an arbitrary gravity vector.
    ///
    /// Returns the direction whose axis is within [`DIRECTION_MATCH_DOT`] of `gravity`,
    /// or `None` when the vector is degenerate or in between (e.g. mid-transition).
    pub fn from_gravity(gravity: Vector3<f32>) -> Option<Direction> {
        let len = gravity.norm();
        if len <= DIST_EPS {
            return None;
        }
        let dir = gravity / len;
        Direction::ALL
            .into_iter()
            .find(|d| d.axis().dot(&dir) > DIRECTION_MATCH_DOT)
    }
}
