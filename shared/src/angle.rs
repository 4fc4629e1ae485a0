//! Angle helpers for Euler orientations expressed in degrees.
//!
//! # Conventions
//! - Angles are degrees, normalized into the half-open range `(-180, 180]`.
//! - An orientation is an Euler triple `(x, y, z)` stored in a [`Euler`].
//! - Rotations are applied Z first, then X, then Y (see [`orientation_rotation`]).

use nalgebra::{UnitQuaternion, Vector3};
use thiserror::Error;

use crate::constants::MAX_ANGLE_WRAPS;

/// Euler orientation in degrees, one angle per axis.
pub type Euler = Vector3<f32>;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AngleError {
    #[error("angle is not finite: {0}")]
    NonFinite(f32),
    #[error("angle {0} needs more than the allowed number of 360 degree wraps")]
    OutOfRange(f32),
}

/// Reduces `angle` into `(-180, 180]` by repeated ±360° adjustment.
///
/// At most [`MAX_ANGLE_WRAPS`] corrections are applied; NaN, infinities and angles
/// further out than that return an error.
pub fn normalize_angle(angle: f32) -> Result<f32, AngleError> {
    if !angle.is_finite() {
        return Err(AngleError::NonFinite(angle));
    }

    let mut out = angle;
    for _ in 0..=MAX_ANGLE_WRAPS {
        if out > 180.0 {
            out -= 360.0;
        } else if out <= -180.0 {
            out += 360.0;
        } else {
            return Ok(out);
        }
    }

    Err(AngleError::OutOfRange(angle))
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
#[inline]
pub fn shortest_delta(from: f32, to: f32) -> Result<f32, AngleError> {
    normalize_angle(to - from)
}

/// Component-wise [`normalize_angle`].
pub fn normalize_euler(angles: Euler) -> Result<Euler, AngleError> {
    Ok(Euler::new(
        normalize_angle(angles.x)?,
        normalize_angle(angles.y)?,
        normalize_angle(angles.z)?,
    ))
}

/// Component-wise [`shortest_delta`]. Each axis takes its own short way round.
pub fn shortest_delta_euler(from: Euler, to: Euler) -> Result<Euler, AngleError> {
    Ok(Euler::new(
        shortest_delta(from.x, to.x)?,
        shortest_delta(from.y, to.y)?,
        shortest_delta(from.z, to.z)?,
    ))
}

/// Builds the rotation for an Euler orientation (degrees).
///
/// Order: roll about Z, then pitch about X, then yaw about Y (all world axes).
pub fn orientation_rotation(angles: Euler) -> UnitQuaternion<f32> {
    let x = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
    let y = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
    let z = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());
    y * x * z
}
