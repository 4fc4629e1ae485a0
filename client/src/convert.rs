//! Conversions between the simulation's nalgebra types and Bevy's glam types.

use bevy::prelude::*;
use gravity_shared::{Euler, orientation_rotation};
use nalgebra as na;

#[inline]
pub fn vec3_from_na(v: na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn vec3_to_na(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn quat_from_na(q: na::UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// Rotation for a controller orientation (Euler degrees).
#[inline]
pub fn quat_from_orientation(orientation: Euler) -> Quat {
    quat_from_na(orientation_rotation(orientation))
}
