//! Velocity integration against the shared gravity vector.
//!
//! These helpers only read [`GravityState`]; the controller remains its single writer.

use nalgebra::Vector3;

use crate::{controller::GravityState, movement::along_gravity_component};

/// Semi-implicit Euler step: `v(t+dt) = v(t) + g*dt`, then clamps the speed along the
/// gravity axis to `terminal_speed_mps` (falling only; moving against gravity is untouched).
pub fn integrate_gravity(
    velocity: Vector3<f32>,
    gravity: &GravityState,
    dt_seconds: f32,
    terminal_speed_mps: f32,
) -> Vector3<f32> {
    let dt = dt_seconds.max(0.0);
    let v1 = velocity + gravity.vector() * dt;

    let Some(axis) = gravity.axis() else {
        return v1;
    };
    let fall_speed = v1.dot(&axis);
    let terminal = terminal_speed_mps.max(0.0);
    if fall_speed > terminal {
        v1 - axis * (fall_speed - terminal)
    } else {
        v1
    }
}

/// Replaces the along-gravity component of `velocity` with `jump_speed_mps` against gravity.
///
/// Resetting first keeps jump height the same whether or not the body was still settling.
/// With degenerate gravity there is no "up" to jump toward and `velocity` is returned as-is.
pub fn apply_jump(
    velocity: Vector3<f32>,
    gravity: &GravityState,
    jump_speed_mps: f32,
) -> Vector3<f32> {
    let Some(axis) = gravity.axis() else {
        return velocity;
    };
    velocity - along_gravity_component(velocity, gravity) - axis * jump_speed_mps.max(0.0)
}
