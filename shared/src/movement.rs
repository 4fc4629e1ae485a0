use nalgebra::{Vector2, Vector3};

use crate::{
    constants::{DIST_EPS, INTENT_DEADZONE},
    controller::GravityState,
};

/// Per-tick 2D movement input: `x` strafes right, `y` moves forward.
///
/// Always either zero or unit length.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementIntent(Vector2<f32>);

impl MovementIntent {
    /// Normalizes raw axes. Inputs shorter than [`DIST_EPS`] (or non-finite) become zero.
    pub fn from_axes(strafe: f32, forward: f32) -> Self {
        let v = Vector2::new(strafe, forward);
        let len = v.norm();
        if !len.is_finite() || len <= DIST_EPS {
            return Self::default();
        }
        Self(v / len)
    }

    #[inline]
    pub fn strafe(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn forward(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.0.norm()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.magnitude() < INTENT_DEADZONE
    }
}

/// Actor basis vectors in world space, owned by whatever holds the actor's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementBasis {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
}

/// Removes the component of `v` along the unit vector `axis`.
#[inline]
pub fn project_on_plane(v: Vector3<f32>, axis: Vector3<f32>) -> Vector3<f32> {
    v - axis * v.dot(&axis)
}

/// The part of `velocity` along the current gravity axis.
///
/// Zero while gravity is degenerate: with no axis there is no along-gravity component.
pub fn along_gravity_component(velocity: Vector3<f32>, gravity: &GravityState) -> Vector3<f32> {
    match gravity.axis() {
        Some(axis) => axis * velocity.dot(&axis),
        None => Vector3::zeros(),
    }
}

/// World-space unit direction for `intent`, constrained to the plane orthogonal to gravity.
///
/// Returns zero when the intent is idle or when the projected direction collapses
/// (input pointing straight along gravity). While gravity is degenerate no plane
/// constraint applies.
pub fn movement_direction(
    intent: MovementIntent,
    basis: MovementBasis,
    gravity: &GravityState,
) -> Vector3<f32> {
    if intent.is_idle() {
        return Vector3::zeros();
    }

    let raw = basis.forward * intent.forward() + basis.right * intent.strafe();
    let raw_len = raw.norm();
    if raw_len <= DIST_EPS {
        return Vector3::zeros();
    }
    let raw = raw / raw_len;

    let Some(axis) = gravity.axis() else {
        return raw;
    };

    // Unit input projected onto the plane; not renormalized, so diagonal tilt of the
    // basis against gravity slows movement instead of redirecting it.
    project_on_plane(raw, axis)
}

/// Computes this tick's velocity for the actor.
///
/// `movement_direction(intent) * speed + along_gravity_component(velocity)`. Lateral
/// velocity from the previous tick is discarded; momentum along gravity is kept so input
/// never fights falling.
pub fn project_velocity(
    intent: MovementIntent,
    basis: MovementBasis,
    gravity: &GravityState,
    velocity: Vector3<f32>,
    speed_mps: f32,
) -> Vector3<f32> {
    let along = along_gravity_component(velocity, gravity);
    if intent.is_idle() {
        return along;
    }
    movement_direction(intent, basis, gravity) * speed_mps.max(0.0) + along
}
