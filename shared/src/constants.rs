/// Gravity magnitude in meters per second squared (positive value).
///
/// The active gravity vector is always `axis * GRAVITY_MPS2` at rest.
pub const GRAVITY_MPS2: f32 = 9.81;

/// How many gravity transitions complete per second.
///
/// A transition lasts `1.0 / DEFAULT_ROTATION_SPEED` seconds.
pub const DEFAULT_ROTATION_SPEED: f32 = 2.0;

/// Default walking speed in meters per second.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 5.0;

/// Speed (m/s) given against gravity when jumping from a supported position.
pub const DEFAULT_JUMP_SPEED: f32 = 7.0;

/// Maximum speed along the gravity axis while falling (m/s, positive magnitude).
pub const TERMINAL_FALL_SPEED_MPS: f32 = 53.0;

/// Input intents shorter than this are treated as "no input".
pub const INTENT_DEADZONE: f32 = 0.01;

/// Practical small length for vector comparisons (meters or m/s).
///
/// Use for degenerate-direction guards instead of machine epsilon.
pub const DIST_EPS: f32 = 1.0e-6;

/// Relative slack when comparing a transition's elapsed time to its duration.
///
/// Fixed-step ticks summing to the duration in `f32` can land a hair short of it.
pub const TRANSITION_TIME_EPS: f32 = 1.0e-5;

/// Maximum number of ±360° corrections applied when normalizing an angle.
///
/// Angles needing more than this are rejected instead of looped on.
pub const MAX_ANGLE_WRAPS: u32 = 16;

/// Minimum dot product between a gravity vector and a direction axis for the
/// vector to be classified as that direction.
pub const DIRECTION_MATCH_DOT: f32 = 0.9;

/// Separation kept from static geometry when a body is stopped (meters).
pub const DEFAULT_SKIN: f32 = 0.02;

/// Extra distance past the body's extent searched for support along gravity (meters).
pub const GROUND_PROBE_DISTANCE: f32 = 0.1;
