use thiserror::Error;

use crate::{
    constants::{DEFAULT_ROTATION_SPEED, GRAVITY_MPS2},
    direction::Direction,
};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GravityConfigError {
    #[error("rotation speed must be finite and greater than zero, got {0}")]
    RotationSpeed(f32),
    #[error("gravity strength must be finite and greater than zero, got {0}")]
    Strength(f32),
}

/// Validated tunables for a [`GravityController`](crate::GravityController).
///
/// Fields are private so a config can only exist in a valid state; a controller built
/// from one never has to handle a non-finite transition duration at tick time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityConfig {
    strength: f32,
    rotation_speed: f32,
    initial_direction: Direction,
}

impl GravityConfig {
    pub fn new(
        strength: f32,
        rotation_speed: f32,
        initial_direction: Direction,
    ) -> Result<Self, GravityConfigError> {
        if !strength.is_finite() || strength <= 0.0 {
            return Err(GravityConfigError::Strength(strength));
        }
        // 1 / rotation_speed must also be finite (subnormal speeds overflow).
        if !rotation_speed.is_finite()
            || rotation_speed <= 0.0
            || !(1.0 / rotation_speed).is_finite()
        {
            return Err(GravityConfigError::RotationSpeed(rotation_speed));
        }

        Ok(Self {
            strength,
            rotation_speed,
            initial_direction,
        })
    }

    /// Gravity magnitude in m/s².
    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Transitions per second.
    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    #[inline]
    pub fn initial_direction(&self) -> Direction {
        self.initial_direction
    }

    /// Length of one transition in seconds (`1 / rotation_speed`).
    #[inline]
    pub fn transition_duration(&self) -> f32 {
        1.0 / self.rotation_speed
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            strength: GRAVITY_MPS2,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            initial_direction: Direction::Down,
        }
    }
}
