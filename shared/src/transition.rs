//! Time-bounded interpolation of body orientation and the gravity vector.
//!
//! A [`GravityTransition`] is the explicit, resumable form of a per-frame animation:
//! it keeps its elapsed time between calls and is advanced once per simulation tick.
//!
//! # Sampling
//! - `t  = clamp(elapsed / duration, 0, 1)`
//! - `t' = smoothstep(t)`
//! - orientation = `start + shortest_delta(start, target) * t'` (per Euler axis)
//! - gravity     = `lerp(start_gravity, target_gravity, t')` (plain vector blend)
//!
//! Once `elapsed` reaches the duration both values are reported as the exact targets.

use nalgebra::Vector3;

use crate::{
    angle::{AngleError, Euler, normalize_euler, shortest_delta_euler},
    constants::TRANSITION_TIME_EPS,
    direction::Direction,
};

/// Ease-in/ease-out curve on `[0, 1]`: `3t² - 2t³`.
///
/// Input is clamped, so `f(0) = 0` and `f(1) = 1` hold for any input.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Interpolated values for one point in a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSample {
    pub orientation: Euler,
    pub gravity: Vector3<f32>,
    /// True once the transition has reached its end; values are then the exact targets.
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct GravityTransition {
    from: Direction,
    to: Direction,
    start_orientation: Euler,
    target_orientation: Euler,
    /// Precomputed shortest per-axis turn from start to target.
    delta_orientation: Euler,
    start_gravity: Vector3<f32>,
    target_gravity: Vector3<f32>,
    elapsed: f32,
    duration: f32,
}

impl GravityTransition {
    /// Starts a transition toward `to`'s table entry, scaled by `strength`.
    ///
    /// `duration` must be finite and positive; callers get it from a validated
    /// [`GravityConfig`](crate::GravityConfig).
    pub fn new(
        from: Direction,
        to: Direction,
        start_orientation: Euler,
        start_gravity: Vector3<f32>,
        strength: f32,
        duration: f32,
    ) -> Result<Self, AngleError> {
        let start_orientation = normalize_euler(start_orientation)?;
        let target_orientation = normalize_euler(to.orientation())?;
        let delta_orientation = shortest_delta_euler(start_orientation, target_orientation)?;

        Ok(Self {
            from,
            to,
            start_orientation,
            target_orientation,
            delta_orientation,
            start_gravity,
            target_gravity: to.axis() * strength,
            elapsed: 0.0,
            duration,
        })
    }

    #[inline]
    pub fn from(&self) -> Direction {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Direction {
        self.to
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// True once `elapsed` is within `duration * TRANSITION_TIME_EPS` of the end.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration * (1.0 - TRANSITION_TIME_EPS)
    }

    /// Linear progress `elapsed / duration` clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased progress, the factor actually used for interpolation.
    #[inline]
    pub fn eased_progress(&self) -> f32 {
        smoothstep(self.progress())
    }

    /// Advances elapsed time by `dt_seconds` (negative or non-finite deltas count as zero)
    /// and returns the sample for the new time.
    pub fn advance(&mut self, dt_seconds: f32) -> TransitionSample {
        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.sample()
    }

    /// Sample at the current elapsed time without advancing.
    pub fn sample(&self) -> TransitionSample {
        if self.is_finished() {
            return TransitionSample {
                orientation: self.target_orientation,
                gravity: self.target_gravity,
                finished: true,
            };
        }

        let t = self.eased_progress();
        TransitionSample {
            orientation: self.start_orientation + self.delta_orientation * t,
            gravity: self.start_gravity.lerp(&self.target_gravity, t),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY_MPS2;

    const EPS: f32 = 1.0e-4;

    fn down_to_up(duration: f32) -> GravityTransition {
        GravityTransition::new(
            Direction::Down,
            Direction::Up,
            Direction::Down.orientation(),
            Direction::Down.axis() * GRAVITY_MPS2,
            GRAVITY_MPS2,
            duration,
        )
        .unwrap()
    }

    #[test]
    fn smoothstep_endpoints_and_symmetry() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1.0e-6);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((smoothstep(t) + smoothstep(1.0 - t) - 1.0).abs() < 1.0e-5);
        }
    }

    #[test]
    fn smoothstep_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = smoothstep(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn starts_at_start_values() {
        let tr = down_to_up(0.5);
        let s = tr.sample();
        assert!(!s.finished);
        assert!(s.orientation.norm() < EPS);
        assert!((s.gravity - Vector3::new(0.0, -GRAVITY_MPS2, 0.0)).norm() < EPS);
    }

    #[test]
    fn midpoint_is_half_way() {
        let mut tr = down_to_up(0.5);
        let s = tr.advance(0.25);
        assert!((s.orientation.x - 90.0).abs() < EPS);
        // Straight vector lerp through zero, not a rotation.
        assert!(s.gravity.norm() < EPS);
    }

    #[test]
    fn ticks_summing_to_duration_snap_exactly() {
        let mut tr = down_to_up(0.5);
        let mut last = tr.sample();
        for _ in 0..30 {
            last = tr.advance(1.0 / 60.0);
        }
        assert!(last.finished);
        assert_eq!(last.orientation, Direction::Up.orientation());
        assert_eq!(last.gravity, Direction::Up.axis() * GRAVITY_MPS2);
    }

    #[test]
    fn overshooting_clamps_to_target() {
        let mut tr = down_to_up(0.5);
        let s = tr.advance(10.0);
        assert!(s.finished);
        assert_eq!(tr.elapsed(), 0.5);
        assert_eq!(tr.progress(), 1.0);
        assert_eq!(s.gravity, Direction::Up.axis() * GRAVITY_MPS2);
    }

    #[test]
    fn still_running_just_before_the_end() {
        let mut tr = down_to_up(0.5);
        let s = tr.advance(0.5 - 9.0e-6);
        assert!(!s.finished);
        assert!(!tr.is_finished());
        assert!(tr.progress() < 1.0);

        let s = tr.advance(9.0e-6);
        assert!(s.finished);
        assert_eq!(s.gravity, Direction::Up.axis() * GRAVITY_MPS2);
    }

    #[test]
    fn bad_deltas_do_not_advance() {
        let mut tr = down_to_up(0.5);
        tr.advance(-1.0);
        tr.advance(f32::NAN);
        tr.advance(f32::INFINITY);
        assert_eq!(tr.elapsed(), 0.0);
    }

    #[test]
    fn turns_the_short_way_across_wraparound() {
        // Up (180, 0, 0) -> Left (0, 0, -90): x goes +180 (range is half-open), z goes -90.
        let mut tr = GravityTransition::new(
            Direction::Up,
            Direction::Left,
            Direction::Up.orientation(),
            Direction::Up.axis() * GRAVITY_MPS2,
            GRAVITY_MPS2,
            1.0,
        )
        .unwrap();
        let s = tr.advance(0.5);
        assert!((s.orientation.x - 270.0).abs() < EPS);
        assert!((s.orientation.z + 45.0).abs() < EPS);

        // Start just shy of the wrap: -170 about Y toward 0 must move +170, never -190.
        let tr = GravityTransition::new(
            Direction::Down,
            Direction::Down,
            Euler::new(0.0, -170.0, 0.0),
            Direction::Down.axis(),
            1.0,
            1.0,
        )
        .unwrap();
        assert!((tr.delta_orientation.y - 170.0).abs() < EPS);
    }

    #[test]
    fn rejects_non_finite_start_orientation() {
        let err = GravityTransition::new(
            Direction::Down,
            Direction::Up,
            Euler::new(f32::NAN, 0.0, 0.0),
            Vector3::zeros(),
            GRAVITY_MPS2,
            0.5,
        );
        assert!(err.is_err());
    }
}
