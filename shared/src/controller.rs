//! Gravity direction state machine.
//!
//! # States
//! - Idle: `transition` is `None`; gravity equals `direction.axis() * strength` exactly.
//! - Transitioning: `transition` is `Some`; every request is dropped until it finishes.
//!
//! Idle -> Transitioning happens only through [`GravityController::request_cycle`] (or
//! [`GravityController::request_direction`]). Transitioning -> Idle happens only inside
//! [`GravityController::tick`] once the transition's duration has elapsed. There is no
//! cancel.
//!
//! # Ownership
//! The controller is the single writer of the [`GravityState`]. Everything else (movement
//! projection, the physics integrator, HUD) reads it through [`GravityController::gravity`].

use log::{debug, info, warn};
use nalgebra::Vector3;

use crate::{
    angle::Euler,
    config::GravityConfig,
    constants::DIST_EPS,
    direction::Direction,
    transition::GravityTransition,
};

/// The world gravity vector shared by every physics body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityState {
    vector: Vector3<f32>,
}

impl GravityState {
    /// Gravity at rest for `direction`.
    #[inline]
    pub fn at_rest(direction: Direction, strength: f32) -> Self {
        Self {
            vector: direction.axis() * strength,
        }
    }

    /// Current acceleration in m/s².
    #[inline]
    pub fn vector(&self) -> Vector3<f32> {
        self.vector
    }

    /// Unit direction gravity pulls along, or `None` while the vector is degenerate
    /// (e.g. passing through zero halfway between opposite directions).
    #[inline]
    pub fn axis(&self) -> Option<Vector3<f32>> {
        let len = self.vector.norm();
        (len > DIST_EPS).then(|| self.vector / len)
    }
}

/// One-shot notification for an accepted direction change.
///
/// Effect playback (particles, sound, camera shake, HUD) consumes this; nothing is
/// expected back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionStarted {
    pub from: Direction,
    pub to: Direction,
}

/// Reported by [`GravityController::tick`] on the tick a transition ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionCompleted {
    pub from: Direction,
    pub to: Direction,
}

#[derive(Clone, Debug)]
pub struct GravityController {
    config: GravityConfig,
    direction: Direction,
    orientation: Euler,
    gravity: GravityState,
    transition: Option<GravityTransition>,
}

impl GravityController {
    /// Builds a controller at rest in the config's initial direction.
    pub fn new(config: GravityConfig) -> Self {
        let direction = config.initial_direction();
        Self {
            config,
            direction,
            orientation: direction.orientation(),
            gravity: GravityState::at_rest(direction, config.strength()),
            transition: None,
        }
    }

    /// Direction gravity last settled on. Stays at the source direction while a
    /// transition is in flight.
    #[inline]
    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    /// Direction being transitioned toward, if any.
    #[inline]
    pub fn target_direction(&self) -> Option<Direction> {
        self.transition.as_ref().map(GravityTransition::to)
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    #[inline]
    pub fn gravity(&self) -> &GravityState {
        &self.gravity
    }

    #[inline]
    pub fn current_gravity_vector(&self) -> Vector3<f32> {
        self.gravity.vector()
    }

    /// Body orientation (Euler degrees) the controller is driving the actor toward.
    #[inline]
    pub fn orientation(&self) -> Euler {
        self.orientation
    }

    /// Eased progress of the in-flight transition in `[0, 1]`.
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition
            .as_ref()
            .map(GravityTransition::eased_progress)
    }

    /// Begins a transition to the next direction in the cycle.
    ///
    /// Returns `None` (and changes nothing) while a transition is already running.
    pub fn request_cycle(&mut self) -> Option<TransitionStarted> {
        self.request_direction(self.direction.next())
    }

    /// Begins a transition to `target`.
    ///
    /// Dropped, not queued, while a transition is in flight. Requesting the direction
    /// gravity is already resting on is also a no-op.
    pub fn request_direction(&mut self, target: Direction) -> Option<TransitionStarted> {
        if let Some(active) = &self.transition {
            debug!(
                "Gravity request {:?} dropped, transition {:?} -> {:?} in flight",
                target,
                active.from(),
                active.to()
            );
            return None;
        }
        if target == self.direction {
            return None;
        }

        let transition = match GravityTransition::new(
            self.direction,
            target,
            self.orientation,
            self.gravity.vector(),
            self.config.strength(),
            self.config.transition_duration(),
        ) {
            Ok(t) => t,
            Err(err) => {
                warn!("Refusing gravity change to {target:?}: {err}");
                return None;
            }
        };

        let started = TransitionStarted {
            from: self.direction,
            to: target,
        };
        info!("Gravity transition started: {:?} -> {:?}", started.from, started.to);
        self.transition = Some(transition);
        Some(started)
    }

    /// Advances the in-flight transition by `dt_seconds`, writing orientation and gravity.
    ///
    /// On the tick the transition ends, both are snapped to the exact target, the
    /// transition is dropped and the new direction recorded before returning, so any
    /// reader later in the same tick sees the settled state.
    pub fn tick(&mut self, dt_seconds: f32) -> Option<TransitionCompleted> {
        let transition = self.transition.as_mut()?;
        let sample = transition.advance(dt_seconds);
        self.orientation = sample.orientation;
        self.gravity.vector = sample.gravity;

        if !sample.finished {
            return None;
        }

        let completed = TransitionCompleted {
            from: transition.from(),
            to: transition.to(),
        };
        self.transition = None;
        self.direction = completed.to;
        info!(
            "Gravity changed to: {:?} | Rotation: {:?} | Gravity: {:?}",
            completed.to,
            self.orientation,
            self.gravity.vector()
        );
        Some(completed)
    }
}

impl Default for GravityController {
    fn default() -> Self {
        Self::new(GravityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY_MPS2;

    const EPS: f32 = 1.0e-4;

    fn controller(rotation_speed: f32) -> GravityController {
        GravityController::new(
            GravityConfig::new(GRAVITY_MPS2, rotation_speed, Direction::Down).unwrap(),
        )
    }

    fn run_ticks(c: &mut GravityController, count: usize, dt: f32) -> Vec<TransitionCompleted> {
        (0..count).filter_map(|_| c.tick(dt)).collect()
    }

    #[test]
    fn starts_at_rest_on_initial_direction() {
        let cfg = GravityConfig::new(4.0, 1.0, Direction::Right).unwrap();
        let c = GravityController::new(cfg);
        assert_eq!(c.current_direction(), Direction::Right);
        assert!(!c.is_transitioning());
        assert_eq!(c.current_gravity_vector(), Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(c.orientation(), Direction::Right.orientation());
    }

    #[test]
    fn cycle_from_down_lands_on_up_after_half_second() {
        let mut c = controller(2.0);
        assert_eq!(c.current_gravity_vector(), Vector3::new(0.0, -9.81, 0.0));

        let started = c.request_cycle();
        assert_eq!(
            started,
            Some(TransitionStarted {
                from: Direction::Down,
                to: Direction::Up
            })
        );
        assert!(c.is_transitioning());
        assert_eq!(c.target_direction(), Some(Direction::Up));

        let done = run_ticks(&mut c, 30, 1.0 / 60.0);
        assert_eq!(
            done,
            vec![TransitionCompleted {
                from: Direction::Down,
                to: Direction::Up
            }]
        );
        assert_eq!(c.current_direction(), Direction::Up);
        assert!(!c.is_transitioning());
        assert!((c.current_gravity_vector() - Vector3::new(0.0, 9.81, 0.0)).norm() < EPS);
        assert_eq!(c.orientation(), Direction::Up.orientation());
    }

    #[test]
    fn requests_during_transition_are_dropped() {
        let mut c = controller(2.0);
        assert!(c.request_cycle().is_some());
        c.tick(0.1);

        for _ in 0..5 {
            assert_eq!(c.request_cycle(), None);
            assert_eq!(c.request_direction(Direction::Right), None);
            assert_eq!(c.current_direction(), Direction::Down);
            assert_eq!(c.target_direction(), Some(Direction::Up));
        }

        // Only the first transition completes; no queued follow-up.
        let done = run_ticks(&mut c, 100, 0.1);
        assert_eq!(done.len(), 1);
        assert_eq!(c.current_direction(), Direction::Up);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn is_transitioning_until_final_tick() {
        let mut c = controller(2.0);
        c.request_cycle();
        for _ in 0..4 {
            assert!(c.tick(0.1).is_none());
            assert!(c.is_transitioning());
        }
        assert!(c.tick(0.1).is_some());
        assert!(!c.is_transitioning());
    }

    #[test]
    fn full_cycle_visits_every_direction_and_returns() {
        let mut c = controller(2.0);
        let mut seen = vec![c.current_direction()];
        for _ in 0..4 {
            assert!(c.request_cycle().is_some());
            run_ticks(&mut c, 10, 0.05);
            assert!(!c.is_transitioning());
            seen.push(c.current_direction());
            let d = c.current_direction();
            assert_eq!(c.current_gravity_vector(), d.axis() * GRAVITY_MPS2);
            assert_eq!(c.orientation(), d.orientation());
        }
        assert_eq!(
            seen,
            vec![
                Direction::Down,
                Direction::Up,
                Direction::Left,
                Direction::Right,
                Direction::Down
            ]
        );
    }

    #[test]
    fn gravity_moves_monotonically_toward_target() {
        let mut c = controller(1.0);
        c.request_direction(Direction::Left);
        let target = Direction::Left.axis() * GRAVITY_MPS2;
        let mut prev = (c.current_gravity_vector() - target).norm();
        while c.is_transitioning() {
            c.tick(1.0 / 30.0);
            let dist = (c.current_gravity_vector() - target).norm();
            assert!(dist <= prev + 1.0e-5);
            prev = dist;
        }
        assert_eq!(c.current_gravity_vector(), target);
    }

    #[test]
    fn tick_when_idle_is_noop() {
        let mut c = controller(2.0);
        assert!(c.tick(1.0).is_none());
        assert_eq!(c.current_direction(), Direction::Down);
        assert_eq!(c.transition_progress(), None);
    }

    #[test]
    fn requesting_current_direction_at_rest_is_noop() {
        let mut c = controller(2.0);
        assert_eq!(c.request_direction(Direction::Down), None);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn progress_is_reported_while_transitioning() {
        let mut c = controller(2.0);
        c.request_cycle();
        assert_eq!(c.transition_progress(), Some(0.0));
        c.tick(0.25);
        let p = c.transition_progress().unwrap();
        assert!((p - 0.5).abs() < 1.0e-5);
    }

    #[test]
    fn gravity_axis_is_none_when_degenerate() {
        let mut c = controller(2.0);
        c.request_cycle();
        c.tick(0.25);
        // Down -> Up blends straight through zero at the midpoint.
        assert!(c.gravity().axis().is_none());
        c.tick(0.25);
        let axis = c.gravity().axis().unwrap();
        assert!((axis - Vector3::y()).norm() < EPS);
    }
}
