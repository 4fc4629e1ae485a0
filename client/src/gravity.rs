//! Bevy wiring for the gravity controller.
//!
//! The controller lives in a single [`Gravity`] resource. Only the systems in this module
//! mutate it; everything else takes `Res<Gravity>`.

use bevy::prelude::*;
use gravity_shared::{Direction, GravityConfig, GravityController};
use leafwing_input_manager::prelude::ActionState;

use crate::input::InputAction;

/// The world's single gravity controller.
#[derive(Resource, Debug, Deref)]
pub struct Gravity(GravityController);

#[cfg(test)]
impl Gravity {
    pub(crate) fn controller_mut(&mut self) -> &mut GravityController {
        &mut self.0
    }
}

/// Fired once per accepted gravity change, consumed by effect playback and HUD.
#[derive(Message, Clone, Copy, Debug)]
pub struct GravityShiftStarted {
    pub from: Direction,
    pub to: Direction,
}

/// Fired on the fixed tick a shift settles; the HUD relabels from it.
#[derive(Message, Clone, Copy, Debug)]
pub struct GravityShiftCompleted {
    pub from: Direction,
    pub to: Direction,
}

/// Fixed-step ordering: gravity is advanced before anything reads it in the same tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GravitySet {
    Advance,
}

pub struct GravityPlugin {
    pub config: GravityConfig,
}

impl Default for GravityPlugin {
    fn default() -> Self {
        Self {
            config: GravityConfig::default(),
        }
    }
}

impl Plugin for GravityPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Gravity: strength {} m/s², transition {}s, starting {:?}",
            self.config.strength(),
            self.config.transition_duration(),
            self.config.initial_direction()
        );
        app.insert_resource(Gravity(GravityController::new(self.config)));
        app.add_message::<GravityShiftStarted>();
        app.add_message::<GravityShiftCompleted>();

        app.add_systems(Update, request_cycle_on_input);
        app.add_systems(FixedUpdate, advance_gravity.in_set(GravitySet::Advance));
    }
}

fn request_cycle_on_input(
    actions: Res<ActionState<InputAction>>,
    mut gravity: ResMut<Gravity>,
    mut started: MessageWriter<GravityShiftStarted>,
) {
    if !actions.just_pressed(&InputAction::CycleGravity) {
        return;
    }

    // Presses while a transition is running are dropped by the controller.
    if let Some(s) = gravity.0.request_cycle() {
        started.write(GravityShiftStarted {
            from: s.from,
            to: s.to,
        });
    }
}

fn advance_gravity(
    time: Res<Time>,
    mut gravity: ResMut<Gravity>,
    mut completed: MessageWriter<GravityShiftCompleted>,
) {
    if let Some(c) = gravity.0.tick(time.delta_secs()) {
        completed.write(GravityShiftCompleted {
            from: c.from,
            to: c.to,
        });
    }
}
