//! Feedback played when gravity starts to shift: a screen flash and a camera shake.
//!
//! Both read [`GravityShiftStarted`] and never touch the controller.

use bevy::prelude::*;
use gravity_shared::smoothstep;

use crate::{camera::PlayerCamera, gravity::GravityShiftStarted};

#[derive(Resource, Debug, Clone)]
pub struct EffectSettings {
    /// Seconds for the flash to fade out.
    pub flash_duration: f32,
    pub flash_color: Color,
    /// Alpha at the start of the flash.
    pub flash_peak_alpha: f32,
    /// Seconds.
    pub shake_duration: f32,
    /// Maximum local offset (meters) on each screen axis.
    pub shake_intensity: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            flash_duration: 0.3,
            flash_color: Color::srgb(0.0, 1.0, 1.0),
            flash_peak_alpha: 0.35,
            shake_duration: 0.2,
            shake_intensity: 0.3,
        }
    }
}

/// Seconds since the effect was triggered; `None` when idle.
#[derive(Resource, Debug, Default)]
struct ActiveEffects {
    flash: Option<f32>,
    shake: Option<f32>,
}

#[derive(Component)]
struct ScreenFlash;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<EffectSettings>();
    app.init_resource::<ActiveEffects>();

    app.add_systems(Startup, spawn_flash_overlay);
    app.add_systems(
        Update,
        (start_effects, play_flash, play_shake).chain(),
    );
}

/// Overlay alpha `elapsed` seconds into a flash: eases from `peak` down to zero.
pub fn flash_alpha(elapsed: f32, duration: f32, peak: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    peak * (1.0 - smoothstep(elapsed / duration))
}

/// Pseudo-random offset in `[-intensity, intensity]²` for a shake sample.
///
/// Deterministic in `elapsed`, so the same frame timing gives the same shake.
pub fn shake_offset(elapsed: f32, intensity: f32) -> Vec2 {
    fn noise(seed: f32) -> f32 {
        ((seed.sin() * 43_758.547).rem_euclid(1.0)) * 2.0 - 1.0
    }
    let t = elapsed * 97.0;
    Vec2::new(noise(t), noise(t + 17.31)) * intensity
}

fn spawn_flash_overlay(mut commands: Commands) {
    commands.spawn((
        Name::new("ScreenFlash"),
        ScreenFlash,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        Pickable::IGNORE,
        GlobalZIndex(i32::MAX),
    ));
}

fn start_effects(
    mut started: MessageReader<GravityShiftStarted>,
    mut active: ResMut<ActiveEffects>,
) {
    for shift in started.read() {
        info!("Gravity shifting {:?} -> {:?}", shift.from, shift.to);
        active.flash = Some(0.0);
        active.shake = Some(0.0);
    }
}

fn play_flash(
    time: Res<Time>,
    settings: Res<EffectSettings>,
    mut active: ResMut<ActiveEffects>,
    mut overlay: Query<&mut BackgroundColor, With<ScreenFlash>>,
) {
    let Some(elapsed) = active.flash else {
        return;
    };

    let alpha = flash_alpha(elapsed, settings.flash_duration, settings.flash_peak_alpha);
    for mut bg in &mut overlay {
        bg.0 = settings.flash_color.with_alpha(alpha);
    }

    let next = elapsed + time.delta_secs();
    active.flash = (elapsed < settings.flash_duration).then_some(next);
}

fn play_shake(
    time: Res<Time>,
    settings: Res<EffectSettings>,
    mut active: ResMut<ActiveEffects>,
    mut camera: Query<(&mut Transform, &PlayerCamera)>,
) {
    let Some(elapsed) = active.shake else {
        return;
    };

    let done = elapsed >= settings.shake_duration;
    let offset = if done {
        Vec2::ZERO
    } else {
        shake_offset(elapsed, settings.shake_intensity)
    };
    for (mut transform, cam) in &mut camera {
        transform.translation = cam.rest + offset.extend(0.0);
    }

    active.shake = (!done).then_some(elapsed + time.delta_secs());
}
