//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use gravity_shared::Direction;
use iyes_perf_ui::prelude::*;
use nalgebra::Vector3;

use crate::{convert::vec3_from_na, gravity::Gravity, hud::direction_color, player::Player};

/// Arrow length per m/s² of gravity.
const GRAVITY_ARROW_SCALE: f32 = 0.2;

const IN_BETWEEN_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(PostUpdate, (draw_gravity, draw_player_facing));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Live gravity vector from the player's center. Shrinks through zero on a Down/Up swap.
fn draw_gravity(mut gizmos: Gizmos, gravity: Res<Gravity>, q: Query<&GlobalTransform, With<Player>>) {
    let g = vec3_from_na(gravity.current_gravity_vector()) * GRAVITY_ARROW_SCALE;
    if !g.is_finite() || g.length_squared() <= 1.0e-8 {
        return;
    }
    let color = gravity_arrow_color(gravity.current_gravity_vector());
    for gt in &q {
        let start = gt.translation();
        gizmos.arrow(start, start + g, color);
    }
}

/// Color of the direction the live vector matches, gray while it is in between.
fn gravity_arrow_color(gravity: Vector3<f32>) -> Color {
    Direction::from_gravity(gravity)
        .map(direction_color)
        .unwrap_or(IN_BETWEEN_COLOR)
}

fn draw_player_facing(mut gizmos: Gizmos, q: Query<&GlobalTransform, With<Player>>) {
    for gt in &q {
        let (_, rot, start) = gt.to_scale_rotation_translation();

        let mut dir = rot * Vec3::NEG_Z;
        if !dir.is_finite() || dir.length_squared() <= 1.0e-8 {
            dir = Vec3::NEG_Z;
        }

        let end = start + dir.normalize() * 1.5;
        gizmos.arrow(start, end, Color::srgb(1.0, 1.0, 0.2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_shared::GRAVITY_MPS2;

    #[test]
    fn arrow_color_follows_the_live_vector() {
        for d in Direction::ALL {
            assert_eq!(gravity_arrow_color(d.axis() * GRAVITY_MPS2), direction_color(d));
        }
        // Halfway through a Down -> Left shift the vector matches neither.
        let between = (Direction::Down.axis() + Direction::Left.axis()) * 0.5 * GRAVITY_MPS2;
        assert_eq!(gravity_arrow_color(between), IN_BETWEEN_COLOR);
        assert_eq!(gravity_arrow_color(Vector3::zeros()), IN_BETWEEN_COLOR);
    }
}
