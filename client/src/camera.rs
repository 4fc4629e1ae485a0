use crate::player::Player;
use bevy::{core_pipeline::tonemapping::Tonemapping, prelude::*};

pub(super) fn plugin(app: &mut App) {
    // Startup commands have been applied by now, so the player exists.
    app.add_systems(PostStartup, add_camera);
}

/// Chase offset in the player's local frame. Parenting to the player means the camera
/// rolls with every gravity change.
pub const CAMERA_OFFSET_LOCAL: Vec3 = Vec3::new(0.0, 2.0, 5.5);
const CAMERA_LOOK_AT_LOCAL: Vec3 = Vec3::new(0.0, 0.5, -2.0);

/// Resting local translation; effects offset from here and return to it.
#[derive(Component, Debug)]
pub struct PlayerCamera {
    pub rest: Vec3,
}

fn add_camera(mut commands: Commands, player: Single<Entity, With<Player>>) {
    commands.spawn((
        Name::new("PlayerCamera"),
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Transform::from_translation(CAMERA_OFFSET_LOCAL).looking_at(CAMERA_LOOK_AT_LOCAL, Vec3::Y),
        PlayerCamera {
            rest: CAMERA_OFFSET_LOCAL,
        },
        ChildOf(*player),
    ));
}
