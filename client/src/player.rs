//! The locally controlled actor.
//!
//! Each fixed tick runs after the gravity controller has advanced:
//! 1. the body is rotated to the controller's orientation,
//! 2. input is projected onto the plane perpendicular to gravity,
//! 3. gravity is integrated and the body is swept through the level.

use bevy::prelude::*;
use gravity_shared::{
    BodyShape, DEFAULT_JUMP_SPEED, DEFAULT_MOVEMENT_SPEED, MovementBasis, MovementIntent,
    TERMINAL_FALL_SPEED_MPS, apply_jump, integrate_gravity, project_velocity,
};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    convert::{quat_from_orientation, vec3_from_na, vec3_to_na},
    gravity::{Gravity, GravitySet},
    input::InputAction,
    level::Level,
};

#[derive(Component)]
pub struct Player;

/// Simulated state carried between fixed ticks.
#[derive(Component, Debug, Default)]
pub struct PlayerBody {
    pub velocity: Vec3,
    pub supported: bool,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSettings {
    /// Meters per second across the walkable plane.
    pub move_speed: f32,
    /// Meters per second against gravity at takeoff.
    pub jump_speed: f32,
    pub shape: BodyShape,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVEMENT_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            shape: BodyShape {
                radius: 0.4,
                half_height: 0.5,
            },
        }
    }
}

/// Jump presses seen in `Update`, consumed by the next fixed tick.
#[derive(Resource, Default)]
pub struct JumpRequest(bool);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PlayerSettings>();
    app.init_resource::<JumpRequest>();

    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, buffer_jump);
    app.add_systems(
        FixedUpdate,
        (apply_orientation, move_player)
            .chain()
            .after(GravitySet::Advance),
    );
}

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<PlayerSettings>,
    gravity: Res<Gravity>,
) {
    let shape = settings.shape;
    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerBody::default(),
            Mesh3d(meshes.add(Capsule3d::new(shape.radius, shape.half_height * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::linear_rgb(0.2, 0.9, 0.8),
                ..default()
            })),
            Transform::from_rotation(quat_from_orientation(gravity.orientation())),
        ))
        .with_children(|parent| {
            // Visor on the -Z side so the facing survives every gravity roll.
            parent.spawn((
                Name::new("Visor"),
                Mesh3d(meshes.add(Cuboid::new(0.5, 0.15, 0.1))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 1.0, 1.0),
                    ..default()
                })),
                Transform::from_xyz(0.0, shape.half_height * 0.6, -shape.radius),
            ));
        });

    info!("Player spawned with {:?}", shape);
}

fn buffer_jump(actions: Res<ActionState<InputAction>>, mut jump: ResMut<JumpRequest>) {
    if actions.just_pressed(&InputAction::Jump) {
        jump.0 = true;
    }
}

fn apply_orientation(
    gravity: Res<Gravity>,
    mut player: Query<&mut Transform, With<Player>>,
) {
    let rotation = quat_from_orientation(gravity.orientation());
    for mut transform in &mut player {
        transform.rotation = rotation;
    }
}

fn move_player(
    time: Res<Time>,
    gravity: Res<Gravity>,
    level: Res<Level>,
    settings: Res<PlayerSettings>,
    actions: Res<ActionState<InputAction>>,
    mut jump: ResMut<JumpRequest>,
    player: Single<(&mut Transform, &mut PlayerBody), With<Player>>,
) {
    let (mut transform, mut body) = player.into_inner();
    let dt = time.delta_secs();
    let state = gravity.gravity();

    let axes = actions.axis_pair(&InputAction::Move);
    let intent = MovementIntent::from_axes(axes.x, axes.y);
    let basis = MovementBasis {
        forward: vec3_to_na(transform.forward().as_vec3()),
        right: vec3_to_na(transform.right().as_vec3()),
    };

    let mut velocity = project_velocity(
        intent,
        basis,
        state,
        vec3_to_na(body.velocity),
        settings.move_speed,
    );

    if std::mem::take(&mut jump.0) && body.supported {
        velocity = apply_jump(velocity, state, settings.jump_speed);
        debug!("Jump from {:?}", transform.translation);
    }

    velocity = integrate_gravity(velocity, state, dt, TERMINAL_FALL_SPEED_MPS);

    let step = level.step_body(
        vec3_to_na(transform.translation),
        velocity,
        state,
        settings.shape,
        dt,
    );
    transform.translation = vec3_from_na(step.position);
    body.velocity = vec3_from_na(step.velocity);
    body.supported = step.supported;
}
