use bevy::prelude::*;
use gravity_shared::{ColliderShapeDef, LevelQueryWorld, WorldStaticDef, room_statics};
use nalgebra::{UnitQuaternion, Vector3};

use crate::convert::{quat_from_na, vec3_from_na, vec3_to_na};

/// Half extents of the closed room (meters). Every face is walkable.
pub const ROOM_HALF_EXTENTS: Vec3 = Vec3::new(10.0, 6.0, 10.0);

/// Static collision world shared by every body in the level.
#[derive(Resource, Deref)]
pub struct Level(LevelQueryWorld);

impl Level {
    pub fn from_defs(defs: Vec<WorldStaticDef>) -> Self {
        Self(LevelQueryWorld::build(defs))
    }
}

#[derive(Component)]
pub struct LevelGeometry;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Level::from_defs(level_defs()));
    app.add_systems(Startup, spawn_level);
}

/// Room shell plus a few props so each gravity direction has something to look at.
pub fn level_defs() -> Vec<WorldStaticDef> {
    let mut defs = room_statics(vec3_to_na(ROOM_HALF_EXTENTS));
    let floor = -ROOM_HALF_EXTENTS.y;

    defs.extend([
        WorldStaticDef {
            id: 6,
            translation: Vector3::new(4.0, floor + 1.0, -3.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(1.5, 1.0, 1.5),
            },
        },
        WorldStaticDef {
            id: 7,
            translation: Vector3::new(-5.0, 0.0, 4.0),
            rotation: UnitQuaternion::from_euler_angles(0.0, 0.0, 45f32.to_radians()),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(0.75, 0.75, 3.0),
            },
        },
        WorldStaticDef {
            id: 8,
            translation: Vector3::new(0.0, ROOM_HALF_EXTENTS.y - 1.5, -6.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Sphere { radius: 1.5 },
        },
    ]);
    defs
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level: Res<Level>,
) {
    let shell = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.34, 0.4),
        perceptual_roughness: 0.9,
        ..default()
    });
    let prop = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.55, 0.25),
        ..default()
    });

    for def in level.defs() {
        let mesh = match &def.shape {
            ColliderShapeDef::Cuboid { half_extents } => {
                meshes.add(Cuboid::from_size(vec3_from_na(*half_extents) * 2.0))
            }
            ColliderShapeDef::Sphere { radius } => meshes.add(Sphere::new(*radius)),
        };
        // The six room slabs come first.
        let material = if def.id < 6 { shell.clone() } else { prop.clone() };

        commands.spawn((
            Name::new(format!("LevelGeometry{}", def.id)),
            LevelGeometry,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform {
                translation: vec3_from_na(def.translation),
                rotation: quat_from_na(def.rotation),
                ..default()
            },
        ));
    }

    // The room is closed, so light it from inside.
    commands.spawn((
        PointLight {
            intensity: 4_000_000.0,
            range: 40.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 3.0, 4.0),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
}
