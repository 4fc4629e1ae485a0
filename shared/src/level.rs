//! Rapier-based query world for the static level geometry.
//!
//! The level never moves, so it is built once from [`WorldStaticDef`]s and then only
//! queried: ray casts along the active gravity axis decide whether a body is supported,
//! and ray casts along a body's displacement stop it at walls, floors and ceilings.
//!
//! Determinism
//! - Defs are sorted by `id` before insertion, so the same input builds identical sets.
//! - Queries are pure reads; stepping a body never mutates the world.

use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::na as rna;
use rapier3d::prelude::*;

use crate::{
    constants::{DEFAULT_SKIN, DIST_EPS, GROUND_PROBE_DISTANCE},
    controller::GravityState,
};

/// Canonical definition of an immutable level collider.
///
/// Units are meters.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector3<f32> },
    Sphere { radius: f32 },
}

/// Collision proxy for a gravity-aligned capsule body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyShape {
    pub radius: f32,
    pub half_height: f32,
}

impl BodyShape {
    /// Distance from the center to the capsule tip along its (gravity-aligned) axis.
    #[inline]
    pub fn extent_along_gravity(&self) -> f32 {
        self.half_height + self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub normal: Vector3<f32>,
}

/// Output of [`LevelQueryWorld::step_body`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyStep {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    /// Whether there is level geometry within probe distance along gravity.
    pub supported: bool,
}

pub struct LevelQueryWorld {
    defs: Vec<WorldStaticDef>,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl LevelQueryWorld {
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.iter() {
            let iso = Isometry::from_parts(
                rna::Translation3::new(def.translation.x, def.translation.y, def.translation.z),
                to_rapier_rotation(def.rotation),
            );
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
            colliders.insert_with_parent(collider_from_def(def), rb_handle, &mut bodies);
        }

        // Collision detection only (no dynamics) to populate the broad/narrow phases.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        log::debug!("Level query world built with {} colliders", colliders.len());

        Self {
            defs,
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// The level's statics in insertion (id) order.
    pub fn defs(&self) -> &[WorldStaticDef] {
        &self.defs
    }

    /// Borrowed `QueryPipeline` view over the level.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Closest hit along unit `dir` from `origin` within `max_distance`.
    pub fn cast(&self, origin: Vector3<f32>, dir: Vector3<f32>, max_distance: f32) -> Option<RayHit> {
        let pipeline = self.query_pipeline(QueryFilter::default());
        let ray = Ray::new(
            rna::Point3::new(origin.x, origin.y, origin.z),
            rna::Vector3::new(dir.x, dir.y, dir.z),
        );
        pipeline
            .cast_ray_and_get_normal(&ray, max_distance.max(0.0), true)
            .map(|(_handle, hit)| RayHit {
                distance: hit.time_of_impact,
                normal: Vector3::new(hit.normal.x, hit.normal.y, hit.normal.z),
            })
    }

    /// Level geometry within `probe` of the body's tip along the current gravity axis.
    ///
    /// Always `None` while gravity is degenerate.
    pub fn support_along(
        &self,
        position: Vector3<f32>,
        gravity: &GravityState,
        shape: BodyShape,
        probe: f32,
    ) -> Option<RayHit> {
        let axis = gravity.axis()?;
        self.cast(position, axis, shape.extent_along_gravity() + probe.max(0.0))
    }

    /// Moves a body by `velocity * dt`, stopping it short of static geometry.
    ///
    /// The displacement is split into a lateral part (checked against the capsule radius)
    /// and an along-gravity part (checked against the capsule's half length). Velocity
    /// into any surface that was hit is removed, so landing zeroes the fall speed.
    pub fn step_body(
        &self,
        position: Vector3<f32>,
        velocity: Vector3<f32>,
        gravity: &GravityState,
        shape: BodyShape,
        dt_seconds: f32,
    ) -> BodyStep {
        let dt = dt_seconds.max(0.0);
        let displacement = velocity * dt;

        let (mut pos, mut vel) = (position, velocity);
        match gravity.axis() {
            Some(axis) => {
                let along = axis * displacement.dot(&axis);
                let lateral = displacement - along;
                (pos, vel) = self.sweep(pos, vel, lateral, shape.radius);
                (pos, vel) = self.sweep(pos, vel, along, shape.extent_along_gravity());
            }
            None => {
                (pos, vel) = self.sweep(pos, vel, displacement, shape.extent_along_gravity());
            }
        }

        let supported = self
            .support_along(pos, gravity, shape, GROUND_PROBE_DISTANCE)
            .is_some();
        if supported {
            if let Some(axis) = gravity.axis() {
                let into_ground = vel.dot(&axis);
                if into_ground > 0.0 {
                    vel -= axis * into_ground;
                }
            }
        }

        BodyStep {
            position: pos,
            velocity: vel,
            supported,
        }
    }

    fn sweep(
        &self,
        pos: Vector3<f32>,
        vel: Vector3<f32>,
        delta: Vector3<f32>,
        reach: f32,
    ) -> (Vector3<f32>, Vector3<f32>) {
        let len = delta.norm();
        if len <= DIST_EPS {
            return (pos, vel);
        }
        let dir = delta / len;

        let Some(hit) = self.cast(pos, dir, len + reach + DEFAULT_SKIN) else {
            return (pos + delta, vel);
        };

        let allowed = (hit.distance - reach - DEFAULT_SKIN).clamp(0.0, len);
        let into_surface = vel.dot(&hit.normal);
        let vel = if into_surface < 0.0 {
            vel - hit.normal * into_surface
        } else {
            vel
        };
        (pos + dir * allowed, vel)
    }
}

/// Thickness of the slabs that close off a room (meters).
pub const ROOM_WALL_THICKNESS: f32 = 0.5;

/// Closed box room centered on the origin: floor, ceiling and four walls.
///
/// Each face is a slab whose inner surface lies on the room boundary, so any of the
/// four gravity directions lands the player on a walkable surface. Ids are `0..6`.
pub fn room_statics(half_extents: Vector3<f32>) -> Vec<WorldStaticDef> {
    let h = half_extents;
    let t = ROOM_WALL_THICKNESS * 0.5;
    // Slabs overlap at the edges so there are no seams to fall through.
    let (ox, oy, oz) = (h.x + 2.0 * t, h.y + 2.0 * t, h.z + 2.0 * t);
    let slabs: [(Vector3<f32>, Vector3<f32>); 6] = [
        (Vector3::new(0.0, -h.y - t, 0.0), Vector3::new(ox, t, oz)),
        (Vector3::new(0.0, h.y + t, 0.0), Vector3::new(ox, t, oz)),
        (Vector3::new(-h.x - t, 0.0, 0.0), Vector3::new(t, oy, oz)),
        (Vector3::new(h.x + t, 0.0, 0.0), Vector3::new(t, oy, oz)),
        (Vector3::new(0.0, 0.0, -h.z - t), Vector3::new(ox, oy, t)),
        (Vector3::new(0.0, 0.0, h.z + t), Vector3::new(ox, oy, t)),
    ];

    slabs
        .into_iter()
        .enumerate()
        .map(|(i, (center, half_extents))| WorldStaticDef {
            id: i as u32,
            translation: center,
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid { half_extents },
        })
        .collect()
}

fn to_rapier_rotation(q: UnitQuaternion<f32>) -> rna::UnitQuaternion<f32> {
    rna::UnitQuaternion::new_normalize(rna::Quaternion::new(q.w, q.i, q.j, q.k))
}

/// The collider uses the pose stored on the parent body, so its local transform is identity.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }
        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::GRAVITY_MPS2, direction::Direction};

    const EPS: f32 = 1.0e-3;

    const SHAPE: BodyShape = BodyShape {
        radius: 0.5,
        half_height: 0.5,
    };

    fn room() -> LevelQueryWorld {
        LevelQueryWorld::build(room_statics(Vector3::new(10.0, 5.0, 10.0)))
    }

    #[test]
    fn room_has_six_faces_outside_the_interior() {
        let half = Vector3::new(10.0, 5.0, 10.0);
        let defs = room_statics(half);
        assert_eq!(defs.len(), 6);
        for def in &defs {
            let ColliderShapeDef::Cuboid { half_extents } = &def.shape else {
                panic!("room faces are cuboids");
            };
            // The slab's inner surface sits exactly on one face of the interior box.
            let inner = (0..3)
                .map(|k| def.translation[k].abs() - half_extents[k])
                .zip([half.x, half.y, half.z])
                .filter(|(surface, bound)| (surface - bound).abs() < 1.0e-5)
                .count();
            assert_eq!(inner, 1, "face {}", def.id);
        }
    }

    #[test]
    fn sphere_props_block_rays() {
        let mut defs = room_statics(Vector3::new(10.0, 5.0, 10.0));
        defs.push(WorldStaticDef {
            id: 6,
            translation: Vector3::new(3.0, 0.0, 0.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Sphere { radius: 1.0 },
        });
        let world = LevelQueryWorld::build(defs);
        let hit = world.cast(Vector3::zeros(), Vector3::x(), 100.0).expect("sphere hit");
        assert!((hit.distance - 2.0).abs() < EPS);
    }

    #[test]
    fn ray_down_hits_floor() {
        let world = room();
        let hit = world
            .cast(Vector3::zeros(), -Vector3::y(), 100.0)
            .expect("floor hit");
        assert!((hit.distance - 5.0).abs() < EPS);
        assert!((hit.normal - Vector3::y()).norm() < EPS);
    }

    #[test]
    fn support_follows_gravity_direction() {
        let world = room();
        // Resting against the left wall (x = -10).
        let pos = Vector3::new(-10.0 + SHAPE.extent_along_gravity() + 0.01, 0.0, 0.0);
        let left = GravityState::at_rest(Direction::Left, GRAVITY_MPS2);
        let down = GravityState::at_rest(Direction::Down, GRAVITY_MPS2);
        assert!(world.support_along(pos, &left, SHAPE, 0.1).is_some());
        assert!(world.support_along(pos, &down, SHAPE, 0.1).is_none());
    }

    #[test]
    fn falling_body_lands_on_floor_and_stops() {
        let world = room();
        let gravity = GravityState::at_rest(Direction::Down, GRAVITY_MPS2);
        let step = world.step_body(
            Vector3::new(0.0, -3.0, 0.0),
            Vector3::new(0.0, -20.0, 0.0),
            &gravity,
            SHAPE,
            1.0,
        );
        assert!(step.supported);
        assert!(step.velocity.y.abs() < EPS);
        let floor_gap = step.position.y - (-5.0 + SHAPE.extent_along_gravity());
        assert!(floor_gap >= -EPS && floor_gap < 0.05, "gap {floor_gap}");
    }

    #[test]
    fn lateral_motion_stops_at_wall_but_keeps_sliding_component() {
        let world = room();
        let gravity = GravityState::at_rest(Direction::Down, GRAVITY_MPS2);
        let start = Vector3::new(9.0, -5.0 + SHAPE.extent_along_gravity(), 0.0);
        let step = world.step_body(start, Vector3::new(10.0, 0.0, 0.0), &gravity, SHAPE, 1.0);
        assert!(step.position.x <= 10.0 - SHAPE.radius + EPS);
        assert!(step.velocity.x.abs() < EPS);
    }

    #[test]
    fn free_flight_moves_by_full_displacement() {
        let world = room();
        let gravity = GravityState::at_rest(Direction::Down, GRAVITY_MPS2);
        let step = world.step_body(
            Vector3::zeros(),
            Vector3::new(1.0, 0.5, -1.0),
            &gravity,
            SHAPE,
            0.5,
        );
        assert!(!step.supported);
        assert!((step.position - Vector3::new(0.5, 0.25, -0.5)).norm() < EPS);
        assert_eq!(step.velocity, Vector3::new(1.0, 0.5, -1.0));
    }
}
