pub mod angle;
pub mod config;
pub mod constants;
pub mod controller;
pub mod direction;
pub mod level;
pub mod movement;
pub mod physics;
pub mod transition;

pub use angle::{
    AngleError, Euler, normalize_angle, normalize_euler, orientation_rotation, shortest_delta,
    shortest_delta_euler,
};
pub use config::{GravityConfig, GravityConfigError};
pub use constants::{
    DEFAULT_JUMP_SPEED, DEFAULT_MOVEMENT_SPEED, DEFAULT_ROTATION_SPEED, GRAVITY_MPS2,
    INTENT_DEADZONE, TERMINAL_FALL_SPEED_MPS,
};
pub use controller::{GravityController, GravityState, TransitionCompleted, TransitionStarted};
pub use direction::Direction;
pub use level::{
    BodyShape, BodyStep, ColliderShapeDef, LevelQueryWorld, RayHit, WorldStaticDef, room_statics,
};
pub use movement::{MovementBasis, MovementIntent, project_velocity};
pub use physics::{apply_jump, integrate_gravity};
pub use transition::{GravityTransition, TransitionSample, smoothstep};
