use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// `x` strafes right, `y` moves forward.
    #[actionlike(DualAxis)]
    Move,
    CycleGravity,
    Jump,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let input_map = InputMap::<InputAction>::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Move, VirtualDPad::arrow_keys())
        .with(InputAction::CycleGravity, KeyCode::KeyE)
        .with(InputAction::Jump, KeyCode::Space);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
