//! Gravity direction indicator: label, arrow and hint in the top-left corner.

use bevy::prelude::*;
use gravity_shared::Direction;

use crate::gravity::{Gravity, GravityShiftCompleted};

#[derive(Component)]
struct DirectionLabel;

#[derive(Component)]
struct DirectionArrow;

#[derive(Component)]
struct TransitionReadout;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Update, (relabel_on_shift_completed, update_readout));
}

pub fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Down => Color::WHITE,
        Direction::Up => Color::srgb(1.0, 0.25, 0.25),
        Direction::Left => Color::srgb(0.3, 1.0, 0.3),
        Direction::Right => Color::srgb(0.35, 0.55, 1.0),
    }
}

/// UI rotation for the "▼" glyph.
///
/// UI space is y-down, so the counter-clockwise roll from the direction table flips sign.
pub fn arrow_rotation(direction: Direction) -> Rot2 {
    Rot2::degrees(-direction.indicator_roll_degrees())
}

pub fn transition_text(progress: Option<f32>) -> String {
    match progress {
        Some(p) => format!("Shifting… {:>3.0}%", p.clamp(0.0, 1.0) * 100.0),
        None => String::new(),
    }
}

fn spawn_hud(mut commands: Commands, gravity: Res<Gravity>) {
    let direction = gravity.current_direction();
    commands
        .spawn((
            Name::new("GravityHud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    column_gap: Val::Px(12.0),
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        DirectionArrow,
                        Text::new("▼"),
                        TextFont::from_font_size(36.0),
                        TextColor(direction_color(direction)),
                        UiTransform {
                            rotation: arrow_rotation(direction),
                            ..default()
                        },
                    ));
                    row.spawn((
                        DirectionLabel,
                        Text::new(direction.label()),
                        TextFont::from_font_size(28.0),
                        TextColor(direction_color(direction)),
                    ));
                });
            parent.spawn((
                TransitionReadout,
                Text::default(),
                TextFont::from_font_size(16.0),
                TextColor(Color::srgb(0.0, 1.0, 1.0)),
            ));
            parent.spawn((
                Text::new("Press E to rotate gravity"),
                TextFont::from_font_size(16.0),
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
            ));
        });
}

/// The settled direction only changes when a shift completes.
fn relabel_on_shift_completed(
    mut completed: MessageReader<GravityShiftCompleted>,
    mut label: Single<(&mut Text, &mut TextColor), (With<DirectionLabel>, Without<DirectionArrow>)>,
    mut arrow: Single<(&mut UiTransform, &mut TextColor), With<DirectionArrow>>,
) {
    let Some(shift) = completed.read().last() else {
        return;
    };

    let direction = shift.to;
    let color = direction_color(direction);

    let (text, text_color) = &mut *label;
    text.0 = direction.label().to_string();
    text_color.0 = color;

    let (transform, arrow_color) = &mut *arrow;
    transform.rotation = arrow_rotation(direction);
    arrow_color.0 = color;
}

fn update_readout(
    gravity: Res<Gravity>,
    mut readout: Single<&mut Text, (With<TransitionReadout>, Without<DirectionLabel>)>,
) {
    if !gravity.is_changed() {
        return;
    }
    let text = transition_text(gravity.transition_progress());
    if readout.0 != text {
        readout.0 = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gravity::GravityPlugin, input::InputAction};
    use leafwing_input_manager::prelude::ActionState;

    #[test]
    fn arrow_points_along_gravity_on_screen() {
        for d in Direction::ALL {
            // "▼" points toward +y in UI space; world y is up.
            let screen = arrow_rotation(d) * Vec2::Y;
            let axis = d.axis();
            assert!((screen - Vec2::new(axis.x, -axis.y)).length() < 1.0e-4, "{d:?}");
        }
    }

    #[test]
    fn colors_differ_per_direction() {
        for a in Direction::ALL {
            for b in Direction::ALL {
                if a != b {
                    assert_ne!(direction_color(a), direction_color(b));
                }
            }
        }
    }

    #[test]
    fn completed_shift_relabels_the_indicator() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ActionState::<InputAction>::default());
        app.add_plugins(GravityPlugin::default());
        app.add_plugins(plugin);
        app.update();

        {
            let mut gravity = app.world_mut().resource_mut::<Gravity>();
            let c = gravity.controller_mut();
            c.request_cycle().expect("idle controller accepts a request");
            c.tick(1.0).expect("long tick completes the shift");
        }
        app.world_mut().write_message(GravityShiftCompleted {
            from: Direction::Down,
            to: Direction::Up,
        });
        app.update();

        let mut labels = app
            .world_mut()
            .query_filtered::<(&Text, &TextColor), With<DirectionLabel>>();
        let (text, color) = labels.single(app.world()).expect("one label");
        assert_eq!(text.0, Direction::Up.label());
        assert_eq!(color.0, direction_color(Direction::Up));

        let mut arrows = app
            .world_mut()
            .query_filtered::<&UiTransform, With<DirectionArrow>>();
        let arrow = arrows.single(app.world()).expect("one arrow");
        assert_eq!(arrow.rotation, arrow_rotation(Direction::Up));

        let mut readouts = app
            .world_mut()
            .query_filtered::<&Text, With<TransitionReadout>>();
        assert_eq!(readouts.single(app.world()).expect("one readout").0, "");
    }

    #[test]
    fn transition_text_only_while_shifting() {
        assert_eq!(transition_text(None), "");
        assert_eq!(transition_text(Some(0.5)), "Shifting…  50%");
        assert_eq!(transition_text(Some(1.0)), "Shifting… 100%");
    }
}
