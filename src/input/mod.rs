use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, read_input);
    }
}

/// Translates keyboard/mouse state into the `PlayerInput` resource.
///
/// Held state (the movement axis) is overwritten each render frame; edge
/// flags are OR-accumulated so a key press is never lost between fixed
/// simulation ticks, and cleared by the simulation once consumed.
fn read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    game_state: Res<State<GameState>>,
    mut input: ResMut<PlayerInput>,
) {
    // Death and level-transition screens swallow all input; the overlays
    // advance on their own timers.
    if *game_state.get() != GameState::Playing {
        input.move_axis = 0.0;
        return;
    }

    let mut axis = 0.0;
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }
    input.move_axis = axis;

    input.jump |= keys.just_pressed(KeyCode::Space);
    input.interact |=
        keys.just_pressed(KeyCode::KeyF) || mouse.just_pressed(MouseButton::Left);
    input.eat |= keys.just_pressed(KeyCode::KeyQ);
    input.toggle_inventory |= keys.just_pressed(KeyCode::KeyE);
    input.toggle_build_mode |= keys.just_pressed(KeyCode::KeyB);
    input.toggle_help |= keys.just_pressed(KeyCode::KeyH);

    for (i, key) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ]
    .iter()
    .enumerate()
    {
        if keys.just_pressed(*key) {
            input.quick_slot = Some(i as u8);
            break;
        }
    }

    // Overlay navigation shares the movement keys.
    input.ui_left |= keys.just_pressed(KeyCode::KeyA) || keys.just_pressed(KeyCode::ArrowLeft);
    input.ui_right |= keys.just_pressed(KeyCode::KeyD) || keys.just_pressed(KeyCode::ArrowRight);
    input.ui_confirm |= keys.just_pressed(KeyCode::Enter);
}
