//! Overlay panels: help tooltips, the tool-select screen, and the death /
//! level-transition screens.

use bevy::prelude::*;

use crate::player::tools::TOOL_ORDER;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// HELP PANEL
// ═══════════════════════════════════════════════════════════════════════

/// Shown for a few seconds at startup, then toggled with H.
#[derive(Resource, Debug)]
pub struct HelpOverlay {
    pub visible: bool,
    pub frames_left: u32,
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self {
            visible: true,
            frames_left: HELP_TIMEOUT_FRAMES,
        }
    }
}

#[derive(Component)]
pub struct HelpPanel;

const HELP_LINES: [&str; 8] = [
    "A/D or Arrows: Move",
    "Space: Jump",
    "E: Open/Close Inventory",
    "B: Toggle Building Mode",
    "F/Left Click: Interact/Attack",
    "1-4: Quick Select Tools",
    "Q: Eat Food",
    "H: Hide/Show This Help",
];

pub fn spawn_help_panel(mut commands: Commands) {
    commands
        .spawn((
            HelpPanel,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(80.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            for line in HELP_LINES {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });
}

/// System (fixed): the startup timeout and the H toggle.
pub fn tick_help(input: Res<PlayerInput>, mut help: ResMut<HelpOverlay>) {
    if input.toggle_help {
        help.visible = !help.visible;
        if help.visible {
            help.frames_left = HELP_TIMEOUT_FRAMES;
        }
        return;
    }

    if help.visible && help.frames_left > 0 {
        help.frames_left -= 1;
        if help.frames_left == 0 {
            help.visible = false;
        }
    }
}

pub fn sync_help_panel(
    help: Res<HelpOverlay>,
    mut panel: Query<&mut Visibility, With<HelpPanel>>,
) {
    if let Ok(mut visibility) = panel.get_single_mut() {
        *visibility = if help.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TOOL-SELECT OVERLAY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ToolOverlayPanel;

#[derive(Component)]
pub struct ToolSlotNode(pub usize);

pub fn spawn_tool_overlay(mut commands: Commands) {
    commands
        .spawn((
            ToolOverlayPanel,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.7)),
            Visibility::Hidden,
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            for (i, tool) in TOOL_ORDER.iter().enumerate() {
                parent
                    .spawn((
                        ToolSlotNode(i),
                        Node {
                            width: Val::Px(72.0),
                            height: Val::Px(72.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.4, 0.4, 0.4, 0.9)),
                        BorderColor(Color::BLACK),
                    ))
                    .with_children(|slot| {
                        slot.spawn((
                            Text::new(tool.name()),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

pub fn sync_tool_overlay(
    overlay: Res<ToolOverlay>,
    mut panel: Query<&mut Visibility, With<ToolOverlayPanel>>,
    mut slots: Query<(&ToolSlotNode, &mut BackgroundColor)>,
) {
    if let Ok(mut visibility) = panel.get_single_mut() {
        *visibility = if overlay.open {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    for (slot, mut bg) in slots.iter_mut() {
        bg.0 = if slot.0 == overlay.selected_slot {
            Color::srgba(0.9, 0.9, 0.9, 0.9)
        } else {
            Color::srgba(0.4, 0.4, 0.4, 0.9)
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DEATH & LEVEL-TRANSITION SCREENS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct DeathScreen;

#[derive(Component)]
pub struct TransitionScreen;

fn spawn_fullscreen_message<M: Component>(
    commands: &mut Commands,
    marker: M,
    title: &str,
    subtitle: &str,
    tint: Color,
) {
    commands
        .spawn((
            marker,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(tint),
            GlobalZIndex(80),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 42.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(subtitle),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });
}

pub fn spawn_death_screen(mut commands: Commands) {
    spawn_fullscreen_message(
        &mut commands,
        DeathScreen,
        "You died",
        "Respawning…",
        Color::srgba(0.3, 0.0, 0.0, 0.6),
    );
}

pub fn despawn_death_screen(mut commands: Commands, query: Query<Entity, With<DeathScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn spawn_transition_screen(mut commands: Commands, world: Res<WorldState>) {
    spawn_fullscreen_message(
        &mut commands,
        TransitionScreen,
        &format!("Level {} complete!", world.level),
        "Onward…",
        Color::srgba(0.0, 0.1, 0.3, 0.6),
    );
}

pub fn despawn_transition_screen(
    mut commands: Commands,
    query: Query<Entity, With<TransitionScreen>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
