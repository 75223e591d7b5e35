//! Player domain plugin for Crabshore.
//!
//! Provides:
//! - Side-scroll movement, jumping, swimming physics
//! - The tool belt (cooldowns, swing animation, quick-select)
//! - Interaction: harvesting resource nodes, dispatching build requests
//! - Sword combat and contact damage with invincibility frames
//! - Experience/level progression and food eating
//! - The horizontally smoothed follow camera

pub mod camera;
pub mod combat;
pub mod eating;
pub mod interaction;
pub mod movement;
pub mod progression;
pub mod tools;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerVitals>();
        app.init_resource::<Inventory>();
        app.init_resource::<ToolBelt>();
        app.init_resource::<BuildMode>();
        app.init_resource::<ToolOverlay>();
        app.init_resource::<PlayerInput>();

        app.add_systems(OnEnter(GameState::Playing), spawn_player);

        app.add_systems(
            FixedUpdate,
            (
                tick_timers,
                tools::handle_tool_selection,
                tools::handle_build_mode_toggle,
                movement::player_movement,
                interaction::handle_interact,
                combat::handle_attack,
                combat::contact_damage,
                eating::handle_eat,
                progression::award_experience,
                camera::camera_follow,
            )
                .chain()
                .in_set(SimSet::Player)
                .run_if(in_state(GameState::Playing)),
        );

        // Edge flags must outlive every FixedUpdate reader within a tick.
        app.add_systems(FixedPostUpdate, clear_frame_input);
    }
}

/// Spawn the player once, standing at the fixed spawn spot. Respawns and
/// level transitions reposition this entity rather than recreating it.
pub fn spawn_player(mut commands: Commands, existing: Query<(), With<Player>>) {
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        Player,
        PlayerMovement::default(),
        Sprite {
            color: Color::srgb(0.95, 0.80, 0.60),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(SCREEN_WIDTH / 2.0, 200.0, 3.0),
    ));
}

/// One frame of counter bookkeeping: tool cooldowns, swing animation,
/// invincibility, and the notification rate limit.
fn tick_timers(mut belt: ResMut<ToolBelt>, mut vitals: ResMut<PlayerVitals>) {
    belt.tick();
    vitals.invincibility_frames = vitals.invincibility_frames.saturating_sub(1);
    vitals.notify_cooldown_frames = vitals.notify_cooldown_frames.saturating_sub(1);
}

fn clear_frame_input(mut input: ResMut<PlayerInput>) {
    input.clear_edges();
}
