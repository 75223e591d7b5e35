//! UI domain plugin for Crabshore.
//!
//! Provides:
//! - Toast notifications (append-only queue, fade-out)
//! - HUD: resource counters, health bar, level/XP, food count
//! - Help overlay (timed at startup, toggled with H)
//! - Tool-select overlay
//! - Death and level-transition screens
//! - Sound effect playback for PlaySfxEvent

pub mod audio;
pub mod hud;
pub mod overlays;
pub mod toast;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<overlays::HelpOverlay>();

        app.add_systems(
            Startup,
            (
                toast::spawn_toast_container,
                hud::spawn_hud,
                overlays::spawn_help_panel,
                overlays::spawn_tool_overlay,
            ),
        );

        // The help timer counts simulation frames like everything else.
        app.add_systems(FixedUpdate, overlays::tick_help);

        app.add_systems(
            Update,
            (
                toast::handle_toast_events,
                toast::update_toasts,
                hud::update_hud,
                overlays::sync_help_panel,
                overlays::sync_tool_overlay,
                audio::handle_play_sfx,
            ),
        );

        app.add_systems(OnEnter(GameState::Dead), overlays::spawn_death_screen);
        app.add_systems(OnExit(GameState::Dead), overlays::despawn_death_screen);
        app.add_systems(
            OnEnter(GameState::LevelTransition),
            overlays::spawn_transition_screen,
        );
        app.add_systems(
            OnExit(GameState::LevelTransition),
            overlays::despawn_transition_screen,
        );
    }
}
