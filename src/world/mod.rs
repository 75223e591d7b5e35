//! World domain plugin for Crabshore.
//!
//! Provides:
//! - Per-level terrain generation (ground band, scattered trees and
//!   stones, water pool with fish on level 2+)
//! - Enemy spawn functions and per-frame enemy wander/physics
//! - The king-crab trigger when every resource node is depleted
//! - Fish wandering and fish-catch while the player swims

pub mod enemies;
pub mod generation;
pub mod water;

use bevy::prelude::*;
use crate::shared::*;

pub use enemies::spawn_enemy;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldState>();
        app.init_resource::<LevelSpawnRequest>();

        // One ordering for the whole fixed-tick simulation.
        app.configure_sets(
            FixedUpdate,
            (SimSet::World, SimSet::Player, SimSet::Game).chain(),
        );

        app.add_systems(OnEnter(GameState::Playing), generation::request_level_if_missing);

        app.add_systems(
            FixedUpdate,
            (
                generation::spawn_level,
                enemies::enemy_wander,
                enemies::check_boss_spawn,
                water::fish_wander,
                water::catch_fish,
            )
                .chain()
                .in_set(SimSet::World)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
