//! Game orchestration: the death/respawn and level-transition state
//! machines.
//!
//! `GameState` makes the mutual exclusion structural — the death screen
//! and the transition screen are separate states, and every gameplay
//! system is gated on `Playing`, so nothing ticks underneath an overlay.

use bevy::prelude::*;

use crate::player::camera::snap_camera_to;
use crate::shared::*;

/// Frames left until respawn while in `GameState::Dead`.
#[derive(Resource, Debug, Default)]
pub struct RespawnCountdown(pub u32);

/// Frames left until the next level while in `GameState::LevelTransition`.
#[derive(Resource, Debug, Default)]
pub struct TransitionCountdown(pub u32);

#[derive(Resource, Debug, Default)]
struct IntroShown(bool);

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RespawnCountdown>();
        app.init_resource::<TransitionCountdown>();
        app.init_resource::<IntroShown>();

        app.add_systems(OnEnter(GameState::Playing), show_intro_hint);

        app.add_systems(
            FixedUpdate,
            (check_player_death, check_level_complete)
                .in_set(SimSet::Game)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(OnEnter(GameState::Dead), enter_death_screen);
        app.add_systems(
            FixedUpdate,
            tick_respawn.run_if(in_state(GameState::Dead)),
        );

        app.add_systems(OnEnter(GameState::LevelTransition), enter_level_transition);
        app.add_systems(
            FixedUpdate,
            tick_level_transition.run_if(in_state(GameState::LevelTransition)),
        );
    }
}

fn show_intro_hint(mut intro: ResMut<IntroShown>, mut toasts: EventWriter<ToastEvent>) {
    if intro.0 {
        return;
    }
    intro.0 = true;
    toasts.send(ToastEvent {
        message: "Use F to interact with objects".to_string(),
        duration_secs: 3.0,
    });
}

/// System: health hitting zero ends normal play.
fn check_player_death(
    vitals: Res<PlayerVitals>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if vitals.health <= 0 {
        next_state.set(GameState::Dead);
    }
}

/// Death costs 30% of current experience and three seconds of waiting.
fn enter_death_screen(
    mut vitals: ResMut<PlayerVitals>,
    mut countdown: ResMut<RespawnCountdown>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let penalty = (vitals.experience as f32 * DEATH_EXP_PENALTY) as u32;
    vitals.experience = vitals.experience.saturating_sub(penalty);
    countdown.0 = RESPAWN_DELAY_FRAMES;

    sfx.send(PlaySfxEvent { sfx_id: "player_die" });
    info!("Player died — {} XP lost", penalty);
}

/// System: count down, then restore full health at the fixed spawn spot.
fn tick_respawn(
    mut countdown: ResMut<RespawnCountdown>,
    mut vitals: ResMut<PlayerVitals>,
    mut player: Query<&mut Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    countdown.0 = countdown.0.saturating_sub(1);
    if countdown.0 > 0 {
        return;
    }

    vitals.health = vitals.max_health;
    vitals.invincibility_frames = 0;

    if let Ok(mut transform) = player.get_single_mut() {
        transform.translation.x = SCREEN_WIDTH / 2.0;
        transform.translation.y = GROUND_SURFACE_Y + PLAYER_SIZE.y / 2.0;
        if let Ok(mut cam_tf) = camera.get_single_mut() {
            snap_camera_to(&mut cam_tf, transform.translation.x);
        }
    }

    next_state.set(GameState::Playing);
}

/// System: the level is complete once at least one enemy has ever
/// spawned, none remain, and (leaving level 1) the king crab was both
/// spawned and defeated.
fn check_level_complete(
    world: Res<WorldState>,
    request: Res<LevelSpawnRequest>,
    enemies: Query<(), With<Enemy>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // A queued regeneration means the counters describe the level being
    // torn down, not the one being played.
    if request.pending || world.enemies_spawned == 0 || !enemies.is_empty() {
        return;
    }
    if world.level == 1 && !(world.boss_spawned && world.boss_defeated) {
        return;
    }
    next_state.set(GameState::LevelTransition);
}

fn enter_level_transition(
    world: Res<WorldState>,
    mut countdown: ResMut<TransitionCountdown>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    countdown.0 = LEVEL_TRANSITION_FRAMES;
    toasts.send(ToastEvent {
        message: format!("Level {} complete!", world.level),
        duration_secs: 3.0,
    });
    sfx.send(PlaySfxEvent { sfx_id: "level_complete" });
    info!("Level {} complete — transitioning", world.level);
}

/// System: count down, then rebuild the world for the next level from
/// scratch and put the player back at the spawn spot.
fn tick_level_transition(
    mut countdown: ResMut<TransitionCountdown>,
    mut world: ResMut<WorldState>,
    mut request: ResMut<LevelSpawnRequest>,
    mut player: Query<&mut Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    countdown.0 = countdown.0.saturating_sub(1);
    if countdown.0 > 0 {
        return;
    }

    world.level += 1;
    request.pending = true;

    if let Ok(mut transform) = player.get_single_mut() {
        transform.translation.x = SCREEN_WIDTH / 2.0;
        transform.translation.y = GROUND_SURFACE_Y + PLAYER_SIZE.y / 2.0;
        if let Ok(mut cam_tf) = camera.get_single_mut() {
            snap_camera_to(&mut cam_tf, transform.translation.x);
        }
    }

    next_state.set(GameState::Playing);
}
