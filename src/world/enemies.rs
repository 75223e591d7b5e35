//! Enemy spawning and per-frame wander AI.
//!
//! Enemies drift left/right with an occasional random re-pick of their
//! horizontal velocity, fall under half gravity, bounce off the world's
//! horizontal bounds, and clamp to the ground. Stats come from the
//! [`EnemyRegistry`] so there is exactly one place to tune a kind.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::generation::ground_surface_at;

/// Construct an enemy at `x`, standing on the ground, and bump the
/// monotonic spawn counter the level-completion check relies on.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    world: &mut WorldState,
    kind: EnemyKind,
    x: f32,
) {
    let Some(def) = registry.get(kind) else {
        warn!("spawn_enemy: no definition for {:?}", kind);
        return;
    };

    let y = GROUND_SURFACE_Y + def.size.y / 2.0;
    commands.spawn((
        Enemy {
            kind,
            health: def.max_health,
            max_health: def.max_health,
            damage: def.damage,
            attack_range: def.attack_range,
            attack_cooldown: def.attack_cooldown,
            attack_cooldown_remaining: 0,
            vel_x: 0.0,
            vel_y: 0.0,
            size: def.size,
            anim_frame: 0,
        },
        LevelEntity,
        Sprite {
            color: def.color,
            custom_size: Some(def.size),
            ..default()
        },
        Transform::from_xyz(x, y, 2.0),
    ));

    world.enemies_spawned += 1;
    if kind.is_boss() {
        world.boss_spawned = true;
    }
}

/// System: the sole boss-spawn path. Once every harvestable node is gone
/// the king crab appears in the middle of the world, exactly once per
/// level no matter how many removals follow.
pub fn check_boss_spawn(
    mut commands: Commands,
    registry: Res<EnemyRegistry>,
    mut world: ResMut<WorldState>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if world.initial_resource_count > 0 || world.boss_spawned {
        return;
    }

    spawn_enemy(
        &mut commands,
        &registry,
        &mut world,
        EnemyKind::KingCrab,
        WORLD_WIDTH / 2.0,
    );

    info!("World: all resources depleted — king crab spawned");
    toasts.send(ToastEvent::info("The King Crab has appeared!"));
    sfx.send(PlaySfxEvent { sfx_id: "boss_spawn" });
}

/// System: per-frame enemy movement.
pub fn enemy_wander(
    mut enemies: Query<(&mut Enemy, &mut Transform)>,
    water: Query<&WaterZone>,
) {
    let mut rng = rand::thread_rng();
    let pool = water.get_single().ok().map(|w| w.rect);

    for (mut enemy, mut transform) in enemies.iter_mut() {
        enemy.anim_frame = enemy.anim_frame.wrapping_add(1);
        enemy.attack_cooldown_remaining = enemy.attack_cooldown_remaining.saturating_sub(1);

        // Occasionally re-pick a drift direction: left, idle, or right.
        if rng.gen_bool(ENEMY_WANDER_CHANCE) {
            enemy.vel_x = rng.gen_range(-1i32..=1) as f32;
        }

        transform.translation.x += enemy.vel_x;
        enemy.vel_y -= GRAVITY * 0.5;
        transform.translation.y += enemy.vel_y;

        // Bounce off the world's horizontal bounds.
        let half_w = enemy.size.x / 2.0;
        if transform.translation.x < half_w {
            transform.translation.x = half_w;
            enemy.vel_x = -enemy.vel_x;
        } else if transform.translation.x > WORLD_WIDTH - half_w {
            transform.translation.x = WORLD_WIDTH - half_w;
            enemy.vel_x = -enemy.vel_x;
        }

        // Clamp to the ground.
        let floor = ground_surface_at(transform.translation.x, pool.as_ref()) + enemy.size.y / 2.0;
        if transform.translation.y < floor {
            transform.translation.y = floor;
            enemy.vel_y = 0.0;
        }

        // Face the drift direction.
        if enemy.vel_x.abs() > 0.1 {
            transform.scale.x = if enemy.vel_x > 0.0 { 1.0 } else { -1.0 };
        }
    }
}
