//! Per-level terrain layout.
//!
//! Layout is deterministic in its counts and ranges but uniform-random in
//! its placement, so tests assert aggregates ("exactly 15 trees exist"),
//! never literal positions.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::enemies;

/// Water pool dimensions on level 2+.
const POOL_WIDTH: f32 = 300.0;
const POOL_FLOOR_Y: f32 = 20.0;
const FISH_PER_POOL: u32 = 5;
const DINOSAURS_AT_GEN: u32 = 3;

/// The y coordinate creatures stand on at a given x. Inside the water
/// pool the ground is carved down to the pool floor.
pub fn ground_surface_at(x: f32, water: Option<&Rect>) -> f32 {
    match water {
        Some(rect) if x >= rect.min.x && x <= rect.max.x => POOL_FLOOR_Y,
        _ => GROUND_SURFACE_Y,
    }
}

/// Kick off generation when no level exists yet. Re-entering `Playing`
/// after a death leaves the world untouched; only a level transition
/// queues a rebuild.
pub fn request_level_if_missing(
    mut request: ResMut<LevelSpawnRequest>,
    tiles: Query<(), With<Tile>>,
) {
    if tiles.is_empty() {
        request.pending = true;
    }
}

/// System: detects a pending level spawn and carries it out, tearing down
/// every entity of the previous level first.
pub fn spawn_level(
    mut commands: Commands,
    mut request: ResMut<LevelSpawnRequest>,
    mut world: ResMut<WorldState>,
    enemy_registry: Res<EnemyRegistry>,
    existing: Query<Entity, With<LevelEntity>>,
) {
    if !request.pending {
        return;
    }
    request.pending = false;

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    // Fresh bookkeeping: counters and one-shot flags belong to a single
    // level's lifetime.
    world.enemies_spawned = 0;
    world.boss_spawned = false;
    world.boss_defeated = false;

    let mut rng = rand::thread_rng();

    // Water pool (level 2+), carved out of the ground band.
    let water_rect = if world.level >= 2 {
        let x0 = rng.gen_range(600.0..WORLD_WIDTH - 600.0 - POOL_WIDTH);
        Some(Rect::new(x0, POOL_FLOOR_Y, x0 + POOL_WIDTH, GROUND_SURFACE_Y))
    } else {
        None
    };

    spawn_ground(&mut commands, water_rect.as_ref());

    if let Some(rect) = water_rect {
        spawn_water(&mut commands, rect, &mut rng);
    }

    // Resource nodes. Scatter avoids the pool so every node stays
    // reachable on foot.
    let trees = scatter(&mut commands, &mut rng, TileKind::Tree, TREES_PER_LEVEL, water_rect.as_ref());
    let stones = scatter(&mut commands, &mut rng, TileKind::Stone, STONES_PER_LEVEL, water_rect.as_ref());
    world.initial_resource_count = trees + stones;

    // A few dinosaurs roam from the start on later levels.
    if world.level >= 2 {
        for _ in 0..DINOSAURS_AT_GEN {
            let x = random_open_x(&mut rng, water_rect.as_ref());
            enemies::spawn_enemy(
                &mut commands,
                &enemy_registry,
                &mut world,
                EnemyKind::Dinosaur,
                x,
            );
        }
    }

    info!(
        "World: generated level {} ({} resource nodes{})",
        world.level,
        world.initial_resource_count,
        if water_rect.is_some() { ", water pool" } else { "" },
    );
}

/// Grass surface row plus two dirt rows across the world width, skipping
/// the carved pool columns.
fn spawn_ground(commands: &mut Commands, water: Option<&Rect>) {
    let columns = (WORLD_WIDTH / TILE_SIZE) as u32;
    for col in 0..columns {
        let x = col as f32 * TILE_SIZE + TILE_SIZE / 2.0;
        if let Some(rect) = water {
            if x >= rect.min.x && x <= rect.max.x {
                continue;
            }
        }

        spawn_tile(commands, TileKind::Grass, 0, x, GROUND_SURFACE_Y - TILE_SIZE / 2.0, Vec2::splat(TILE_SIZE));
        spawn_tile(commands, TileKind::Dirt, 0, x, GROUND_SURFACE_Y - TILE_SIZE * 1.5, Vec2::splat(TILE_SIZE));
        spawn_tile(commands, TileKind::Dirt, 0, x, GROUND_SURFACE_Y - TILE_SIZE * 2.5, Vec2::splat(TILE_SIZE));
    }
}

fn spawn_water(commands: &mut Commands, rect: Rect, rng: &mut impl Rng) {
    commands.spawn((
        WaterZone { rect },
        LevelEntity,
        Sprite {
            color: WATER_BLUE,
            custom_size: Some(rect.size()),
            ..default()
        },
        Transform::from_xyz(rect.center().x, rect.center().y, 2.0),
    ));

    for _ in 0..FISH_PER_POOL {
        spawn_fish(commands, rect, rng);
    }
}

pub fn spawn_fish(commands: &mut Commands, pool: Rect, rng: &mut impl Rng) {
    let margin = 10.0;
    let x = rng.gen_range(pool.min.x + margin..pool.max.x - margin);
    let y = rng.gen_range(pool.min.y + margin..pool.max.y - margin);
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);

    commands.spawn((
        Fish {
            vel: Vec2::from_angle(angle) * 1.2,
        },
        LevelEntity,
        Sprite {
            color: Color::srgb(0.90, 0.55, 0.25),
            custom_size: Some(Vec2::new(14.0, 8.0)),
            ..default()
        },
        Transform::from_xyz(x, y, 2.5),
    ));
}

/// Scatter `count` harvestable nodes at uniform-random x positions,
/// resting on the ground surface.
fn scatter(
    commands: &mut Commands,
    rng: &mut impl Rng,
    kind: TileKind,
    count: u32,
    water: Option<&Rect>,
) -> u32 {
    let size = match kind {
        TileKind::Tree => Vec2::new(TILE_SIZE, TILE_SIZE * 3.0),
        TileKind::Stone => Vec2::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0),
        _ => Vec2::splat(TILE_SIZE),
    };

    for _ in 0..count {
        let x = random_open_x(rng, water);
        let variant = rng.gen_range(0..4);
        spawn_tile(commands, kind, variant, x, GROUND_SURFACE_Y + size.y / 2.0, size);
    }
    count
}

/// A random x on solid ground, clear of the pool and the world edges.
fn random_open_x(rng: &mut impl Rng, water: Option<&Rect>) -> f32 {
    loop {
        let x = rng.gen_range(TILE_SIZE..WORLD_WIDTH - TILE_SIZE);
        match water {
            Some(rect) if x >= rect.min.x - TILE_SIZE && x <= rect.max.x + TILE_SIZE => continue,
            _ => return x,
        }
    }
}

fn spawn_tile(commands: &mut Commands, kind: TileKind, variant: u8, x: f32, y: f32, size: Vec2) {
    // Variants shade the base color slightly so repeated nodes don't read
    // as copies.
    let shade = 1.0 - variant as f32 * 0.04;
    let base = match kind {
        TileKind::Grass => GRASS_GREEN,
        TileKind::Dirt => DIRT_BROWN,
        TileKind::Stone => STONE_GRAY,
        TileKind::Tree => Color::srgb(0.10, 0.45, 0.12),
    };
    let srgba = base.to_srgba();
    let color = Color::srgb(srgba.red * shade, srgba.green * shade, srgba.blue * shade);

    let z = if kind.is_harvestable() { 1.0 } else { 0.0 };

    commands.spawn((
        Tile { kind, variant, size },
        LevelEntity,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(x, y, z),
    ));
}
