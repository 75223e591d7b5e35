//! Interaction: the F-key / left-click action when not wielding the
//! sword. Harvests the nearest resource node, or dispatches a build
//! request in building mode.
//!
//! Every gameplay failure here is a silent no-op plus a notification —
//! nothing raises.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use crate::world::spawn_enemy;

/// The tree/stone tile nearest to the player center within
/// [`INTERACTION_DISTANCE`], by Euclidean distance. Strict `<` means the
/// first tile found at a tied distance wins; iteration order decides.
pub fn closest_interactive_object(
    player_pos: Vec2,
    tiles: &[(Entity, TileKind, Vec2)],
) -> Option<Entity> {
    let mut closest = None;
    let mut closest_distance = f32::INFINITY;

    for &(entity, kind, center) in tiles {
        if !kind.is_harvestable() {
            continue;
        }
        let distance = player_pos.distance(center);
        if distance < INTERACTION_DISTANCE && distance < closest_distance {
            closest_distance = distance;
            closest = Some(entity);
        }
    }

    closest
}

/// System: the interact action. Building mode routes to the building
/// domain; tool mode harvests.
pub fn handle_interact(
    mut commands: Commands,
    input: Res<PlayerInput>,
    overlay: Res<ToolOverlay>,
    build_mode: Res<BuildMode>,
    mut belt: ResMut<ToolBelt>,
    mut inventory: ResMut<Inventory>,
    mut vitals: ResMut<PlayerVitals>,
    mut world: ResMut<WorldState>,
    enemy_registry: Res<EnemyRegistry>,
    player: Query<(&Transform, &PlayerMovement), With<Player>>,
    tiles: Query<(Entity, &Tile, &Transform)>,
    mut build_requests: EventWriter<BuildRequestEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut bursts: EventWriter<BlockBreakEvent>,
) {
    if !input.interact || overlay.open {
        return;
    }
    let Ok((player_tf, movement)) = player.get_single() else {
        return;
    };

    if build_mode.active {
        let Some(blueprint) = build_mode.current_blueprint else {
            return;
        };
        if !belt.try_use(ToolKind::Hammer) {
            return;
        }
        sfx.send(PlaySfxEvent { sfx_id: "hammer_swing" });

        // The structure goes up just ahead of the player.
        build_requests.send(BuildRequestEvent {
            blueprint,
            x: player_tf.translation.x + movement.facing.sign() * (PLAYER_SIZE.x + 16.0),
            y: player_tf.translation.y,
        });
        return;
    }

    // Sword swings are combat, handled by `combat::handle_attack`.
    if belt.current == ToolKind::Sword {
        return;
    }

    let tile_list: Vec<(Entity, TileKind, Vec2)> = tiles
        .iter()
        .map(|(entity, tile, tf)| (entity, tile.kind, tf.translation.truncate()))
        .collect();

    let Some(target) = closest_interactive_object(player_tf.translation.truncate(), &tile_list)
    else {
        // Rate-limited so holding F doesn't flood the queue.
        if vitals.notify_cooldown_frames == 0 {
            toasts.send(ToastEvent::info("Nothing to interact with nearby"));
            vitals.notify_cooldown_frames = NOTIFY_COOLDOWN_FRAMES;
        }
        return;
    };

    let Ok((_, tile, tile_tf)) = tiles.get(target) else {
        return;
    };
    let tile_pos = tile_tf.translation.truncate();

    let current_tool = belt.current;
    if !belt.try_use(current_tool) {
        return;
    }

    let mut rng = rand::thread_rng();
    match (belt.current, tile.kind) {
        (ToolKind::Axe, TileKind::Tree) => {
            sfx.send(PlaySfxEvent { sfx_id: "axe_swing" });
            inventory.add(Material::Wood, 1);
            harvest_tile(&mut commands, &mut world, target);
            bursts.send(BlockBreakEvent {
                x: tile_pos.x,
                y: tile_pos.y,
                color: GRASS_GREEN,
            });
            sfx.send(PlaySfxEvent { sfx_id: "block_break" });
            toasts.send(ToastEvent::info("Collected wood"));

            if rng.gen_bool(CRAB_SPAWN_CHANCE_AXE) {
                spawn_harvest_enemy(&mut commands, &enemy_registry, &mut world, tile_pos.x);
            }
        }
        (ToolKind::Pickaxe, TileKind::Stone) => {
            sfx.send(PlaySfxEvent { sfx_id: "pickaxe_swing" });
            inventory.add(Material::Stone, 1);
            harvest_tile(&mut commands, &mut world, target);
            bursts.send(BlockBreakEvent {
                x: tile_pos.x,
                y: tile_pos.y,
                color: STONE_GRAY,
            });
            sfx.send(PlaySfxEvent { sfx_id: "block_break" });
            toasts.send(ToastEvent::info("Collected stone"));

            if rng.gen_bool(CRAB_SPAWN_CHANCE_PICKAXE) {
                spawn_harvest_enemy(&mut commands, &enemy_registry, &mut world, tile_pos.x);
            }
        }
        (tool, _) => {
            sfx.send(PlaySfxEvent { sfx_id: "tool_thud" });
            toasts.send(ToastEvent::info(format!("Can't use {} on that", tool.name())));
        }
    }
}

/// Remove a harvested node and keep the depletion counter honest. The
/// boss-spawn trigger watches that counter from the world domain.
fn harvest_tile(commands: &mut Commands, world: &mut WorldState, tile: Entity) {
    commands.entity(tile).despawn();
    world.initial_resource_count = world.initial_resource_count.saturating_sub(1);
}

/// Harvest noise attracts trouble: crabs on level 1, dinosaurs later.
fn spawn_harvest_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    world: &mut WorldState,
    x: f32,
) {
    let kind = if world.level >= 2 {
        EnemyKind::Dinosaur
    } else {
        EnemyKind::Crab
    };
    spawn_enemy(commands, registry, world, kind, x);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u32, kind: TileKind, x: f32, y: f32) -> (Entity, TileKind, Vec2) {
        (Entity::from_raw(id), kind, Vec2::new(x, y))
    }

    #[test]
    fn picks_the_nearest_harvestable_in_range() {
        let tiles = vec![
            tile(1, TileKind::Tree, 50.0, 0.0),
            tile(2, TileKind::Stone, 20.0, 0.0),
            tile(3, TileKind::Tree, 59.0, 0.0),
        ];
        let found = closest_interactive_object(Vec2::ZERO, &tiles);
        assert_eq!(found, Some(Entity::from_raw(2)));
    }

    #[test]
    fn ignores_grass_and_dirt() {
        let tiles = vec![
            tile(1, TileKind::Grass, 5.0, 0.0),
            tile(2, TileKind::Dirt, 10.0, 0.0),
        ];
        assert_eq!(closest_interactive_object(Vec2::ZERO, &tiles), None);
    }

    #[test]
    fn out_of_range_is_none() {
        let tiles = vec![tile(1, TileKind::Tree, INTERACTION_DISTANCE + 1.0, 0.0)];
        assert_eq!(closest_interactive_object(Vec2::ZERO, &tiles), None);
    }

    #[test]
    fn first_found_wins_exact_ties() {
        let tiles = vec![
            tile(1, TileKind::Tree, 30.0, 0.0),
            tile(2, TileKind::Tree, -30.0, 0.0),
        ];
        assert_eq!(
            closest_interactive_object(Vec2::ZERO, &tiles),
            Some(Entity::from_raw(1))
        );
    }
}
