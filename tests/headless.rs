//! Headless integration tests for Crabshore.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins (skipping all rendering/UI/audio), and drive the
//! 60 Hz simulation one frame at a time by running the FixedUpdate
//! schedule directly.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crabshore::building::BuildingPlugin;
use crabshore::data::DataPlugin;
use crabshore::game::GamePlugin;
use crabshore::npc::NpcPlugin;
use crabshore::particles::ParticlesPlugin;
use crabshore::player::PlayerPlugin;
use crabshore::shared::*;
use crabshore::world::WorldPlugin;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all simulation plugins registered but
/// NO rendering, windowing, input, or asset loading. The fixed-timestep
/// period is pushed out of reach so `app.update()` never advances the
/// simulation on its own — [`tick`] is the only clock.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // Keep the automatic fixed-timestep from ever firing during update().
    app.insert_resource(Time::<Fixed>::from_seconds(1_000_000.0));

    app.init_state::<GameState>();

    // ── Shared registries (mirrors main.rs) ──────────────────────────────
    app.init_resource::<EnemyRegistry>()
        .init_resource::<FoodRegistry>()
        .init_resource::<BlueprintRegistry>();

    // ── Shared events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToastEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<BlockBreakEvent>()
        .add_event::<SparkEvent>()
        .add_event::<BuildRequestEvent>()
        .add_event::<EnemyDefeatedEvent>()
        .add_event::<LevelUpEvent>();

    // ── Simulation plugins ───────────────────────────────────────────────
    app.add_plugins(DataPlugin)
        .add_plugins(WorldPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(BuildingPlugin)
        .add_plugins(NpcPlugin)
        .add_plugins(ParticlesPlugin)
        .add_plugins(GamePlugin);

    app
}

/// Boot to Playing: the first update runs OnEnter(Loading) (registry
/// population + state switch), the second applies the transition into
/// Playing, spawning the player and requesting level generation.
fn boot(app: &mut App) {
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing,
        "expected Playing after boot"
    );
}

/// One simulation frame: FixedUpdate (gameplay), FixedPostUpdate (input
/// edge clearing), then an update() pass to apply state transitions.
fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
    app.world_mut().run_schedule(FixedPostUpdate);
    app.update();
}

fn ticks(app: &mut App, n: u32) {
    for _ in 0..n {
        tick(app);
    }
}

fn count_tiles(app: &mut App, kind: TileKind) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Tile>();
    query.iter(world).filter(|t| t.kind == kind).count()
}

fn count_enemies(app: &mut App, kind: EnemyKind) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Enemy>();
    query.iter(world).filter(|e| e.kind == kind).count()
}

fn count_components<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&C>();
    query.iter(world).count()
}

fn player_entity(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world)
}

fn place_player(app: &mut App, x: f32, y: f32) {
    let entity = player_entity(app);
    let mut transform = app.world_mut().get_mut::<Transform>(entity).unwrap();
    transform.translation.x = x;
    transform.translation.y = y;
}

fn press_interact(app: &mut App) {
    app.world_mut().resource_mut::<PlayerInput>().interact = true;
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot & generation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boot_smoke_reaches_playing_with_populated_registries() {
    let mut app = build_test_app();
    boot(&mut app);

    assert!(!app.world().resource::<EnemyRegistry>().defs.is_empty());
    assert!(!app.world().resource::<FoodRegistry>().defs.is_empty());
    assert!(!app.world().resource::<BlueprintRegistry>().blueprints.is_empty());

    // Smoke: a few seconds of simulation without panic.
    ticks(&mut app, 120);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
}

#[test]
fn level_one_generates_exact_resource_counts() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app); // spawn_level runs on the first simulation frame

    assert_eq!(count_tiles(&mut app, TileKind::Tree), 15);
    assert_eq!(count_tiles(&mut app, TileKind::Stone), 10);
    assert_eq!(
        app.world().resource::<WorldState>().initial_resource_count,
        25
    );

    // Level 1 has no water and no pre-placed enemies.
    assert_eq!(count_components::<WaterZone>(&mut app), 0);
    assert_eq!(app.world().resource::<WorldState>().enemies_spawned, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Harvesting
// ─────────────────────────────────────────────────────────────────────────────

/// Find one tile of the given kind and return (x, y) of its center.
fn find_tile_pos(app: &mut App, kind: TileKind) -> Vec2 {
    let world = app.world_mut();
    let mut query = world.query::<(&Tile, &Transform)>();
    query
        .iter(world)
        .find(|(t, _)| t.kind == kind)
        .map(|(_, tf)| tf.translation.truncate())
        .expect("tile of requested kind exists")
}

#[test]
fn axe_on_tree_collects_wood_and_removes_the_tile() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    // Standing on the tile's center makes it the unambiguous nearest
    // target no matter where the rest of the scatter landed.
    let tree_pos = find_tile_pos(&mut app, TileKind::Tree);
    place_player(&mut app, tree_pos.x, tree_pos.y);

    app.world_mut().resource_mut::<ToolBelt>().current = ToolKind::Axe;
    press_interact(&mut app);
    tick(&mut app);

    assert_eq!(app.world().resource::<Inventory>().wood, 1);
    assert_eq!(count_tiles(&mut app, TileKind::Tree), 14);
    assert_eq!(
        app.world().resource::<WorldState>().initial_resource_count,
        24
    );
}

#[test]
fn wrong_tool_on_a_tree_changes_nothing() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    let tree_pos = find_tile_pos(&mut app, TileKind::Tree);
    place_player(&mut app, tree_pos.x, tree_pos.y);

    app.world_mut().resource_mut::<ToolBelt>().current = ToolKind::Pickaxe;
    press_interact(&mut app);
    tick(&mut app);

    // Wrong tool: nothing harvested, nothing removed.
    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.wood, 0);
    assert_eq!(inventory.stone, 0);
    assert_eq!(count_tiles(&mut app, TileKind::Tree), 15);
}

#[test]
fn harvesting_everything_spawns_the_boss_exactly_once() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    // Survive the crabs that harvesting attracts.
    {
        let mut vitals = app.world_mut().resource_mut::<PlayerVitals>();
        vitals.max_health = 1_000_000;
        vitals.health = 1_000_000;
    }

    for _ in 0..25 {
        let (kind, pos) = {
            let world = app.world_mut();
            let mut query = world.query::<(&Tile, &Transform)>();
            let found = query
                .iter(world)
                .find(|(t, _)| t.kind.is_harvestable())
                .map(|(t, tf)| (t.kind, tf.translation.truncate()))
                .expect("a harvestable tile remains");
            found
        };

        place_player(&mut app, pos.x, pos.y);
        app.world_mut().resource_mut::<ToolBelt>().current = match kind {
            TileKind::Tree => ToolKind::Axe,
            _ => ToolKind::Pickaxe,
        };
        press_interact(&mut app);
        tick(&mut app);

        // Let the tool cooldown expire before the next swing.
        ticks(&mut app, 20);
    }

    let world_state = app.world().resource::<WorldState>();
    assert_eq!(world_state.initial_resource_count, 0);
    assert!(world_state.boss_spawned);

    ticks(&mut app, 5);
    assert_eq!(count_enemies(&mut app, EnemyKind::KingCrab), 1);

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.wood, 15);
    assert_eq!(inventory.stone, 10);

    // The trigger is one-shot: more frames never mint a second boss.
    ticks(&mut app, 30);
    assert_eq!(count_enemies(&mut app, EnemyKind::KingCrab), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Eating & progression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn eating_heals_fifo_and_reports_empty() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut vitals = app.world_mut().resource_mut::<PlayerVitals>();
        vitals.health = 10;
        vitals.max_health = 100;
    }
    app.world_mut()
        .resource_mut::<Inventory>()
        .foods
        .push_back(FoodItem {
            kind: FoodKind::Cake,
            healing: 50,
        });

    app.world_mut().resource_mut::<PlayerInput>().eat = true;
    tick(&mut app);
    assert_eq!(app.world().resource::<PlayerVitals>().health, 60);
    assert!(app.world().resource::<Inventory>().foods.is_empty());

    // Second eat on an empty queue: silent no-op.
    app.world_mut().resource_mut::<PlayerInput>().eat = true;
    tick(&mut app);
    assert_eq!(app.world().resource::<PlayerVitals>().health, 60);
}

#[test]
fn defeat_xp_triggers_level_up_with_carryover() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut vitals = app.world_mut().resource_mut::<PlayerVitals>();
        vitals.experience = 90;
        vitals.exp_to_next_level = 100;
    }

    // A crab is worth 20 XP: 90 + 20 crosses the threshold once.
    app.world_mut().send_event(EnemyDefeatedEvent {
        kind: EnemyKind::Crab,
    });
    tick(&mut app);

    let vitals = app.world().resource::<PlayerVitals>();
    assert_eq!(vitals.level, 2);
    assert_eq!(vitals.experience, 10);
    assert_eq!(vitals.exp_to_next_level, 150);
    assert_eq!(vitals.max_health, 110);
}

// ─────────────────────────────────────────────────────────────────────────────
// Combat
// ─────────────────────────────────────────────────────────────────────────────

/// Spawn an enemy directly for combat tests, bypassing the world's spawn
/// helpers so position is exact.
fn spawn_enemy_at(app: &mut App, kind: EnemyKind, x: f32, y: f32) {
    let def = app
        .world()
        .resource::<EnemyRegistry>()
        .get(kind)
        .expect("enemy def")
        .clone();
    app.world_mut().spawn((
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
        Transform::from_xyz(x, y, 2.0),
    ));
}

#[test]
fn contact_damage_applies_once_per_invincibility_window() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    let px = 1000.0;
    let py = GROUND_SURFACE_Y + PLAYER_SIZE.y / 2.0;
    place_player(&mut app, px, py);
    spawn_enemy_at(&mut app, EnemyKind::Crab, px, py);

    tick(&mut app);
    {
        let vitals = app.world().resource::<PlayerVitals>();
        assert_eq!(vitals.health, 90, "crab contact costs exactly its damage");
        assert_eq!(vitals.invincibility_frames, INVINCIBILITY_FRAMES);
    }

    // Still overlapping on the next frame: no further loss.
    place_player(&mut app, px, py);
    tick(&mut app);
    let vitals = app.world().resource::<PlayerVitals>();
    assert_eq!(vitals.health, 90);
    assert_eq!(vitals.invincibility_frames, INVINCIBILITY_FRAMES - 1);
}

#[test]
fn sword_sweep_hits_everything_in_front_and_nothing_behind() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    let px = 1000.0;
    let ey = GROUND_SURFACE_Y + 10.0;
    place_player(&mut app, px, GROUND_SURFACE_Y + PLAYER_SIZE.y / 2.0);

    // Two in front within range, one behind within range. Keep them
    // outside contact-overlap distance so only the sword touches them.
    spawn_enemy_at(&mut app, EnemyKind::Crab, px + 50.0, ey);
    spawn_enemy_at(&mut app, EnemyKind::Crab, px + 60.0, ey);
    spawn_enemy_at(&mut app, EnemyKind::Crab, px - 50.0, ey);

    {
        let entity = player_entity(&mut app);
        let mut movement = app.world_mut().get_mut::<PlayerMovement>(entity).unwrap();
        movement.facing = Facing::Right;
    }
    app.world_mut().resource_mut::<ToolBelt>().current = ToolKind::Sword;
    press_interact(&mut app);
    tick(&mut app);

    let expected = 30 - sword_damage(1);
    let healths: Vec<(f32, i32)> = {
        let world = app.world_mut();
        let mut query = world.query::<(&Enemy, &Transform)>();
        query
            .iter(world)
            .map(|(e, tf)| (tf.translation.x, e.health))
            .collect()
    };

    for (x, health) in healths {
        if x > px {
            assert_eq!(health, expected, "enemy in front at x={} takes the swing", x);
        } else {
            assert_eq!(health, 30, "enemy behind at x={} is untouched", x);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Building
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn failed_build_deducts_nothing() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut inventory = app.world_mut().resource_mut::<Inventory>();
        inventory.wood = 100;
        inventory.stone = 100;
        inventory.ore = 9; // one ore short of a house
    }
    app.world_mut().send_event(BuildRequestEvent {
        blueprint: "house",
        x: 500.0,
        y: GROUND_SURFACE_Y,
    });
    tick(&mut app);

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(
        (inventory.wood, inventory.stone, inventory.ore),
        (100, 100, 9),
        "a failed build must leave the inventory untouched"
    );
    assert_eq!(count_components::<Building>(&mut app), 0);
}

#[test]
fn successful_build_deducts_the_full_cost_and_places_the_building() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut inventory = app.world_mut().resource_mut::<Inventory>();
        inventory.wood = 50;
        inventory.stone = 30;
        inventory.ore = 10;
    }
    app.world_mut().send_event(BuildRequestEvent {
        blueprint: "house",
        x: 500.0,
        y: GROUND_SURFACE_Y,
    });
    tick(&mut app);

    let inventory = app.world().resource::<Inventory>();
    assert_eq!((inventory.wood, inventory.stone, inventory.ore), (0, 0, 0));
    assert_eq!(count_components::<Building>(&mut app), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Death & respawn
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn death_costs_experience_and_respawns_after_the_delay() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut vitals = app.world_mut().resource_mut::<PlayerVitals>();
        vitals.experience = 100;
        vitals.health = 0;
    }
    tick(&mut app);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Dead
    );
    assert_eq!(
        app.world().resource::<PlayerVitals>().experience,
        70,
        "death deducts 30% of current experience"
    );

    // One frame short of the delay: still dead.
    ticks(&mut app, RESPAWN_DELAY_FRAMES - 1);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Dead
    );

    tick(&mut app);
    tick(&mut app); // transition applies on the following update
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    let vitals = app.world().resource::<PlayerVitals>();
    assert_eq!(vitals.health, vitals.max_health);

    // Player is back at the fixed spawn spot.
    let entity = player_entity(&mut app);
    let x = app.world().get::<Transform>(entity).unwrap().translation.x;
    assert_eq!(x, SCREEN_WIDTH / 2.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Level transition
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn level_transition_requires_a_spawned_and_defeated_boss() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    // Fresh level: no enemy has ever spawned, so clearing nothing must
    // not complete the level.
    ticks(&mut app, 10);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );

    // Enemies spawned and cleared, but no boss: still not complete.
    {
        let mut world_state = app.world_mut().resource_mut::<WorldState>();
        world_state.enemies_spawned = 3;
    }
    ticks(&mut app, 5);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );

    // Boss spawned and defeated: the transition fires.
    {
        let mut world_state = app.world_mut().resource_mut::<WorldState>();
        world_state.boss_spawned = true;
        world_state.boss_defeated = true;
    }
    tick(&mut app);
    tick(&mut app);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::LevelTransition
    );
}

#[test]
fn level_two_regenerates_with_water_and_dinosaurs() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    {
        let mut world_state = app.world_mut().resource_mut::<WorldState>();
        world_state.enemies_spawned = 1;
        world_state.boss_spawned = true;
        world_state.boss_defeated = true;
    }
    tick(&mut app);
    tick(&mut app);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::LevelTransition
    );

    // Sit out the transition delay, then let the next level generate.
    ticks(&mut app, LEVEL_TRANSITION_FRAMES + 2);
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    ticks(&mut app, 2);

    let world_state = app.world().resource::<WorldState>();
    assert_eq!(world_state.level, 2);
    assert_eq!(world_state.initial_resource_count, 25);
    assert!(!world_state.boss_spawned, "boss flags reset per level");

    assert_eq!(
        count_components::<WaterZone>(&mut app),
        1,
        "level 2 carves a water pool"
    );
    assert!(count_enemies(&mut app, EnemyKind::Dinosaur) > 0);
    assert!(
        count_components::<Fish>(&mut app) > 0,
        "the pool is stocked with fish"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Princess & enemies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn princess_cooks_food_into_the_queue() {
    let mut app = build_test_app();
    boot(&mut app);

    // 600-frame cooking interval plus slack for her spawn frame.
    ticks(&mut app, 605);

    let foods = &app.world().resource::<Inventory>().foods;
    assert!(!foods.is_empty(), "the princess should have cooked by now");
    for food in foods {
        assert!(food.healing > 0);
    }
}

#[test]
fn enemies_stay_inside_the_world_and_on_the_ground() {
    let mut app = build_test_app();
    boot(&mut app);
    tick(&mut app);

    // Park the player far from the action so contact damage can't kill
    // anyone's test run.
    place_player(&mut app, 50.0, GROUND_SURFACE_Y + PLAYER_SIZE.y / 2.0);
    spawn_enemy_at(&mut app, EnemyKind::Crab, 2390.0, 300.0);
    spawn_enemy_at(&mut app, EnemyKind::Dinosaur, 1200.0, 500.0);

    ticks(&mut app, 300);

    let positions: Vec<(Vec2, Vec2)> = {
        let world = app.world_mut();
        let mut query = world.query::<(&Enemy, &Transform)>();
        query
            .iter(world)
            .map(|(e, tf)| (tf.translation.truncate(), e.size))
            .collect()
    };
    assert!(!positions.is_empty());
    for (pos, size) in positions {
        assert!(pos.x >= size.x / 2.0 - 0.5 && pos.x <= WORLD_WIDTH - size.x / 2.0 + 0.5);
        assert!(pos.y >= GROUND_SURFACE_Y - 0.5, "enemy sank below ground: {}", pos.y);
    }
}
