//! The princess NPC: wanders near her spot on the ground and
//! periodically cooks something for the player.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Frames between finished dishes.
const COOK_INTERVAL_FRAMES: u32 = 600;
/// How far from home she is willing to stroll.
const WANDER_RANGE: f32 = 120.0;
const PRINCESS_SIZE: Vec2 = Vec2::new(28.0, 44.0);
const PRINCESS_SPEED: f32 = 1.0;

#[derive(Component, Debug)]
pub struct Princess {
    pub home_x: f32,
    pub target_x: Option<f32>,
    pub idle_frames: u32,
    pub cook_frames: u32,
}

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (ensure_princess, princess_wander, princess_cook)
                .chain()
                .in_set(SimSet::World)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Spawn the princess whenever the level lacks one (fresh level or first
/// frame). She is a level entity, so regeneration replaces her too.
fn ensure_princess(
    mut commands: Commands,
    request: Res<LevelSpawnRequest>,
    existing: Query<(), With<Princess>>,
) {
    if request.pending || !existing.is_empty() {
        return;
    }

    let mut rng = rand::thread_rng();
    let home_x = rng.gen_range(WORLD_WIDTH * 0.25..WORLD_WIDTH * 0.75);

    commands.spawn((
        Princess {
            home_x,
            target_x: None,
            idle_frames: 60,
            cook_frames: COOK_INTERVAL_FRAMES,
        },
        LevelEntity,
        Sprite {
            color: Color::srgb(0.95, 0.55, 0.75),
            custom_size: Some(PRINCESS_SIZE),
            ..default()
        },
        Transform::from_xyz(home_x, GROUND_SURFACE_Y + PRINCESS_SIZE.y / 2.0, 2.5),
    ));
}

/// System: stroll toward a random point near home, idle a moment, pick
/// another.
fn princess_wander(mut query: Query<(&mut Princess, &mut Transform, &mut Sprite)>) {
    let mut rng = rand::thread_rng();

    for (mut princess, mut transform, mut sprite) in query.iter_mut() {
        if let Some(target) = princess.target_x {
            let delta = target - transform.translation.x;
            if delta.abs() < 2.0 {
                princess.target_x = None;
                princess.idle_frames = rng.gen_range(60..240);
            } else {
                transform.translation.x += delta.signum() * PRINCESS_SPEED;
                sprite.flip_x = delta < 0.0;
            }
        } else if princess.idle_frames > 0 {
            princess.idle_frames -= 1;
        } else {
            let home = princess.home_x;
            princess.target_x = Some(
                rng.gen_range((home - WANDER_RANGE).max(0.0)..(home + WANDER_RANGE).min(WORLD_WIDTH)),
            );
        }
    }
}

/// System: the cooking timer. Each time it expires a random dish lands in
/// the player's food queue.
fn princess_cook(
    mut query: Query<&mut Princess>,
    food_registry: Res<FoodRegistry>,
    mut inventory: ResMut<Inventory>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let mut rng = rand::thread_rng();

    for mut princess in query.iter_mut() {
        princess.cook_frames = princess.cook_frames.saturating_sub(1);
        if princess.cook_frames > 0 {
            continue;
        }
        princess.cook_frames = COOK_INTERVAL_FRAMES;

        let kind = match rng.gen_range(0..3) {
            0 => FoodKind::Apple,
            1 => FoodKind::Cookie,
            _ => FoodKind::Cake,
        };
        let item = FoodItem {
            kind,
            healing: food_registry.healing(kind),
        };
        inventory.foods.push_back(item);
        toasts.send(ToastEvent::info(format!(
            "The princess made you a {}!",
            kind.name()
        )));
    }
}
