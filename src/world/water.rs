//! Water-resident fish: wander inside the pool, get eaten by a swimming
//! player, respawn to keep the pool stocked.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::generation::spawn_fish;

/// Heal granted by catching a fish mid-swim.
const FISH_HEAL: i32 = 5;

/// System: fish drift inside the pool, bouncing off its edges and
/// occasionally changing heading.
pub fn fish_wander(
    mut fish: Query<(&mut Fish, &mut Transform)>,
    water: Query<&WaterZone>,
) {
    let Ok(zone) = water.get_single() else {
        return;
    };
    let mut rng = rand::thread_rng();
    let bounds = zone.rect.inflate(-8.0);

    for (mut fish, mut transform) in fish.iter_mut() {
        if rng.gen_bool(0.01) {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = fish.vel.length().max(0.8);
            fish.vel = Vec2::from_angle(angle) * speed;
        }

        transform.translation.x += fish.vel.x;
        transform.translation.y += fish.vel.y;

        if transform.translation.x < bounds.min.x || transform.translation.x > bounds.max.x {
            fish.vel.x = -fish.vel.x;
            transform.translation.x = transform.translation.x.clamp(bounds.min.x, bounds.max.x);
        }
        if transform.translation.y < bounds.min.y || transform.translation.y > bounds.max.y {
            fish.vel.y = -fish.vel.y;
            transform.translation.y = transform.translation.y.clamp(bounds.min.y, bounds.max.y);
        }

        if fish.vel.x.abs() > 0.05 {
            transform.scale.x = if fish.vel.x > 0.0 { 1.0 } else { -1.0 };
        }
    }
}

/// System: a swimming player who overlaps a fish eats it on the spot.
/// The fish despawns and a replacement spawns elsewhere in the pool.
pub fn catch_fish(
    mut commands: Commands,
    water: Query<&WaterZone>,
    fish: Query<(Entity, &Transform), With<Fish>>,
    player: Query<(&Transform, &PlayerMovement), (With<Player>, Without<Fish>)>,
    mut vitals: ResMut<PlayerVitals>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Ok((player_tf, movement)) = player.get_single() else {
        return;
    };
    if !movement.swimming {
        return;
    }
    let Ok(zone) = water.get_single() else {
        return;
    };

    let player_rect = Rect::from_center_size(player_tf.translation.truncate(), PLAYER_SIZE);
    let mut rng = rand::thread_rng();

    for (entity, fish_tf) in fish.iter() {
        let fish_rect =
            Rect::from_center_size(fish_tf.translation.truncate(), Vec2::new(14.0, 8.0));
        if player_rect.intersect(fish_rect).is_empty() {
            continue;
        }

        commands.entity(entity).despawn();
        vitals.heal(FISH_HEAL);
        toasts.send(ToastEvent::info("Caught a fish!"));
        sfx.send(PlaySfxEvent { sfx_id: "eat" });

        spawn_fish(&mut commands, zone.rect, &mut rng);
    }
}
