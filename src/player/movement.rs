//! Core movement system — horizontal walk, jump, gravity, and the
//! swimming modifiers.
//!
//! All constants are in pixels per frame at the 60 Hz simulation rate.
//! The swimming flag is recomputed every frame from a water-overlap test
//! and modifies the physics constants rather than forming its own state.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::generation::ground_surface_at;

pub fn player_movement(
    input: Res<PlayerInput>,
    overlay: Res<ToolOverlay>,
    water: Query<&WaterZone>,
    mut query: Query<(&mut Transform, &mut PlayerMovement, &mut Sprite), With<Player>>,
) {
    let Ok((mut transform, mut movement, mut sprite)) = query.get_single_mut() else {
        return;
    };

    let pool = water.get_single().ok().map(|w| w.rect);

    // Swimming is a water-overlap test, re-evaluated each frame.
    let player_rect = Rect::from_center_size(transform.translation.truncate(), PLAYER_SIZE);
    movement.swimming = pool
        .map(|rect| !player_rect.intersect(rect).is_empty())
        .unwrap_or(false);

    // Horizontal walk. The tool overlay freezes movement while open.
    let axis = if overlay.open { 0.0 } else { input.move_axis };
    if axis != 0.0 {
        let factor = if movement.swimming { SWIM_MOVE_FACTOR } else { 1.0 };
        transform.translation.x += axis * PLAYER_SPEED * factor;
        movement.facing = if axis > 0.0 { Facing::Right } else { Facing::Left };
        movement.is_moving = true;
    } else {
        movement.is_moving = false;
    }

    let half_w = PLAYER_SIZE.x / 2.0;
    transform.translation.x = transform.translation.x.clamp(half_w, WORLD_WIDTH - half_w);

    // Jump: a full impulse from the ground, a gentler stroke in water.
    if input.jump && !overlay.open {
        if movement.swimming {
            movement.vel_y = SWIM_JUMP_FORCE;
            movement.jumping = true;
        } else if !movement.jumping {
            movement.vel_y = JUMP_FORCE;
            movement.jumping = true;
        }
    }

    // Gravity integration. Water reduces and caps the pull, and damps
    // velocity to simulate drag.
    if movement.swimming {
        movement.vel_y -= SWIM_GRAVITY;
        movement.vel_y = movement.vel_y.max(-SWIM_MAX_FALL);
        movement.vel_y *= SWIM_DAMPING;
    } else {
        movement.vel_y -= GRAVITY;
    }
    transform.translation.y += movement.vel_y;

    // Ground collision.
    let floor = ground_surface_at(transform.translation.x, pool.as_ref()) + PLAYER_SIZE.y / 2.0;
    if transform.translation.y <= floor {
        transform.translation.y = floor;
        movement.vel_y = 0.0;
        movement.jumping = false;
    }

    sprite.flip_x = movement.facing == Facing::Left;
}
