//! Sword combat and contact damage.

use bevy::prelude::*;

use crate::shared::*;

/// True when `target` lies in the half-plane the player is facing.
/// An enemy directly behind the player is never attackable, even inside
/// sword range.
pub fn in_front_of(player_x: f32, facing: Facing, target_x: f32) -> bool {
    match facing {
        Facing::Right => target_x >= player_x,
        Facing::Left => target_x <= player_x,
    }
}

/// System: the sword swing. Every enemy within range and in front takes
/// damage in the same swing — no early exit.
pub fn handle_attack(
    mut commands: Commands,
    input: Res<PlayerInput>,
    overlay: Res<ToolOverlay>,
    build_mode: Res<BuildMode>,
    mut belt: ResMut<ToolBelt>,
    vitals: Res<PlayerVitals>,
    mut world: ResMut<WorldState>,
    player: Query<(&Transform, &PlayerMovement), With<Player>>,
    mut enemies: Query<(Entity, &mut Enemy, &Transform), Without<Player>>,
    enemy_registry: Res<EnemyRegistry>,
    mut defeated: EventWriter<EnemyDefeatedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut bursts: EventWriter<BlockBreakEvent>,
    mut sparks: EventWriter<SparkEvent>,
) {
    if !input.interact || overlay.open || build_mode.active {
        return;
    }
    if belt.current != ToolKind::Sword {
        return;
    }
    let Ok((player_tf, movement)) = player.get_single() else {
        return;
    };
    if !belt.try_use(ToolKind::Sword) {
        return;
    }

    sfx.send(PlaySfxEvent { sfx_id: "sword_swing" });

    let player_pos = player_tf.translation.truncate();
    let damage = sword_damage(vitals.level);

    for (entity, mut enemy, enemy_tf) in enemies.iter_mut() {
        let enemy_pos = enemy_tf.translation.truncate();
        let distance = player_pos.distance(enemy_pos);
        if distance >= SWORD_RANGE
            || !in_front_of(player_pos.x, movement.facing, enemy_pos.x)
        {
            continue;
        }

        enemy.health -= damage;

        if enemy.health <= 0 {
            kill_enemy(
                &mut commands,
                &mut world,
                &enemy_registry,
                entity,
                &enemy,
                enemy_pos,
                &mut defeated,
                &mut toasts,
                &mut sfx,
                &mut bursts,
            );
        } else {
            let name = enemy_registry
                .get(enemy.kind)
                .map(|d| d.name)
                .unwrap_or("Enemy");
            toasts.send(ToastEvent::info(format!("{}: {} HP left", name, enemy.health)));
            sfx.send(PlaySfxEvent { sfx_id: "enemy_hit" });
            sparks.send(SparkEvent {
                x: enemy_pos.x,
                y: enemy_pos.y,
            });
        }
    }
}

/// Removal-by-identity on death. Defeating the king crab flips the
/// one-shot flag the level-completion check consumes.
#[allow(clippy::too_many_arguments)]
fn kill_enemy(
    commands: &mut Commands,
    world: &mut WorldState,
    registry: &EnemyRegistry,
    entity: Entity,
    enemy: &Enemy,
    pos: Vec2,
    defeated: &mut EventWriter<EnemyDefeatedEvent>,
    toasts: &mut EventWriter<ToastEvent>,
    sfx: &mut EventWriter<PlaySfxEvent>,
    bursts: &mut EventWriter<BlockBreakEvent>,
) {
    commands.entity(entity).despawn();

    if enemy.kind.is_boss() {
        world.boss_defeated = true;
        toasts.send(ToastEvent {
            message: "The King Crab is defeated!".to_string(),
            duration_secs: 3.0,
        });
    } else {
        let name = registry.get(enemy.kind).map(|d| d.name).unwrap_or("Enemy");
        toasts.send(ToastEvent::info(format!("Defeated {}", name)));
    }

    defeated.send(EnemyDefeatedEvent { kind: enemy.kind });
    sfx.send(PlaySfxEvent { sfx_id: "enemy_die" });
    bursts.send(BlockBreakEvent {
        x: pos.x,
        y: pos.y,
        color: Color::srgb(0.8, 0.1, 0.1),
    });
}

/// System: contact damage. An overlapping enemy hurts the player unless
/// invincibility frames are still counting down; each hit opens a fresh
/// 30-frame window.
pub fn contact_damage(
    mut vitals: ResMut<PlayerVitals>,
    player: Query<&Transform, With<Player>>,
    mut enemies: Query<(&mut Enemy, &Transform), Without<Player>>,
    enemy_registry: Res<EnemyRegistry>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Ok(player_tf) = player.get_single() else {
        return;
    };
    let player_rect = Rect::from_center_size(player_tf.translation.truncate(), PLAYER_SIZE);

    for (mut enemy, enemy_tf) in enemies.iter_mut() {
        let enemy_rect = Rect::from_center_size(enemy_tf.translation.truncate(), enemy.size);
        if player_rect.intersect(enemy_rect).is_empty() {
            continue;
        }
        if vitals.invincibility_frames > 0 || enemy.attack_cooldown_remaining > 0 {
            continue;
        }

        vitals.hurt(enemy.damage);
        vitals.invincibility_frames = INVINCIBILITY_FRAMES;
        enemy.attack_cooldown_remaining = enemy.attack_cooldown;

        let name = enemy_registry.get(enemy.kind).map(|d| d.name).unwrap_or("Enemy");
        toasts.send(ToastEvent::info(format!("{} hit you for {}", name, enemy.damage)));
        sfx.send(PlaySfxEvent { sfx_id: "player_hurt" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_right_excludes_enemies_behind() {
        assert!(in_front_of(100.0, Facing::Right, 130.0));
        assert!(!in_front_of(100.0, Facing::Right, 70.0));
    }

    #[test]
    fn facing_left_mirrors() {
        assert!(in_front_of(100.0, Facing::Left, 70.0));
        assert!(!in_front_of(100.0, Facing::Left, 130.0));
    }

    #[test]
    fn directly_overlapping_counts_as_in_front() {
        assert!(in_front_of(100.0, Facing::Right, 100.0));
        assert!(in_front_of(100.0, Facing::Left, 100.0));
    }
}
