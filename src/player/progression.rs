//! Experience and level progression.
//!
//! Defeated enemies award kind-specific XP. Crossing the threshold levels
//! the player up, carries the remainder over (no experience is ever
//! lost), scales the next threshold by ×1.5, and grants +10 max health
//! along with an immediate +10 heal.

use bevy::prelude::*;

use crate::shared::*;

/// Add experience and settle any level-ups. Returns the number of levels
/// gained, which may be more than one for a large award.
pub fn apply_experience(vitals: &mut PlayerVitals, amount: u32) -> u32 {
    vitals.experience += amount;

    let mut levels_gained = 0;
    while vitals.experience >= vitals.exp_to_next_level {
        vitals.experience -= vitals.exp_to_next_level;
        vitals.level += 1;
        levels_gained += 1;
        vitals.exp_to_next_level =
            (vitals.exp_to_next_level as f32 * EXP_THRESHOLD_GROWTH) as u32;
        vitals.max_health += LEVEL_UP_HEALTH_BONUS;
        vitals.heal(LEVEL_UP_HEALTH_BONUS);
    }
    levels_gained
}

/// System: listens for enemy defeats and feeds the XP pipeline.
pub fn award_experience(
    mut defeated: EventReader<EnemyDefeatedEvent>,
    registry: Res<EnemyRegistry>,
    mut vitals: ResMut<PlayerVitals>,
    mut level_ups: EventWriter<LevelUpEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in defeated.read() {
        let Some(def) = registry.get(event.kind) else {
            continue;
        };

        toasts.send(ToastEvent::info(format!("+{} XP", def.xp)));

        let gained = apply_experience(&mut vitals, def.xp);
        if gained > 0 {
            level_ups.send(LevelUpEvent {
                new_level: vitals.level,
            });
            toasts.send(ToastEvent {
                message: format!("Level up! Now level {}", vitals.level),
                duration_secs: 3.0,
            });
            sfx.send(PlaySfxEvent { sfx_id: "level_up" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_the_threshold_once() {
        let mut vitals = PlayerVitals {
            experience: 90,
            exp_to_next_level: 100,
            ..default()
        };
        let gained = apply_experience(&mut vitals, 20);
        assert_eq!(gained, 1);
        assert_eq!(vitals.level, 2);
        assert_eq!(vitals.experience, 10);
        assert_eq!(vitals.exp_to_next_level, 150);
        assert_eq!(vitals.max_health, 110);
    }

    #[test]
    fn below_threshold_accumulates_only() {
        let mut vitals = PlayerVitals::default();
        assert_eq!(apply_experience(&mut vitals, 99), 0);
        assert_eq!(vitals.level, 1);
        assert_eq!(vitals.experience, 99);
    }

    #[test]
    fn large_award_crosses_multiple_thresholds() {
        let mut vitals = PlayerVitals::default();
        // 100 + 150 = 250 spent on two level-ups, 5 left over.
        let gained = apply_experience(&mut vitals, 255);
        assert_eq!(gained, 2);
        assert_eq!(vitals.level, 3);
        assert_eq!(vitals.experience, 5);
        assert_eq!(vitals.exp_to_next_level, 225);
        assert_eq!(vitals.max_health, 120);
    }

    #[test]
    fn level_up_heals_but_stays_bounded() {
        let mut vitals = PlayerVitals {
            health: 100,
            ..default()
        };
        apply_experience(&mut vitals, 100);
        // Max rose to 110 and the +10 heal filled it.
        assert_eq!(vitals.health, 110);
        assert_eq!(vitals.max_health, 110);
    }
}
