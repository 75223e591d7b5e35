//! Data layer — populates all registries at game startup.
//!
//! This plugin runs in `OnEnter(GameState::Loading)`, fills every registry
//! (EnemyRegistry, FoodRegistry, BlueprintRegistry) from the hard-coded
//! game-design data below, then transitions the game into
//! `GameState::Playing`.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to
/// Playing.
fn load_all_data(
    mut enemy_registry: ResMut<EnemyRegistry>,
    mut food_registry: ResMut<FoodRegistry>,
    mut blueprint_registry: ResMut<BlueprintRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    populate_enemies(&mut enemy_registry);
    info!("  Enemy kinds loaded: {}", enemy_registry.defs.len());

    populate_foods(&mut food_registry);
    info!("  Food kinds loaded: {}", food_registry.defs.len());

    populate_blueprints(&mut blueprint_registry);
    info!("  Blueprints loaded: {}", blueprint_registry.blueprints.len());

    next_state.set(GameState::Playing);
}

/// Kind → stats lookup. The boss awards substantially more XP than the
/// regular enemies.
pub fn populate_enemies(registry: &mut EnemyRegistry) {
    registry.defs = vec![
        (
            EnemyKind::Crab,
            EnemyDef {
                name: "Crab",
                max_health: 30,
                damage: 10,
                attack_range: 40.0,
                attack_cooldown: 60,
                xp: 20,
                size: Vec2::new(28.0, 20.0),
                color: Color::srgb(0.85, 0.30, 0.20),
            },
        ),
        (
            EnemyKind::KingCrab,
            EnemyDef {
                name: "King Crab",
                max_health: 120,
                damage: 20,
                attack_range: 60.0,
                attack_cooldown: 90,
                xp: 100,
                size: Vec2::new(56.0, 40.0),
                color: Color::srgb(0.70, 0.12, 0.30),
            },
        ),
        (
            EnemyKind::Dinosaur,
            EnemyDef {
                name: "Dinosaur",
                max_health: 50,
                damage: 15,
                attack_range: 50.0,
                attack_cooldown: 75,
                xp: 40,
                size: Vec2::new(40.0, 36.0),
                color: Color::srgb(0.25, 0.55, 0.25),
            },
        ),
    ];
}

pub fn populate_foods(registry: &mut FoodRegistry) {
    registry.defs = vec![
        (FoodKind::Apple, 20),
        (FoodKind::Cookie, 15),
        (FoodKind::Cake, 50),
    ];
}

pub fn populate_blueprints(registry: &mut BlueprintRegistry) {
    registry.blueprints = vec![
        Blueprint {
            name: "house",
            costs: vec![
                (Material::Wood, 50),
                (Material::Stone, 30),
                (Material::Ore, 10),
            ],
        },
        Blueprint {
            name: "toy_robot",
            costs: vec![
                (Material::Wood, 20),
                (Material::Stone, 10),
                (Material::Ore, 30),
            ],
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_enemy_kind_has_a_definition() {
        let mut registry = EnemyRegistry::default();
        populate_enemies(&mut registry);
        for kind in [EnemyKind::Crab, EnemyKind::KingCrab, EnemyKind::Dinosaur] {
            assert!(registry.get(kind).is_some(), "missing def for {:?}", kind);
        }
    }

    #[test]
    fn boss_awards_the_most_xp() {
        let mut registry = EnemyRegistry::default();
        populate_enemies(&mut registry);
        let boss_xp = registry.get(EnemyKind::KingCrab).unwrap().xp;
        for (kind, def) in &registry.defs {
            if !kind.is_boss() {
                assert!(boss_xp > def.xp * 2, "boss XP should dwarf {:?}", kind);
            }
        }
    }

    #[test]
    fn house_blueprint_costs() {
        let mut registry = BlueprintRegistry::default();
        populate_blueprints(&mut registry);
        let house = registry.get("house").unwrap();
        assert_eq!(house.costs, vec![
            (Material::Wood, 50),
            (Material::Stone, 30),
            (Material::Ore, 10),
        ]);
    }

    #[test]
    fn unknown_blueprint_is_none() {
        let mut registry = BlueprintRegistry::default();
        populate_blueprints(&mut registry);
        assert!(registry.get("castle").is_none());
    }
}
