//! Building domain — validates construction requests against the
//! blueprint cost table and places the structure.
//!
//! Deduction is all-or-nothing: the affordability check runs over every
//! material before a single counter is touched, so a failed build leaves
//! the inventory exactly as it was.

use bevy::prelude::*;

use crate::shared::*;

pub struct BuildingPlugin;

impl Plugin for BuildingPlugin {
    fn build(&self, app: &mut App) {
        // Runs after the player set so a request raised this frame is
        // answered this frame.
        app.add_systems(
            FixedUpdate,
            handle_build_requests
                .in_set(SimSet::Game)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Every required material present in sufficient quantity?
pub fn can_build(inventory: &Inventory, blueprint: &Blueprint) -> bool {
    blueprint
        .costs
        .iter()
        .all(|&(material, amount)| inventory.count(material) >= amount)
}

/// Check-then-commit. Returns false without touching the inventory when
/// any material falls short.
pub fn build(inventory: &mut Inventory, blueprint: &Blueprint) -> bool {
    if !can_build(inventory, blueprint) {
        return false;
    }
    for &(material, amount) in &blueprint.costs {
        inventory.deduct(material, amount);
    }
    true
}

/// System: listens to [`BuildRequestEvent`] and validates the request.
///
/// On success: deducts the materials, spawns the building next to the
/// player, and notifies. On failure: a "not enough resources" toast.
fn handle_build_requests(
    mut commands: Commands,
    mut events: EventReader<BuildRequestEvent>,
    registry: Res<BlueprintRegistry>,
    mut inventory: ResMut<Inventory>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(blueprint) = registry.get(event.blueprint) else {
            warn!("Build request for unknown blueprint '{}'", event.blueprint);
            continue;
        };

        if !build(&mut inventory, blueprint) {
            toasts.send(ToastEvent::info("Not enough resources!"));
            continue;
        }

        let size = Vec2::new(64.0, 64.0);
        commands.spawn((
            Building {
                blueprint: blueprint.name,
            },
            LevelEntity,
            Sprite {
                color: Color::srgb(0.45, 0.42, 0.40),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(event.x, GROUND_SURFACE_Y + size.y / 2.0, 1.5),
        ));

        toasts.send(ToastEvent::info(format!("Built {}", blueprint.name)));
        sfx.send(PlaySfxEvent { sfx_id: "build_complete" });
        info!("Building placed: {} at x={:.0}", blueprint.name, event.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> Blueprint {
        Blueprint {
            name: "house",
            costs: vec![
                (Material::Wood, 50),
                (Material::Stone, 30),
                (Material::Ore, 10),
            ],
        }
    }

    fn stocked(wood: u32, stone: u32, ore: u32) -> Inventory {
        Inventory {
            wood,
            stone,
            ore,
            ..default()
        }
    }

    #[test]
    fn build_deducts_the_full_cost() {
        let mut inventory = stocked(60, 40, 20);
        assert!(build(&mut inventory, &house()));
        assert_eq!(inventory.wood, 10);
        assert_eq!(inventory.stone, 10);
        assert_eq!(inventory.ore, 10);
    }

    #[test]
    fn failed_build_deducts_nothing() {
        // Plenty of wood and stone, one ore short — nothing may change.
        let mut inventory = stocked(100, 100, 9);
        assert!(!build(&mut inventory, &house()));
        assert_eq!(inventory.wood, 100);
        assert_eq!(inventory.stone, 100);
        assert_eq!(inventory.ore, 9);
    }

    #[test]
    fn exact_cost_is_affordable() {
        let mut inventory = stocked(50, 30, 10);
        assert!(can_build(&inventory, &house()));
        assert!(build(&mut inventory, &house()));
        assert_eq!(inventory.wood, 0);
        assert_eq!(inventory.stone, 0);
        assert_eq!(inventory.ore, 0);
    }
}
