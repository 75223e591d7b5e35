//! Eating: pop the oldest food item and convert it into health.

use bevy::prelude::*;

use crate::shared::*;

/// System: the eat action. FIFO pop, bounded heal, and a notification
/// either way. An empty queue is a no-op plus a "no food" toast.
pub fn handle_eat(
    input: Res<PlayerInput>,
    overlay: Res<ToolOverlay>,
    mut inventory: ResMut<Inventory>,
    mut vitals: ResMut<PlayerVitals>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if !input.eat || overlay.open {
        return;
    }

    let Some(food) = inventory.foods.pop_front() else {
        toasts.send(ToastEvent::info("No food to eat"));
        return;
    };

    vitals.heal(food.healing);
    toasts.send(ToastEvent::info(format!(
        "Ate {} (+{} HP)",
        food.kind.name(),
        food.healing
    )));
    sfx.send(PlaySfxEvent { sfx_id: "eat" });
}
