//! Tool selection: quick-select slots, the tool overlay, and the
//! building-mode toggle.

use bevy::prelude::*;

use crate::shared::*;

/// The ordered list of tools for the overlay and the 1-4 quick slots.
pub const TOOL_ORDER: [ToolKind; 4] = [
    ToolKind::Axe,
    ToolKind::Pickaxe,
    ToolKind::Hammer,
    ToolKind::Sword,
];

/// System: quick-select keys, overlay open/close, and overlay navigation.
/// Confirming a slot claims the jump edge so closing the overlay with
/// Space doesn't also launch the player.
pub fn handle_tool_selection(
    mut input: ResMut<PlayerInput>,
    mut belt: ResMut<ToolBelt>,
    mut overlay: ResMut<ToolOverlay>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if let Some(slot) = input.quick_slot {
        if let Some(&tool) = TOOL_ORDER.get(slot as usize) {
            belt.current = tool;
            toasts.send(ToastEvent::info(format!("Selected {}", tool.name())));
        }
    }

    if input.toggle_inventory {
        overlay.open = !overlay.open;
        if overlay.open {
            overlay.selected_slot = TOOL_ORDER
                .iter()
                .position(|&t| t == belt.current)
                .unwrap_or(0);
        }
    }

    if !overlay.open {
        return;
    }

    if input.ui_left {
        overlay.selected_slot =
            (overlay.selected_slot + TOOL_ORDER.len() - 1) % TOOL_ORDER.len();
    }
    if input.ui_right {
        overlay.selected_slot = (overlay.selected_slot + 1) % TOOL_ORDER.len();
    }

    // Space doubles as the confirm key while the overlay is open.
    if input.ui_confirm || input.jump {
        belt.current = TOOL_ORDER[overlay.selected_slot];
        overlay.open = false;
        input.jump = false;
        toasts.send(ToastEvent::info(format!("Selected {}", belt.current.name())));
    }
}

/// System: building-mode toggle. Entering building mode arms the house
/// blueprint; leaving clears it.
pub fn handle_build_mode_toggle(
    input: Res<PlayerInput>,
    mut build_mode: ResMut<BuildMode>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !input.toggle_build_mode {
        return;
    }

    build_mode.active = !build_mode.active;
    if build_mode.active {
        build_mode.current_blueprint = Some("house");
        toasts.send(ToastEvent::info("Building Mode Activated"));
    } else {
        build_mode.current_blueprint = None;
        toasts.send(ToastEvent::info("Building Mode Deactivated"));
    }
}
