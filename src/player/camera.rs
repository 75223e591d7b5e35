//! The follow camera: a single horizontal offset eased toward the player
//! and clamped to the world, an exponential smoothing filter rather than
//! a physical spring.

use bevy::prelude::*;

use crate::shared::*;

/// Where the camera center should sit for a given player x.
pub fn camera_target_x(player_x: f32) -> f32 {
    let offset = (player_x - SCREEN_WIDTH / 2.0).clamp(0.0, WORLD_WIDTH - SCREEN_WIDTH);
    offset + SCREEN_WIDTH / 2.0
}

/// System: ease 10% of the remaining distance per frame.
pub fn camera_follow(
    player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_tf) = player.get_single() else {
        return;
    };
    let Ok(mut cam_tf) = camera.get_single_mut() else {
        return;
    };

    let target = camera_target_x(player_tf.translation.x);
    cam_tf.translation.x += (target - cam_tf.translation.x) * CAMERA_EASE;
    cam_tf.translation.y = SCREEN_HEIGHT / 2.0;
}

/// Snap the camera straight to the player, used on respawn and level
/// transitions.
pub fn snap_camera_to(cam_tf: &mut Transform, player_x: f32) {
    cam_tf.translation.x = camera_target_x(player_x);
    cam_tf.translation.y = SCREEN_HEIGHT / 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_clamps_at_world_edges() {
        // Far left: camera pinned at the first screen.
        assert_eq!(camera_target_x(0.0), SCREEN_WIDTH / 2.0);
        // Far right: pinned at the last screen.
        assert_eq!(
            camera_target_x(WORLD_WIDTH),
            WORLD_WIDTH - SCREEN_WIDTH / 2.0
        );
    }

    #[test]
    fn camera_centers_on_player_mid_world() {
        assert_eq!(camera_target_x(1200.0), 1200.0);
    }
}
