use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// SFX PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps SFX IDs (sent by other domains) to audio file paths. An unknown
/// id — or a missing file on disk — simply plays nothing; sound is
/// strictly fire-and-forget.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "axe_swing" => Some("audio/sfx/axe_swing.ogg"),
        "pickaxe_swing" => Some("audio/sfx/pickaxe_swing.ogg"),
        "hammer_swing" => Some("audio/sfx/hammer_swing.ogg"),
        "sword_swing" => Some("audio/sfx/sword_swing.ogg"),
        "block_break" => Some("audio/sfx/block_break.ogg"),
        "tool_thud" => Some("audio/sfx/tool_thud.ogg"),
        "enemy_hit" => Some("audio/sfx/enemy_hit.ogg"),
        "enemy_die" => Some("audio/sfx/enemy_die.ogg"),
        "player_hurt" => Some("audio/sfx/player_hurt.ogg"),
        "player_die" => Some("audio/sfx/player_die.ogg"),
        "boss_spawn" => Some("audio/sfx/boss_spawn.ogg"),
        "level_up" => Some("audio/sfx/level_up.ogg"),
        "level_complete" => Some("audio/sfx/level_complete.ogg"),
        "build_complete" => Some("audio/sfx/build_complete.ogg"),
        "eat" => Some("audio/sfx/eat.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources that
/// auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        if let Some(path) = sfx_path(event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}
