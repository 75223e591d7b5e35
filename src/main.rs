mod shared;
mod input;
mod data;
mod world;
mod player;
mod building;
mod npc;
mod particles;
mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Crabshore".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(SKY_BLUE))
        // One logical simulation frame per FixedUpdate tick.
        .insert_resource(Time::<Fixed>::from_hz(SIM_HZ))
        // Game state
        .init_state::<GameState>()
        // Shared registries, filled by the data plugin during Loading
        .init_resource::<EnemyRegistry>()
        .init_resource::<FoodRegistry>()
        .init_resource::<BlueprintRegistry>()
        // Events
        .add_event::<ToastEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<BlockBreakEvent>()
        .add_event::<SparkEvent>()
        .add_event::<BuildRequestEvent>()
        .add_event::<EnemyDefeatedEvent>()
        .add_event::<LevelUpEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(building::BuildingPlugin)
        .add_plugins(npc::NpcPlugin)
        .add_plugins(particles::ParticlesPlugin)
        .add_plugins(game::GamePlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0, 0.0),
    ));
}
