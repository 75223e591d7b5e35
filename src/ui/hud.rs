//! The always-on HUD: resource counters, health bar, level and XP.

use bevy::prelude::*;
use crate::shared::*;

#[derive(Component)]
pub struct ResourceLabel;

#[derive(Component)]
pub struct HealthBarFill;

#[derive(Component)]
pub struct HealthLabel;

#[derive(Component)]
pub struct LevelLabel;

const HEALTH_BAR_WIDTH: f32 = 160.0;

pub fn spawn_hud(mut commands: Commands) {
    // Top-left: resource counters and food.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                ResourceLabel,
                Text::new("wood: 0   stone: 0   ore: 0   food: 0"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent.spawn((
                LevelLabel,
                Text::new("Lv 1   XP 0/100"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.5)),
            ));

            // Health bar: dark backing with a red fill whose width tracks
            // the health fraction.
            parent
                .spawn((
                    Node {
                        width: Val::Px(HEALTH_BAR_WIDTH),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        HealthBarFill,
                        Node {
                            width: Val::Px(HEALTH_BAR_WIDTH),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.8, 0.15, 0.15)),
                    ));
                });

            parent.spawn((
                HealthLabel,
                Text::new("100 / 100"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn update_hud(
    inventory: Res<Inventory>,
    vitals: Res<PlayerVitals>,
    mut labels: ParamSet<(
        Query<&mut Text, With<ResourceLabel>>,
        Query<&mut Text, With<LevelLabel>>,
        Query<&mut Text, With<HealthLabel>>,
    )>,
    mut fill: Query<&mut Node, With<HealthBarFill>>,
) {
    if let Ok(mut text) = labels.p0().get_single_mut() {
        text.0 = format!(
            "wood: {}   stone: {}   ore: {}   food: {}",
            inventory.wood,
            inventory.stone,
            inventory.ore,
            inventory.foods.len()
        );
    }

    if let Ok(mut text) = labels.p1().get_single_mut() {
        text.0 = format!(
            "Lv {}   XP {}/{}",
            vitals.level, vitals.experience, vitals.exp_to_next_level
        );
    }

    if let Ok(mut text) = labels.p2().get_single_mut() {
        text.0 = format!("{} / {}", vitals.health, vitals.max_health);
    }

    if let Ok(mut node) = fill.get_single_mut() {
        let fraction = if vitals.max_health > 0 {
            vitals.health as f32 / vitals.max_health as f32
        } else {
            0.0
        };
        node.width = Val::Px(HEALTH_BAR_WIDTH * fraction.clamp(0.0, 1.0));
    }
}
