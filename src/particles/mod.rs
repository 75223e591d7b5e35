//! Fire-and-forget particle bursts.
//!
//! Gameplay code requests a burst via [`BlockBreakEvent`] and never looks
//! back; particles live out their 30 frames under their own gravity and
//! fade, then despawn.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

const PARTICLE_LIFETIME_FRAMES: u32 = 30;
const BURST_COUNT: usize = 8;
const SPARK_COUNT: usize = 4;
const PARTICLE_GRAVITY: f32 = 0.1;

#[derive(Component, Debug)]
pub struct Particle {
    pub vel: Vec2,
    pub frames_left: u32,
    pub base_color: Color,
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (spawn_bursts, spawn_sparks, update_particles)
                .chain()
                .in_set(SimSet::Game)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// System: turn each break event into a radial burst of colored squares.
fn spawn_bursts(mut commands: Commands, mut events: EventReader<BlockBreakEvent>) {
    let mut rng = rand::thread_rng();

    for event in events.read() {
        for _ in 0..BURST_COUNT {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(2.0..4.0);
            let size = rng.gen_range(2.0..4.0);

            commands.spawn((
                Particle {
                    vel: Vec2::from_angle(angle) * speed,
                    frames_left: PARTICLE_LIFETIME_FRAMES,
                    base_color: event.color,
                },
                LevelEntity,
                Sprite {
                    color: event.color,
                    custom_size: Some(Vec2::splat(size)),
                    ..default()
                },
                Transform::from_xyz(event.x, event.y, 4.0),
            ));
        }
    }
}

/// System: weapon impacts throw off a handful of white sparks.
fn spawn_sparks(mut commands: Commands, mut events: EventReader<SparkEvent>) {
    let mut rng = rand::thread_rng();

    for event in events.read() {
        for _ in 0..SPARK_COUNT {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(2.0..4.0);

            commands.spawn((
                Particle {
                    vel: Vec2::from_angle(angle) * speed,
                    frames_left: PARTICLE_LIFETIME_FRAMES,
                    base_color: Color::WHITE,
                },
                LevelEntity,
                Sprite {
                    color: Color::WHITE,
                    custom_size: Some(Vec2::splat(2.0)),
                    ..default()
                },
                Transform::from_xyz(event.x, event.y, 4.0),
            ));
        }
    }
}

/// System: integrate, fade, and reap.
fn update_particles(
    mut commands: Commands,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    for (entity, mut particle, mut transform, mut sprite) in particles.iter_mut() {
        if particle.frames_left == 0 {
            commands.entity(entity).despawn();
            continue;
        }
        particle.frames_left -= 1;

        particle.vel.y -= PARTICLE_GRAVITY;
        transform.translation.x += particle.vel.x;
        transform.translation.y += particle.vel.y;

        let alpha = particle.frames_left as f32 / PARTICLE_LIFETIME_FRAMES as f32;
        let base = particle.base_color.to_srgba();
        sprite.color = Color::srgba(base.red, base.green, base.blue, alpha);
    }
}
