//! Sparkle bursts: a particle emitter enabled for a short, fixed window.
use std::time::Duration;

use bevy::log::{debug, info, warn};
use bevy::prelude::*;

use crate::{
    core::SceneClock,
    interaction::events::SparkleBurst,
    scene::{components::StationNumber, config::SceneSettings},
};

const GOLDEN_ANGLE: f32 = 2.399_963;
const PARTICLE_RADIUS: f32 = 0.025;
const PARTICLE_GRAVITY: f32 = -1.5;
const MAX_PARTICLES_PER_FRAME: u32 = 32;

/// Emitter paired with a station; named `sparkles-<station>`.
#[derive(Component, Debug)]
pub struct SparkleEmitter {
    station: StationNumber,
    enabled: bool,
    off_timer: Timer,
    spawn_budget: f32,
    emitted: u32,
}

impl SparkleEmitter {
    pub fn new(station: StationNumber, duration: Duration) -> Self {
        Self {
            station,
            enabled: false,
            off_timer: Timer::new(duration, TimerMode::Once),
            spawn_budget: 0.0,
            emitted: 0,
        }
    }

    pub fn station(&self) -> StationNumber {
        self.station
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables the emitter. Returns false if a burst is already running.
    pub fn trigger(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        self.spawn_budget = 0.0;
        self.off_timer.reset();
        true
    }

    /// Advances the off-timer; returns true on the frame the emitter switches off.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.enabled {
            return false;
        }
        if self.off_timer.tick(delta).is_finished() {
            self.enabled = false;
            return true;
        }
        false
    }

    fn take_spawn_count(&mut self, delta_secs: f32, rate: f32) -> u32 {
        self.spawn_budget += delta_secs * rate;
        let count = self.spawn_budget.floor().min(MAX_PARTICLES_PER_FRAME as f32);
        self.spawn_budget -= count;
        count as u32
    }

    fn next_direction(&mut self) -> Vec3 {
        let index = self.emitted;
        self.emitted = self.emitted.wrapping_add(1);

        let angle = index as f32 * GOLDEN_ANGLE;
        let lift = 0.6 + 0.4 * ((index % 5) as f32 / 4.0);
        Vec3::new(angle.cos(), lift, angle.sin()).normalize()
    }
}

/// A single short-lived sparkle.
#[derive(Component, Debug)]
pub struct SparkleParticle {
    velocity: Vec3,
    lifetime: Timer,
}

/// Shared mesh and material for sparkle particles.
#[derive(Resource, Debug)]
pub struct SparkleAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

pub fn setup_sparkle_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(SparkleAssets {
        mesh: meshes.add(Sphere::new(PARTICLE_RADIUS)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.95, 0.7),
            emissive: LinearRgba::rgb(6.0, 5.0, 2.5),
            unlit: true,
            ..default()
        }),
    });
}

/// Switches emitters off once their burst window elapsed. Runs before
/// `start_sparkle_bursts`.
pub fn tick_sparkle_emitters(clock: Res<SceneClock>, mut emitters: Query<(&Name, &mut SparkleEmitter)>) {
    let delta = clock.last_scaled_delta();
    for (name, mut emitter) in emitters.iter_mut() {
        if emitter.tick(delta) {
            debug!("{} switched off (station {})", name, emitter.station());
        }
    }
}

/// Enables the emitter paired with the burst's station.
pub fn start_sparkle_bursts(
    mut bursts: MessageReader<SparkleBurst>,
    mut emitters: Query<(&Name, &mut SparkleEmitter)>,
) {
    for burst in bursts.read() {
        let Some((name, mut emitter)) = emitters
            .iter_mut()
            .find(|(_, emitter)| emitter.station() == burst.station)
        else {
            warn!(
                "No sparkle emitter for station {} ({})",
                burst.station, burst.cat_id
            );
            continue;
        };

        if emitter.trigger() {
            info!("{} bursting for {}", name, burst.cat_id);
        } else {
            debug!("{} already bursting; ignoring", name);
        }
    }
}

/// Spawns particles from every enabled emitter.
pub fn emit_sparkle_particles(
    mut commands: Commands,
    clock: Res<SceneClock>,
    settings: Res<SceneSettings>,
    assets: Option<Res<SparkleAssets>>,
    mut emitters: Query<(&GlobalTransform, &mut SparkleEmitter)>,
) {
    let Some(assets) = assets else {
        return;
    };
    let delta_secs = clock.last_scaled_delta().as_secs_f32();
    let tuning = &settings.sparkle;

    for (transform, mut emitter) in emitters.iter_mut() {
        if !emitter.is_enabled() {
            continue;
        }
        let origin = transform.translation();
        let count = emitter.take_spawn_count(delta_secs, tuning.particles_per_second);
        for _ in 0..count {
            let direction = emitter.next_direction();
            commands.spawn((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(origin),
                SparkleParticle {
                    velocity: direction * tuning.particle_speed,
                    lifetime: Timer::new(tuning.particle_lifetime, TimerMode::Once),
                },
            ));
        }
    }
}

/// Moves, shrinks and finally despawns particles.
pub fn update_sparkle_particles(
    mut commands: Commands,
    clock: Res<SceneClock>,
    mut particles: Query<(Entity, &mut SparkleParticle, &mut Transform)>,
) {
    let delta = clock.last_scaled_delta();
    let delta_secs = delta.as_secs_f32();

    for (entity, mut particle, mut transform) in particles.iter_mut() {
        if particle.lifetime.tick(delta).is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        particle.velocity.y += PARTICLE_GRAVITY * delta_secs;
        transform.translation += particle.velocity * delta_secs;
        transform.scale = Vec3::splat(1.0 - particle.lifetime.fraction());
    }
}
