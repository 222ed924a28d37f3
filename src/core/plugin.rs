//! CorePlugin owns the scaled scene clock that drives poll and effect timers.
use bevy::prelude::*;
use std::time::Duration;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

/// Scaled frame delta consumed by proximity polls and effect timers.
///
/// Systems never read `Time` directly so the whole scene can be slowed down
/// from config, and tests can advance it by exact amounts.
#[derive(Resource, Debug)]
pub struct SceneClock {
    time_scale: f32,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SceneClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: time_scale.max(MIN_TIME_SCALE),
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the multiplier (clamped to a small positive minimum).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(MIN_TIME_SCALE);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Delta of the current frame after scaling.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Feeds one real frame delta into the clock.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_scaled_delta = if self.time_scale == DEFAULT_TIME_SCALE {
            real_delta
        } else {
            real_delta.mul_f64(f64::from(self.time_scale))
        };
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers the scene clock. Ticks in `PreUpdate` so every `Update` system
/// sees the same delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>()
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(PreUpdate, advance_scene_clock);
    }
}

fn advance_scene_clock(mut clock: ResMut<SceneClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SceneClock>) {
    info!("Scene clock running at time scale {:.3}", clock.time_scale());
}
