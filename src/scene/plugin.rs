//! ScenePlugin loads the scene config and spawns the circle of cats.
use bevy::prelude::*;

use crate::core::SceneClock;

use super::{
    config::SceneSettings,
    systems::{
        fly_camera_mouse_look, fly_camera_translate, spawn_cat_stations, spawn_scene_environment,
        update_cursor_grab,
    },
};

/// Must be added after `CorePlugin` so the configured time scale reaches the clock.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let settings = SceneSettings::load_or_default();
        info!(
            "Scene configured: {} cats, poll every {} ms, glow {:.1}s, sparkle {:.1}s",
            settings.cats.len(),
            settings.timing.proximity_poll.as_millis(),
            settings.timing.glow_duration.as_secs_f32(),
            settings.timing.sparkle_duration.as_secs_f32()
        );

        if app.world().contains_resource::<SceneClock>() {
            app.world_mut()
                .resource_mut::<SceneClock>()
                .set_time_scale(settings.timing.time_scale);
        } else {
            app.insert_resource(SceneClock::new(settings.timing.time_scale));
        }

        app.insert_resource(settings)
            .add_systems(
                Startup,
                (spawn_scene_environment, spawn_cat_stations).chain(),
            )
            .add_systems(
                Update,
                (
                    update_cursor_grab,
                    fly_camera_mouse_look.after(update_cursor_grab),
                    fly_camera_translate,
                ),
            );
    }
}
