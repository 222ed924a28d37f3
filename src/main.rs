use std::path::Path;

use bevy::prelude::*;

mod core;
mod effects;
mod interaction;
mod model;
mod proximity;
mod scene;
mod ui;

#[cfg(test)]
mod test_support;

use crate::{
    core::CorePlugin, effects::EffectsPlugin, interaction::InteractionPlugin, model::ModelPlugin,
    proximity::ProximityPlugin, scene::ScenePlugin, ui::UiPlugin,
};

fn main() {
    load_env_file();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Circle of Cats".into(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin,
            ScenePlugin, // After CorePlugin so the configured time scale sticks
            ProximityPlugin,
            InteractionPlugin,
            EffectsPlugin,
            ModelPlugin,
            UiPlugin,
        ))
        .run();
}

/// Loads `.env` (e.g. `RUST_LOG`, `CIRCLE_OF_CATS_CONFIG`) before Bevy reads the environment.
fn load_env_file() {
    const ENV_FILE: &str = ".env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
