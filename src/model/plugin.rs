//! Model plugin wiring placeholder and model-swap systems.
use bevy::prelude::*;

use super::systems::{attach_model_placeholders, resolve_cat_models};

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_model_placeholders, resolve_cat_models).chain(),
        );
    }
}
