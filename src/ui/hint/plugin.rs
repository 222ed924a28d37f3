// src/ui/hint/plugin.rs
//
// Plugin registration for the interaction hint.

use bevy::prelude::*;

use crate::proximity::systems::poll_proximity_zones;

use super::systems::{position_interaction_hint, setup_interaction_hint, toggle_interaction_hint};

/// Plugin providing the "Press E to pet" hint.
///
/// # Dependencies
///
/// - `ScenePlugin` provides `SceneSettings` and the `FlyCamera`
/// - `InteractionPlugin` provides `ActiveZone`
pub struct InteractionHintPlugin;

impl Plugin for InteractionHintPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_interaction_hint).add_systems(
            Update,
            (
                toggle_interaction_hint.after(poll_proximity_zones),
                position_interaction_hint.after(toggle_interaction_hint),
            ),
        );
    }
}
