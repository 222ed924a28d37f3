//! Interaction plugin owning the active-zone state and input handling.
use bevy::prelude::*;

use crate::{proximity::systems::poll_proximity_zones, scene::systems::update_cursor_grab};

use super::{
    components::{ActiveZone, InteractionBindings},
    events::{CatPetted, SparkleBurst},
    systems::handle_interaction_input,
};

/// Owns `ActiveZone`; proximity systems write it, the input handler reads it.
///
/// Input is read before `update_cursor_grab` so the click that locks the
/// cursor does not also count as an interaction.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveZone>()
            .init_resource::<InteractionBindings>()
            .add_message::<CatPetted>()
            .add_message::<SparkleBurst>()
            .add_systems(
                Update,
                handle_interaction_input
                    .after(poll_proximity_zones)
                    .before(update_cursor_grab),
            );
    }
}
