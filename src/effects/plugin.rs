//! Effects plugin wiring the cosmetic responders.
use bevy::prelude::*;

use crate::interaction::systems::handle_interaction_input;

use super::{
    glow::{finish_cat_glow, restore_glow_on_remove, start_cat_glow},
    sound::play_cat_sounds,
    sparkle::{
        emit_sparkle_particles, setup_sparkle_assets, start_sparkle_bursts,
        tick_sparkle_emitters, update_sparkle_particles,
    },
};

/// Registers glow, sparkle and sound responders.
///
/// # System Ordering
///
/// Each responder finishes expired effects before reading new triggers, so a
/// trigger in the same frame as an expiry starts a fresh cycle. All of them
/// run after `handle_interaction_input` to react in the frame of the press.
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(restore_glow_on_remove)
            .add_systems(Startup, setup_sparkle_assets)
            .add_systems(
                Update,
                (
                    (finish_cat_glow, start_cat_glow).chain(),
                    (
                        tick_sparkle_emitters,
                        start_sparkle_bursts,
                        emit_sparkle_particles,
                        update_sparkle_particles,
                    )
                        .chain(),
                    play_cat_sounds,
                )
                    .after(handle_interaction_input),
            );
    }
}
