//! Proximity plugin wiring zone polling and membership messages.
use bevy::prelude::*;

use super::{
    events::{ZoneEntered, ZoneLeft},
    systems::{poll_proximity_zones, release_removed_zones},
};

pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ZoneEntered>()
            .add_message::<ZoneLeft>()
            .add_systems(
                Update,
                (poll_proximity_zones, release_removed_zones).chain(),
            );

        #[cfg(feature = "zone_debug")]
        {
            use super::systems::{log_zone_distances, ZoneDebugTimer};

            app.init_resource::<ZoneDebugTimer>()
                .add_systems(Update, log_zone_distances.after(poll_proximity_zones));
        }
    }
}
