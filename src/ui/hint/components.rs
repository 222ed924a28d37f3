// src/ui/hint/components.rs
//
// Components for the interaction hint.

use bevy::prelude::*;

/// Marker for the single hint node.
///
/// `target` is the zone entity the hint currently floats above.
#[derive(Component, Debug, Default)]
pub struct InteractionHint {
    pub target: Option<Entity>,
}
