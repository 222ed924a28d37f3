//! Messages emitted when the player interacts with the active cat.
use bevy::prelude::{Entity, Message};

use crate::scene::components::{CatId, StationNumber};

/// The player petted the cat on `entity`.
#[derive(Message, Debug, Clone)]
pub struct CatPetted {
    pub entity: Entity,
    pub cat_id: CatId,
}

/// Requests a sparkle burst from the emitter paired with `station`.
#[derive(Message, Debug, Clone)]
pub struct SparkleBurst {
    pub station: StationNumber,
    pub cat_id: CatId,
}
