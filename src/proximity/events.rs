//! Zone membership messages.
use bevy::prelude::{Entity, Message};

use crate::scene::components::{CatId, StationNumber};

/// The camera moved inside a zone's radius.
#[derive(Message, Debug, Clone)]
pub struct ZoneEntered {
    pub zone: Entity,
    pub cat_id: CatId,
    pub station: StationNumber,
}

/// The camera moved back out of a zone's radius.
#[derive(Message, Debug, Clone)]
pub struct ZoneLeft {
    pub zone: Entity,
    pub cat_id: CatId,
    pub station: StationNumber,
}
