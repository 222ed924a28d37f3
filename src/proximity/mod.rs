//! Proximity zones: timer-polled distance checks around each cat station.
pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::ProximityPlugin;
