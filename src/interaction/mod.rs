//! Interaction controller: one active zone, one `interact` action.
pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;
