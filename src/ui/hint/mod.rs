// src/ui/hint/mod.rs
//
// Interaction hint shown above the active cat.
//
// - Shown when a zone becomes active, hidden when it is cleared
// - Follows the active cat in screen space, so it always faces the camera

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionHintPlugin;
