//! Cat model loading with a placeholder-box fallback.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ModelPlugin;
