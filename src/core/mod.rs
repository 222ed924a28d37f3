//! Core timing shared by every timer-driven behaviour in the scene.
pub mod plugin;

pub use plugin::{CorePlugin, SceneClock};
