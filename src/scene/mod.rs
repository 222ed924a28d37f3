//! Scene module: configuration, environment, cat stations and camera controls.
pub mod components;
pub mod config;
pub mod plugin;
pub mod systems;

pub use plugin::ScenePlugin;
