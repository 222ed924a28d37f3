//! Cosmetic responders: glow, sparkle and sound.
pub mod glow;
pub mod plugin;
pub mod sound;
pub mod sparkle;

pub use plugin::EffectsPlugin;
