// src/ui/mod.rs
//
// Screen-space UI for the scene.
//
// Current features:
// - Interaction hint floating above the active cat

pub mod hint;

pub use hint::InteractionHintPlugin as UiPlugin;
