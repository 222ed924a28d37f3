//! Components describing which visual a cat station should show.
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Placeholder box dimensions.
pub const PLACEHOLDER_SIZE: Vec3 = Vec3::new(0.6, 0.7, 0.5);
pub const PLACEHOLDER_ROUGHNESS: f32 = 0.7;

/// Where a cat's visual currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    /// Waiting for the scene asset; the placeholder is shown meanwhile.
    Loading,
    /// The loaded scene replaced the placeholder.
    Loaded,
    /// No model, or the model failed to load. The placeholder stays.
    Placeholder,
}

/// Visual for a cat station: a glTF scene if one loads, otherwise a coloured box.
#[derive(Component, Debug)]
pub struct CatModel {
    scene: Option<Handle<Scene>>,
    fallback_color: Color,
    status: ModelStatus,
}

impl CatModel {
    pub fn new(scene: Option<Handle<Scene>>, fallback_color: Color) -> Self {
        let status = if scene.is_some() {
            ModelStatus::Loading
        } else {
            ModelStatus::Placeholder
        };
        Self {
            scene,
            fallback_color,
            status,
        }
    }

    pub fn scene(&self) -> Option<&Handle<Scene>> {
        self.scene.as_ref()
    }

    pub fn fallback_color(&self) -> Color {
        self.fallback_color
    }

    pub fn status(&self) -> ModelStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ModelStatus) {
        self.status = status;
    }
}

/// Next status for a loading model given the asset server's view of it.
///
/// `None` means keep waiting. Nothing is retried once a load failed.
pub fn resolve_load_state(state: Option<&LoadState>) -> Option<ModelStatus> {
    match state {
        Some(LoadState::Loaded) => Some(ModelStatus::Loaded),
        Some(LoadState::Failed(_)) => Some(ModelStatus::Placeholder),
        Some(LoadState::NotLoaded) | Some(LoadState::Loading) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy::asset::{io::AssetReaderError, AssetLoadError};

    use super::*;

    #[test]
    fn model_without_scene_starts_as_placeholder() {
        let model = CatModel::new(None, Color::WHITE);
        assert_eq!(model.status(), ModelStatus::Placeholder);
        assert!(model.scene().is_none());

        let model = CatModel::new(Some(Handle::default()), Color::BLACK);
        assert_eq!(model.status(), ModelStatus::Loading);
        assert_eq!(model.fallback_color(), Color::BLACK);
    }

    #[test]
    fn load_states_resolve_without_retry() {
        assert_eq!(resolve_load_state(None), None);
        assert_eq!(resolve_load_state(Some(&LoadState::Loading)), None);
        assert_eq!(resolve_load_state(Some(&LoadState::NotLoaded)), None);
        assert_eq!(
            resolve_load_state(Some(&LoadState::Loaded)),
            Some(ModelStatus::Loaded)
        );

        let failed = LoadState::Failed(Arc::new(AssetLoadError::from(
            AssetReaderError::NotFound("models/cat.glb".into()),
        )));
        assert_eq!(
            resolve_load_state(Some(&failed)),
            Some(ModelStatus::Placeholder)
        );
    }
}
