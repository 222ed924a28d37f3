//! Systems swapping placeholder boxes for loaded cat models.
use bevy::asset::LoadState;
use bevy::log::{info, warn};
use bevy::prelude::*;

use super::components::{
    resolve_load_state, CatModel, ModelStatus, PLACEHOLDER_ROUGHNESS, PLACEHOLDER_SIZE,
};

/// Gives every new cat a placeholder box until (or instead of) its model.
pub fn attach_model_placeholders(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    models: Query<(Entity, &CatModel, Option<&Name>), Added<CatModel>>,
) {
    for (entity, model, name) in models.iter() {
        if model.status() == ModelStatus::Placeholder {
            info!(
                "Using placeholder box for {}",
                name.map(Name::as_str).unwrap_or("unnamed cat")
            );
        }
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(PLACEHOLDER_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: model.fallback_color(),
                perceptual_roughness: PLACEHOLDER_ROUGHNESS,
                metallic: 0.0,
                ..default()
            })),
        ));
    }
}

/// Polls loading models; swaps in the scene on success, keeps the box on failure.
pub fn resolve_cat_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut models: Query<(Entity, &mut CatModel, Option<&Name>)>,
) {
    apply_model_load_states(&mut commands, &mut models, |scene| {
        asset_server.get_load_state(scene.id())
    });
}

/// Moves every loading model forward according to `load_state_of`.
fn apply_model_load_states(
    commands: &mut Commands,
    models: &mut Query<(Entity, &mut CatModel, Option<&Name>)>,
    load_state_of: impl Fn(&Handle<Scene>) -> Option<LoadState>,
) {
    for (entity, mut model, name) in models.iter_mut() {
        if model.status() != ModelStatus::Loading {
            continue;
        }
        let Some(scene) = model.scene().cloned() else {
            model.set_status(ModelStatus::Placeholder);
            continue;
        };

        let load_state = load_state_of(&scene);
        let Some(next) = resolve_load_state(load_state.as_ref()) else {
            continue;
        };
        let label = name.map(Name::as_str).unwrap_or("unnamed cat");

        match next {
            ModelStatus::Loaded => {
                info!("Model loaded for {}", label);
                commands
                    .entity(entity)
                    .remove::<(Mesh3d, MeshMaterial3d<StandardMaterial>)>()
                    .insert(SceneRoot(scene));
            }
            ModelStatus::Placeholder => {
                warn!("Model failed for {}, keeping placeholder box", label);
            }
            ModelStatus::Loading => {}
        }
        model.set_status(next);
    }
}
