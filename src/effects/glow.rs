//! Emissive glow shown while a cat is being petted.
//!
//! A glow swaps every mesh under the cat to an emissive clone of its
//! material, adds a short-range point light, and after a fixed duration puts
//! the exact original material handles back.
use std::time::Duration;

use bevy::log::{debug, info};
use bevy::prelude::*;

use crate::{core::SceneClock, interaction::events::CatPetted};

const LIGHT_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Material handles captured before the glow was applied.
#[derive(Debug, Clone, Default)]
pub struct MaterialSnapshot {
    entries: Vec<(Entity, Handle<StandardMaterial>)>,
}

impl MaterialSnapshot {
    pub fn mesh_count(&self) -> usize {
        self.entries.len()
    }

    /// Puts every captured handle back. Meshes that no longer exist are skipped.
    pub fn restore(&self, meshes: &mut Query<&mut MeshMaterial3d<StandardMaterial>>) {
        for (entity, handle) in &self.entries {
            if let Ok(mut material) = meshes.get_mut(*entity) {
                material.0 = handle.clone();
            }
        }
    }
}

#[derive(Debug)]
struct ActiveGlow {
    snapshot: MaterialSnapshot,
    light: Option<Entity>,
    timer: Timer,
}

/// Glow responder attached to a cat station.
#[derive(Component, Debug)]
pub struct CatGlow {
    color: Color,
    emissive_intensity: f32,
    light_intensity: f32,
    light_range: f32,
    duration: Duration,
    active: Option<ActiveGlow>,
}

impl CatGlow {
    pub fn new(color: Color, duration: Duration) -> Self {
        Self {
            color,
            emissive_intensity: 0.6,
            light_intensity: 60_000.0,
            light_range: 3.0,
            duration,
            active: None,
        }
    }

    pub fn with_emissive_intensity(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    /// Light intensity of zero skips the temporary light.
    pub fn with_light(mut self, intensity: f32, range: f32) -> Self {
        self.light_intensity = intensity;
        self.light_range = range;
        self
    }

    pub fn is_glowing(&self) -> bool {
        self.active.is_some()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn light(&self) -> Option<Entity> {
        self.active.as_ref().and_then(|active| active.light)
    }

    fn glow_material(&self, original: &StandardMaterial) -> StandardMaterial {
        StandardMaterial {
            emissive: self.color.to_linear() * self.emissive_intensity,
            ..original.clone()
        }
    }
}

/// Finishes glows whose duration elapsed. Runs before `start_cat_glow` so a
/// trigger in the same frame always starts a fresh cycle.
pub fn finish_cat_glow(
    mut commands: Commands,
    clock: Res<SceneClock>,
    mut glows: Query<(Entity, &mut CatGlow)>,
    mut meshes: Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    let delta = clock.last_scaled_delta();
    for (entity, mut glow) in glows.iter_mut() {
        let finished = glow
            .active
            .as_mut()
            .is_some_and(|active| active.timer.tick(delta).is_finished());
        if !finished {
            continue;
        }
        if let Some(active) = glow.active.take() {
            end_glow(&mut commands, active, &mut meshes);
            info!("Glow ended on {:?}", entity);
        }
    }
}

/// Starts a glow on every petted cat that is not already glowing.
pub fn start_cat_glow(
    mut commands: Commands,
    mut petted: MessageReader<CatPetted>,
    mut glows: Query<&mut CatGlow>,
    children: Query<&Children>,
    mut meshes: Query<&mut MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in petted.read() {
        let Ok(mut glow) = glows.get_mut(event.entity) else {
            continue;
        };
        if glow.is_glowing() {
            debug!("{} is already glowing; ignoring pet", event.cat_id);
            continue;
        }

        let mut snapshot = MaterialSnapshot::default();
        let targets = std::iter::once(event.entity).chain(children.iter_descendants(event.entity));
        for target in targets {
            let Ok(mut material) = meshes.get_mut(target) else {
                continue;
            };
            let Some(glowing) = materials
                .get(&material.0)
                .map(|original| glow.glow_material(original))
            else {
                continue;
            };
            let glowing = materials.add(glowing);
            snapshot.entries.push((target, material.0.clone()));
            material.0 = glowing;
        }

        let light = (glow.light_intensity > 0.0).then(|| {
            commands
                .spawn((
                    PointLight {
                        color: glow.color,
                        intensity: glow.light_intensity,
                        range: glow.light_range,
                        ..default()
                    },
                    Transform::from_translation(LIGHT_OFFSET),
                    ChildOf(event.entity),
                    Name::new("Glow Light"),
                ))
                .id()
        });

        info!(
            "{} glowing ({} meshes) for {:.1}s",
            event.cat_id,
            snapshot.mesh_count(),
            glow.duration.as_secs_f32()
        );

        let duration = glow.duration;
        glow.active = Some(ActiveGlow {
            snapshot,
            light,
            timer: Timer::new(duration, TimerMode::Once),
        });
    }
}

/// Restores materials right away if a glowing `CatGlow` is removed or its
/// entity is despawned mid-effect.
pub fn restore_glow_on_remove(
    remove: On<Remove, CatGlow>,
    mut commands: Commands,
    mut glows: Query<&mut CatGlow>,
    mut meshes: Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    let Ok(mut glow) = glows.get_mut(remove.entity) else {
        return;
    };
    if let Some(active) = glow.active.take() {
        debug!("Glow on {:?} cut short by removal", remove.entity);
        end_glow(&mut commands, active, &mut meshes);
    }
}

fn end_glow(
    commands: &mut Commands,
    active: ActiveGlow,
    meshes: &mut Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    active.snapshot.restore(meshes);
    if let Some(light) = active.light {
        commands.entity(light).try_despawn();
    }
}
