//! Purr playback when a cat is petted.
use bevy::asset::LoadState;
use bevy::audio::Volume;
use bevy::log::{info, warn};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::interaction::events::CatPetted;

/// Sound responder attached to a cat station.
#[derive(Component, Debug, Clone)]
pub struct CatSound {
    clip: Option<Handle<AudioSource>>,
    volume: f32,
}

impl CatSound {
    pub fn new(clip: Option<Handle<AudioSource>>, volume: f32) -> Self {
        Self {
            clip,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

/// Marker on the player currently voicing a cat. At most one per cat.
#[derive(Component, Debug)]
pub struct CatSoundPlayback {
    pub cat: Entity,
}

/// Plays each petted cat's clip from the beginning at its configured volume.
///
/// A pet while the purr is still playing restarts it: the cat's previous
/// player is despawned before the new one is spawned. Missing or failed clips
/// are logged and skipped.
pub fn play_cat_sounds(
    mut commands: Commands,
    mut petted: MessageReader<CatPetted>,
    sounds: Query<&CatSound>,
    playbacks: Query<(Entity, &CatSoundPlayback)>,
    asset_server: Option<Res<AssetServer>>,
) {
    // Several pets in one frame collapse into a single restart.
    let mut restarted: HashSet<Entity> = HashSet::default();
    let events: Vec<&CatPetted> = petted.read().collect();
    for event in events.into_iter().rev() {
        if !restarted.insert(event.entity) {
            continue;
        }
        let Ok(sound) = sounds.get(event.entity) else {
            continue;
        };
        let Some(clip) = sound.clip.as_ref() else {
            warn!("No sound loaded for {}", event.cat_id);
            continue;
        };

        let load_state = asset_server
            .as_ref()
            .and_then(|server| server.get_load_state(clip.id()));
        if let Some(LoadState::Failed(err)) = load_state {
            warn!("Sound playback failed for {}: {}", event.cat_id, err);
            continue;
        }

        for (player, playback) in &playbacks {
            if playback.cat == event.entity {
                commands.entity(player).try_despawn();
            }
        }

        commands.spawn((
            AudioPlayer::new(clip.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(sound.volume)),
            CatSoundPlayback { cat: event.entity },
            Name::new(format!("Purr ({})", event.cat_id)),
        ));
        info!("Playing sound for {} | volume {:.2}", event.cat_id, sound.volume);
    }
}
