//! Systems polling camera distance against every proximity zone.
use bevy::log::{debug, info, warn};
use bevy::prelude::*;

use crate::{
    core::SceneClock,
    interaction::components::{ActiveZone, ActiveZoneInfo},
    proximity::{
        components::{ProximityZone, ZoneTransition},
        events::{ZoneEntered, ZoneLeft},
    },
    scene::components::{CatStation, FlyCamera},
};

/// Ticks each zone's poll timer and, when due, compares the camera distance
/// against the zone radius. Transitions update `ActiveZone` in the same call.
#[allow(clippy::too_many_arguments)]
pub fn poll_proximity_zones(
    clock: Res<SceneClock>,
    camera_query: Query<&GlobalTransform, With<FlyCamera>>,
    mut zones: Query<(Entity, &GlobalTransform, &CatStation, &mut ProximityZone)>,
    mut active: ResMut<ActiveZone>,
    mut entered: MessageWriter<ZoneEntered>,
    mut left: MessageWriter<ZoneLeft>,
    mut missing_camera_logged: Local<bool>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        if !*missing_camera_logged {
            debug!("Proximity polling waiting for the player camera");
            *missing_camera_logged = true;
        }
        return;
    };
    *missing_camera_logged = false;

    let camera_position = camera_transform.translation();
    let delta = clock.last_scaled_delta();

    for (entity, zone_transform, station, mut zone) in zones.iter_mut() {
        if !zone.tick(delta) {
            continue;
        }

        let distance = camera_position.distance(zone_transform.translation());
        match zone.observe(distance) {
            Some(ZoneTransition::Entered) => {
                info!(
                    "Entered zone of {} (station {}, distance {:.2})",
                    station.cat_id, station.station, distance
                );
                let replaced = active.set(ActiveZoneInfo {
                    zone: entity,
                    cat_id: station.cat_id.clone(),
                    station: station.station,
                });
                if let Some(previous) = replaced.filter(|previous| previous.zone != entity) {
                    warn!(
                        "Zones of {} and {} overlap; {} is now active",
                        previous.cat_id, station.cat_id, station.cat_id
                    );
                }
                entered.write(ZoneEntered {
                    zone: entity,
                    cat_id: station.cat_id.clone(),
                    station: station.station,
                });
            }
            Some(ZoneTransition::Left) => {
                info!(
                    "Left zone of {} (station {})",
                    station.cat_id, station.station
                );
                active.clear_if(entity);
                left.write(ZoneLeft {
                    zone: entity,
                    cat_id: station.cat_id.clone(),
                    station: station.station,
                });
            }
            None => {}
        }
    }
}

/// Drops the active zone when its entity loses the zone component or is despawned.
pub fn release_removed_zones(
    mut removed: RemovedComponents<ProximityZone>,
    mut active: ResMut<ActiveZone>,
) {
    for entity in removed.read() {
        if active.clear_if(entity) {
            debug!("Active zone {:?} removed; interaction target cleared", entity);
        }
    }
}

#[cfg(feature = "zone_debug")]
#[derive(Resource)]
pub struct ZoneDebugTimer(pub Timer);

#[cfg(feature = "zone_debug")]
impl Default for ZoneDebugTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

#[cfg(feature = "zone_debug")]
pub fn log_zone_distances(
    clock: Res<SceneClock>,
    mut timer: ResMut<ZoneDebugTimer>,
    zones: Query<(&CatStation, &ProximityZone)>,
) {
    if !timer.0.tick(clock.last_scaled_delta()).just_finished() {
        return;
    }
    for (station, zone) in zones.iter() {
        info!(
            target: "zone_debug",
            "{} | state {:?} | radius {:.2} | last distance {:?}",
            station.cat_id,
            zone.state(),
            zone.radius(),
            zone.last_distance(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        proximity::components::ZoneState,
        scene::components::{CatId, StationNumber},
        test_support::{advance, collected, place, track},
    };

    fn setup() -> App {
        let mut app = App::new();
        app.insert_resource(SceneClock::default())
            .init_resource::<ActiveZone>()
            .add_systems(
                Update,
                (poll_proximity_zones, release_removed_zones).chain(),
            );
        track::<ZoneEntered>(&mut app);
        track::<ZoneLeft>(&mut app);
        app
    }

    fn spawn_camera(app: &mut App, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                FlyCamera::new(0.0, 0.0),
                Transform::from_translation(position),
                GlobalTransform::from_translation(position),
            ))
            .id()
    }

    fn spawn_zone(app: &mut App, name: &str, station: u32, position: Vec3, radius: f32) -> Entity {
        app.world_mut()
            .spawn((
                CatStation::new(CatId::new(name), StationNumber::new(station)),
                ProximityZone::new(radius, Duration::from_millis(100)),
                Transform::from_translation(position),
                GlobalTransform::from_translation(position),
            ))
            .id()
    }

    #[test]
    fn enter_and_leave_fire_once_per_crossing() {
        let mut app = setup();
        let camera = spawn_camera(&mut app, Vec3::new(2.0, 0.0, 0.0));
        let zone = spawn_zone(&mut app, "mochi", 1, Vec3::ZERO, 1.5);

        advance(&mut app, 100);
        assert!(collected::<ZoneEntered>(&app).is_empty());
        assert!(app.world().resource::<ActiveZone>().is_empty());

        place(&mut app, camera, Vec3::new(1.0, 0.0, 0.0));
        for _ in 0..5 {
            advance(&mut app, 100);
        }
        assert_eq!(collected::<ZoneEntered>(&app).len(), 1);
        assert_eq!(collected::<ZoneEntered>(&app)[0].zone, zone);
        let active = app.world().resource::<ActiveZone>();
        assert_eq!(active.get().map(|info| info.zone), Some(zone));

        place(&mut app, camera, Vec3::new(0.0, 0.0, 2.0));
        for _ in 0..5 {
            advance(&mut app, 100);
        }
        assert_eq!(collected::<ZoneLeft>(&app).len(), 1);
        assert_eq!(collected::<ZoneEntered>(&app).len(), 1);
        assert!(app.world().resource::<ActiveZone>().is_empty());
    }

    #[test]
    fn polls_only_on_interval() {
        let mut app = setup();
        spawn_camera(&mut app, Vec3::ZERO);
        let zone = spawn_zone(&mut app, "tofu", 2, Vec3::ZERO, 1.0);

        advance(&mut app, 40);
        advance(&mut app, 40);
        assert!(collected::<ZoneEntered>(&app).is_empty());
        let state = app.world().get::<ProximityZone>(zone).map(|zone| zone.state());
        assert_eq!(state, Some(ZoneState::Outside));

        advance(&mut app, 40);
        assert_eq!(collected::<ZoneEntered>(&app).len(), 1);
    }

    #[test]
    fn overlapping_zones_last_entered_wins() {
        let mut app = setup();
        let camera = spawn_camera(&mut app, Vec3::new(10.0, 0.0, 0.0));
        let first = spawn_zone(&mut app, "pepper", 3, Vec3::ZERO, 2.0);
        let second = spawn_zone(&mut app, "luna", 4, Vec3::new(3.0, 0.0, 0.0), 2.0);

        place(&mut app, camera, Vec3::new(0.5, 0.0, 0.0));
        advance(&mut app, 100);
        place(&mut app, camera, Vec3::new(1.5, 0.0, 0.0));
        advance(&mut app, 100);

        let active = app.world().resource::<ActiveZone>();
        assert_eq!(active.get().map(|info| info.zone), Some(second));

        // Leaving the first zone must not clear the second.
        place(&mut app, camera, Vec3::new(2.5, 0.0, 0.0));
        advance(&mut app, 100);
        let left = collected::<ZoneLeft>(&app);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].zone, first);
        let active = app.world().resource::<ActiveZone>();
        assert_eq!(active.get().map(|info| info.zone), Some(second));
    }

    #[test]
    fn missing_camera_skips_polling() {
        let mut app = setup();
        spawn_zone(&mut app, "miso", 6, Vec3::ZERO, 1.0);

        advance(&mut app, 100);
        advance(&mut app, 100);
        assert!(collected::<ZoneEntered>(&app).is_empty());
    }

    #[test]
    fn despawned_zone_stops_polling_and_releases_active() {
        let mut app = setup();
        let camera = spawn_camera(&mut app, Vec3::ZERO);
        let zone = spawn_zone(&mut app, "biscuit", 5, Vec3::ZERO, 1.0);

        advance(&mut app, 100);
        assert!(!app.world().resource::<ActiveZone>().is_empty());

        app.world_mut().despawn(zone);
        advance(&mut app, 100);
        assert!(app.world().resource::<ActiveZone>().is_empty());

        place(&mut app, camera, Vec3::new(5.0, 0.0, 0.0));
        advance(&mut app, 100);
        advance(&mut app, 100);
        assert!(collected::<ZoneLeft>(&app).is_empty());
    }
}
