//! Systems translating raw input into interactions with the active zone.
use bevy::log::{debug, info};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::interaction::{
    components::{ActiveZone, InteractionBindings},
    events::{CatPetted, SparkleBurst},
};

/// Maps the interact key and locked-cursor clicks onto `trigger_interaction`.
///
/// Every press counts; responders ignore re-triggers on their own.
pub fn handle_interaction_input(
    bindings: Res<InteractionBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor_query: Query<&CursorOptions, With<PrimaryWindow>>,
    active: Res<ActiveZone>,
    mut petted: MessageWriter<CatPetted>,
    mut bursts: MessageWriter<SparkleBurst>,
) {
    let mut triggers = 0;

    if keyboard.just_pressed(bindings.key) {
        triggers += 1;
    }

    if mouse_buttons.just_pressed(bindings.mouse_button) {
        let cursor_locked = cursor_query
            .single()
            .is_ok_and(|cursor| cursor.grab_mode == CursorGrabMode::Locked);
        if cursor_locked || !bindings.require_cursor_lock {
            triggers += 1;
        }
    }

    for _ in 0..triggers {
        trigger_interaction(&active, &mut petted, &mut bursts);
    }
}

/// Emits the pet and sparkle messages for the active zone. No-op without one.
pub fn trigger_interaction(
    active: &ActiveZone,
    petted: &mut MessageWriter<CatPetted>,
    bursts: &mut MessageWriter<SparkleBurst>,
) -> bool {
    let Some(info) = active.get() else {
        debug!("Interaction pressed with no cat nearby");
        return false;
    };

    info!("Petting {} (station {})", info.cat_id, info.station);
    petted.write(CatPetted {
        entity: info.zone,
        cat_id: info.cat_id.clone(),
    });
    bursts.write(SparkleBurst {
        station: info.station,
        cat_id: info.cat_id.clone(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::SceneClock,
        interaction::components::ActiveZoneInfo,
        scene::components::{CatId, StationNumber},
        test_support::{advance, collected, track},
    };

    fn setup() -> App {
        let mut app = App::new();
        app.insert_resource(SceneClock::default())
            .init_resource::<ActiveZone>()
            .init_resource::<InteractionBindings>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Update, handle_interaction_input);
        track::<CatPetted>(&mut app);
        track::<SparkleBurst>(&mut app);
        app
    }

    fn activate(app: &mut App, station: u32) -> Entity {
        let zone = app.world_mut().spawn_empty().id();
        app.world_mut().resource_mut::<ActiveZone>().set(ActiveZoneInfo {
            zone,
            cat_id: CatId::new("mochi"),
            station: StationNumber::new(station),
        });
        zone
    }

    fn press_key(app: &mut App, key: KeyCode) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
        advance(app, 16);
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(key);
        keyboard.clear();
    }

    fn click(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        advance(app, 16);
        let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.release(MouseButton::Left);
        mouse.clear();
    }

    fn spawn_window(app: &mut App, grab_mode: CursorGrabMode) {
        app.world_mut().spawn((
            PrimaryWindow,
            CursorOptions {
                grab_mode,
                ..Default::default()
            },
        ));
    }

    #[test]
    fn interaction_without_active_zone_is_noop() {
        let mut app = setup();
        press_key(&mut app, KeyCode::KeyE);

        assert!(collected::<CatPetted>(&app).is_empty());
        assert!(collected::<SparkleBurst>(&app).is_empty());
    }

    #[test]
    fn key_press_pets_active_cat_and_requests_sparkles() {
        let mut app = setup();
        let zone = activate(&mut app, 4);

        press_key(&mut app, KeyCode::KeyE);
        advance(&mut app, 16);

        let petted = collected::<CatPetted>(&app);
        assert_eq!(petted.len(), 1);
        assert_eq!(petted[0].entity, zone);
        assert_eq!(petted[0].cat_id.as_str(), "mochi");

        let bursts = collected::<SparkleBurst>(&app);
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].station.sparkle_name(), "sparkles-4");
    }

    #[test]
    fn repeated_presses_are_not_debounced() {
        let mut app = setup();
        activate(&mut app, 1);

        press_key(&mut app, KeyCode::KeyE);
        press_key(&mut app, KeyCode::KeyE);
        press_key(&mut app, KeyCode::KeyQ);

        assert_eq!(collected::<CatPetted>(&app).len(), 2);
    }

    #[test]
    fn clicks_require_locked_cursor() {
        let mut app = setup();
        activate(&mut app, 2);

        click(&mut app);
        assert!(collected::<CatPetted>(&app).is_empty());

        spawn_window(&mut app, CursorGrabMode::None);
        click(&mut app);
        assert!(collected::<CatPetted>(&app).is_empty());
    }

    #[test]
    fn locked_cursor_click_interacts() {
        let mut app = setup();
        activate(&mut app, 2);
        spawn_window(&mut app, CursorGrabMode::Locked);

        click(&mut app);
        assert_eq!(collected::<CatPetted>(&app).len(), 1);
    }
}
