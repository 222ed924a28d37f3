// src/ui/hint/systems.rs
//
// Systems for spawning, toggling and positioning the interaction hint.

use bevy::log::debug;
use bevy::prelude::*;

use crate::interaction::components::ActiveZone;
use crate::scene::{components::FlyCamera, config::SceneSettings};

use super::components::InteractionHint;

const BACKGROUND_COLOR: Color = Color::srgba(0.05, 0.05, 0.08, 0.8);
const TEXT_COLOR: Color = Color::srgb(1.0, 0.97, 0.9);
const HINT_WIDTH_PX: f32 = 220.0;
const PADDING_PX: f32 = 6.0;

/// Spawn the hidden hint node.
pub fn setup_interaction_hint(mut commands: Commands, settings: Res<SceneSettings>) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(HINT_WIDTH_PX),
            padding: UiRect::all(Val::Px(PADDING_PX)),
            justify_content: JustifyContent::Center,
            ..default()
        },
        BackgroundColor(BACKGROUND_COLOR),
        ZIndex(100),
        Text::new(settings.hint.prompt.clone()),
        TextFont {
            font_size: settings.hint.font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Visibility::Hidden,
        InteractionHint::default(),
        Name::new("Interaction Hint"),
    ));
}

/// Show the hint while a zone is active and hide it once cleared.
pub fn toggle_interaction_hint(
    active: Res<ActiveZone>,
    settings: Option<Res<SceneSettings>>,
    mut hints: Query<(&mut InteractionHint, &mut Visibility, Option<&mut Text>)>,
) {
    if !active.is_changed() {
        return;
    }

    let Ok((mut hint, mut visibility, text)) = hints.single_mut() else {
        debug!("No interaction hint in the scene; skipping");
        return;
    };

    match active.get() {
        Some(info) => {
            hint.target = Some(info.zone);
            *visibility = Visibility::Inherited;
            if let (Some(mut text), Some(settings)) = (text, settings) {
                text.0 = format!("{} {}", settings.hint.prompt, info.cat_id);
            }
        }
        None => {
            hint.target = None;
            *visibility = Visibility::Hidden;
        }
    }
}

/// Keep the hint centred above its target in screen space.
pub fn position_interaction_hint(
    settings: Res<SceneSettings>,
    camera_query: Query<(&Camera, &GlobalTransform), With<FlyCamera>>,
    targets: Query<&GlobalTransform>,
    mut hints: Query<(&InteractionHint, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for (hint, mut node) in hints.iter_mut() {
        let Some(target) = hint.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let mut world_position = target_transform.translation();
        world_position.y += settings.hint.vertical_offset;

        // Behind the camera or outside the frustum.
        let Ok(viewport_position) = camera.world_to_viewport(camera_transform, world_position)
        else {
            node.display = Display::None;
            continue;
        };

        node.display = Display::Flex;
        node.left = Val::Px(viewport_position.x - HINT_WIDTH_PX / 2.0);
        node.top = Val::Px(viewport_position.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        interaction::components::ActiveZoneInfo,
        scene::components::{CatId, StationNumber},
    };

    fn setup() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<ActiveZone>()
            .insert_resource(SceneSettings::default())
            .add_systems(Update, toggle_interaction_hint);
        let hint = app
            .world_mut()
            .spawn((
                InteractionHint::default(),
                Visibility::Hidden,
                Text::new("Press E to pet"),
            ))
            .id();
        (app, hint)
    }

    #[test]
    fn hint_follows_active_zone() {
        let (mut app, hint) = setup();
        let zone = app.world_mut().spawn_empty().id();

        app.update();
        assert_eq!(app.world().get::<Visibility>(hint), Some(&Visibility::Hidden));

        app.world_mut().resource_mut::<ActiveZone>().set(ActiveZoneInfo {
            zone,
            cat_id: CatId::new("miso"),
            station: StationNumber::new(6),
        });
        app.update();

        assert_eq!(app.world().get::<Visibility>(hint), Some(&Visibility::Inherited));
        assert_eq!(
            app.world().get::<InteractionHint>(hint).and_then(|hint| hint.target),
            Some(zone)
        );
        assert_eq!(
            app.world().get::<Text>(hint).map(|text| text.0.as_str()),
            Some("Press E to pet miso")
        );

        app.world_mut().resource_mut::<ActiveZone>().clear_if(zone);
        app.update();
        assert_eq!(app.world().get::<Visibility>(hint), Some(&Visibility::Hidden));
        assert_eq!(
            app.world().get::<InteractionHint>(hint).and_then(|hint| hint.target),
            None
        );
    }

    #[test]
    fn missing_hint_is_skipped() {
        let mut app = App::new();
        app.init_resource::<ActiveZone>()
            .add_systems(Update, toggle_interaction_hint);
        app.update();
    }
}
