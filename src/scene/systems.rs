//! Systems for the scene module: environment, cat stations and the fly camera.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};

use crate::{
    effects::{glow::CatGlow, sound::CatSound, sparkle::SparkleEmitter},
    model::components::CatModel,
    proximity::components::ProximityZone,
    scene::{
        components::{CatStation, FlyCamera, PrimarySun},
        config::{CatSettings, SceneSettings},
    },
};

const GROUND_SCALE: f32 = 30.0;
const EYE_HEIGHT: f32 = 1.6;
const SPARKLE_OFFSET: Vec3 = Vec3::new(0.0, 0.6, 0.0);
const PITCH_LIMIT: f32 = 1.54;

/// Spawns ground, sun and the player's fly camera at the centre of the circle.
pub fn spawn_scene_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(120, 150, 110),
            perceptual_roughness: 0.95,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        Name::new("Ground"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    let camera_transform = Transform::from_xyz(0.0, EYE_HEIGHT, 0.0)
        .looking_at(Vec3::new(1.0, EYE_HEIGHT - 0.3, 0.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);

    commands.spawn((
        Camera3d::default(),
        camera_transform,
        FlyCamera::new(yaw, pitch),
        Name::new("Player Camera"),
    ));
}

/// Spawns one station per configured cat, each with its paired sparkle emitter.
pub fn spawn_cat_stations(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    asset_server: Res<AssetServer>,
) {
    for cat in &settings.cats {
        spawn_cat_station(&mut commands, &settings, &asset_server, cat);
    }
    info!("Spawned {} cat stations", settings.cats.len());
}

fn spawn_cat_station(
    commands: &mut Commands,
    settings: &SceneSettings,
    asset_server: &AssetServer,
    cat: &CatSettings,
) {
    let scene = cat
        .model
        .as_ref()
        .map(|path| asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone())));
    if cat.sound.is_none() {
        debug!("No sound configured for {}", cat.id);
    }
    let clip = cat
        .sound
        .as_ref()
        .map(|path| asset_server.load::<AudioSource>(path.clone()));

    let glow = CatGlow::new(cat.glow_color, settings.timing.glow_duration)
        .with_emissive_intensity(settings.glow.emissive_intensity)
        .with_light(settings.glow.light_intensity, settings.glow.light_range);

    // Face the centre of the circle.
    let facing = Vec3::new(0.0, cat.position.y, 0.0);
    let mut transform = Transform::from_translation(cat.position);
    if facing.distance_squared(cat.position) > f32::EPSILON {
        transform.look_at(facing, Vec3::Y);
    }

    commands
        .spawn((
            CatStation::new(cat.id.clone(), cat.station),
            ProximityZone::new(cat.radius, settings.timing.proximity_poll),
            CatModel::new(scene, cat.fallback_color),
            glow,
            CatSound::new(clip, cat.volume),
            transform,
            Visibility::default(),
            Name::new(cat.id.to_string()),
        ))
        .with_children(|parent| {
            parent.spawn((
                SparkleEmitter::new(cat.station, settings.timing.sparkle_duration),
                Transform::from_translation(SPARKLE_OFFSET),
                Visibility::default(),
                Name::new(cat.station.sparkle_name()),
            ));
        });
}

/// Locks the cursor on left click and releases it on Escape.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor_options) = cursor_query.single_mut() else {
        return;
    };

    if mouse_buttons.just_pressed(MouseButton::Left)
        && cursor_options.grab_mode != CursorGrabMode::Locked
    {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if keyboard.just_pressed(KeyCode::Escape) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look while the cursor is locked.
pub fn fly_camera_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    cursor_query: Query<&CursorOptions, With<PrimaryWindow>>,
    time: Res<Time>,
    mut query: Query<(&mut FlyCamera, &mut Transform)>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    let locked = cursor_query
        .single()
        .is_ok_and(|cursor| cursor.grab_mode == CursorGrabMode::Locked);
    if !locked || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut fly_cam, mut transform)) = query.single_mut() {
        let sensitivity = fly_cam.look_sensitivity * time.delta_secs();
        fly_cam.yaw -= cumulative_delta.x * sensitivity;
        fly_cam.pitch = (fly_cam.pitch - cumulative_delta.y * sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        transform.rotation = (Quat::from_axis_angle(Vec3::Y, fly_cam.yaw)
            * Quat::from_axis_angle(Vec3::X, fly_cam.pitch))
        .normalize();
    }
}

/// Walks the camera on the ground plane with WASD; eye height stays fixed.
pub fn fly_camera_translate(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&FlyCamera, &mut Transform)>,
) {
    let Ok((fly_cam, mut transform)) = query.single_mut() else {
        return;
    };

    let forward = {
        let f = transform.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = transform.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }

    if direction.length_squared() > 0.0 {
        let modifier = if keyboard.pressed(KeyCode::ShiftLeft) {
            2.0
        } else {
            1.0
        };
        transform.translation +=
            direction.normalize() * fly_cam.move_speed * modifier * time.delta_secs();
    }
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let forward = transform.forward().as_vec3();
    let yaw = (-forward.x).atan2(-forward.z);
    let pitch = forward.y.asin();
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_pitch_round_trips_through_rotation() {
        let transform = Transform::from_xyz(0.0, 1.6, 0.0)
            .looking_at(Vec3::new(3.0, 0.5, -2.0), Vec3::Y);
        let (yaw, pitch) = yaw_pitch_from_transform(&transform);

        let rotation = Quat::from_axis_angle(Vec3::Y, yaw) * Quat::from_axis_angle(Vec3::X, pitch);
        let rebuilt = rotation * Vec3::NEG_Z;
        let expected = transform.forward().as_vec3();
        assert!(rebuilt.abs_diff_eq(expected, 1e-4));
    }
}
