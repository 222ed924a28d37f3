//! Helpers for driving headless apps in tests.
use std::time::Duration;

use bevy::prelude::*;

use crate::core::SceneClock;

/// Every message of type `M` seen so far.
#[derive(Resource)]
pub struct Collected<M: Message>(pub Vec<M>);

impl<M: Message> Default for Collected<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect_messages<M: Message + Clone>(
    mut reader: MessageReader<M>,
    mut collected: ResMut<Collected<M>>,
) {
    collected.0.extend(reader.read().cloned());
}

/// Registers `M` and records every instance in `Collected<M>` at the end of each frame.
pub fn track<M: Message + Clone>(app: &mut App) {
    app.add_message::<M>()
        .init_resource::<Collected<M>>()
        .add_systems(Last, collect_messages::<M>);
}

pub fn collected<M: Message>(app: &App) -> &[M] {
    &app.world().resource::<Collected<M>>().0
}

/// Advances the scene clock by `millis` and runs one frame.
pub fn advance(app: &mut App, millis: u64) {
    app.world_mut()
        .resource_mut::<SceneClock>()
        .tick(Duration::from_millis(millis));
    app.update();
}

/// Moves an entity in world space without running transform propagation.
pub fn place(app: &mut App, entity: Entity, position: Vec3) {
    let mut entity = app.world_mut().entity_mut(entity);
    entity.insert((
        Transform::from_translation(position),
        GlobalTransform::from_translation(position),
    ));
}
