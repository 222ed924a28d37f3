//! Active-zone state and input bindings for the interaction controller.
use bevy::prelude::*;

use crate::scene::components::{CatId, StationNumber};

/// The zone currently eligible to receive the player's interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveZoneInfo {
    pub zone: Entity,
    pub cat_id: CatId,
    pub station: StationNumber,
}

/// Holds at most one active zone.
///
/// Written only by proximity transitions; the input handler only reads it.
#[derive(Resource, Debug, Default)]
pub struct ActiveZone {
    current: Option<ActiveZoneInfo>,
}

impl ActiveZone {
    pub fn get(&self) -> Option<&ActiveZoneInfo> {
        self.current.as_ref()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Makes `info` the active zone, returning whatever it replaced.
    pub fn set(&mut self, info: ActiveZoneInfo) -> Option<ActiveZoneInfo> {
        self.current.replace(info)
    }

    /// Clears the active zone only if it still points at `zone`.
    pub fn clear_if(&mut self, zone: Entity) -> bool {
        if self.current.as_ref().is_some_and(|info| info.zone == zone) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Raw inputs that map onto the single `interact` action.
#[derive(Resource, Debug, Clone)]
pub struct InteractionBindings {
    pub key: KeyCode,
    pub mouse_button: MouseButton,
    /// Clicks only count while the cursor is locked to the window.
    pub require_cursor_lock: bool,
}

impl Default for InteractionBindings {
    fn default() -> Self {
        Self {
            key: KeyCode::KeyE,
            mouse_button: MouseButton::Left,
            require_cursor_lock: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(world: &mut World, index: u32) -> ActiveZoneInfo {
        ActiveZoneInfo {
            zone: world.spawn_empty().id(),
            cat_id: CatId::new(format!("cat-{index}")),
            station: StationNumber::new(index),
        }
    }

    #[test]
    fn clear_only_when_still_pointing_at_zone() {
        let mut world = World::new();
        let mut active = ActiveZone::default();
        assert!(active.is_empty());

        let first = info(&mut world, 1);
        let second = info(&mut world, 2);

        assert_eq!(active.set(first.clone()), None);
        assert_eq!(active.set(second.clone()), Some(first.clone()));

        assert!(!active.clear_if(first.zone));
        assert_eq!(active.get(), Some(&second));

        assert!(active.clear_if(second.zone));
        assert!(active.is_empty());
    }
}
