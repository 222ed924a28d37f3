//! Proximity zone state machine.
use std::time::Duration;

use bevy::prelude::*;

/// Which side of the trigger radius the camera was on at the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneState {
    #[default]
    Outside,
    Inside,
}

/// Edge produced when a poll crosses the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTransition {
    Entered,
    Left,
}

/// Circular trigger around a cat station, re-checked on a fixed interval.
#[derive(Component, Debug)]
pub struct ProximityZone {
    radius: f32,
    state: ZoneState,
    poll: Timer,
    last_distance: Option<f32>,
}

impl ProximityZone {
    pub fn new(radius: f32, poll_interval: Duration) -> Self {
        Self {
            radius,
            state: ZoneState::Outside,
            poll: Timer::new(poll_interval, TimerMode::Repeating),
            last_distance: None,
        }
    }

    #[cfg_attr(not(feature = "zone_debug"), allow(dead_code))]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    #[cfg_attr(not(any(test, feature = "zone_debug")), allow(dead_code))]
    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Advances the poll timer; returns true when a distance check is due.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.poll.tick(delta).just_finished()
    }

    /// Records a measured distance and reports the crossing, if any.
    ///
    /// Inside is `distance < radius`; `distance >= radius` is outside.
    pub fn observe(&mut self, distance: f32) -> Option<ZoneTransition> {
        self.last_distance = Some(distance);
        match self.state {
            ZoneState::Outside if distance < self.radius => {
                self.state = ZoneState::Inside;
                Some(ZoneTransition::Entered)
            }
            ZoneState::Inside if distance >= self.radius => {
                self.state = ZoneState::Outside;
                Some(ZoneTransition::Left)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(radius: f32) -> ProximityZone {
        ProximityZone::new(radius, Duration::from_millis(100))
    }

    #[test]
    fn transitions_fire_once_per_crossing() {
        let mut zone = zone(1.5);

        assert_eq!(zone.observe(2.0), None);
        assert_eq!(zone.observe(1.0), Some(ZoneTransition::Entered));
        assert_eq!(zone.observe(0.5), None);
        assert_eq!(zone.observe(1.4), None);
        assert_eq!(zone.state(), ZoneState::Inside);

        assert_eq!(zone.observe(2.0), Some(ZoneTransition::Left));
        assert_eq!(zone.observe(3.0), None);
        assert_eq!(zone.state(), ZoneState::Outside);
        assert_eq!(zone.last_distance(), Some(3.0));
    }

    #[test]
    fn distance_equal_to_radius_is_outside() {
        let mut zone = zone(1.5);
        assert_eq!(zone.observe(1.5), None);
        assert_eq!(zone.state(), ZoneState::Outside);

        assert_eq!(zone.observe(1.499), Some(ZoneTransition::Entered));
        assert_eq!(zone.observe(1.5), Some(ZoneTransition::Left));
    }

    #[test]
    fn poll_is_due_only_on_interval() {
        let mut zone = zone(1.0);
        assert!(!zone.tick(Duration::from_millis(60)));
        assert!(zone.tick(Duration::from_millis(40)));
        assert!(!zone.tick(Duration::from_millis(50)));
        assert!(zone.tick(Duration::from_millis(50)));
    }
}
