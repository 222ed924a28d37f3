//! Components shared by the scene, proximity and interaction modules.
use std::fmt;

use bevy::prelude::*;

/// Fly camera carried by the player; its position is what zones measure against.
#[derive(Component, Debug)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            move_speed: 3.0,
            look_sensitivity: 0.12,
        }
    }
}

/// Marker for the scene's directional light.
#[derive(Component, Default)]
pub struct PrimarySun;

/// Identifier of a cat, as written in the scene config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatId(String);

impl CatId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of the station a cat sits on. Pairs the cat with its sparkle emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationNumber(u32);

impl StationNumber {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Name of the sparkle emitter paired with this station.
    pub fn sparkle_name(self) -> String {
        format!("sparkles-{}", self.0)
    }
}

impl fmt::Display for StationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cat sitting on a numbered station.
#[derive(Component, Debug, Clone)]
pub struct CatStation {
    pub cat_id: CatId,
    pub station: StationNumber,
}

impl CatStation {
    pub fn new(cat_id: CatId, station: StationNumber) -> Self {
        Self { cat_id, station }
    }
}
