//! Scene configuration: timings, effect tuning and the list of cat stations.
use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use serde::Deserialize;

use crate::scene::components::{CatId, StationNumber};

const CONFIG_PATH: &str = "config/cats.toml";
const CONFIG_PATH_ENV: &str = "CIRCLE_OF_CATS_CONFIG";

const DEFAULT_RADIUS: f32 = 1.8;
const MIN_RADIUS: f32 = 0.05;
const DEFAULT_VOLUME: f32 = 0.5;
const DEFAULT_CAT_COLOR: &str = "#ffffff";
const CIRCLE_RADIUS: f32 = 4.0;
const CAT_HEIGHT: f32 = 0.35;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawSceneConfig {
    #[serde(default)]
    timing: RawTiming,
    #[serde(default)]
    glow: RawGlow,
    #[serde(default)]
    sparkle: RawSparkle,
    #[serde(default)]
    hint: RawHint,
    #[serde(default)]
    cats: Vec<RawCat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTiming {
    time_scale: f32,
    proximity_poll_ms: u64,
    glow_ms: u64,
    sparkle_ms: u64,
}

impl Default for RawTiming {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            proximity_poll_ms: 100,
            glow_ms: 5_000,
            sparkle_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawGlow {
    emissive_intensity: f32,
    light_intensity: f32,
    light_range: f32,
}

impl Default for RawGlow {
    fn default() -> Self {
        Self {
            emissive_intensity: 0.6,
            light_intensity: 60_000.0,
            light_range: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSparkle {
    particles_per_second: f32,
    particle_lifetime_ms: u64,
    particle_speed: f32,
}

impl Default for RawSparkle {
    fn default() -> Self {
        Self {
            particles_per_second: 60.0,
            particle_lifetime_ms: 700,
            particle_speed: 1.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHint {
    vertical_offset: f32,
    font_size: f32,
    prompt: String,
}

impl Default for RawHint {
    fn default() -> Self {
        Self {
            vertical_offset: 1.0,
            font_size: 18.0,
            prompt: "Press E to pet".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawCat {
    id: String,
    #[serde(default)]
    station: Option<u32>,
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    radius: Option<f32>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    sound: Option<String>,
    #[serde(default)]
    volume: Option<f32>,
    #[serde(default)]
    fallback_color: Option<String>,
    #[serde(default)]
    glow_color: Option<String>,
}

/// Errors raised while reading the scene config from disk.
#[derive(Debug)]
pub enum SceneConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SceneConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SceneConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimingSettings {
    pub time_scale: f32,
    pub proximity_poll: Duration,
    pub glow_duration: Duration,
    pub sparkle_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct GlowSettings {
    pub emissive_intensity: f32,
    pub light_intensity: f32,
    pub light_range: f32,
}

#[derive(Debug, Clone)]
pub struct SparkleSettings {
    pub particles_per_second: f32,
    pub particle_lifetime: Duration,
    pub particle_speed: f32,
}

#[derive(Debug, Clone)]
pub struct HintSettings {
    pub vertical_offset: f32,
    pub font_size: f32,
    pub prompt: String,
}

/// One cat station as configured.
#[derive(Debug, Clone)]
pub struct CatSettings {
    pub id: CatId,
    pub station: StationNumber,
    pub position: Vec3,
    pub radius: f32,
    pub model: Option<String>,
    pub sound: Option<String>,
    pub volume: f32,
    pub fallback_color: Color,
    pub glow_color: Color,
}

/// Everything the scene reads from `config/cats.toml`.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub timing: TimingSettings,
    pub glow: GlowSettings,
    pub sparkle: SparkleSettings,
    pub hint: HintSettings,
    pub cats: Vec<CatSettings>,
}

impl SceneSettings {
    /// Loads the config named by `CIRCLE_OF_CATS_CONFIG` (or the default path),
    /// falling back to built-in defaults on any failure.
    pub fn load_or_default() -> Self {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_PATH));

        match Self::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{}. Falling back to defaults.", err);
                RawSceneConfig::default().into()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, SceneConfigError> {
        let data = fs::read_to_string(path).map_err(|source| SceneConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data).map_err(|message| SceneConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(data: &str) -> Result<Self, String> {
        toml::from_str::<RawSceneConfig>(data)
            .map(Self::from)
            .map_err(|err| err.to_string())
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        RawSceneConfig::default().into()
    }
}

impl From<RawSceneConfig> for SceneSettings {
    fn from(value: RawSceneConfig) -> Self {
        let timing = TimingSettings {
            time_scale: value.timing.time_scale.max(0.001),
            proximity_poll: Duration::from_millis(value.timing.proximity_poll_ms.max(1)),
            glow_duration: Duration::from_millis(value.timing.glow_ms),
            sparkle_duration: Duration::from_millis(value.timing.sparkle_ms),
        };

        let glow = GlowSettings {
            emissive_intensity: value.glow.emissive_intensity.max(0.0),
            light_intensity: value.glow.light_intensity.max(0.0),
            light_range: value.glow.light_range.max(0.0),
        };

        let sparkle = SparkleSettings {
            particles_per_second: value.sparkle.particles_per_second.max(0.0),
            particle_lifetime: Duration::from_millis(value.sparkle.particle_lifetime_ms.max(1)),
            particle_speed: value.sparkle.particle_speed.max(0.0),
        };

        let hint = HintSettings {
            vertical_offset: value.hint.vertical_offset,
            font_size: value.hint.font_size.max(1.0),
            prompt: value.hint.prompt.trim().to_string(),
        };

        let cats = if value.cats.is_empty() {
            default_cat_circle()
        } else {
            convert_cats(value.cats)
        };

        Self {
            timing,
            glow,
            sparkle,
            hint,
            cats,
        }
    }
}

fn convert_cats(raw: Vec<RawCat>) -> Vec<CatSettings> {
    let count = raw.len();
    let mut cats: Vec<CatSettings> = Vec::with_capacity(count);

    // Stations pair cats with their sparkle emitters, so they must be unique.
    // Explicit numbers are reserved up front; unnumbered cats take the next free one.
    let reserved: HashSet<u32> = raw.iter().filter_map(|cat| cat.station).collect();
    let mut taken: HashSet<u32> = HashSet::default();

    for (index, cat) in raw.into_iter().enumerate() {
        let id = cat.id.trim();
        if id.is_empty() {
            warn!("Skipping cat #{} with an empty id", index + 1);
            continue;
        }
        if cats.iter().any(|existing| existing.id.as_str() == id) {
            warn!("Skipping duplicate cat id '{}'", id);
            continue;
        }

        let station = match cat.station {
            Some(station) if taken.contains(&station) => {
                warn!("Skipping cat '{}': station {} is already taken", id, station);
                continue;
            }
            Some(station) => station,
            None => {
                let mut station = index as u32 + 1;
                while taken.contains(&station) || reserved.contains(&station) {
                    station += 1;
                }
                station
            }
        };
        taken.insert(station);

        let fallback_color = parse_color(
            cat.fallback_color.as_deref().unwrap_or(DEFAULT_CAT_COLOR),
            Color::WHITE,
        );
        let glow_color = cat
            .glow_color
            .as_deref()
            .map(|value| parse_color(value, fallback_color))
            .unwrap_or(fallback_color);

        cats.push(CatSettings {
            id: CatId::new(id),
            station: StationNumber::new(station),
            position: cat
                .position
                .map(Vec3::from_array)
                .unwrap_or_else(|| circle_position(index, count)),
            radius: cat.radius.unwrap_or(DEFAULT_RADIUS).max(MIN_RADIUS),
            model: non_empty(cat.model),
            sound: non_empty(cat.sound),
            volume: cat.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0),
            fallback_color,
            glow_color,
        });
    }

    cats
}

fn default_cat_circle() -> Vec<CatSettings> {
    const CATS: [(&str, &str); 6] = [
        ("mochi", "#f4a261"),
        ("tofu", "#f1faee"),
        ("pepper", "#3d3d3d"),
        ("biscuit", "#c68b59"),
        ("luna", "#a8dadc"),
        ("miso", "#e9c46a"),
    ];

    CATS.iter()
        .enumerate()
        .map(|(index, (id, color))| {
            let color = parse_color(color, Color::WHITE);
            CatSettings {
                id: CatId::new(*id),
                station: StationNumber::new(index as u32 + 1),
                position: circle_position(index, CATS.len()),
                radius: DEFAULT_RADIUS,
                model: None,
                sound: None,
                volume: DEFAULT_VOLUME,
                fallback_color: color,
                glow_color: color,
            }
        })
        .collect()
}

fn circle_position(index: usize, count: usize) -> Vec3 {
    let angle = std::f32::consts::TAU * index as f32 / count.max(1) as f32;
    Vec3::new(
        CIRCLE_RADIUS * angle.cos(),
        CAT_HEIGHT,
        CIRCLE_RADIUS * angle.sin(),
    )
}

fn parse_color(value: &str, fallback: Color) -> Color {
    match Srgba::hex(value.trim()) {
        Ok(color) => Color::Srgba(color),
        Err(err) => {
            warn!("Invalid colour '{}' ({:?}). Using fallback.", value, err);
            fallback
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
