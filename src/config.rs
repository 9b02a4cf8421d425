//! Configuration for the classifier, particle spawning and captions
//!
//! Defaults reproduce the tuned constants of the gesture page. Everything can be
//! overridden from a JSON file; missing fields fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EffectsError, Result};
use crate::gesture::Gesture;
use crate::render::TextStyle;

/// Thresholds used to map a detection box onto a gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Detections below this score are ignored
    pub min_confidence: f32,
    pub open_aspect_min: f32,
    pub open_area_min: f32,
    pub fist_aspect_max: f32,
    pub fist_area_max: f32,
    pub vsign_aspect_min: f32,
    /// Box top must lie above this fraction of the frame height
    pub vsign_top_fraction: f32,
    pub pinch_area_min: f32,
    /// Box top must lie below this fraction of the frame height
    pub pinch_bottom_fraction: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            open_aspect_min: 1.2,
            open_area_min: 5000.0,
            fist_aspect_max: 0.8,
            fist_area_max: 3000.0,
            vsign_aspect_min: 1.1,
            vsign_top_fraction: 0.3,
            pinch_area_min: 4000.0,
            pinch_bottom_fraction: 0.6,
        }
    }
}

/// Per-particle random ranges. Ranges are half-open `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Velocity components are drawn from `[-max_speed, max_speed)` px/frame
    pub max_speed: f32,
    /// Radius in pixels
    pub size: [f32; 2],
    /// Lifespan in frames
    pub lifespan: [f32; 2],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.5,
            size: [1.0, 5.0],
            lifespan: [40.0, 100.0],
        }
    }
}

/// How a burst picks its color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ParticleColor {
    /// A fresh random hue per burst at fixed saturation/lightness (0-1)
    RandomHue { saturation: f32, lightness: f32 },
    /// A fixed RGBA color
    Solid([f32; 4]),
}

/// What a single gesture does when it fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEffectConfig {
    /// Caption to show; `None` clears the active caption
    pub caption: Option<String>,
    /// Number of particles in the burst
    pub count: usize,
    pub color: ParticleColor,
}

/// Effect table, one entry per actionable gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTable {
    pub open: GestureEffectConfig,
    pub fist: GestureEffectConfig,
    pub vsign: GestureEffectConfig,
    pub pinch: GestureEffectConfig,
}

impl Default for EffectTable {
    fn default() -> Self {
        Self {
            open: GestureEffectConfig {
                caption: None,
                count: 250,
                color: ParticleColor::RandomHue {
                    saturation: 0.7,
                    lightness: 0.6,
                },
            },
            fist: GestureEffectConfig {
                caption: Some("SATURN RING".to_string()),
                count: 200,
                color: ParticleColor::Solid(rgb_hex(0x4FC3F7)),
            },
            vsign: GestureEffectConfig {
                caption: Some("I LOVE YOU".to_string()),
                count: 180,
                color: ParticleColor::Solid(rgb_hex(0xFFD700)),
            },
            pinch: GestureEffectConfig {
                caption: Some("KEEP IT 100".to_string()),
                count: 160,
                color: ParticleColor::Solid(rgb_hex(0xFF69B4)),
            },
        }
    }
}

impl EffectTable {
    /// Effect for a gesture, `None` for [`Gesture::None`]
    pub fn for_gesture(&self, gesture: Gesture) -> Option<&GestureEffectConfig> {
        match gesture {
            Gesture::None => None,
            Gesture::Open => Some(&self.open),
            Gesture::Fist => Some(&self.fist),
            Gesture::VSign => Some(&self.vsign),
            Gesture::Pinch => Some(&self.pinch),
        }
    }

    fn entries(&self) -> [(&'static str, &GestureEffectConfig); 4] {
        [
            ("open", &self.open),
            ("fist", &self.fist),
            ("vsign", &self.vsign),
            ("pinch", &self.pinch),
        ]
    }
}

/// Caption timing and text styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// How long a caption stays visible after it was set
    pub duration_ms: u64,
    pub style: TextStyle,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            style: TextStyle::default(),
        }
    }
}

/// Loop cadences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Interval between detection cycles
    pub detection_interval_ms: u64,
    /// Minimum interval between render steps; 0 steps on every host frame
    pub frame_interval_ms: u64,
    /// Frame rate of the simulated clock used by the replay harness
    pub target_fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            detection_interval_ms: 120,
            frame_interval_ms: 0,
            target_fps: 60,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub classifier: ClassifierConfig,
    pub spawn: SpawnConfig,
    pub effects: EffectTable,
    pub caption: CaptionConfig,
    pub timing: TimingConfig,
}

impl EffectsConfig {
    /// Load and validate a JSON configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| EffectsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| EffectsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded effects configuration from {:?}", path);
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| EffectsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check ranges and durations
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        if !(0.0..=1.0).contains(&c.min_confidence) {
            return Err(EffectsError::InvalidConfig(format!(
                "min_confidence must be within [0, 1], got {}",
                c.min_confidence
            )));
        }

        let s = &self.spawn;
        if !(2.0 * s.max_speed).is_finite() || s.max_speed < 0.0 {
            return Err(EffectsError::InvalidConfig(format!(
                "max_speed must be a non-negative number, got {}",
                s.max_speed
            )));
        }
        check_range("size", s.size)?;
        check_range("lifespan", s.lifespan)?;
        if s.size[0] <= 0.0 {
            return Err(EffectsError::InvalidConfig(
                "size must be strictly positive".to_string(),
            ));
        }
        if s.lifespan[0] <= 0.0 {
            return Err(EffectsError::InvalidConfig(
                "lifespan must be strictly positive".to_string(),
            ));
        }

        for (name, effect) in self.effects.entries() {
            if let ParticleColor::RandomHue { saturation, lightness } = effect.color {
                if !(0.0..=1.0).contains(&saturation) || !(0.0..=1.0).contains(&lightness) {
                    return Err(EffectsError::InvalidConfig(format!(
                        "{} color saturation/lightness must be within [0, 1]",
                        name
                    )));
                }
            }
        }

        if self.caption.duration_ms == 0 {
            return Err(EffectsError::InvalidConfig(
                "caption duration must be greater than zero".to_string(),
            ));
        }
        if self.timing.detection_interval_ms == 0 {
            return Err(EffectsError::InvalidConfig(
                "detection interval must be greater than zero".to_string(),
            ));
        }
        if self.timing.target_fps == 0 {
            return Err(EffectsError::InvalidConfig(
                "target_fps must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_range(name: &str, range: [f32; 2]) -> Result<()> {
    let [min, max] = range;
    if !(max - min).is_finite() || min >= max {
        return Err(EffectsError::InvalidConfig(format!(
            "{} range must satisfy min < max, got [{}, {}]",
            name, min, max
        )));
    }
    Ok(())
}

/// Convert `0xRRGGBB` into an opaque RGBA color
pub fn rgb_hex(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EffectsConfig::default();
        assert_eq!(config.classifier.min_confidence, 0.7);
        assert_eq!(config.effects.open.count, 250);
        assert_eq!(config.effects.fist.count, 200);
        assert_eq!(config.effects.vsign.count, 180);
        assert_eq!(config.effects.pinch.count, 160);
        assert_eq!(config.caption.duration_ms, 3000);
        assert_eq!(config.timing.detection_interval_ms, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effect_table_lookup() {
        let table = EffectTable::default();
        assert!(table.for_gesture(Gesture::None).is_none());
        assert_eq!(
            table.for_gesture(Gesture::Pinch).and_then(|e| e.caption.as_deref()),
            Some("KEEP IT 100")
        );
        assert!(table.for_gesture(Gesture::Open).unwrap().caption.is_none());
    }

    #[test]
    fn test_rgb_hex() {
        let c = rgb_hex(0xFFD700);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut config = EffectsConfig::default();
        config.spawn.lifespan = [100.0, 40.0];
        assert!(matches!(config.validate(), Err(EffectsError::InvalidConfig(_))));

        let mut config = EffectsConfig::default();
        config.classifier.min_confidence = 1.5;
        assert!(config.validate().is_err());

        let mut config = EffectsConfig::default();
        config.caption.duration_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsampleable_spawn() {
        let mut config = EffectsConfig::default();
        config.spawn.max_speed = 3.0e38;
        assert!(matches!(config.validate(), Err(EffectsError::InvalidConfig(_))));

        let mut config = EffectsConfig::default();
        config.spawn.lifespan = [-3.0e38, 3.0e38];
        assert!(config.validate().is_err());

        let mut config = EffectsConfig::default();
        config.spawn.size = [1.0, f32::INFINITY];
        assert!(config.validate().is_err());

        let mut config = EffectsConfig::default();
        config.spawn.lifespan = [-10.0, 50.0];
        assert!(config.validate().is_err());

        let mut config = EffectsConfig::default();
        config.spawn.lifespan = [0.0, 50.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EffectsConfig =
            serde_json::from_str(r#"{ "classifier": { "min_confidence": 0.5 } }"#).unwrap();
        assert_eq!(config.classifier.min_confidence, 0.5);
        assert_eq!(config.classifier.open_area_min, 5000.0);
        assert_eq!(config.spawn, SpawnConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "gesture-effects-config-{}.json",
            std::process::id()
        ));
        let mut config = EffectsConfig::default();
        config.effects.fist.count = 42;
        config.save_to_file(&path).unwrap();

        let loaded = EffectsConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.effects.fist.count, 42);
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = EffectsConfig::load_from_file("/nonexistent/gesture-effects.json");
        assert!(matches!(result, Err(EffectsError::Io { .. })));
    }
}
