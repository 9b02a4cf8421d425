//! Hand detection input
//!
//! The detector itself is an external collaborator; this module only defines
//! its output contract and a scripted implementation for replays.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EffectsError, Result};

/// One candidate hand box in surface pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Top-left x
    pub x: f32,
    /// Top-left y
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Confidence in [0, 1]
    pub score: f32,
}

impl Detection {
    pub fn new(x: f32, y: f32, width: f32, height: f32, score: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            score,
        }
    }

    /// Whether the box can be classified at all
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height, self.score]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Source of detections, polled once per detection cycle
pub trait HandDetector {
    /// Detections for the current video frame, or `None` while no frame is ready
    fn detect(&mut self) -> Option<Vec<Detection>>;
}

/// Replays a fixed sequence of detection cycles
#[derive(Debug, Clone, Default)]
pub struct ScriptedDetector {
    cycles: VecDeque<Vec<Detection>>,
}

impl ScriptedDetector {
    pub fn new(cycles: impl IntoIterator<Item = Vec<Detection>>) -> Self {
        Self {
            cycles: cycles.into_iter().collect(),
        }
    }

    /// Load a JSON array of detection lists, one list per cycle
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| EffectsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cycles: Vec<Vec<Detection>> =
            serde_json::from_str(&contents).map_err(|source| EffectsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded {} detection cycles from {:?}", cycles.len(), path);
        Ok(Self::new(cycles))
    }

    /// Cycles not yet consumed
    pub fn remaining(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cycles.is_empty()
    }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self) -> Option<Vec<Detection>> {
        self.cycles.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(Detection::new(0.0, 0.0, 10.0, 10.0, 0.9).is_well_formed());
        assert!(!Detection::new(0.0, 0.0, 10.0, 0.0, 0.9).is_well_formed());
        assert!(!Detection::new(0.0, 0.0, 0.0, 10.0, 0.9).is_well_formed());
        assert!(!Detection::new(f32::NAN, 0.0, 10.0, 10.0, 0.9).is_well_formed());
        assert!(!Detection::new(0.0, f32::INFINITY, 10.0, 10.0, 0.9).is_well_formed());
    }

    #[test]
    fn test_geometry() {
        let d = Detection::new(0.0, 0.0, 120.0, 50.0, 0.9);
        assert!((d.aspect() - 2.4).abs() < 1e-6);
        assert_eq!(d.area(), 6000.0);
    }

    #[test]
    fn test_scripted_detector_order() {
        let mut detector = ScriptedDetector::new(vec![
            vec![Detection::new(1.0, 2.0, 3.0, 4.0, 0.5)],
            vec![],
        ]);
        assert_eq!(detector.remaining(), 2);
        assert_eq!(detector.detect().map(|d| d.len()), Some(1));
        assert_eq!(detector.detect().map(|d| d.len()), Some(0));
        assert!(detector.detect().is_none());
        assert!(detector.is_exhausted());
    }

    #[test]
    fn test_scripted_detector_from_json() {
        let path = std::env::temp_dir().join(format!(
            "gesture-effects-script-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[[{"x": 10, "y": 20, "width": 120, "height": 50, "score": 0.9}], []]"#,
        )
        .unwrap();

        let mut detector = ScriptedDetector::load_from_file(&path).unwrap();
        let first = detector.detect().unwrap();
        assert_eq!(first[0], Detection::new(10.0, 20.0, 120.0, 50.0, 0.9));
        assert_eq!(detector.remaining(), 1);

        let _ = std::fs::remove_file(&path);
    }
}
