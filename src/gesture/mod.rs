//! Gesture classification
//!
//! Maps the primary detection box of a cycle onto a gesture label using
//! box shape, size and vertical position. Classification is stateless: every
//! cycle is judged on its own.

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::detection::Detection;

/// Recognized gestures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    #[default]
    None,
    /// Wide, large box
    Open,
    /// Tall, small box
    Fist,
    /// Wide box near the top of the frame
    VSign,
    /// Large box near the bottom of the frame
    Pinch,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Open => "open",
            Self::Fist => "fist",
            Self::VSign => "vsign",
            Self::Pinch => "pinch",
        }
    }

    /// Label with the first letter capitalized, e.g. `"Vsign"`
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Open => "Open",
            Self::Fist => "Fist",
            Self::VSign => "Vsign",
            Self::Pinch => "Pinch",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-based classifier over detection boxes
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one detection cycle.
    ///
    /// Only the first detection is considered. Rules are checked in order and
    /// the first match wins; their ranges overlap, so the order matters.
    pub fn classify(&self, detections: &[Detection], frame_height: f32) -> Gesture {
        let Some(primary) = detections.first() else {
            return Gesture::None;
        };
        if !primary.is_well_formed() || primary.score < self.config.min_confidence {
            return Gesture::None;
        }

        let c = &self.config;
        let aspect = primary.aspect();
        let area = primary.area();

        if aspect > c.open_aspect_min && area > c.open_area_min {
            Gesture::Open
        } else if aspect < c.fist_aspect_max && area < c.fist_area_max {
            Gesture::Fist
        } else if aspect > c.vsign_aspect_min && primary.y < frame_height * c.vsign_top_fraction {
            Gesture::VSign
        } else if area > c.pinch_area_min && primary.y > frame_height * c.pinch_bottom_fraction {
            Gesture::Pinch
        } else {
            Gesture::None
        }
    }
}

/// Classify with the default thresholds
pub fn classify(detections: &[Detection], frame_height: f32) -> Gesture {
    GestureClassifier::default().classify(detections, frame_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_HEIGHT: f32 = 1000.0;

    fn boxed(y: f32, width: f32, height: f32) -> Vec<Detection> {
        vec![Detection::new(0.0, y, width, height, 0.9)]
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(classify(&[], FRAME_HEIGHT), Gesture::None);
        assert_eq!(classify(&[], 0.0), Gesture::None);
    }

    #[test]
    fn test_low_confidence_is_none() {
        let detections = vec![Detection::new(0.0, 500.0, 120.0, 50.0, 0.5)];
        assert_eq!(classify(&detections, FRAME_HEIGHT), Gesture::None);
    }

    #[test]
    fn test_confidence_floor_is_inclusive() {
        let detections = vec![Detection::new(0.0, 500.0, 120.0, 50.0, 0.7)];
        assert_eq!(classify(&detections, FRAME_HEIGHT), Gesture::Open);
    }

    #[test]
    fn test_open() {
        assert_eq!(classify(&boxed(500.0, 120.0, 50.0), FRAME_HEIGHT), Gesture::Open);
    }

    #[test]
    fn test_open_area_is_strict() {
        // area == 5000 misses rule 1; y in the middle band misses rules 3 and 4
        assert_eq!(classify(&boxed(500.0, 100.0, 50.0), FRAME_HEIGHT), Gesture::None);
    }

    #[test]
    fn test_fist() {
        assert_eq!(classify(&boxed(500.0, 40.0, 60.0), FRAME_HEIGHT), Gesture::Fist);
    }

    #[test]
    fn test_vsign() {
        // aspect 1.15, area 2645
        assert_eq!(classify(&boxed(100.0, 57.5, 50.0), FRAME_HEIGHT), Gesture::VSign);
    }

    #[test]
    fn test_pinch() {
        // square box, area 6400, low in the frame
        assert_eq!(classify(&boxed(700.0, 80.0, 80.0), FRAME_HEIGHT), Gesture::Pinch);
    }

    #[test]
    fn test_open_wins_over_vsign() {
        // Matches rule 1 and rule 3
        assert_eq!(classify(&boxed(10.0, 120.0, 50.0), FRAME_HEIGHT), Gesture::Open);
    }

    #[test]
    fn test_open_wins_over_pinch() {
        assert_eq!(classify(&boxed(900.0, 120.0, 50.0), FRAME_HEIGHT), Gesture::Open);
    }

    #[test]
    fn test_only_first_detection_counts() {
        let detections = vec![
            Detection::new(0.0, 500.0, 120.0, 50.0, 0.3),
            Detection::new(0.0, 500.0, 120.0, 50.0, 0.99),
        ];
        assert_eq!(classify(&detections, FRAME_HEIGHT), Gesture::None);
    }

    #[test]
    fn test_degenerate_boxes_are_none() {
        assert_eq!(classify(&boxed(500.0, 120.0, 0.0), FRAME_HEIGHT), Gesture::None);
        assert_eq!(classify(&boxed(f32::NAN, 120.0, 50.0), FRAME_HEIGHT), Gesture::None);
        let nan_score = vec![Detection::new(0.0, 500.0, 120.0, 50.0, f32::NAN)];
        assert_eq!(classify(&nan_score, FRAME_HEIGHT), Gesture::None);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = GestureClassifier::new(ClassifierConfig {
            min_confidence: 0.95,
            ..ClassifierConfig::default()
        });
        assert_eq!(classifier.classify(&boxed(500.0, 120.0, 50.0), FRAME_HEIGHT), Gesture::None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Gesture::VSign.as_str(), "vsign");
        assert_eq!(Gesture::VSign.display_name(), "Vsign");
        assert_eq!(Gesture::Open.to_string(), "open");
        assert_eq!(serde_json::to_string(&Gesture::Pinch).unwrap(), "\"pinch\"");
    }
}
