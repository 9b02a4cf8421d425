//! Gesture Effects - hand gestures turned into particle bursts and captions
//!
//! Classifies hand detection boxes into a small set of gestures and drives a
//! frame-stepped particle and caption simulation that renders onto any
//! [`render::Surface`].

pub mod app;
pub mod config;
pub mod detection;
pub mod effects;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod render;
pub mod scheduler;

pub use app::App;
pub use config::EffectsConfig;
pub use detection::{Detection, HandDetector};
pub use engine::{EffectEngine, RunState};
pub use error::{EffectsError, Result};
pub use gesture::{Gesture, GestureClassifier};
