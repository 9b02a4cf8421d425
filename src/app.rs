//! Application shell
//!
//! Wires a hand detector, the gesture classifier and the effect engine into
//! one cooperative loop. The host calls [`App::tick`] on every display frame;
//! detection runs on its own slower cadence inside the same tick.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::EffectsConfig;
use crate::detection::HandDetector;
use crate::engine::EffectEngine;
use crate::gesture::{Gesture, GestureClassifier};
use crate::render::Surface;
use crate::scheduler::RepeatingTask;

/// What happened during one [`App::tick`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Gesture classified this tick, if a detection cycle ran
    pub gesture: Option<Gesture>,
    /// Whether a frame was stepped and rendered
    pub rendered: bool,
}

/// Rolling frame rate measurement
#[derive(Clone, Debug, Default)]
struct FrameCounter {
    frame_count: u64,
    frames_since_update: u64,
    last_update_ms: Option<u64>,
    fps: f64,
}

impl FrameCounter {
    fn record(&mut self, now_ms: u64) {
        self.frame_count += 1;
        self.frames_since_update += 1;

        let last = *self.last_update_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(last);
        if elapsed >= 1000 {
            self.fps = self.frames_since_update as f64 * 1000.0 / elapsed as f64;
            self.frames_since_update = 0;
            self.last_update_ms = Some(now_ms);
        }
    }
}

/// Gesture effects application
pub struct App<S: Surface, D: HandDetector, R: Rng = ThreadRng> {
    classifier: GestureClassifier,
    engine: EffectEngine<S, R>,
    detector: D,
    /// Detection cycle cadence
    detection_task: RepeatingTask,
    started: bool,
    /// Last classified gesture; `None` until the first cycle or after a reset
    last_gesture: Option<Gesture>,
    /// Human-readable status line
    status: String,
    frames: FrameCounter,
}

impl<S: Surface, D: HandDetector> App<S, D, ThreadRng> {
    pub fn new(config: &EffectsConfig, surface: S, detector: D) -> Self {
        Self::with_rng(config, surface, detector, rand::rng())
    }
}

impl<S: Surface, D: HandDetector, R: Rng> App<S, D, R> {
    pub fn with_rng(config: &EffectsConfig, surface: S, detector: D, rng: R) -> Self {
        Self {
            classifier: GestureClassifier::new(config.classifier.clone()),
            engine: EffectEngine::with_rng(config, surface, rng),
            detector,
            detection_task: RepeatingTask::new("detect", config.timing.detection_interval_ms),
            started: false,
            last_gesture: None,
            status: "Ready".to_string(),
            frames: FrameCounter::default(),
        }
    }

    /// Start detection and rendering. Returns `false` if already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.engine.set_running(true);
        self.detection_task.start();
        self.set_status("Show your hand!");
        true
    }

    /// Pause or resume rendering. Detection keeps running while paused.
    pub fn toggle_pause(&mut self) {
        if !self.started {
            return;
        }
        let running = !self.engine.is_running();
        self.engine.set_running(running);
        self.set_status(if running { "Resumed" } else { "Paused" });
    }

    /// Clear all effects and the gesture label
    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_gesture = None;
        self.set_status("Reset.");
    }

    /// One cooperative turn: a detection cycle if due, then a render frame if due
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.detection_task.poll(now_ms) {
            if let Some(detections) = self.detector.detect() {
                let (_, frame_height) = self.engine.surface().size();
                let gesture = self.classifier.classify(&detections, frame_height);
                if gesture != Gesture::None {
                    log::debug!("Detected gesture: {}", gesture);
                }
                self.engine.on_gesture(gesture, now_ms);
                self.last_gesture = Some(gesture);
                outcome.gesture = Some(gesture);
            }
        }

        if self.engine.on_frame(now_ms) {
            self.frames.record(now_ms);
            outcome.rendered = true;
        }

        outcome
    }

    /// Display label for the last gesture, e.g. `"Gesture: Fist"`
    pub fn gesture_label(&self) -> String {
        let name = self.last_gesture.map(|g| g.display_name()).unwrap_or("—");
        format!("Gesture: {}", name)
    }

    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn engine(&self) -> &EffectEngine<S, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EffectEngine<S, R> {
        &mut self.engine
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Frames rendered since start
    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count
    }

    /// Frames per second over the last full second
    pub fn fps(&self) -> f64 {
        self.frames.fps
    }

    fn set_status(&mut self, status: &str) {
        log::info!("{}", status);
        self.status = status.to_string();
    }
}
