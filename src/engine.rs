//! Effect engine
//!
//! Owns the particle population and the caption, reacts to gestures by
//! seeding bursts, and advances/renders one frame per [`EffectEngine::step`].
//!
//! Gestures and frames arrive from two independently clocked loops on the
//! same thread; they only meet through the state held here.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::{CaptionConfig, EffectTable, EffectsConfig};
use crate::effects::particle_burst::resolve_color;
use crate::effects::{Caption, Particle, ParticleField};
use crate::gesture::Gesture;
use crate::render::Surface;
use crate::scheduler::RepeatingTask;

/// Render loop state machine: `Idle -> Running <-> Paused`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Never started, no render loop
    #[default]
    Idle,
    /// Render loop scheduled
    Running,
    /// Render loop stopped, animation state kept
    Paused,
}

/// Particle and caption simulation rendering onto a [`Surface`]
pub struct EffectEngine<S: Surface, R: Rng = ThreadRng> {
    /// What each gesture spawns
    effects: EffectTable,
    /// Caption timing and style
    caption_config: CaptionConfig,
    /// Live particles
    particles: ParticleField,
    /// Active caption
    caption: Caption,
    /// Render loop state
    run_state: RunState,
    /// Per-frame render task
    frame_task: RepeatingTask,
    /// Drawing target
    surface: S,
    /// Random source for spawn parameters and hues
    rng: R,
    /// Steps executed so far
    frame_count: u64,
}

impl<S: Surface> EffectEngine<S, ThreadRng> {
    /// Create an engine drawing with the thread-local random source
    pub fn new(config: &EffectsConfig, surface: S) -> Self {
        Self::with_rng(config, surface, rand::rng())
    }
}

impl<S: Surface, R: Rng> EffectEngine<S, R> {
    /// Create an engine with an explicit (e.g. seeded) random source
    pub fn with_rng(config: &EffectsConfig, surface: S, rng: R) -> Self {
        Self {
            effects: config.effects.clone(),
            caption_config: config.caption.clone(),
            particles: ParticleField::new(config.spawn.clone()),
            caption: Caption::default(),
            run_state: RunState::Idle,
            frame_task: RepeatingTask::new("render", config.timing.frame_interval_ms),
            surface,
            rng,
            frame_count: 0,
        }
    }

    /// React to a classified gesture. [`Gesture::None`] does nothing.
    pub fn on_gesture(&mut self, gesture: Gesture, now_ms: u64) {
        let Some(effect) = self.effects.for_gesture(gesture) else {
            return;
        };

        match &effect.caption {
            Some(text) => self.caption.show(text, now_ms),
            None => self.caption.clear(),
        }

        let color = resolve_color(&effect.color, &mut self.rng);
        let origin = self.surface.center();
        self.particles.spawn(&mut self.rng, effect.count, origin, color);

        log::debug!(
            "Gesture {}: spawned {} particles (total: {})",
            gesture,
            effect.count,
            self.particles.len()
        );
    }

    /// Advance the simulation one frame and render it
    pub fn step(&mut self, now_ms: u64) {
        self.particles.advance();

        self.surface.clear();
        self.particles.draw(&mut self.surface);
        self.caption.draw(
            &mut self.surface,
            &self.caption_config.style,
            now_ms,
            self.caption_config.duration_ms,
        );

        self.frame_count += 1;
    }

    /// Host frame callback. Steps if the render loop is scheduled and due.
    pub fn on_frame(&mut self, now_ms: u64) -> bool {
        if !self.frame_task.poll(now_ms) {
            return false;
        }
        self.step(now_ms);
        true
    }

    /// Start or stop the render loop. Starting twice keeps a single schedule.
    pub fn set_running(&mut self, running: bool) {
        match (self.run_state, running) {
            (RunState::Running, true) => {}
            (previous, true) => {
                self.frame_task.start();
                self.run_state = RunState::Running;
                if previous == RunState::Idle {
                    log::info!("Render loop started");
                } else {
                    log::info!("Render loop resumed");
                }
            }
            (RunState::Running, false) => {
                self.frame_task.cancel();
                self.run_state = RunState::Paused;
                log::info!("Render loop paused");
            }
            (_, false) => {}
        }
    }

    /// Clear particles and caption; the run state is untouched
    pub fn reset(&mut self) {
        self.particles.clear();
        self.caption.clear();
        log::info!("Effects reset");
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Live particles as raw instance data
    pub fn particle_bytes(&self) -> &[u8] {
        self.particles.as_bytes()
    }

    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    pub fn caption_visible(&self, now_ms: u64) -> bool {
        self.caption.is_visible(now_ms, self.caption_config.duration_ms)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access, e.g. to resize the surface between frames
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
