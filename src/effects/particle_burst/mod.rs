//! Particle bursts
//!
//! Particles are spawned in bursts at a single origin, fly in a straight
//! line at a constant per-frame velocity and fade out linearly over a
//! randomly drawn lifespan.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

use crate::config::{ParticleColor, SpawnConfig};
use crate::render::Surface;

/// A single particle (48 bytes, laid out for instance buffers)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in surface pixels
    pub pos: [f32; 2],
    /// Velocity in pixels per frame
    pub vel: [f32; 2],
    /// Radius in pixels
    pub size: f32,
    /// Frames elapsed since spawn
    pub age: u32,
    /// Frames the particle lives for
    pub lifespan: f32,
    pub _pad: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl Particle {
    /// Alive while `age <= lifespan`
    pub fn is_alive(&self) -> bool {
        self.age as f32 <= self.lifespan
    }

    /// Move one frame along the velocity and age by one frame.
    /// Returns whether the particle is still alive.
    pub fn advance(&mut self) -> bool {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        self.age = self.age.saturating_add(1);
        self.is_alive()
    }

    /// Opacity fading linearly from 1 at spawn to 0 at the end of life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / self.lifespan).clamp(0.0, 1.0)
    }
}

/// The live particle population
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    spawn: SpawnConfig,
}

impl ParticleField {
    pub fn new(spawn: SpawnConfig) -> Self {
        Self {
            particles: Vec::new(),
            spawn,
        }
    }

    /// Spawn `count` particles at `origin`, all sharing `color`
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
        origin: [f32; 2],
        color: [f32; 4],
    ) {
        self.particles.reserve(count);
        let speed = self.spawn.max_speed;
        for _ in 0..count {
            let particle = Particle {
                pos: origin,
                vel: [
                    sample(rng, [-speed, speed]),
                    sample(rng, [-speed, speed]),
                ],
                size: sample(rng, self.spawn.size),
                age: 0,
                lifespan: sample(rng, self.spawn.lifespan),
                _pad: 0.0,
                color,
            };
            self.particles.push(particle);
        }
    }

    /// Advance every particle one frame and drop the ones that died.
    /// Returns how many were removed.
    pub fn advance(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| p.advance());
        before - self.particles.len()
    }

    /// Draw all live particles
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, p.color, p.alpha());
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Raw bytes of the population for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Pick the RGBA color for a burst
pub fn resolve_color<R: Rng>(color: &ParticleColor, rng: &mut R) -> [f32; 4] {
    match *color {
        ParticleColor::Solid(rgba) => rgba,
        ParticleColor::RandomHue {
            saturation,
            lightness,
        } => {
            let hue = rng.random_range(0.0..1.0);
            let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
            [r, g, b, 1.0]
        }
    }
}

/// Uniform draw from `[min, max)`; collapses to `min` for empty ranges
fn sample<R: Rng>(rng: &mut R, range: [f32; 2]) -> f32 {
    let [min, max] = range;
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Convert HSL to RGB (all components in 0-1)
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}
