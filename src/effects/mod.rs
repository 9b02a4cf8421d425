//! Effects module
//!
//! Visual building blocks driven by the engine: particle bursts and the
//! timed caption.

pub mod caption;
pub mod particle_burst;

pub use caption::Caption;
pub use particle_burst::{Particle, ParticleField};
