//! Explosion particles.

use glam::Vec3;

use crate::api::types::{ParticleId, VisualHandle};
use crate::extensions::Tween;
use crate::renderer::Transform;

/// A single glowing fragment flying outward from an impact.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec3,
    /// Outward radial velocity.
    pub velocity: Vec3,
    /// Simulation clock at creation.
    pub birth_time: f32,
    pub visual: VisualHandle,
    /// Displacement per tick as a fraction of `velocity`.
    pub step_scale: f32,
    decay: Tween,
}

impl Particle {
    pub fn new(
        id: ParticleId,
        position: Vec3,
        velocity: Vec3,
        lifetime: f32,
        step_scale: f32,
        birth_time: f32,
        visual: VisualHandle,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            birth_time,
            visual,
            step_scale,
            decay: Tween::clock(lifetime),
        }
    }

    /// Advance one tick. Returns false once the decay has completed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.position += self.velocity * self.step_scale;
        self.decay.advance(dt);
        !self.decay.is_complete()
    }

    /// Normalized decay progress [0, 1].
    pub fn progress(&self) -> f32 {
        self.decay.progress()
    }

    /// Fades out while shrinking to half size.
    pub fn transform(&self) -> Transform {
        let t = self.progress();
        Transform {
            position: self.position,
            rotation: Vec3::ZERO,
            scale: 1.0 - 0.5 * t,
            opacity: 1.0 - t,
        }
    }
}
