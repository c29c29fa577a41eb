//! Death animation of a struck asteroid.

use crate::core::asteroid::Asteroid;
use crate::extensions::{lerp, Tween};
use crate::renderer::Transform;

/// An `Exploding` asteroid swelling and fading out in place.
#[derive(Debug, Clone)]
pub struct Debris {
    pub asteroid: Asteroid,
    /// Scale reached at the end of the animation.
    pub end_scale: f32,
    clock: Tween,
}

impl Debris {
    pub fn new(asteroid: Asteroid, end_scale: f32, duration: f32) -> Self {
        debug_assert!(!asteroid.is_alive(), "debris from a live asteroid {:?}", asteroid.id);
        Self {
            asteroid,
            end_scale,
            clock: Tween::clock(duration),
        }
    }

    /// Advance the animation. Returns false once it has completed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.clock.advance(dt);
        !self.clock.is_complete()
    }

    pub fn transform(&self) -> Transform {
        let t = self.clock.progress();
        Transform {
            position: self.asteroid.position,
            rotation: self.asteroid.rotation,
            scale: lerp(1.0, self.end_scale, t),
            opacity: 1.0 - t,
        }
    }
}
