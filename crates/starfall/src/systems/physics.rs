//! Explicit Euler integration with a single inverse-square attractor.

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::core::asteroid::Asteroid;

/// Velocity change pulling a body at `position` toward `attractor`.
///
/// `constant / d²` along the unit vector to the attractor. Zero when the
/// distance is at or inside `deadzone`, which keeps the pull finite near the center.
pub fn gravity_pull(position: Vec3, attractor: Vec3, constant: f32, deadzone: f32) -> Vec3 {
    let to_attractor = attractor - position;
    let d = to_attractor.length();
    if d > deadzone {
        to_attractor / d * (constant / (d * d))
    } else {
        Vec3::ZERO
    }
}

/// Advance one asteroid by `dt` seconds.
///
/// Position moves first with the old velocity, then the pull is evaluated
/// at the new position. Spin accumulates once per call, independent of `dt`.
/// Exploding asteroids are left untouched.
pub fn integrate(asteroid: &mut Asteroid, dt: f32, attractor: Vec3, config: &SimConfig) {
    if !asteroid.is_alive() {
        return;
    }
    asteroid.position += asteroid.velocity * dt * config.time_scale;
    asteroid.rotation += asteroid.angular_velocity;
    asteroid.velocity += gravity_pull(
        asteroid.position,
        attractor,
        config.gravity_constant,
        config.gravity_deadzone,
    );
}
