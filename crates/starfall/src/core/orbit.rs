//! Circular orbits for registry bodies. Cosmetic motion, no physics.
//!
//! Angles advance linearly with elapsed time and wrap every period. The
//! simulation never writes body positions; this driver does, between steps.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::core::bodies::{self, CelestialRegistry};
use crate::extensions::{Easing, Tween, TweenLoop};

/// A body circling the origin in the XZ plane.
#[derive(Debug, Clone)]
pub struct CircularOrbit {
    /// Registry index of the orbiting body.
    pub body: usize,
    pub radius: f32,
    angle: Tween,
}

impl CircularOrbit {
    /// `period` is seconds per revolution.
    pub fn new(body: usize, radius: f32, period: f32) -> Self {
        Self {
            body,
            radius,
            angle: Tween::new(0.0, TAU, period, Easing::Linear).with_loop(TweenLoop::Loop),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle.value()
    }

    pub fn position(&self) -> Vec3 {
        let a = self.angle();
        Vec3::new(a.cos() * self.radius, 0.0, a.sin() * self.radius)
    }
}

/// A decorative satellite carried around its parent by the parent's spin.
#[derive(Debug, Clone)]
pub struct Satellite {
    pub parent: usize,
    pub distance: f32,
    pub radius: f32,
    /// Radians per second.
    pub spin_rate: f32,
    spin: f32,
}

impl Satellite {
    pub fn new(parent: usize, distance: f32, radius: f32, spin_rate: f32) -> Self {
        Self { parent, distance, radius, spin_rate, spin: 0.0 }
    }

    /// World position given the parent's position. Rotation is about +Y.
    pub fn position(&self, parent_position: Vec3) -> Vec3 {
        let (sin, cos) = self.spin.sin_cos();
        parent_position + Vec3::new(cos * self.distance, 0.0, -sin * self.distance)
    }
}

/// Moves orbiting bodies in a [`CelestialRegistry`].
#[derive(Debug, Clone, Default)]
pub struct OrbitDriver {
    orbits: Vec<CircularOrbit>,
    moon: Option<Satellite>,
    moon_position: Vec3,
}

impl OrbitDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earth and Mars orbits plus Earth's moon for the default solar system.
    pub fn solar_system() -> Self {
        let mut driver = Self::new()
            .with_orbit(CircularOrbit::new(
                bodies::EARTH,
                bodies::EARTH_ORBIT_RADIUS,
                bodies::EARTH_ORBIT_PERIOD,
            ))
            .with_orbit(CircularOrbit::new(
                bodies::MARS,
                bodies::MARS_ORBIT_RADIUS,
                bodies::MARS_ORBIT_PERIOD,
            ));
        driver.moon = Some(Satellite::new(
            bodies::EARTH,
            bodies::MOON_DISTANCE,
            bodies::MOON_RADIUS,
            bodies::EARTH_SPIN_RATE,
        ));
        driver
    }

    // -- Builder pattern --

    pub fn with_orbit(mut self, orbit: CircularOrbit) -> Self {
        self.orbits.push(orbit);
        self
    }

    /// Advance every orbit by `dt` seconds and write positions into `registry`.
    pub fn advance(&mut self, dt: f32, registry: &mut CelestialRegistry) {
        for orbit in &mut self.orbits {
            orbit.angle.advance(dt);
            registry.set_position(orbit.body, orbit.position());
        }
        if let Some(moon) = &mut self.moon {
            moon.spin = (moon.spin + moon.spin_rate * dt) % TAU;
            if let Some(parent) = registry.get(moon.parent) {
                self.moon_position = moon.position(parent.position);
            }
        }
    }

    /// Moon position and radius after the last `advance`, if there is a moon.
    pub fn moon(&self) -> Option<(Vec3, f32)> {
        self.moon.as_ref().map(|m| (self.moon_position, m.radius))
    }

    pub fn orbits(&self) -> &[CircularOrbit] {
        &self.orbits
    }
}
