//! Celestial bodies the asteroids can hit.
//!
//! The registry is built once; its order is the collision test order, so the
//! first body listed wins when an asteroid overlaps several at once.

use glam::Vec3;

use crate::api::error::SimError;
use crate::api::types::Rgb;

/// Registry index constants for the default solar system.
pub const SUN: usize = 0;
pub const EARTH: usize = 1;
pub const MARS: usize = 2;

// ── Default scene ────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: u32 = 0xffaa00;

pub const EARTH_RADIUS: f32 = 1.0;
pub const EARTH_COLOR: u32 = 0x2233ff;
pub const EARTH_ORBIT_RADIUS: f32 = 15.0;
/// Seconds per revolution.
pub const EARTH_ORBIT_PERIOD: f32 = 8.0;

pub const MARS_RADIUS: f32 = 0.8;
pub const MARS_COLOR: u32 = 0xff4422;
pub const MARS_ORBIT_RADIUS: f32 = 25.0;
pub const MARS_ORBIT_PERIOD: f32 = 12.0;

/// The moon rides with Earth and is drawn only; asteroids pass through it.
pub const MOON_DISTANCE: f32 = 3.0;
pub const MOON_RADIUS: f32 = 0.3;
/// Earth's spin, which carries the moon around it (radians per second).
pub const EARTH_SPIN_RATE: f32 = 0.6;

/// A named body with a collision sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    /// World-space center. May be moved by an orbit driver between steps.
    pub position: Vec3,
    pub collision_radius: f32,
    /// Tints the explosion of an asteroid that hits this body.
    pub highlight_color: Rgb,
}

impl CelestialBody {
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        collision_radius: f32,
        highlight_color: Rgb,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            collision_radius,
            highlight_color,
        }
    }
}

/// Ordered, fixed set of bodies with one designated primary (the sun).
#[derive(Debug, Clone)]
pub struct CelestialRegistry {
    bodies: Vec<CelestialBody>,
    primary: usize,
}

impl CelestialRegistry {
    /// Build a registry. `primary` is the gravity source.
    pub fn new(bodies: Vec<CelestialBody>, primary: usize) -> Result<Self, SimError> {
        if primary >= bodies.len() {
            return Err(SimError::InvalidConfig(format!(
                "primary index {primary} out of range for {} bodies",
                bodies.len()
            )));
        }
        for body in &bodies {
            if !(body.collision_radius.is_finite() && body.collision_radius > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "body {} needs a positive collision radius, got {}",
                    body.name, body.collision_radius
                )));
            }
            if !body.position.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "body {} has a non-finite position",
                    body.name
                )));
            }
        }
        Ok(Self { bodies, primary })
    }

    /// Sun at the origin, Earth and Mars at the start of their orbits on +X.
    pub fn solar_system() -> Self {
        Self {
            bodies: vec![
                CelestialBody::new("Sol", Vec3::ZERO, SUN_RADIUS, Rgb::from_hex(SUN_COLOR)),
                CelestialBody::new(
                    "Tierra",
                    Vec3::new(EARTH_ORBIT_RADIUS, 0.0, 0.0),
                    EARTH_RADIUS,
                    Rgb::from_hex(EARTH_COLOR),
                ),
                CelestialBody::new(
                    "Marte",
                    Vec3::new(MARS_ORBIT_RADIUS, 0.0, 0.0),
                    MARS_RADIUS,
                    Rgb::from_hex(MARS_COLOR),
                ),
            ],
            primary: SUN,
        }
    }

    /// The gravity source.
    pub fn primary(&self) -> &CelestialBody {
        &self.bodies[self.primary]
    }

    pub fn primary_index(&self) -> usize {
        self.primary
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    /// Move a body. Only orbit drivers call this; the simulation reads positions.
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.position = position;
        }
    }

    /// Iterate bodies in registry (collision) order.
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for CelestialRegistry {
    fn default() -> Self {
        Self::solar_system()
    }
}
