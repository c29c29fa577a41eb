use serde::{Deserialize, Serialize};

use crate::api::error::SimError;

/// Tunable constants for the simulation, provided once at construction.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides:
///
/// ```text
/// { "capacity": 40, "escape_radius": 150.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Maximum number of live asteroids (default: 20).
    pub capacity: usize,
    /// Launch direction → initial velocity multiplier (default: 0.5).
    pub speed_scale: f32,
    /// Position advance multiplier applied to `velocity * dt` (default: 50).
    pub time_scale: f32,
    /// Inverse-square pull strength toward the sun (default: 0.0003).
    pub gravity_constant: f32,
    /// No pull is applied within this distance of the sun (default: 3).
    pub gravity_deadzone: f32,
    /// Asteroids farther than this from the origin are culled (default: 100).
    pub escape_radius: f32,
    /// Collision radius of every asteroid (default: 0.3).
    pub asteroid_radius: f32,
    /// Extra slack added to every collision test (default: 0.2).
    pub collision_margin: f32,
    /// Particles per explosion (default: 12).
    pub particle_count: usize,
    /// Particle decay duration in seconds (default: 0.8).
    pub particle_lifetime: f32,
    /// Particle displacement per tick as a fraction of its velocity (default: 0.05).
    pub particle_step_scale: f32,
    /// Particle speed range, min inclusive / max exclusive (default: 0.15..0.25).
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    /// Radius of a particle sphere (default: 0.15).
    pub particle_radius: f32,
    /// Death animation duration of a struck asteroid in seconds (default: 0.4).
    pub death_duration: f32,
    /// Final scale of an asteroid that hit the sun (default: 4).
    pub sun_death_scale: f32,
    /// Final scale of an asteroid that hit any other body (default: 2.5).
    pub body_death_scale: f32,
    /// Spawn scale-up duration in seconds (default: 0.3).
    pub spawn_duration: f32,
    /// Per-axis bound of the random spin, in radians per step (default: 0.05).
    pub spin_max: f32,
    /// How long an impact message stays before the count returns (default: 1.5).
    pub status_hold: f32,
    /// Seed for the effects RNG.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            speed_scale: 0.5,
            time_scale: 50.0,
            gravity_constant: 0.0003,
            gravity_deadzone: 3.0,
            escape_radius: 100.0,
            asteroid_radius: 0.3,
            collision_margin: 0.2,
            particle_count: 12,
            particle_lifetime: 0.8,
            particle_step_scale: 0.05,
            particle_speed_min: 0.15,
            particle_speed_max: 0.25,
            particle_radius: 0.15,
            death_duration: 0.4,
            sun_death_scale: 4.0,
            body_death_scale: 2.5,
            spawn_duration: 0.3,
            spin_max: 0.05,
            status_hold: 1.5,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the engine.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.capacity == 0 {
            return Err(SimError::InvalidConfig("capacity must be at least 1".into()));
        }
        let positive = [
            ("time_scale", self.time_scale),
            ("escape_radius", self.escape_radius),
            ("asteroid_radius", self.asteroid_radius),
            ("particle_lifetime", self.particle_lifetime),
            ("particle_radius", self.particle_radius),
            ("death_duration", self.death_duration),
            ("spawn_duration", self.spawn_duration),
            ("status_hold", self.status_hold),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("speed_scale", self.speed_scale),
            ("gravity_constant", self.gravity_constant),
            ("gravity_deadzone", self.gravity_deadzone),
            ("collision_margin", self.collision_margin),
            ("particle_step_scale", self.particle_step_scale),
            ("particle_speed_min", self.particle_speed_min),
            ("spin_max", self.spin_max),
            ("sun_death_scale", self.sun_death_scale),
            ("body_death_scale", self.body_death_scale),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        let max = self.particle_speed_max;
        if !(max.is_finite() && max >= self.particle_speed_min) {
            return Err(SimError::InvalidConfig(format!(
                "particle_speed_max ({}) must not be below particle_speed_min ({})",
                self.particle_speed_max, self.particle_speed_min
            )));
        }
        Ok(())
    }

    /// Minimum center distance at which an asteroid touches a body of `body_radius`.
    pub fn contact_distance(&self, body_radius: f32) -> f32 {
        self.asteroid_radius + body_radius + self.collision_margin
    }
}
