use std::collections::VecDeque;

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::error::SimError;
use crate::api::types::{AsteroidId, Rgb};
use crate::core::asteroid::{Asteroid, AsteroidState};
use crate::renderer::{GeometryKind, Material, Renderer, VisualOwner};
use crate::systems::effects::Rng;

/// Sphere segments for asteroid rocks.
const ASTEROID_SEGMENTS: u32 = 8;

/// Result of a successful spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub id: AsteroidId,
    /// The oldest asteroid, if it was evicted to respect the capacity.
    pub evicted: Option<AsteroidId>,
}

/// Live asteroids in launch order (oldest first), bounded by a fixed capacity.
///
/// Only `Alive` asteroids are stored. An asteroid leaves the store the moment
/// it explodes, escapes, or is evicted.
pub struct AsteroidStore {
    asteroids: VecDeque<Asteroid>,
    capacity: usize,
    speed_scale: f32,
    spin_max: f32,
    radius: f32,
    next_id: u32,
}

impl AsteroidStore {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            asteroids: VecDeque::with_capacity(config.capacity + 1),
            capacity: config.capacity,
            speed_scale: config.speed_scale,
            spin_max: config.spin_max,
            radius: config.asteroid_radius,
            next_id: 1,
        }
    }

    /// Launch a new asteroid from `origin` along `direction`.
    ///
    /// `direction` need not be normalized; its length times the speed scale
    /// is the initial speed. Creates the visual, then evicts the oldest
    /// asteroid if the store is over capacity.
    pub fn spawn(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        now: f32,
        rng: &mut Rng,
        renderer: &mut dyn Renderer,
    ) -> Result<Spawned, SimError> {
        if !origin.is_finite() || !direction.is_finite() {
            return Err(SimError::NonFiniteLaunch { origin, direction });
        }

        let id = AsteroidId(self.next_id);
        self.next_id += 1;

        let spin = self.spin_max;
        let angular_velocity = Vec3::new(
            rng.range(-spin, spin),
            rng.range(-spin, spin),
            rng.range(-spin, spin),
        );
        let color = Rgb::from_hex(rng.next_int(0x100_0000));
        let visual = renderer.create_visual(
            VisualOwner::Asteroid(id),
            GeometryKind::Sphere { radius: self.radius, segments: ASTEROID_SEGMENTS },
            Material::rock(color),
        );

        self.asteroids.push_back(Asteroid {
            id,
            position: origin,
            velocity: direction * self.speed_scale,
            angular_velocity,
            rotation: Vec3::ZERO,
            // Grown to full size by the spawn animation.
            scale: 0.0,
            state: AsteroidState::Alive,
            spawn_time: now,
            visual,
        });

        let oldest = if self.asteroids.len() > self.capacity {
            self.asteroids.pop_front()
        } else {
            None
        };
        let evicted = oldest.map(|oldest| {
            renderer.destroy_visual(oldest.visual);
            log::debug!("asteroid {:?} evicted (capacity {})", oldest.id, self.capacity);
            oldest.id
        });
        debug_assert!(self.asteroids.len() <= self.capacity);

        Ok(Spawned { id, evicted })
    }

    /// Remove every asteroid farther than `radius` from the origin and destroy
    /// its visual. Returns the removed ids, oldest first.
    pub fn cull_escaped(&mut self, radius: f32, renderer: &mut dyn Renderer) -> Vec<AsteroidId> {
        let mut escaped = Vec::new();
        self.asteroids.retain(|a| {
            if a.position.length() > radius {
                renderer.destroy_visual(a.visual);
                escaped.push(a.id);
                false
            } else {
                true
            }
        });
        for id in &escaped {
            log::debug!("asteroid {:?} escaped", id);
        }
        escaped
    }

    /// Remove an asteroid by ID, keeping launch order. Its visual is left to the caller.
    pub fn take(&mut self, id: AsteroidId) -> Option<Asteroid> {
        let idx = self.asteroids.iter().position(|a| a.id == id)?;
        self.asteroids.remove(idx)
    }

    /// Remove every asteroid and destroy their visuals.
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        for a in self.asteroids.drain(..) {
            renderer.destroy_visual(a.visual);
        }
    }

    pub fn get(&self, id: AsteroidId) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AsteroidId) -> Option<&mut Asteroid> {
        self.asteroids.iter_mut().find(|a| a.id == id)
    }

    /// Iterate in launch order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Asteroid> {
        self.asteroids.iter_mut()
    }

    /// The asteroid next in line for eviction.
    pub fn oldest(&self) -> Option<&Asteroid> {
        self.asteroids.front()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }
}
