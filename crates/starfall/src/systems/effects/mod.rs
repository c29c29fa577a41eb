//! Impact effects: particle bursts and the death animation of struck asteroids.
//!
//! `ExplosionController` owns every particle and every dying asteroid. Nothing
//! it holds takes part in physics or collision.

mod debris;
mod particle;
mod rng;

pub use debris::Debris;
pub use particle::Particle;
pub use rng::Rng;

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::{ExplosionEvent, ParticleId};
use crate::core::asteroid::Asteroid;
use crate::renderer::{GeometryKind, Material, Renderer, VisualOwner};

/// Sphere segments for particles.
const PARTICLE_SEGMENTS: u32 = 4;

/// Spawns, ages and retires explosion particles and debris.
#[derive(Debug)]
pub struct ExplosionController {
    particles: Vec<Particle>,
    debris: Vec<Debris>,
    next_particle: u32,
    particle_count: usize,
    particle_lifetime: f32,
    particle_step_scale: f32,
    particle_radius: f32,
    speed_range: (f32, f32),
    death_duration: f32,
    sun_death_scale: f32,
    body_death_scale: f32,
}

impl ExplosionController {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            particles: Vec::with_capacity(config.particle_count * 4),
            debris: Vec::new(),
            next_particle: 1,
            particle_count: config.particle_count,
            particle_lifetime: config.particle_lifetime,
            particle_step_scale: config.particle_step_scale,
            particle_radius: config.particle_radius,
            speed_range: (config.particle_speed_min, config.particle_speed_max),
            death_duration: config.death_duration,
            sun_death_scale: config.sun_death_scale,
            body_death_scale: config.body_death_scale,
        }
    }

    /// Start the burst for `event` and take over the struck asteroid's visual.
    ///
    /// Particles are spread evenly in azimuth with a random polar angle. New
    /// particles and debris are first aged by the following `tick`.
    pub fn trigger(
        &mut self,
        event: &ExplosionEvent,
        asteroid: Asteroid,
        now: f32,
        rng: &mut Rng,
        renderer: &mut dyn Renderer,
    ) {
        let n = self.particle_count;
        for i in 0..n {
            let theta = TAU * i as f32 / n as f32;
            let phi = (2.0 * rng.next_f32() - 1.0).acos();
            let speed = rng.range(self.speed_range.0, self.speed_range.1);
            let (sin_phi, cos_phi) = phi.sin_cos();
            let direction = Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi);
            let velocity = direction * speed;

            let id = ParticleId(self.next_particle);
            self.next_particle += 1;
            let visual = renderer.create_visual(
                VisualOwner::Particle(id),
                GeometryKind::Sphere { radius: self.particle_radius, segments: PARTICLE_SEGMENTS },
                Material::glow(event.color),
            );
            let particle = Particle::new(
                id,
                event.position,
                velocity,
                self.particle_lifetime,
                self.particle_step_scale,
                now,
                visual,
            );
            renderer.update_transform(visual, particle.transform());
            self.particles.push(particle);
        }

        let end_scale = if event.is_sun { self.sun_death_scale } else { self.body_death_scale };
        self.debris.push(Debris::new(asteroid, end_scale, self.death_duration));
    }

    /// Age every particle and dying asteroid by `dt`. Finished ones have their
    /// visuals destroyed; the rest get a fresh transform.
    pub fn tick(&mut self, dt: f32, renderer: &mut dyn Renderer) {
        self.particles.retain_mut(|p| {
            if p.tick(dt) {
                renderer.update_transform(p.visual, p.transform());
                true
            } else {
                renderer.destroy_visual(p.visual);
                false
            }
        });
        self.debris.retain_mut(|d| {
            if d.tick(dt) {
                renderer.update_transform(d.asteroid.visual, d.transform());
                true
            } else {
                renderer.destroy_visual(d.asteroid.visual);
                false
            }
        });
    }

    /// Drop everything without finishing it, destroying all visuals.
    pub fn abandon(&mut self, renderer: &mut dyn Renderer) {
        for p in self.particles.drain(..) {
            renderer.destroy_visual(p.visual);
        }
        for d in self.debris.drain(..) {
            renderer.destroy_visual(d.asteroid.visual);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn debris_count(&self) -> usize {
        self.debris.len()
    }

    /// True when no effect is in flight.
    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.debris.is_empty()
    }
}
