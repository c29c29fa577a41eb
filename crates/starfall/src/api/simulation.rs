use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::error::SimError;
use crate::api::types::{AsteroidId, ExplosionEvent};
use crate::core::bodies::CelestialRegistry;
use crate::core::store::AsteroidStore;
use crate::extensions::{Easing, Tween, TweenState};
use crate::renderer::{Renderer, StatusSink};
use crate::systems::collision::detect_and_resolve;
use crate::systems::effects::{ExplosionController, Rng};
use crate::systems::physics::integrate;
use crate::systems::status::{count_message, impact_message, StatusLine};

/// What happened during one [`Simulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Impacts resolved this step, in launch order.
    pub explosions: Vec<ExplosionEvent>,
    /// Asteroids culled for leaving the escape radius.
    pub escaped: Vec<AsteroidId>,
    /// Live asteroids after the step.
    pub live_count: usize,
}

/// The whole simulation: one explicit context object, no globals.
///
/// Drives the store, physics, collisions and effects, and talks outward only
/// through the [`Renderer`] and [`StatusSink`] it owns. Body positions are
/// read every step and may be moved between steps via [`Simulation::bodies_mut`].
pub struct Simulation<R: Renderer, S: StatusSink> {
    config: SimConfig,
    bodies: CelestialRegistry,
    store: AsteroidStore,
    tweens: TweenState,
    effects: ExplosionController,
    status_line: StatusLine,
    rng: Rng,
    clock: f32,
    renderer: R,
    status: S,
    /// Count last written to the status sink.
    last_reported: usize,
}

impl<R: Renderer, S: StatusSink> Simulation<R, S> {
    /// Build a simulation after validating `config`. Writes the initial count.
    pub fn new(
        config: SimConfig,
        bodies: CelestialRegistry,
        renderer: R,
        status: S,
    ) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::build(config, bodies, renderer, status))
    }

    /// Default constants and the default solar system.
    pub fn with_defaults(renderer: R, status: S) -> Self {
        Self::build(SimConfig::default(), CelestialRegistry::solar_system(), renderer, status)
    }

    fn build(config: SimConfig, bodies: CelestialRegistry, renderer: R, mut status: S) -> Self {
        log::info!(
            "simulation: {} bodies, capacity {}, escape radius {}, seed {}",
            bodies.len(),
            config.capacity,
            config.escape_radius,
            config.seed
        );
        status.set_status(&count_message(0));
        Self {
            store: AsteroidStore::from_config(&config),
            tweens: TweenState::new(),
            effects: ExplosionController::from_config(&config),
            status_line: StatusLine::new(config.status_hold),
            rng: Rng::new(config.seed),
            clock: 0.0,
            renderer,
            status,
            last_reported: 0,
            bodies,
            config,
        }
    }

    /// Launch an asteroid from `origin` along `direction`.
    ///
    /// Evicts the oldest asteroid when the store is full and writes the new
    /// count to the status sink. Non-finite input is rejected and nothing is created.
    pub fn launch(&mut self, origin: Vec3, direction: Vec3) -> Result<AsteroidId, SimError> {
        let spawned =
            self.store.spawn(origin, direction, self.clock, &mut self.rng, &mut self.renderer);
        let spawned = match spawned {
            Ok(spawned) => spawned,
            Err(e) => {
                log::warn!("launch rejected: {e}");
                return Err(e);
            }
        };
        if let Some(evicted) = spawned.evicted {
            self.tweens.remove_target(evicted);
        }
        let grow = Tween::new(0.0, 1.0, self.config.spawn_duration, Easing::BackOut);
        self.tweens.add(spawned.id, grow);
        if let Some(asteroid) = self.store.get(spawned.id) {
            self.renderer.update_transform(asteroid.visual, asteroid.transform());
        }
        self.report_count();
        Ok(spawned.id)
    }

    /// Advance the simulation by `dt` seconds of frame time.
    ///
    /// Order: decays and status hold, collisions, integration, escape culling,
    /// transform sync, status. `dt` is used as given; a long frame is one big step.
    pub fn step(&mut self, dt: f32) -> StepReport {
        debug_assert!(dt.is_finite() && dt >= 0.0, "bad dt {dt}");
        self.clock += dt;

        // ── Timed decays ─────────────────────────────────────────────────
        self.effects.tick(dt, &mut self.renderer);
        self.tweens.tick(dt, &mut self.store);
        if self.status_line.tick(dt) {
            self.report_count();
        }

        // ── Collisions ───────────────────────────────────────────────────
        let collisions = detect_and_resolve(&mut self.store, &self.bodies, &self.config);
        let mut explosions = Vec::with_capacity(collisions.len());
        for collision in collisions {
            let event = collision.event;
            self.tweens.remove_target(event.asteroid);
            self.effects
                .trigger(&event, collision.asteroid, self.clock, &mut self.rng, &mut self.renderer);
            if let Some(body) = self.bodies.get(event.body) {
                self.status.set_status(&impact_message(&body.name));
            }
            self.status_line.hold();
            explosions.push(event);
        }

        // ── Integration ──────────────────────────────────────────────────
        let attractor = self.bodies.primary().position;
        for asteroid in self.store.iter_mut() {
            integrate(asteroid, dt, attractor, &self.config);
        }

        // ── Escape ───────────────────────────────────────────────────────
        let escaped = self.store.cull_escaped(self.config.escape_radius, &mut self.renderer);
        for id in &escaped {
            self.tweens.remove_target(*id);
        }

        for asteroid in self.store.iter() {
            self.renderer.update_transform(asteroid.visual, asteroid.transform());
        }

        let live_count = self.store.len();
        if live_count != self.last_reported && !self.status_line.is_holding() {
            self.report_count();
        }

        StepReport { explosions, escaped, live_count }
    }

    /// Abandon every pending decay, destroy every visual, and hand back the collaborators.
    pub fn teardown(mut self) -> (R, S) {
        self.store.clear(&mut self.renderer);
        self.effects.abandon(&mut self.renderer);
        self.tweens.clear();
        self.status_line.cancel();
        log::info!("simulation torn down at t={:.2}s", self.clock);
        (self.renderer, self.status)
    }

    fn report_count(&mut self) {
        self.last_reported = self.store.len();
        self.status.set_status(&count_message(self.last_reported));
    }

    // -- Accessors --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &CelestialRegistry {
        &self.bodies
    }

    /// Bodies may be moved (e.g. by an orbit driver) between steps.
    pub fn bodies_mut(&mut self) -> &mut CelestialRegistry {
        &mut self.bodies
    }

    pub fn store(&self) -> &AsteroidStore {
        &self.store
    }

    pub fn effects(&self) -> &ExplosionController {
        &self.effects
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn live_count(&self) -> usize {
        self.store.len()
    }

    /// Simulated seconds since construction.
    pub fn clock(&self) -> f32 {
        self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgb;
    use crate::core::bodies::{CelestialBody, SUN};
    use crate::renderer::CommandBuffer;

    type TestSim = Simulation<CommandBuffer, Vec<String>>;

    fn sim() -> TestSim {
        Simulation::with_defaults(CommandBuffer::new(), Vec::new())
    }

    fn last_status(sim: &TestSim) -> &str {
        sim.status().last().map(String::as_str).unwrap_or("")
    }

    #[test]
    fn launch_toward_sun_explodes_on_fifth_step() {
        let mut sim = sim();
        let id = sim.launch(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();

        let mut hit = None;
        for step in 1..=10 {
            let report = sim.step(1.0 / 60.0);
            if let Some(event) = report.explosions.first() {
                hit = Some((step, *event));
                break;
            }
        }

        let (step, event) = hit.expect("asteroid should hit the sun");
        assert_eq!(step, 5);
        assert_eq!(event.asteroid, id);
        assert!(event.is_sun);
        assert_eq!(event.body, SUN);
        assert_eq!(event.color, Rgb::from_hex(0xffaa00));
        assert!((event.position.z - 3.333).abs() < 0.01, "z = {}", event.position.z);
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.effects().particle_count(), 12);
        assert_eq!(last_status(&sim), "Impact on Sol!");
    }

    #[test]
    fn exploding_asteroid_does_not_move() {
        let mut sim = sim();
        sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let report = sim.step(1.0 / 60.0);
        assert_eq!(report.explosions.len(), 1);
        let frozen = sim.effects().debris()[0].asteroid.position;

        for _ in 0..10 {
            let report = sim.step(0.01);
            assert!(report.explosions.is_empty(), "an asteroid explodes at most once");
            if let Some(d) = sim.effects().debris().first() {
                assert_eq!(d.asteroid.position, frozen);
            }
        }
    }

    #[test]
    fn particles_gone_after_lifetime_at_any_frame_rate() {
        for (dt, steps) in [(0.8, 1), (0.1, 8), (0.05, 16), (1.0 / 30.0, 24), (1.0 / 60.0, 48)] {
            let mut sim = sim();
            sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::ZERO).unwrap();
            let report = sim.step(dt);
            assert_eq!(report.explosions.len(), 1);
            assert_eq!(sim.effects().particle_count(), 12);

            for i in 1..=steps {
                sim.step(dt);
                if (i as f32) * dt < 0.7 {
                    assert_eq!(sim.effects().particle_count(), 12, "dt = {dt}, step {i}");
                }
            }
            assert_eq!(sim.effects().particle_count(), 0, "dt = {dt}");
            assert!(sim.effects().is_idle());
            assert_eq!(sim.renderer().live_count(), 0, "dt = {dt}");
        }
    }

    #[test]
    fn escape_culls_without_explosion() {
        let mut sim = sim();
        let far = sim.launch(Vec3::new(101.0, 0.0, 0.0), Vec3::ZERO).unwrap();
        let edge = sim.launch(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO).unwrap();

        let report = sim.step(1.0 / 60.0);
        assert_eq!(report.escaped, vec![far]);
        assert!(report.explosions.is_empty());
        assert!(sim.effects().is_idle());
        assert!(sim.store().get(edge).is_some(), "exactly 100 is not an escape");
        assert_eq!(report.live_count, 1);
        assert_eq!(last_status(&sim), "Asteroids: 1");
    }

    #[test]
    fn capacity_keeps_newest_twenty() {
        let mut sim = sim();
        let ids: Vec<_> = (0..21)
            .map(|i| sim.launch(Vec3::new(0.0, 50.0, i as f32), Vec3::ZERO).unwrap())
            .collect();
        assert_eq!(sim.live_count(), 20);
        assert!(sim.store().get(ids[0]).is_none());
        assert_eq!(sim.store().oldest().map(|a| a.id), Some(ids[1]));
        assert_eq!(sim.renderer().live_count(), 20);
        assert_eq!(last_status(&sim), "Asteroids: 20");
    }

    #[test]
    fn non_finite_launch_creates_nothing() {
        let mut sim = sim();
        let before = sim.status().len();
        let err = sim.launch(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X).unwrap_err();
        assert!(matches!(err, SimError::NonFiniteLaunch { .. }));
        assert_eq!(sim.live_count(), 0);
        assert!(sim.renderer().commands().is_empty());
        assert_eq!(sim.status().len(), before);
    }

    #[test]
    fn spawn_animation_grows_to_full_size() {
        let mut sim = sim();
        let id = sim.launch(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO).unwrap();
        assert_eq!(sim.store().get(id).unwrap().scale, 0.0);

        sim.step(0.15);
        let mid = sim.store().get(id).unwrap().scale;
        assert!(mid > 0.0 && mid < 1.2, "mid = {mid}");

        sim.step(0.15);
        let end = sim.store().get(id).unwrap().scale;
        assert!((end - 1.0).abs() < 1e-5, "end = {end}");
        let visual = sim.store().get(id).unwrap().visual;
        assert!((sim.renderer().last_transform(visual).unwrap().scale - 1.0).abs() < 1e-5);
    }

    #[test]
    fn impact_message_holds_then_count_returns() {
        let mut sim = sim();
        assert_eq!(last_status(&sim), "Asteroids: 0");
        sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::ZERO).unwrap();
        assert_eq!(last_status(&sim), "Asteroids: 1");

        sim.step(0.1);
        assert_eq!(last_status(&sim), "Impact on Sol!");

        for _ in 0..14 {
            sim.step(0.1);
            assert_eq!(last_status(&sim), "Impact on Sol!");
        }
        sim.step(0.1);
        assert_eq!(last_status(&sim), "Asteroids: 0");
    }

    #[test]
    fn earlier_impact_timer_restores_count_during_later_hold() {
        let mut sim = sim();
        sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::ZERO).unwrap();
        sim.step(0.1);
        for _ in 0..10 {
            sim.step(0.1);
        }
        assert_eq!(last_status(&sim), "Impact on Sol!");

        sim.launch(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO).unwrap();
        sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::ZERO).unwrap();
        let report = sim.step(0.1);
        assert_eq!(report.explosions.len(), 1);
        assert_eq!(last_status(&sim), "Impact on Sol!");

        for _ in 0..3 {
            sim.step(0.1);
            assert_eq!(last_status(&sim), "Impact on Sol!");
        }
        // The first impact's 1.5 s run out here, 0.4 s into the second hold.
        sim.step(0.1);
        assert_eq!(last_status(&sim), "Asteroids: 1");

        let written = sim.status().len();
        for _ in 0..11 {
            sim.step(0.1);
        }
        assert_eq!(sim.status().len(), written + 1, "second timer rewrites the count");
        assert_eq!(last_status(&sim), "Asteroids: 1");
    }

    #[test]
    fn moved_body_is_hit_where_it_is() {
        let mut sim = sim();
        sim.bodies_mut().set_position(1, Vec3::new(0.0, 0.0, 15.0));
        sim.launch(Vec3::new(0.0, 0.0, 15.5), Vec3::ZERO).unwrap();
        let report = sim.step(1.0 / 60.0);
        assert_eq!(report.explosions.len(), 1);
        assert_eq!(report.explosions[0].body, 1);
        assert!(!report.explosions[0].is_sun);
        assert_eq!(last_status(&sim), "Impact on Tierra!");
    }

    #[test]
    fn teardown_destroys_every_visual() {
        let mut sim = sim();
        sim.launch(Vec3::new(0.0, 0.0, 3.2), Vec3::ZERO).unwrap();
        sim.launch(Vec3::new(0.0, 40.0, 0.0), Vec3::X).unwrap();
        sim.step(0.1);
        sim.launch(Vec3::new(40.0, 0.0, 0.0), Vec3::Y).unwrap();
        assert!(sim.renderer().live_count() > 2);

        let (renderer, _status) = sim.teardown();
        assert_eq!(renderer.live_count(), 0);
    }

    #[test]
    fn custom_registry_and_config() {
        let bodies = CelestialRegistry::new(
            vec![CelestialBody::new("Star", Vec3::ZERO, 1.0, Rgb::WHITE)],
            0,
        )
        .unwrap();
        let config = SimConfig { capacity: 2, ..SimConfig::default() };
        let mut sim = Simulation::new(config, bodies, CommandBuffer::new(), String::new()).unwrap();
        for _ in 0..3 {
            sim.launch(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO).unwrap();
        }
        assert_eq!(sim.live_count(), 2);
        assert_eq!(sim.status(), "Asteroids: 2");

        let bad = SimConfig { escape_radius: -1.0, ..SimConfig::default() };
        let bodies = CelestialRegistry::solar_system();
        let rejected = Simulation::new(bad, bodies, CommandBuffer::new(), String::new());
        assert!(rejected.is_err());
    }
}
