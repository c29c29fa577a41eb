//! Sphere-vs-sphere contact between live asteroids and celestial bodies.

use crate::api::config::SimConfig;
use crate::api::types::{AsteroidId, ExplosionEvent};
use crate::core::asteroid::Asteroid;
use crate::core::bodies::CelestialRegistry;
use crate::core::store::AsteroidStore;

/// An asteroid pulled out of the store by an impact, with the event describing it.
#[derive(Debug, Clone)]
pub struct Collision {
    /// Already `Exploding`. Its visual is still live.
    pub asteroid: Asteroid,
    pub event: ExplosionEvent,
}

/// Registry index of the first body `asteroid` touches, if any.
///
/// Contact is strict: `distance < asteroid_radius + body_radius + margin`.
/// Bodies are tested in registry order and the first hit wins, even when a
/// later body is nearer.
pub fn first_contact(
    asteroid: &Asteroid,
    bodies: &CelestialRegistry,
    config: &SimConfig,
) -> Option<usize> {
    bodies.iter().position(|body| {
        asteroid.position.distance(body.position) < config.contact_distance(body.collision_radius)
    })
}

/// Find every live asteroid touching a body and move it out of the store.
///
/// Each colliding asteroid is resolved exactly once: it is marked
/// `Exploding`, removed from `store`, and returned with its event. Launch
/// order is preserved in the result.
pub fn detect_and_resolve(
    store: &mut AsteroidStore,
    bodies: &CelestialRegistry,
    config: &SimConfig,
) -> Vec<Collision> {
    let hits: Vec<(AsteroidId, usize)> = store
        .iter()
        .filter(|a| a.is_alive())
        .filter_map(|a| first_contact(a, bodies, config).map(|body| (a.id, body)))
        .collect();

    let primary = bodies.primary_index();
    let mut collisions = Vec::with_capacity(hits.len());
    for (id, index) in hits {
        let (Some(mut asteroid), Some(body)) = (store.take(id), bodies.get(index)) else {
            continue;
        };
        asteroid.mark_exploding();
        let event = ExplosionEvent {
            asteroid: id,
            position: asteroid.position,
            color: body.highlight_color,
            body: index,
            is_sun: index == primary,
        };
        log::debug!("asteroid {:?} hit {} at {}", id, body.name, asteroid.position);
        collisions.push(Collision { asteroid, event });
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgb;
    use crate::core::asteroid::AsteroidState;
    use crate::core::bodies::{CelestialBody, EARTH, MARS, SUN};
    use crate::renderer::CommandBuffer;
    use crate::systems::effects::Rng;
    use glam::Vec3;

    fn spawn_at(
        store: &mut AsteroidStore,
        position: Vec3,
        renderer: &mut CommandBuffer,
    ) -> AsteroidId {
        let mut rng = Rng::new(1);
        store.spawn(position, Vec3::ZERO, 0.0, &mut rng, renderer).unwrap().id
    }

    #[test]
    fn contact_threshold_is_strict() {
        let config = SimConfig::default();
        let bodies = CelestialRegistry::solar_system();
        let mut a = crate::core::asteroid::test_asteroid(1, Vec3::new(0.0, 0.0, 3.5));
        assert_eq!(first_contact(&a, &bodies, &config), None, "3.5 is not < 3.5");
        a.position.z = 3.49;
        assert_eq!(first_contact(&a, &bodies, &config), Some(SUN));
    }

    #[test]
    fn first_body_in_registry_order_wins() {
        let config = SimConfig::default();
        let bodies = CelestialRegistry::new(
            vec![
                CelestialBody::new("Sol", Vec3::ZERO, 3.0, Rgb::from_hex(0xffaa00)),
                CelestialBody::new("Tierra", Vec3::X * 4.0, 1.0, Rgb::from_hex(0x2233ff)),
            ],
            SUN,
        )
        .unwrap();
        // Inside both contact spheres, nearer to Tierra.
        let a = crate::core::asteroid::test_asteroid(1, Vec3::new(3.2, 0.0, 0.0));
        assert_eq!(first_contact(&a, &bodies, &config), Some(SUN));
    }

    #[test]
    fn resolve_removes_and_emits_once() {
        let config = SimConfig::default();
        let mut bodies = CelestialRegistry::solar_system();
        bodies.set_position(MARS, Vec3::new(0.0, 0.0, -25.0));
        let mut store = AsteroidStore::from_config(&config);
        let mut renderer = CommandBuffer::new();

        let miss = spawn_at(&mut store, Vec3::new(0.0, 50.0, 0.0), &mut renderer);
        let earth_hit = spawn_at(&mut store, Vec3::new(15.5, 0.0, 0.0), &mut renderer);
        let mars_hit = spawn_at(&mut store, Vec3::new(0.0, 0.0, -25.2), &mut renderer);

        let collisions = detect_and_resolve(&mut store, &bodies, &config);
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].event.asteroid, earth_hit);
        assert_eq!(collisions[0].event.body, EARTH);
        assert!(!collisions[0].event.is_sun);
        assert_eq!(collisions[0].event.color, Rgb::from_hex(0x2233ff));
        assert_eq!(collisions[0].asteroid.state, AsteroidState::Exploding);
        assert_eq!(collisions[1].event.asteroid, mars_hit);
        assert_eq!(collisions[1].event.position, Vec3::new(0.0, 0.0, -25.2));

        assert_eq!(store.len(), 1);
        assert!(store.get(miss).is_some());

        // Already removed; a second pass finds nothing.
        assert!(detect_and_resolve(&mut store, &bodies, &config).is_empty());
    }

    #[test]
    fn sun_hit_is_flagged() {
        let config = SimConfig::default();
        let bodies = CelestialRegistry::solar_system();
        let mut store = AsteroidStore::from_config(&config);
        let mut renderer = CommandBuffer::new();
        spawn_at(&mut store, Vec3::new(0.0, 0.0, 3.0), &mut renderer);

        let collisions = detect_and_resolve(&mut store, &bodies, &config);
        assert_eq!(collisions.len(), 1);
        assert!(collisions[0].event.is_sun);
        assert_eq!(collisions[0].event.color, Rgb::from_hex(0xffaa00));
        assert!(store.is_empty());
    }
}
