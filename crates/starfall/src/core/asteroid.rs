use glam::Vec3;

use crate::api::types::{AsteroidId, VisualHandle};
use crate::renderer::Transform;

/// Lifecycle state of an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsteroidState {
    /// In the live store: integrated and collision-tested every step.
    #[default]
    Alive,
    /// Struck a body. Frozen in place while its death animation plays.
    Exploding,
}

/// A launched projectile. Plain data; the visual is referenced by handle only.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: AsteroidId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Cosmetic spin added to `rotation` each step.
    pub angular_velocity: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Cosmetic scale, animated on spawn.
    pub scale: f32,
    pub state: AsteroidState,
    /// Simulation clock at launch, in seconds.
    pub spawn_time: f32,
    pub visual: VisualHandle,
}

impl Asteroid {
    pub fn is_alive(&self) -> bool {
        self.state == AsteroidState::Alive
    }

    /// Flip to `Exploding`. Happens exactly once per asteroid.
    pub fn mark_exploding(&mut self) {
        debug_assert!(self.is_alive(), "asteroid {:?} exploded twice", self.id);
        self.state = AsteroidState::Exploding;
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            opacity: 1.0,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_asteroid(id: u32, position: Vec3) -> Asteroid {
    Asteroid {
        id: AsteroidId(id),
        position,
        velocity: Vec3::ZERO,
        angular_velocity: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
        state: AsteroidState::Alive,
        spawn_time: 0.0,
        visual: VisualHandle(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_exploding_changes_state() {
        let mut a = test_asteroid(1, Vec3::ZERO);
        assert!(a.is_alive());
        a.mark_exploding();
        assert_eq!(a.state, AsteroidState::Exploding);
        assert!(!a.is_alive());
    }

    #[test]
    fn transform_mirrors_record() {
        let mut a = test_asteroid(1, Vec3::new(1.0, 2.0, 3.0));
        a.scale = 0.5;
        a.rotation = Vec3::splat(0.1);
        let t = a.transform();
        assert_eq!(t.position, a.position);
        assert_eq!(t.rotation, a.rotation);
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.opacity, 1.0);
    }
}
