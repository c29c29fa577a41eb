//! Collaborator contracts: the renderer and the status text sink.
//!
//! The simulation never reads anything back through these traits. It creates
//! visuals, pushes transforms to them, and destroys them when the entity they
//! belong to is gone.

use glam::Vec3;

use crate::api::types::{AsteroidId, ParticleId, Rgb, VisualHandle};

/// The simulation entity a visual belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualOwner {
    Asteroid(AsteroidId),
    Particle(ParticleId),
}

/// Geometry requested for a visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    /// A low-poly sphere.
    Sphere { radius: f32, segments: u32 },
}

/// Material requested for a visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    /// Whether opacity updates must be honored.
    pub transparent: bool,
    /// Faceted look for asteroid rocks.
    pub flat_shading: bool,
}

impl Material {
    pub fn rock(color: Rgb) -> Self {
        Self { color, transparent: false, flat_shading: true }
    }

    pub fn glow(color: Rgb) -> Self {
        Self { color, transparent: true, flat_shading: false }
    }
}

/// Per-frame visual state of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Rendering backend driven by the simulation.
///
/// Implementors own meshes, materials and the scene graph. A handle returned
/// by `create_visual` stays valid until `destroy_visual` is called with it.
pub trait Renderer {
    /// Create a visual for `owner`. Returns the handle used for later updates.
    fn create_visual(
        &mut self,
        owner: VisualOwner,
        geometry: GeometryKind,
        material: Material,
    ) -> VisualHandle;

    /// Move/rotate/scale/fade an existing visual.
    fn update_transform(&mut self, handle: VisualHandle, transform: Transform);

    /// Release a visual and all of its rendering resources.
    fn destroy_visual(&mut self, handle: VisualHandle);
}

/// Sink for the human-readable status line shown next to the view.
pub trait StatusSink {
    fn set_status(&mut self, text: &str);
}

/// Keeps only the latest status.
impl StatusSink for String {
    fn set_status(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Keeps the full status history, oldest first.
impl StatusSink for Vec<String> {
    fn set_status(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_sink_replaces() {
        let mut sink = String::from("old");
        sink.set_status("Asteroids: 1");
        assert_eq!(sink, "Asteroids: 1");
    }

    #[test]
    fn vec_sink_keeps_history() {
        let mut sink: Vec<String> = Vec::new();
        sink.set_status("a");
        sink.set_status("b");
        assert_eq!(sink, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.position, Vec3::ZERO);
    }
}
