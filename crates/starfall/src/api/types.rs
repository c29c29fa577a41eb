use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Unique identifier for an asteroid. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsteroidId(pub u32);

/// Unique identifier for an explosion particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(pub u32);

/// Opaque handle to a visual owned by the renderer.
/// The core stores it and hands it back; it never reads renderer state through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u32);

/// Linear RGB color, each channel in [0, 1].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Pack back into `0xRRGGBB` (channels are clamped and rounded).
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// Emitted once per asteroid when it strikes a celestial body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionEvent {
    /// The asteroid that was destroyed.
    pub asteroid: AsteroidId,
    /// Asteroid position at the moment of impact.
    pub position: Vec3,
    /// Highlight color of the struck body; tints the particle burst.
    pub color: Rgb,
    /// Registry index of the struck body.
    pub body: usize,
    /// Whether the struck body is the primary (the sun).
    pub is_sun: bool,
}

/// Wire form of an [`ExplosionEvent`] for the JS host.
/// 8 floats: x, y, z, r, g, b, body index, is_sun (0/1).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ImpactRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub body: f32,
    pub is_sun: f32,
}

impl ImpactRecord {
    pub const FLOATS: usize = 8;
}

impl From<&ExplosionEvent> for ImpactRecord {
    fn from(event: &ExplosionEvent) -> Self {
        Self {
            x: event.position.x,
            y: event.position.y,
            z: event.position.z,
            r: event.color.r,
            g: event.color.g,
            b: event.color.b,
            body: event.body as f32,
            is_sun: if event.is_sun { 1.0 } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_for_body_colors() {
        for hex in [0xffaa00, 0x2233ff, 0xff4422] {
            assert_eq!(Rgb::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn from_hex_channels() {
        let c = Rgb::from_hex(0xff0000);
        assert_eq!(c, Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn impact_record_layout() {
        assert_eq!(std::mem::size_of::<ImpactRecord>(), ImpactRecord::FLOATS * 4);

        let event = ExplosionEvent {
            asteroid: AsteroidId(3),
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Rgb::from_hex(0xffaa00),
            body: 0,
            is_sun: true,
        };
        let record = ImpactRecord::from(&event);
        assert_eq!(record.x, 1.0);
        assert_eq!(record.z, 3.0);
        assert_eq!(record.is_sun, 1.0);
        assert_eq!(record.r, 1.0);
    }
}
