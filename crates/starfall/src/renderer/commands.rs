use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};

use super::traits::{GeometryKind, Material, Renderer, Transform, VisualOwner};
use crate::api::types::VisualHandle;

/// One renderer call, recorded as plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Create {
        handle: VisualHandle,
        owner: VisualOwner,
        geometry: GeometryKind,
        material: Material,
    },
    Update {
        handle: VisualHandle,
        transform: Transform,
    },
    Destroy {
        handle: VisualHandle,
    },
}

/// Opcodes used in [`RenderRecord::op`].
pub const OP_CREATE: f32 = 1.0;
pub const OP_UPDATE: f32 = 2.0;
pub const OP_DESTROY: f32 = 3.0;

/// Owner kinds used in [`RenderRecord::owner_kind`].
pub const OWNER_ASTEROID: f32 = 1.0;
pub const OWNER_PARTICLE: f32 = 2.0;

/// Flat wire form of a [`RenderCommand`] for the JS renderer.
/// Must match the TypeScript reader: 16 floats = 64 bytes stride.
///
/// - Create: `owner_kind`, `owner_id`, `r/g/b`, `radius`, `segments`, `flags`
///   (bit 0 transparent, bit 1 flat shading).
/// - Update: `x/y/z`, `rx/ry/rz`, `scale`, `opacity`.
/// - Destroy: only `op` and `handle`.
///
/// `handle` and the create's `owner_id` (in `y`) hold the id's `u32` bit
/// pattern, not its numeric value, so no id loses precision. The reader must
/// take them through a `Uint32Array` view of the same memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderRecord {
    pub op: f32,
    pub handle: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub scale: f32,
    pub opacity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub radius: f32,
    pub segments: f32,
    pub flags: f32,
}

impl RenderRecord {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// The visual handle this record targets.
    pub fn handle(&self) -> VisualHandle {
        VisualHandle(self.handle.to_bits())
    }

    /// Owner id of a create record.
    pub fn owner_id(&self) -> u32 {
        self.y.to_bits()
    }
}

fn id_bits(id: u32) -> f32 {
    f32::from_bits(id)
}

impl From<&RenderCommand> for RenderRecord {
    fn from(command: &RenderCommand) -> Self {
        match *command {
            RenderCommand::Create { handle, owner, geometry, material } => {
                let GeometryKind::Sphere { radius, segments } = geometry;
                let (owner_kind, owner_id) = match owner {
                    VisualOwner::Asteroid(id) => (OWNER_ASTEROID, id.0),
                    VisualOwner::Particle(id) => (OWNER_PARTICLE, id.0),
                };
                let flags =
                    u32::from(material.transparent) | (u32::from(material.flat_shading) << 1);
                // x/y carry the owner for creates; positions arrive with the first update.
                RenderRecord {
                    op: OP_CREATE,
                    handle: id_bits(handle.0),
                    x: owner_kind,
                    y: id_bits(owner_id),
                    r: material.color.r,
                    g: material.color.g,
                    b: material.color.b,
                    radius,
                    segments: segments as f32,
                    flags: flags as f32,
                    ..RenderRecord::default()
                }
            }
            RenderCommand::Update { handle, transform } => RenderRecord {
                op: OP_UPDATE,
                handle: id_bits(handle.0),
                x: transform.position.x,
                y: transform.position.y,
                z: transform.position.z,
                rx: transform.rotation.x,
                ry: transform.rotation.y,
                rz: transform.rotation.z,
                scale: transform.scale,
                opacity: transform.opacity,
                ..RenderRecord::default()
            },
            RenderCommand::Destroy { handle } => RenderRecord {
                op: OP_DESTROY,
                handle: id_bits(handle.0),
                ..RenderRecord::default()
            },
        }
    }
}

/// A [`Renderer`] that records every call as a [`RenderCommand`].
///
/// The web bridge drains it once per frame into [`RenderRecord`]s; tests use
/// it to observe what the simulation asked for.
#[derive(Debug)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
    live: HashSet<VisualHandle>,
    next_handle: u32,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            live: HashSet::new(),
            next_handle: 1,
        }
    }

    /// Commands recorded since the last drain, oldest first.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Convert recorded commands into wire records, appending to `out`, and clear them.
    pub fn drain_records(&mut self, out: &mut Vec<RenderRecord>) {
        out.extend(self.commands.iter().map(RenderRecord::from));
        self.commands.clear();
    }

    /// Number of visuals created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains(&handle)
    }

    /// The latest transform pushed for `handle` among the recorded commands.
    pub fn last_transform(&self, handle: VisualHandle) -> Option<Transform> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::Update { handle: h, transform } if *h == handle => Some(*transform),
            _ => None,
        })
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CommandBuffer {
    fn create_visual(
        &mut self,
        owner: VisualOwner,
        geometry: GeometryKind,
        material: Material,
    ) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle);
        self.commands.push(RenderCommand::Create { handle, owner, geometry, material });
        handle
    }

    fn update_transform(&mut self, handle: VisualHandle, transform: Transform) {
        debug_assert!(self.live.contains(&handle), "update of destroyed visual {handle:?}");
        self.commands.push(RenderCommand::Update { handle, transform });
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        let was_live = self.live.remove(&handle);
        debug_assert!(was_live, "double destroy of visual {handle:?}");
        self.commands.push(RenderCommand::Destroy { handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AsteroidId, ParticleId, Rgb};
    use glam::Vec3;

    fn sphere() -> GeometryKind {
        GeometryKind::Sphere { radius: 0.3, segments: 8 }
    }

    fn rock(buf: &mut CommandBuffer, id: u32) -> VisualHandle {
        let owner = VisualOwner::Asteroid(AsteroidId(id));
        buf.create_visual(owner, sphere(), Material::rock(Rgb::WHITE))
    }

    #[test]
    fn handles_are_unique_and_tracked() {
        let mut buf = CommandBuffer::new();
        let a = rock(&mut buf, 1);
        let b = rock(&mut buf, 2);
        assert_ne!(a, b);
        assert_eq!(buf.live_count(), 2);

        buf.destroy_visual(a);
        assert_eq!(buf.live_count(), 1);
        assert!(!buf.is_live(a));
        assert!(buf.is_live(b));
    }

    #[test]
    fn records_match_wire_stride() {
        assert_eq!(std::mem::size_of::<RenderRecord>(), RenderRecord::STRIDE_BYTES);
    }

    #[test]
    fn drain_records_encodes_ops() {
        let mut buf = CommandBuffer::new();
        let red = Material::glow(Rgb::from_hex(0xff0000));
        let h = buf.create_visual(VisualOwner::Asteroid(AsteroidId(7)), sphere(), red);
        let moved = Transform { position: Vec3::new(1.0, 2.0, 3.0), ..Transform::default() };
        buf.update_transform(h, moved);
        buf.destroy_visual(h);

        let mut out = Vec::new();
        buf.drain_records(&mut out);
        assert_eq!(out.len(), 3);
        assert!(buf.commands().is_empty());

        assert_eq!(out[0].op, OP_CREATE);
        assert_eq!(out[0].x, OWNER_ASTEROID);
        assert_eq!(out[0].owner_id(), 7);
        assert_eq!(out[0].handle(), h);
        assert_eq!(out[0].flags, 1.0);
        assert_eq!(out[0].r, 1.0);
        assert_eq!(out[1].op, OP_UPDATE);
        assert_eq!(out[1].z, 3.0);
        assert_eq!(out[2].op, OP_DESTROY);
        assert_eq!(out[2].handle(), h);
    }

    #[test]
    fn ids_past_f32_precision_stay_distinct() {
        let low = VisualHandle(16_777_216);
        let high = VisualHandle(16_777_217);
        let a = RenderRecord::from(&RenderCommand::Destroy { handle: low });
        let b = RenderRecord::from(&RenderCommand::Destroy { handle: high });
        assert_ne!(a.handle.to_bits(), b.handle.to_bits());
        assert_eq!(a.handle(), low);
        assert_eq!(b.handle(), high);

        let create = RenderRecord::from(&RenderCommand::Create {
            handle: VisualHandle(u32::MAX),
            owner: VisualOwner::Particle(ParticleId(16_777_217)),
            geometry: sphere(),
            material: Material::glow(Rgb::WHITE),
        });
        assert_eq!(create.handle(), VisualHandle(u32::MAX));
        assert_eq!(create.owner_id(), 16_777_217);
        assert_eq!(create.x, OWNER_PARTICLE);
    }

    #[test]
    fn last_transform_finds_latest_update() {
        let mut buf = CommandBuffer::new();
        let h = rock(&mut buf, 1);
        buf.update_transform(h, Transform { scale: 0.5, ..Transform::default() });
        buf.update_transform(h, Transform { scale: 0.75, ..Transform::default() });
        assert_eq!(buf.last_transform(h).unwrap().scale, 0.75);
    }
}
