pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::simulation::{Simulation, StepReport};
pub use api::config::SimConfig;
pub use api::error::SimError;
pub use api::types::{AsteroidId, ParticleId, VisualHandle, Rgb, ExplosionEvent, ImpactRecord};
pub use core::asteroid::{Asteroid, AsteroidState};
pub use core::bodies::{CelestialBody, CelestialRegistry};
pub use core::orbit::{OrbitDriver, CircularOrbit, Satellite};
pub use core::store::{AsteroidStore, Spawned};
pub use renderer::{
    Renderer, StatusSink, Transform, GeometryKind, Material, VisualOwner,
    CommandBuffer, RenderCommand, RenderRecord,
};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::collision::{detect_and_resolve, Collision};
pub use systems::effects::{ExplosionController, Particle, Debris, Rng};
pub use systems::physics::{gravity_pull, integrate};
pub use systems::status::StatusLine;

// Extensions: easing curves and tweens
pub use extensions::{
    Easing, lerp, ease,
    TweenState, Tween, TweenId, TweenLoop,
};
