pub mod commands;
pub mod traits;

// Re-export key types for convenient access
pub use commands::{CommandBuffer, RenderCommand, RenderRecord};
pub use traits::{GeometryKind, Material, Renderer, StatusSink, Transform, VisualOwner};
