use glam::Vec3;
use thiserror::Error;

/// Errors surfaced by the simulation API.
///
/// Everything else the engine does is total: absence of a collision, an
/// escaped asteroid or an evicted one are normal outcomes, not errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A launch ray contained NaN or infinite components.
    #[error("launch ray must be finite (origin {origin}, direction {direction})")]
    NonFiniteLaunch { origin: Vec3, direction: Vec3 },

    /// A configuration value or body definition is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}
