//! Construction-time errors for collider shapes.

use thiserror::Error;

/// Rejected collider geometry. Shapes are validated when they are built, never
/// on first use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColliderError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("polygon set contains no polygons")]
    EmptyPolygonSet,

    #[error("circle radius must be finite and non-negative, got {radius}")]
    InvalidRadius { radius: f32 },

    #[error("rectangle extent must be finite and non-negative, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
}
