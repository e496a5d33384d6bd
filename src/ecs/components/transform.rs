//! Transform components for ECS entities.

use glam::Vec2;

/// Positional state of a collider owner. Collision only reads and writes
/// `position`; rotation and scale belong to the surrounding scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Marks an owner as disabled. Its colliders are skipped and its body is not
/// integrated until the marker is removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;
