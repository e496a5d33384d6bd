//! World-space views of colliders, rebuilt from the owner's current position
//! on every query.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, ColliderShape};
use crate::ecs::components::transform::{Disabled, Transform};

use super::geometry::{BoundingRect, ShapeKind, WorldPolygons};

/// A collider shape placed in the world for one position.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    Circle { center: Vec2, radius: f32 },
    Rectangle { bounds: BoundingRect },
    Polygon(WorldPolygons),
}

impl WorldShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            WorldShape::Circle { .. } => ShapeKind::Circle,
            WorldShape::Rectangle { .. } => ShapeKind::Rectangle,
            WorldShape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn bounds(&self) -> BoundingRect {
        match self {
            WorldShape::Circle { center, radius } => {
                let r = Vec2::splat(*radius);
                BoundingRect::from_min_max(*center - r, *center + r)
            }
            WorldShape::Rectangle { bounds } => *bounds,
            WorldShape::Polygon(poly) => poly.bounds,
        }
    }
}

impl ColliderShape {
    /// Place the shape for an owner at `position`.
    pub fn to_world(&self, position: Vec2) -> WorldShape {
        match self {
            ColliderShape::Circle(circle) => WorldShape::Circle {
                center: circle.world_center(position),
                radius: circle.radius,
            },
            ColliderShape::Rectangle(rect) => WorldShape::Rectangle {
                bounds: rect.world_bounds(position),
            },
            ColliderShape::Polygon(set) => WorldShape::Polygon(set.to_world(position)),
        }
    }

    /// World bounding box without building the full world shape.
    pub fn world_bounds(&self, position: Vec2) -> BoundingRect {
        match self {
            ColliderShape::Circle(circle) => circle.world_bounds(position),
            ColliderShape::Rectangle(rect) => rect.world_bounds(position),
            ColliderShape::Polygon(set) => set.world_bounds(position),
        }
    }
}

/// Whether an owner takes part in this step: it exists, has a transform and
/// is not marked [`Disabled`].
pub fn owner_enabled(world: &hecs::World, owner: hecs::Entity) -> bool {
    world
        .entity(owner)
        .map(|e| e.has::<Transform>() && !e.has::<Disabled>())
        .unwrap_or(false)
}

/// Snapshot of one collider and its owner's position, read live from the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderView {
    pub entity: hecs::Entity,
    pub owner: hecs::Entity,
    pub position: Vec2,
    pub bounds: BoundingRect,
    pub kind: ShapeKind,
    pub is_trigger: bool,
    pub is_static: bool,
}

impl ColliderView {
    /// `None` when the collider or its owner's transform is gone.
    pub fn read(world: &hecs::World, entity: hecs::Entity) -> Option<Self> {
        let collider = world.get::<&Collider>(entity).ok()?;
        let owner = collider.owner();
        let position = world.get::<&Transform>(owner).ok()?.position;
        Some(Self {
            entity,
            owner,
            position,
            bounds: collider.shape().world_bounds(position),
            kind: collider.kind(),
            is_trigger: collider.is_trigger,
            is_static: collider.is_static,
        })
    }

    /// Full world-space geometry at the position captured by this view.
    pub fn world_shape(&self, world: &hecs::World) -> Option<WorldShape> {
        let collider = world.get::<&Collider>(self.entity).ok()?;
        Some(collider.shape().to_world(self.position))
    }
}
