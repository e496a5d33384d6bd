//! Physics components for ECS entities.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::error::ColliderError;
use crate::physics::geometry::{BoundingRect, Circle, PolygonSet, Rectangle, ShapeKind};
use crate::physics::lifecycle::ContactKind;

/// Collider geometry, one variant per [`ShapeKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(PolygonSet),
}

impl ColliderShape {
    /// Circle centered at `origin` relative to the owner.
    pub fn circle(origin: Vec2, radius: f32) -> Result<Self, ColliderError> {
        Circle::new(origin, radius).map(Self::Circle)
    }

    /// Local rectangle anchored at `pivot` (normalised, `(0, 0)` = top-left).
    pub fn rectangle(rect: BoundingRect, pivot: Vec2) -> Result<Self, ColliderError> {
        Rectangle::new(rect, pivot).map(Self::Rectangle)
    }

    /// Axis-aligned box of `size` with its top-left corner on the owner.
    pub fn sized_box(size: Vec2) -> Result<Self, ColliderError> {
        Self::rectangle(BoundingRect::new(0.0, 0.0, size.x, size.y), Vec2::ZERO)
    }

    /// Convex outline given in the owner's local frame.
    pub fn convex(points: &[Vec2], origin: Vec2) -> Result<Self, ColliderError> {
        PolygonSet::from_convex(points, origin).map(Self::Polygon)
    }

    pub fn polygon(set: PolygonSet) -> Self {
        Self::Polygon(set)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Circle(_) => ShapeKind::Circle,
            ColliderShape::Rectangle(_) => ShapeKind::Rectangle,
            ColliderShape::Polygon(_) => ShapeKind::Polygon,
        }
    }
}

/// What a collider remembers about a partner it is currently touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub other_owner: hecs::Entity,
    pub kind: ContactKind,
}

/// Collision shape attached to an owner entity.
///
/// A collider lives on its own entity and points at its owner, so one owner
/// may carry several colliders. The shape is fixed at construction; replacing
/// it means spawning a new collider.
#[derive(Debug, Clone)]
pub struct Collider {
    shape: ColliderShape,
    owner: hecs::Entity,
    /// Reports overlaps but never takes part in positional resolution.
    pub is_trigger: bool,
    /// Never moved by resolution; only the other side of a pair is displaced.
    pub is_static: bool,
    pub enabled: bool,
    contacts: BTreeMap<hecs::Entity, Contact>,
}

impl Collider {
    pub fn new(owner: hecs::Entity, shape: ColliderShape) -> Self {
        Self {
            shape,
            owner,
            is_trigger: false,
            is_static: false,
            enabled: true,
            contacts: BTreeMap::new(),
        }
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[inline]
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    #[inline]
    pub fn owner(&self) -> hecs::Entity {
        self.owner
    }

    /// Colliders this one currently overlaps, in entity order.
    pub fn other_colliders(&self) -> impl Iterator<Item = hecs::Entity> + '_ {
        self.contacts.keys().copied()
    }

    pub fn contact(&self, other: hecs::Entity) -> Option<&Contact> {
        self.contacts.get(&other)
    }

    #[inline]
    pub fn is_touching(&self, other: hecs::Entity) -> bool {
        self.contacts.contains_key(&other)
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        !self.contacts.is_empty()
    }

    pub(crate) fn insert_contact(&mut self, other: hecs::Entity, contact: Contact) -> bool {
        self.contacts.insert(other, contact).is_none()
    }

    pub(crate) fn remove_contact(&mut self, other: hecs::Entity) -> Option<Contact> {
        self.contacts.remove(&other)
    }

    pub(crate) fn take_contacts(&mut self) -> BTreeMap<hecs::Entity, Contact> {
        std::mem::take(&mut self.contacts)
    }
}

/// Opt-in linear motion for an owner: gravity and damping, no rotation.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    pub mass: f32,
    /// Fraction of velocity removed each step (default: 0.01).
    pub linear_damping: f32,
    /// Gravity scale (default: 1.0).
    pub gravity_scale: f32,
    pub use_gravity: bool,
}

impl PhysicsBody {
    pub fn new(mass: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass,
            linear_damping: 0.01,
            gravity_scale: 1.0,
            use_gravity: true,
        }
    }

    /// A body that keeps its velocity but ignores gravity.
    pub fn weightless(mass: f32) -> Self {
        Self {
            use_gravity: false,
            ..Self::new(mass)
        }
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(1.0)
    }
}
