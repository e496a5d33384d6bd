//! Geometry primitives: bounding rectangles, circles, rectangles and convex
//! polygon sets.
//!
//! Shapes are stored in a local, un-positioned frame. World-space geometry is
//! never cached; it is re-expressed from the owner's current position every
//! time it is needed (see [`PolygonSet::to_world`]).

use glam::Vec2;

use crate::error::ColliderError;

use super::shape_math;

/// Axis-aligned rectangle in world units. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle spanning `min..max`. Swapped corners are normalised.
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self::new(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y)
    }

    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_min_max(min, max))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min() + self.size() * 0.5
    }

    /// Interval overlap on both axes. Touching edges count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &BoundingRect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
            ..*self
        }
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left
    /// (y grows downward).
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }

    /// The four boundary segments, following [`BoundingRect::corners`].
    pub fn boundary(&self) -> [Edge; 4] {
        let [a, b, c, d] = self.corners();
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, d), Edge::new(d, a)]
    }
}

/// Discriminant of a collider shape. Fixed for the lifetime of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

/// Circle in the owner's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Offset of the center from the owner's position.
    pub origin: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(origin: Vec2, radius: f32) -> Result<Self, ColliderError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ColliderError::InvalidRadius { radius });
        }
        Ok(Self { origin, radius })
    }

    #[inline]
    pub fn world_center(&self, position: Vec2) -> Vec2 {
        position + self.origin
    }

    /// The square circumscribing the circle.
    pub fn world_bounds(&self, position: Vec2) -> BoundingRect {
        let center = self.world_center(position);
        let r = Vec2::splat(self.radius);
        BoundingRect::from_min_max(center - r, center + r)
    }
}

/// Axis-aligned rectangle in the owner's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub rect: BoundingRect,
    /// Normalised anchor: `(0.5, 0.5)` centers the rectangle on the owner.
    pub pivot: Vec2,
}

impl Rectangle {
    pub fn new(rect: BoundingRect, pivot: Vec2) -> Result<Self, ColliderError> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(rect.width) || !valid(rect.height) {
            return Err(ColliderError::InvalidExtent {
                width: rect.width,
                height: rect.height,
            });
        }
        Ok(Self { rect, pivot })
    }

    pub fn world_bounds(&self, position: Vec2) -> BoundingRect {
        let size = self.rect.size();
        self.rect.translated(position - self.pivot * size)
    }
}

/// Ordered pair of points. Only used to derive a projection axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: Vec2,
    pub b: Vec2,
}

impl Edge {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Unit normal of the edge, or zero for a degenerate edge.
    #[inline]
    pub fn perpendicular_axis(&self) -> Vec2 {
        let d = self.b - self.a;
        Vec2::new(d.y, -d.x).normalize_or_zero()
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self::new(self.a + by, self.b + by)
    }
}

/// A single convex piece of a polygon collider.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ColliderError> {
        if vertices.len() < 3 {
            return Err(ColliderError::TooFewVertices {
                count: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub(crate) fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            vertices: vec![a, b, c],
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Closed ring of edges around this piece.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| *v + by).collect(),
        }
    }
}

/// Collider geometry made of convex pieces plus the outline edges used as SAT
/// axes. Stored in a local frame; see [`PolygonSet::to_world`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
    edges: Vec<Edge>,
    origin: Vec2,
    local_min: Vec2,
    size: Vec2,
}

impl PolygonSet {
    /// Build from a convex outline. The outline is fan-triangulated and its
    /// own segments become the edge list.
    pub fn from_convex(points: &[Vec2], origin: Vec2) -> Result<Self, ColliderError> {
        let polygons = shape_math::triangulate_convex(points)?;
        let edges = shape_math::edges_from_points(points);
        Self::with_edges(polygons, edges, origin)
    }

    /// Build from pre-triangulated convex pieces. Edges shared by two pieces
    /// are interior and dropped from the edge list.
    pub fn from_triangles(polygons: Vec<Polygon>, origin: Vec2) -> Result<Self, ColliderError> {
        let edges = shape_math::outline_edges(&polygons);
        Self::with_edges(polygons, edges, origin)
    }

    /// Build from pieces and an explicit edge list.
    pub fn with_edges(
        polygons: Vec<Polygon>,
        edges: Vec<Edge>,
        origin: Vec2,
    ) -> Result<Self, ColliderError> {
        let bounds = BoundingRect::from_points(
            polygons.iter().flat_map(|p| p.vertices().iter().copied()),
        )
        .ok_or(ColliderError::EmptyPolygonSet)?;

        Ok(Self {
            polygons,
            edges,
            origin,
            local_min: bounds.min(),
            size: bounds.size(),
        })
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size of the local vertex bounding box.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Internal reference point used to place local vertices in the world.
    /// Not the geometric centroid.
    #[inline]
    pub fn faux_center(&self, position: Vec2) -> Vec2 {
        position + self.origin + self.size * 0.5
    }

    #[inline]
    fn world_offset(&self, position: Vec2) -> Vec2 {
        self.faux_center(position) - self.size * 0.5
    }

    pub fn world_bounds(&self, position: Vec2) -> BoundingRect {
        let min = self.world_offset(position) + self.local_min;
        BoundingRect::new(min.x, min.y, self.size.x, self.size.y)
    }

    /// Re-express the pieces and edges in world space for an owner at `position`.
    pub fn to_world(&self, position: Vec2) -> WorldPolygons {
        let offset = self.world_offset(position);
        WorldPolygons {
            polygons: self.polygons.iter().map(|p| p.translated(offset)).collect(),
            edges: self.edges.iter().map(|e| e.translated(offset)).collect(),
            bounds: self.world_bounds(position),
        }
    }
}

/// World-space polygon geometry, valid only for the position it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPolygons {
    pub polygons: Vec<Polygon>,
    pub edges: Vec<Edge>,
    pub bounds: BoundingRect,
}

impl WorldPolygons {
    /// Convex outline given directly in world space.
    pub(crate) fn from_outline(points: &[Vec2]) -> Self {
        Self {
            polygons: shape_math::fan_triangles(points),
            edges: shape_math::edges_from_points(points),
            bounds: BoundingRect::from_points(points.iter().copied()).unwrap_or_default(),
        }
    }

    /// The rectangle as two triangles with its four boundary edges.
    pub fn from_rect(rect: &BoundingRect) -> Self {
        Self::from_outline(&rect.corners())
    }

    /// Regular polygon inscribed in the circle.
    pub fn from_circle(center: Vec2, radius: f32, segments: usize) -> Self {
        Self::from_outline(&shape_math::regular_polygon(center, radius, segments))
    }

    /// Center of the world bounding box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.polygons.iter().flat_map(|p| p.vertices().iter().copied())
    }
}
