//! Narrowphase overlap tests, one per unordered pair of shape kinds.
//!
//! [`test_shapes`] is an exhaustive match over the 3x3 kind matrix; mirrored
//! combinations reuse the same test with the operands swapped.

use glam::Vec2;

use super::collider::WorldShape;
use super::geometry::{BoundingRect, WorldPolygons};
use super::shape_math::{
    closest_direction_from_circle_to_rectangle, distance_squared, is_circle_within_square,
    point_inside_polygon, project_onto_axis, segment_intersects_rect,
};

/// Axis-aligned rectangles carry no rotation, so the bounds test is exact.
#[inline]
pub fn rectangle_rectangle(_a: &BoundingRect, _b: &BoundingRect) -> bool {
    true
}

pub fn rectangle_circle(rect: &BoundingRect, center: Vec2, radius: f32) -> bool {
    let direction = closest_direction_from_circle_to_rectangle(center, rect);
    is_circle_within_square(radius, distance_squared(direction))
}

pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

/// True if any edge of any piece clips the rectangle.
///
/// Approximate: a polygon that fully encloses the rectangle without an edge
/// touching it is reported as apart.
pub fn rectangle_polygon(rect: &BoundingRect, polygon: &WorldPolygons) -> bool {
    polygon
        .polygons
        .iter()
        .flat_map(|p| p.edges())
        .any(|edge| segment_intersects_rect(edge.a, edge.b, rect))
}

/// Tests a single point on the circle, the one facing the polygon's center.
///
/// Approximate: a circle intruding from another direction can be missed.
pub fn circle_polygon(center: Vec2, radius: f32, polygon: &WorldPolygons) -> bool {
    let towards = (polygon.center() - center).normalize_or_zero();
    point_inside_polygon(center + towards * radius, &polygon.polygons)
}

/// Separating axis test over the outline edges of both sets.
pub fn polygon_polygon(a: &WorldPolygons, b: &WorldPolygons) -> bool {
    if !a.bounds.intersects(&b.bounds) {
        return false;
    }
    a.edges
        .iter()
        .chain(b.edges.iter())
        .map(|edge| edge.perpendicular_axis())
        .filter(|axis| *axis != Vec2::ZERO)
        .all(|axis| {
            let pa = project_onto_axis(&a.polygons, axis);
            let pb = project_onto_axis(&b.polygons, axis);
            pa.overlaps(&pb)
        })
}

/// Exact test for two shapes whose bounds are already known to overlap.
pub fn test_shapes(a: &WorldShape, b: &WorldShape) -> bool {
    use WorldShape::*;
    match (a, b) {
        (Rectangle { bounds: ra }, Rectangle { bounds: rb }) => rectangle_rectangle(ra, rb),
        (Rectangle { bounds }, Circle { center, radius })
        | (Circle { center, radius }, Rectangle { bounds }) => {
            rectangle_circle(bounds, *center, *radius)
        }
        (Rectangle { bounds }, Polygon(poly)) | (Polygon(poly), Rectangle { bounds }) => {
            rectangle_polygon(bounds, poly)
        }
        (
            Circle {
                center: ca,
                radius: ra,
            },
            Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(*ca, *ra, *cb, *rb),
        (Circle { center, radius }, Polygon(poly)) | (Polygon(poly), Circle { center, radius }) => {
            circle_polygon(*center, *radius, poly)
        }
        (Polygon(pa), Polygon(pb)) => polygon_polygon(pa, pb),
    }
}

/// Bounds test followed by the exact test.
pub fn is_colliding(a: &WorldShape, b: &WorldShape) -> bool {
    a.bounds().intersects(&b.bounds()) && test_shapes(a, b)
}
