//! Minimum translation vectors and positional correction.
//!
//! Every solver returns the move for the first operand: applying it to `a`
//! pushes `a` away from `b`. A zero vector means nothing to do, including every
//! degenerate case (coincident centers, touching without penetration).

use glam::Vec2;
use tracing::trace;

use crate::ecs::components::transform::Transform;

use super::collider::{ColliderView, WorldShape};
use super::geometry::{BoundingRect, WorldPolygons};
use super::shape_math::{closest_direction_from_circle_to_rectangle, project_onto_axis};

/// Separate along the axis with the smaller overlap.
pub fn rectangle_rectangle(a: &BoundingRect, b: &BoundingRect) -> Vec2 {
    let overlap = a.max().min(b.max()) - a.min().max(b.min());
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return Vec2::ZERO;
    }
    if overlap.x < overlap.y {
        Vec2::new(if a.x < b.x { -overlap.x } else { overlap.x }, 0.0)
    } else {
        Vec2::new(0.0, if a.y < b.y { -overlap.y } else { overlap.y })
    }
}

/// `circle_first` selects which operand the returned move belongs to.
pub fn rectangle_circle(
    rect: &BoundingRect,
    center: Vec2,
    radius: f32,
    circle_first: bool,
) -> Vec2 {
    let mut direction = closest_direction_from_circle_to_rectangle(center, rect);
    if !circle_first {
        direction = -direction;
    }
    let distance = direction.length();
    let penetration = radius - distance;
    if distance == 0.0 || penetration <= 0.0 {
        return Vec2::ZERO;
    }
    direction / distance * penetration
}

pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> Vec2 {
    let offset = center_a - center_b;
    let penetration = radius_a + radius_b - offset.length();
    if penetration <= 0.0 {
        return Vec2::ZERO;
    }
    offset.normalize_or_zero() * penetration
}

/// Full SAT sweep over the outline edges of both sets, keeping the axis of
/// least overlap. Zero when any axis separates the sets.
///
/// The chosen axis is oriented by where `b` sits relative to `a` along it:
/// the midpoints of the two projections, or the bounds centers when those
/// coincide.
pub fn sat_mtv(a: &WorldPolygons, b: &WorldPolygons) -> Vec2 {
    let mut min_overlap = f32::INFINITY;
    let mut min_axis = Vec2::ZERO;
    let mut offset = 0.0;

    for edge in a.edges.iter().chain(b.edges.iter()) {
        let axis = edge.perpendicular_axis();
        if axis == Vec2::ZERO {
            continue;
        }
        let pa = project_onto_axis(&a.polygons, axis);
        let pb = project_onto_axis(&b.polygons, axis);
        if !pa.overlaps(&pb) {
            return Vec2::ZERO;
        }
        let overlap = pa.overlap(&pb);
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
            offset = pb.midpoint() - pa.midpoint();
        }
    }

    if !min_overlap.is_finite() || min_overlap <= 0.0 {
        return Vec2::ZERO;
    }
    if offset == 0.0 {
        offset = min_axis.dot(b.center() - a.center());
    }
    // Orient the axis from a towards b, then move a the other way.
    if offset < 0.0 {
        min_axis = -min_axis;
    }
    -min_axis * min_overlap
}

fn as_polygons(shape: &WorldShape, circle_segments: usize) -> WorldPolygons {
    match shape {
        WorldShape::Circle { center, radius } => {
            WorldPolygons::from_circle(*center, *radius, circle_segments)
        }
        WorldShape::Rectangle { bounds } => WorldPolygons::from_rect(bounds),
        WorldShape::Polygon(poly) => poly.clone(),
    }
}

/// Move to apply to `a` so it no longer overlaps `b`.
///
/// Pairs involving a polygon turn the other side into a point set (rectangle
/// corners, or a regular `circle_segments`-gon for a circle) and run [`sat_mtv`].
pub fn minimum_translation(a: &WorldShape, b: &WorldShape, circle_segments: usize) -> Vec2 {
    use WorldShape::*;
    match (a, b) {
        (Rectangle { bounds: ra }, Rectangle { bounds: rb }) => rectangle_rectangle(ra, rb),
        (Rectangle { bounds }, Circle { center, radius }) => {
            rectangle_circle(bounds, *center, *radius, false)
        }
        (Circle { center, radius }, Rectangle { bounds }) => {
            rectangle_circle(bounds, *center, *radius, true)
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
        (Polygon(pa), Polygon(pb)) => sat_mtv(pa, pb),
        (Polygon(pa), other) => sat_mtv(pa, &as_polygons(other, circle_segments)),
        (other, Polygon(pb)) => sat_mtv(&as_polygons(other, circle_segments), pb),
    }
}

/// Split `mv` between the two owners: a static side stays put and the other
/// side takes the full move, otherwise each side takes half.
pub fn apply_correction(
    world: &mut hecs::World,
    this: &ColliderView,
    other: &ColliderView,
    mv: Vec2,
) {
    let shift = |owner: hecs::Entity, by: Vec2| {
        if let Ok(mut transform) = world.get::<&mut Transform>(owner) {
            transform.position += by;
        }
    };
    if this.is_static {
        shift(other.owner, -mv);
    } else if other.is_static {
        shift(this.owner, mv);
    } else {
        shift(this.owner, mv * 0.5);
        shift(other.owner, -mv * 0.5);
    }
}

/// Compute and apply the correction for `this` against `other` using current
/// positions. `None` if either side can no longer be read.
pub fn resolve_pair(
    world: &mut hecs::World,
    this: hecs::Entity,
    other: hecs::Entity,
    circle_segments: usize,
) -> Option<Vec2> {
    let view_a = ColliderView::read(world, this)?;
    let view_b = ColliderView::read(world, other)?;
    let shape_a = view_a.world_shape(world)?;
    let shape_b = view_b.world_shape(world)?;

    let mv = minimum_translation(&shape_a, &shape_b, circle_segments);
    if mv != Vec2::ZERO {
        trace!(collider = ?this, other = ?other, mv = ?mv, "applying correction");
        apply_correction(world, &view_a, &view_b, mv);
    }
    Some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::bridge::spawn_collider;
    use crate::ecs::components::physics::{Collider, ColliderShape};
    use crate::physics::geometry::Polygon;

    const EPS: f32 = 1e-5;

    fn unit_square(x: f32, y: f32) -> WorldPolygons {
        WorldPolygons::from_rect(&BoundingRect::new(x, y, 1.0, 1.0))
    }

    fn assert_vec(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_rectangle_rectangle_picks_smaller_axis() {
        let a = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingRect::new(5.0, 0.0, 10.0, 10.0);
        assert_vec(rectangle_rectangle(&a, &b), Vec2::new(-5.0, 0.0));
        assert_vec(rectangle_rectangle(&b, &a), Vec2::new(5.0, 0.0));

        let below = BoundingRect::new(1.0, 8.0, 10.0, 10.0);
        assert_vec(rectangle_rectangle(&a, &below), Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_separated_pairs_yield_zero() {
        let a = BoundingRect::new(-5.0, 0.0, 10.0, 10.0);
        let b = BoundingRect::new(5.0, 0.0, 10.0, 10.0);
        assert_eq!(rectangle_rectangle(&a, &b), Vec2::ZERO);
        assert_eq!(
            circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0),
            Vec2::ZERO
        );
        assert_eq!(
            circle_circle(Vec2::ZERO, 1.0, Vec2::new(5.0, 0.0), 1.0),
            Vec2::ZERO,
            "apart circles must not be pulled together"
        );
        assert_eq!(sat_mtv(&unit_square(0.0, 0.0), &unit_square(1.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_circle_circle_pushes_apart() {
        let mv = circle_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0);
        assert_vec(mv, Vec2::new(-0.5, 0.0));
        // Coincident centers have no direction.
        assert_eq!(circle_circle(Vec2::ONE, 1.0, Vec2::ONE, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_rectangle_circle_direction_per_operand() {
        let rect = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        let center = Vec2::new(12.0, 5.0);
        assert_vec(rectangle_circle(&rect, center, 3.0, true), Vec2::new(1.0, 0.0));
        assert_vec(rectangle_circle(&rect, center, 3.0, false), Vec2::new(-1.0, 0.0));
        // Center inside the rectangle: zero distance, zero move.
        assert_eq!(rectangle_circle(&rect, Vec2::new(5.0, 5.0), 3.0, true), Vec2::ZERO);
    }

    #[test]
    fn test_sat_unit_squares() {
        let a = unit_square(0.0, 0.0);
        let b = unit_square(0.5, 0.0);
        let mv = sat_mtv(&a, &b);
        assert!((mv.length() - 0.5).abs() < EPS, "magnitude: {}", mv.length());
        assert!(mv.x < 0.0, "must push a away from b: {mv:?}");
        assert_vec(sat_mtv(&b, &a), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_polygon_against_other_kinds() {
        let poly = WorldShape::Polygon(unit_square(0.5, 0.0));
        let rect = WorldShape::Rectangle {
            bounds: BoundingRect::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_vec(minimum_translation(&rect, &poly, 16), Vec2::new(-0.5, 0.0));
        assert_vec(minimum_translation(&poly, &rect, 16), Vec2::new(0.5, 0.0));

        let circle = WorldShape::Circle {
            center: Vec2::new(2.0, 0.5),
            radius: 1.0,
        };
        let mv = minimum_translation(&circle, &poly, 16);
        assert!(mv.length() > 0.0 && mv.length() <= 1.0, "{mv:?}");
    }

    #[test]
    fn test_circle_pushed_out_of_polygon_on_every_side() {
        let square = WorldShape::Polygon(WorldPolygons::from_rect(&BoundingRect::new(
            0.0, 0.0, 10.0, 10.0,
        )));
        let cases = [
            (Vec2::new(-0.5, 5.0), Vec2::new(-0.5, 0.0)),
            (Vec2::new(10.5, 5.0), Vec2::new(0.5, 0.0)),
            (Vec2::new(5.0, -0.5), Vec2::new(0.0, -0.5)),
            (Vec2::new(5.0, 10.5), Vec2::new(0.0, 0.5)),
        ];
        for (center, expected) in cases {
            let circle = WorldShape::Circle {
                center,
                radius: 1.0,
            };
            assert_vec(minimum_translation(&circle, &square, 16), expected);
            // Seen from the polygon the move is mirrored.
            assert_vec(minimum_translation(&square, &circle, 16), -expected);
        }
    }

    #[test]
    fn test_sat_orientation_ignores_vertex_order() {
        let a = unit_square(0.0, 0.0);
        let mut b = unit_square(0.5, 0.0);
        b.polygons.reverse();
        for polygon in &mut b.polygons {
            *polygon = Polygon::new(polygon.vertices().iter().rev().copied().collect()).unwrap();
        }
        assert_vec(sat_mtv(&a, &b), Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_dynamic_circle_settles_outside_static_polygon() {
        let mut world = hecs::World::new();
        let wall = world.spawn((Transform::identity(),));
        let square = [
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let wall_collider = spawn_collider(
            &mut world,
            Collider::new(wall, ColliderShape::convex(&square, Vec2::ZERO).unwrap()).fixed(),
        );
        let ball = world.spawn((Transform::from_position(Vec2::new(-0.5, 5.0)),));
        let ball_collider = spawn_collider(
            &mut world,
            Collider::new(ball, ColliderShape::circle(Vec2::ZERO, 1.0).unwrap()),
        );

        let mv = resolve_pair(&mut world, ball_collider, wall_collider, 16).unwrap();
        assert!(mv.x < 0.0, "circle must leave through the near side: {mv:?}");
        let settled = world.get::<&Transform>(ball).unwrap().position;
        assert_vec(settled, Vec2::new(-1.0, 5.0));

        // Resting against the face: nothing more to do, and it never drifts in.
        for _ in 0..3 {
            resolve_pair(&mut world, ball_collider, wall_collider, 16).unwrap();
        }
        assert_vec(world.get::<&Transform>(ball).unwrap().position, settled);
        assert_eq!(world.get::<&Transform>(wall).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_apply_correction_static_split() {
        let mut world = hecs::World::new();
        let oa = world.spawn((Transform::identity(),));
        let ob = world.spawn((Transform::from_position(Vec2::new(5.0, 0.0)),));
        let shape = ColliderShape::sized_box(Vec2::splat(10.0)).unwrap();
        let a = spawn_collider(&mut world, Collider::new(oa, shape.clone()));
        let b = spawn_collider(&mut world, Collider::new(ob, shape));

        let mv = resolve_pair(&mut world, a, b, 16).unwrap();
        assert_vec(mv, Vec2::new(-5.0, 0.0));
        assert_vec(world.get::<&Transform>(oa).unwrap().position, Vec2::new(-2.5, 0.0));
        assert_vec(world.get::<&Transform>(ob).unwrap().position, Vec2::new(7.5, 0.0));

        // Now overlapping by 0 on x: nothing further to do.
        assert_eq!(resolve_pair(&mut world, a, b, 16), Some(Vec2::ZERO));

        world.get::<&mut Transform>(ob).unwrap().position = Vec2::new(5.0, 0.0);
        world.get::<&mut Transform>(oa).unwrap().position = Vec2::ZERO;
        world.get::<&mut Collider>(a).unwrap().is_static = true;
        resolve_pair(&mut world, a, b, 16).unwrap();
        assert_vec(world.get::<&Transform>(oa).unwrap().position, Vec2::ZERO);
        assert_vec(world.get::<&Transform>(ob).unwrap().position, Vec2::new(10.0, 0.0));
    }
}
