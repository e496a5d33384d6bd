//! Helper math shared by the narrow-phase tests and the MTV solver.

use glam::Vec2;

use crate::error::ColliderError;

use super::geometry::{BoundingRect, Edge, Polygon};

/// Lines whose directions form an angle with a sine below this are parallel.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Scalar projection range of a shape on an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisInterval {
    pub min: f32,
    pub max: f32,
}

impl AxisInterval {
    #[inline]
    pub fn overlaps(&self, other: &AxisInterval) -> bool {
        !(self.max < other.min || other.max < self.min)
    }

    /// Length of the shared range. Negative when the intervals are apart.
    #[inline]
    pub fn overlap(&self, other: &AxisInterval) -> f32 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    #[inline]
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }
}

/// Vector from the point of `rect` closest to `center` to `center` itself.
/// Zero when the center lies inside the rectangle.
pub fn closest_direction_from_circle_to_rectangle(center: Vec2, rect: &BoundingRect) -> Vec2 {
    let local = center - rect.min();
    let closest = Vec2::new(
        local.x.clamp(0.0, rect.width),
        local.y.clamp(0.0, rect.height),
    );
    local - closest
}

#[inline]
pub fn distance_squared(v: Vec2) -> f32 {
    v.x * v.x + v.y * v.y
}

#[inline]
pub fn is_circle_within_square(radius: f32, distance_squared: f32) -> bool {
    distance_squared < radius * radius
}

/// Ray-casting parity test against each convex piece. True if the point lies
/// inside any piece.
pub fn point_inside_polygon(point: Vec2, polygons: &[Polygon]) -> bool {
    polygons.iter().any(|polygon| {
        let v = polygon.vertices();
        let mut inside = false;
        let mut j = v.len() - 1;
        for i in 0..v.len() {
            if (v[i].y > point.y) != (v[j].y > point.y)
                && point.x < (v[j].x - v[i].x) * (point.y - v[i].y) / (v[j].y - v[i].y) + v[i].x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    })
}

/// Project every vertex of every piece onto a unit `axis`.
pub fn project_onto_axis(polygons: &[Polygon], axis: Vec2) -> AxisInterval {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for vertex in polygons.iter().flat_map(|p| p.vertices()) {
        let d = axis.dot(*vertex);
        min = min.min(d);
        max = max.max(d);
    }
    AxisInterval { min, max }
}

/// Intersection point of the lines through `p1..p2` and `p3..p4`, or `None`
/// when they are parallel or degenerate.
pub fn lines_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let (point, _, _) = line_params(p1, p2, p3, p4)?;
    Some(point)
}

/// Like [`lines_intersect`] but only accepts a crossing inside both segments.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let (point, t, u) = line_params(p1, p2, p3, p4)?;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then_some(point)
}

fn line_params(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<(Vec2, f32, f32)> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let det = d1.perp_dot(d2);
    if det.abs() <= PARALLEL_EPSILON * d1.length() * d2.length() {
        return None;
    }
    let delta = p3 - p1;
    let t = delta.perp_dot(d2) / det;
    let u = delta.perp_dot(d1) / det;
    Some((p1 + d1 * t, t, u))
}

/// True if any part of the segment `a..b` lies within `rect`: an endpoint is
/// inside, or the segment crosses one of the four boundary segments.
pub fn segment_intersects_rect(a: Vec2, b: Vec2, rect: &BoundingRect) -> bool {
    if rect.contains_point(a) || rect.contains_point(b) {
        return true;
    }
    rect.boundary()
        .iter()
        .any(|side| segments_intersect(a, b, side.a, side.b).is_some())
}

/// Fan triangulation of a convex outline.
pub fn triangulate_convex(points: &[Vec2]) -> Result<Vec<Polygon>, ColliderError> {
    if points.len() < 3 {
        return Err(ColliderError::TooFewVertices {
            count: points.len(),
        });
    }
    Ok(fan_triangles(points))
}

/// Fan triangulation without validation; fewer than 3 points yield nothing.
pub(crate) fn fan_triangles(points: &[Vec2]) -> Vec<Polygon> {
    if points.len() < 3 {
        return Vec::new();
    }
    (1..points.len() - 1)
        .map(|i| Polygon::triangle(points[0], points[i], points[i + 1]))
        .collect()
}

/// Closed ring of edges through `points`.
pub fn edges_from_points(points: &[Vec2]) -> Vec<Edge> {
    let n = points.len();
    (0..n)
        .map(|i| Edge::new(points[i], points[(i + 1) % n]))
        .collect()
}

/// Edges of all pieces, minus the ones shared by two pieces (in either direction).
pub fn outline_edges(polygons: &[Polygon]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::new();
    for edge in polygons.iter().flat_map(|p| p.edges()) {
        if let Some(pos) = edges
            .iter()
            .position(|e| (e.a == edge.b && e.b == edge.a) || (e.a == edge.a && e.b == edge.b))
        {
            edges.swap_remove(pos);
        } else {
            edges.push(edge);
        }
    }
    edges
}

/// Vertices of a regular polygon inscribed in a circle. At least 3 segments.
pub fn regular_polygon(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    let n = segments.max(3);
    let step = std::f32::consts::TAU / n as f32;
    (0..n)
        .map(|i| center + Vec2::from_angle(step * i as f32) * radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Polygon {
        Polygon::new(vec![a.into(), b.into(), c.into()]).unwrap()
    }

    #[test]
    fn test_closest_direction_outside_and_inside() {
        let rect = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        let outside = closest_direction_from_circle_to_rectangle(Vec2::new(13.0, 5.0), &rect);
        assert_eq!(outside, Vec2::new(3.0, 0.0));

        let corner = closest_direction_from_circle_to_rectangle(Vec2::new(-3.0, -4.0), &rect);
        assert_eq!(corner, Vec2::new(-3.0, -4.0));
        assert_eq!(distance_squared(corner), 25.0);

        let inside = closest_direction_from_circle_to_rectangle(Vec2::new(4.0, 6.0), &rect);
        assert_eq!(inside, Vec2::ZERO);
    }

    #[test]
    fn test_circle_within_square_is_strict() {
        assert!(is_circle_within_square(5.0, 24.9));
        assert!(!is_circle_within_square(5.0, 25.0));
    }

    #[test]
    fn test_point_inside_polygon() {
        let polys = vec![
            triangle((0.0, 0.0), (4.0, 0.0), (0.0, 4.0)),
            triangle((10.0, 10.0), (14.0, 10.0), (10.0, 14.0)),
        ];
        assert!(point_inside_polygon(Vec2::new(1.0, 1.0), &polys));
        assert!(point_inside_polygon(Vec2::new(11.0, 11.0), &polys));
        assert!(!point_inside_polygon(Vec2::new(3.5, 3.5), &polys));
        assert!(!point_inside_polygon(Vec2::new(-1.0, 1.0), &polys));
    }

    #[test]
    fn test_project_and_overlap() {
        let a = vec![triangle((0.0, 0.0), (2.0, 0.0), (0.0, 2.0))];
        let b = vec![triangle((1.5, 0.0), (4.0, 0.0), (1.5, 2.0))];
        let pa = project_onto_axis(&a, Vec2::X);
        let pb = project_onto_axis(&b, Vec2::X);
        assert_eq!(pa, AxisInterval { min: 0.0, max: 2.0 });
        assert!(pa.overlaps(&pb));
        assert!((pa.overlap(&pb) - 0.5).abs() < 1e-6);

        let far = AxisInterval { min: 3.0, max: 4.0 };
        assert!(!pa.overlaps(&far));
        let touching = AxisInterval { min: 2.0, max: 4.0 };
        assert!(pa.overlaps(&touching));
        assert_eq!(touching.midpoint(), 3.0);
    }

    #[test]
    fn test_lines_intersect() {
        let hit = lines_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        );
        let p = hit.expect("diagonals cross");
        assert!((p - Vec2::ONE).length() < 1e-6);

        let parallel = lines_intersect(Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::new(1.0, 1.0));
        assert!(parallel.is_none());
        let degenerate = lines_intersect(Vec2::ONE, Vec2::ONE, Vec2::ZERO, Vec2::Y);
        assert!(degenerate.is_none());

        // The supporting lines cross but the segments do not.
        let short = segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        );
        assert!(short.is_none());
    }

    #[test]
    fn test_lines_intersect_at_small_scale() {
        let tiny = 0.005;
        let hit = lines_intersect(
            Vec2::ZERO,
            Vec2::splat(tiny),
            Vec2::new(0.0, tiny),
            Vec2::new(tiny, 0.0),
        );
        let p = hit.expect("short diagonals still cross");
        assert!((p - Vec2::splat(tiny * 0.5)).length() < 1e-7);

        let nearly_parallel = lines_intersect(
            Vec2::ZERO,
            Vec2::new(1000.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1000.0, 1.05),
        );
        assert!(nearly_parallel.is_none());
    }

    #[test]
    fn test_segment_intersects_rect() {
        let rect = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(segment_intersects_rect(
            Vec2::new(-5.0, 5.0),
            Vec2::new(15.0, 5.0),
            &rect
        ));
        assert!(segment_intersects_rect(
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
            &rect
        ));
        assert!(!segment_intersects_rect(
            Vec2::new(-5.0, -5.0),
            Vec2::new(-1.0, 20.0),
            &rect
        ));
    }

    #[test]
    fn test_triangulate_convex() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = triangulate_convex(&pts).unwrap();
        assert_eq!(tris.len(), 3);
        assert!(tris.iter().all(|t| t.vertices()[0] == pts[0]));
        assert!(triangulate_convex(&pts[..2]).is_err());
        assert_eq!(edges_from_points(&pts).len(), 5);
    }

    #[test]
    fn test_regular_polygon_on_circle() {
        let pts = regular_polygon(Vec2::new(5.0, 5.0), 2.0, 16);
        assert_eq!(pts.len(), 16);
        for p in &pts {
            assert!(((*p - Vec2::new(5.0, 5.0)).length() - 2.0).abs() < 1e-5);
        }
        assert_eq!(regular_polygon(Vec2::ZERO, 1.0, 1).len(), 3);
    }
}
