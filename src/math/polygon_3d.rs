use crate::geometry::Plane;

use super::polygon_2d::{point_in_polygon_2d, segment_crossing_2d};
use super::{Point2, Point3, Vector3, TOLERANCE};

/// Normal of a 3D polygon by Newell's method, scaled by twice the polygon
/// area. Returns the zero vector for degenerate polygons.
#[must_use]
pub fn newell_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Unsigned area of a 3D planar polygon.
#[must_use]
pub fn polygon_area_3d(points: &[Point3]) -> f64 {
    0.5 * newell_vector(points).norm()
}

/// Centroid (vertex average) of a polygon.
#[must_use]
pub fn polygon_centroid(points: &[Point3]) -> Point3 {
    let n = points.len();
    if n == 0 {
        return Point3::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / n as f64;
    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }
    Point3::from(sum * inv_n)
}

/// Whether a point lies inside a planar 3D polygon.
///
/// The point is assumed to lie on the polygon's plane; it is projected into
/// the plane's UV space and tested in 2D.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    let uv: Vec<Point2> = polygon.iter().map(|p| plane.project(p)).collect();
    point_in_polygon_2d(&plane.project(point), &uv)
}

/// Clips the segment `start -> end` against a planar polygon, both lying on
/// `plane`. Returns the parameter intervals of the segment that are inside
/// the polygon, as `(t0, t1)` pairs with `0 <= t0 < t1 <= 1`.
#[must_use]
pub fn clip_segment_to_polygon(
    start: &Point3,
    end: &Point3,
    polygon: &[Point3],
    plane: &Plane,
) -> Vec<(f64, f64)> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let s2 = plane.project(start);
    let e2 = plane.project(end);
    let poly2: Vec<Point2> = polygon.iter().map(|p| plane.project(p)).collect();

    // Crossing parameters along the segment, plus both endpoints.
    let mut ts = vec![0.0, 1.0];
    for i in 0..n {
        let a = &poly2[i];
        let b = &poly2[(i + 1) % n];
        if let Some(t) = segment_crossing_2d(&s2, &e2, a, b) {
            ts.push(t);
        }
    }
    ts.sort_by(f64::total_cmp);
    ts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

    let dir = e2 - s2;
    let mut intervals: Vec<(f64, f64)> = Vec::new();
    for pair in ts.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        if t1 - t0 < TOLERANCE {
            continue;
        }
        let mid = Point2::from(s2.coords + dir * (0.5 * (t0 + t1)));
        if point_in_polygon_2d(&mid, &poly2) {
            match intervals.last_mut() {
                // Merge contiguous intervals split by a grazing crossing.
                Some(&mut (_, ref mut prev_end)) if (*prev_end - t0).abs() < TOLERANCE => {
                    *prev_end = t1;
                }
                _ => intervals.push((t0, t1)),
            }
        }
    }
    intervals
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn xy_plane() -> Plane {
        Plane::from_normal(Point3::origin(), Vector3::new(0.0, 0.0, 1.0)).unwrap()
    }

    #[test]
    fn square_area() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        assert!((polygon_area_3d(&square) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn tilted_triangle_area() {
        // Right triangle with one leg lifted out of the XY plane.
        let tri = vec![p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(0.0, 4.0, 4.0)];
        let expected = 0.5 * 3.0 * (4.0_f64 * 4.0 + 4.0 * 4.0).sqrt();
        assert!((polygon_area_3d(&tri) - expected).abs() < 1e-9);
    }

    #[test]
    fn centroid_of_square() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        let c = polygon_centroid(&square);
        assert!((c - p(1.0, 1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn point_in_planar_polygon() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        let plane = xy_plane();
        assert!(point_in_polygon_3d(&p(1.0, 1.0, 0.0), &square, &plane));
        assert!(!point_in_polygon_3d(&p(3.0, 1.0, 0.0), &square, &plane));
    }

    #[test]
    fn clip_segment_crossing_square() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        let plane = xy_plane();
        let intervals = clip_segment_to_polygon(
            &p(-1.0, 1.0, 0.0),
            &p(3.0, 1.0, 0.0),
            &square,
            &plane,
        );
        assert_eq!(intervals.len(), 1);
        let (t0, t1) = intervals[0];
        assert!((t0 - 0.25).abs() < 1e-9);
        assert!((t1 - 0.75).abs() < 1e-9);
    }

    #[test]
    fn clip_segment_outside_polygon() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        let plane = xy_plane();
        let intervals = clip_segment_to_polygon(
            &p(-1.0, 5.0, 0.0),
            &p(3.0, 5.0, 0.0),
            &square,
            &plane,
        );
        assert!(intervals.is_empty());
    }
}
