use crate::math::intersect_3d::{plane_plane, PlanePair};
use crate::math::polygon_3d::clip_segment_to_polygon;
use crate::math::{Point3, TOLERANCE};

use super::face_info::FaceInfo;

/// Computes the segments along which two planar faces intersect.
///
/// Returns an empty list for parallel or coincident planes, and for
/// crossing planes whose intersection line misses either polygon. Hole
/// boundaries are ignored; a cut through a hole is clipped away later
/// when fragments are classified.
#[must_use]
pub(crate) fn intersect_faces(a: &FaceInfo, b: &FaceInfo) -> Vec<(Point3, Point3)> {
    let (line_origin, line_dir) = match plane_plane(&a.plane, &b.plane) {
        PlanePair::Line { origin, direction } => (origin, direction),
        PlanePair::Parallel | PlanePair::Coincident => return Vec::new(),
    };

    if a.polygon.len() < 3 || b.polygon.len() < 3 {
        return Vec::new();
    }

    // Span a segment along the line covering both polygons, then clip it
    // to each polygon and overlap the resulting parameter intervals.
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for p in a.polygon.iter().chain(b.polygon.iter()) {
        let t = (p - line_origin).dot(&line_dir);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    let margin = 1.0;
    let seg_start = line_origin + line_dir * (t_min - margin);
    let seg_end = line_origin + line_dir * (t_max + margin);

    let intervals_a = clip_segment_to_polygon(&seg_start, &seg_end, &a.polygon, &a.plane);
    let intervals_b = clip_segment_to_polygon(&seg_start, &seg_end, &b.polygon, &b.plane);

    let seg_dir = seg_end - seg_start;
    let mut segments = Vec::new();
    for &(a0, a1) in &intervals_a {
        for &(b0, b1) in &intervals_b {
            let start = a0.max(b0);
            let end = a1.min(b1);
            if end - start > TOLERANCE {
                segments.push((seg_start + seg_dir * start, seg_start + seg_dir * end));
            }
        }
    }
    segments
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Plane;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn info(polygon: Vec<Point3>) -> FaceInfo {
        let plane = Plane::fit_polygon(&polygon, 1e-9).unwrap();
        FaceInfo { polygon, holes: vec![], plane, same_sense: true }
    }

    #[test]
    fn perpendicular_quads_cross_in_one_segment() {
        let a = info(vec![
            p(-1.0, -1.0, 0.0),
            p(1.0, -1.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(-1.0, 1.0, 0.0),
        ]);
        let b = info(vec![
            p(-1.0, 0.0, -1.0),
            p(1.0, 0.0, -1.0),
            p(1.0, 0.0, 1.0),
            p(-1.0, 0.0, 1.0),
        ]);
        let segments = intersect_faces(&a, &b);
        assert_eq!(segments.len(), 1);
        let (s, e) = &segments[0];
        assert!(((e - s).norm() - 2.0).abs() < 1e-6);
        assert!(s.y.abs() < 1e-9 && s.z.abs() < 1e-9);
    }

    #[test]
    fn parallel_quads_do_not_cross() {
        let a = info(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]);
        let b = info(vec![
            p(0.0, 0.0, 2.0),
            p(1.0, 0.0, 2.0),
            p(1.0, 1.0, 2.0),
            p(0.0, 1.0, 2.0),
        ]);
        assert!(intersect_faces(&a, &b).is_empty());
    }

    #[test]
    fn crossing_planes_with_disjoint_polygons() {
        let a = info(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]);
        let b = info(vec![
            p(0.0, 5.0, -1.0),
            p(1.0, 5.0, -1.0),
            p(1.0, 5.0, 1.0),
            p(0.0, 5.0, 1.0),
        ]);
        assert!(intersect_faces(&a, &b).is_empty());
    }
}
