use crate::error::{OperationError, Result};
use crate::geometry::Plane;
use crate::math::polygon_3d::polygon_area_3d;
use crate::math::{Point3, TOLERANCE};

use super::face_info::FaceInfo;

/// A polygon fragment produced by splitting a face along cut segments.
#[derive(Debug, Clone)]
pub struct FaceFragment {
    /// Outer boundary of the fragment, in the source face's winding.
    pub boundary: Vec<Point3>,
    /// Hole boundaries carried over from an uncut source face.
    pub holes: Vec<Vec<Point3>>,
    /// The source face's plane.
    pub plane: Plane,
    /// The source face's `same_sense` flag.
    pub same_sense: bool,
}

/// Splits a face along a set of cut segments lying on its plane.
///
/// Each cut is extended to an infinite line in the face plane and applied
/// sequentially to every fragment produced so far. If no cut touches the
/// face, the single returned fragment is the whole face, holes included.
pub(crate) fn split_face(face: &FaceInfo, cuts: &[(Point3, Point3)]) -> Result<Vec<FaceFragment>> {
    if face.polygon.len() < 3 {
        return Ok(Vec::new());
    }

    let relevant: Vec<&(Point3, Point3)> = cuts
        .iter()
        .filter(|(s, e)| (e - s).norm() > TOLERANCE)
        .collect();

    if relevant.is_empty() {
        return Ok(vec![FaceFragment {
            boundary: face.polygon.clone(),
            holes: face.holes.clone(),
            plane: face.plane.clone(),
            same_sense: face.same_sense,
        }]);
    }

    if !face.holes.is_empty() {
        // Splitting a face with holes would need hole re-distribution
        // over the fragments; the pipeline never produces such faces.
        return Err(
            OperationError::Failed("cannot split a face with holes".into()).into(),
        );
    }

    let mut fragments = vec![face.polygon.clone()];
    for cut in relevant {
        let mut next = Vec::with_capacity(fragments.len() + 1);
        for poly in &fragments {
            next.extend(split_polygon_by_line(poly, &cut.0, &cut.1, &face.plane));
        }
        fragments = next;
    }

    let min_area = TOLERANCE;
    Ok(fragments
        .into_iter()
        .filter(|f| f.len() >= 3 && polygon_area_3d(f) > min_area)
        .map(|boundary| FaceFragment {
            boundary,
            holes: Vec::new(),
            plane: face.plane.clone(),
            same_sense: face.same_sense,
        })
        .collect())
}

/// Splits a polygon by the infinite line through two points on its plane.
///
/// Works in the plane's UV space: vertices are classified by the sign of
/// their cross product with the line, crossing edges get an interpolated
/// vertex on both output sides.
fn split_polygon_by_line(
    polygon: &[Point3],
    line_p0: &Point3,
    line_p1: &Point3,
    plane: &Plane,
) -> Vec<Vec<Point3>> {
    let n = polygon.len();
    if n < 3 {
        return vec![polygon.to_vec()];
    }

    let poly_uv: Vec<_> = polygon.iter().map(|p| plane.project(p)).collect();
    let lp0 = plane.project(line_p0);
    let lp1 = plane.project(line_p1);
    let lu = lp1.x - lp0.x;
    let lv = lp1.y - lp0.y;

    let signs: Vec<f64> = poly_uv
        .iter()
        .map(|p| lu * (p.y - lp0.y) - lv * (p.x - lp0.x))
        .collect();

    let has_positive = signs.iter().any(|&s| s > TOLERANCE);
    let has_negative = signs.iter().any(|&s| s < -TOLERANCE);
    if !has_positive || !has_negative {
        return vec![polygon.to_vec()];
    }

    let mut side_a: Vec<Point3> = Vec::new();
    let mut side_b: Vec<Point3> = Vec::new();

    for i in 0..n {
        let j = (i + 1) % n;
        let (si, sj) = (signs[i], signs[j]);

        if si >= -TOLERANCE {
            side_a.push(polygon[i]);
        }
        if si <= TOLERANCE {
            side_b.push(polygon[i]);
        }

        if (si > TOLERANCE && sj < -TOLERANCE) || (si < -TOLERANCE && sj > TOLERANCE) {
            let t = si / (si - sj);
            let u = poly_uv[i].x + t * (poly_uv[j].x - poly_uv[i].x);
            let v = poly_uv[i].y + t * (poly_uv[j].y - poly_uv[i].y);
            let crossing = plane.unproject(u, v);
            side_a.push(crossing);
            side_b.push(crossing);
        }
    }

    let mut result = Vec::new();
    if side_a.len() >= 3 {
        result.push(side_a);
    }
    if side_b.len() >= 3 {
        result.push(side_b);
    }
    if result.is_empty() {
        result.push(polygon.to_vec());
    }
    result
}
