use crate::math::intersect_3d::{line_plane, LinePlane};
use crate::math::polygon_3d::point_in_polygon_3d;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::face_info::FaceInfo;

/// Classification of a point relative to a closed face set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Outside,
    OnBoundary,
}

/// Classifies a point against the closed boundary formed by `faces`.
///
/// Ray casting: shoot a ray and count polygon crossings — odd means
/// inside. Rays that graze an edge or run inside a face plane are
/// degenerate; up to three axis directions are tried before giving up and
/// calling the point outside.
#[must_use]
pub(crate) fn classify_point(point: &Point3, faces: &[FaceInfo]) -> Containment {
    let directions = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];
    for dir in &directions {
        if let Some(c) = cast_ray(point, dir, faces) {
            return c;
        }
    }
    Containment::Outside
}

/// Classifies a point against several tool bodies at once.
///
/// Inside any tool wins over on-boundary, which wins over outside.
#[must_use]
pub(crate) fn classify_against_tools(point: &Point3, tools: &[Vec<FaceInfo>]) -> Containment {
    let mut on_boundary = false;
    for tool in tools {
        match classify_point(point, tool) {
            Containment::Inside => return Containment::Inside,
            Containment::OnBoundary => on_boundary = true,
            Containment::Outside => {}
        }
    }
    if on_boundary {
        Containment::OnBoundary
    } else {
        Containment::Outside
    }
}

fn cast_ray(point: &Point3, dir: &Vector3, faces: &[FaceInfo]) -> Option<Containment> {
    let boundary_tol = TOLERANCE * 10.0;
    let mut crossings = 0u32;

    for face in faces {
        match line_plane(point, dir, &face.plane) {
            LinePlane::Point { point: hit, t } => {
                if t < boundary_tol {
                    if t > -boundary_tol && point_in_polygon_3d(point, &face.polygon, &face.plane)
                    {
                        return Some(Containment::OnBoundary);
                    }
                    continue;
                }
                if !point_in_polygon_3d(&hit, &face.polygon, &face.plane) {
                    continue;
                }
                if near_polygon_edge(&hit, &face.polygon) {
                    // Grazing hit: retry with the next direction.
                    return None;
                }
                crossings += 1;
            }
            LinePlane::OnPlane => return None,
            LinePlane::Parallel => {}
        }
    }

    Some(if crossings % 2 == 1 {
        Containment::Inside
    } else {
        Containment::Outside
    })
}

fn near_polygon_edge(point: &Point3, polygon: &[Point3]) -> bool {
    let edge_tol = TOLERANCE * 100.0;
    let n = polygon.len();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        let ab = b - a;
        let len_sq = ab.dot(&ab);
        if len_sq < TOLERANCE * TOLERANCE {
            continue;
        }
        let t = (point - a).dot(&ab) / len_sq;
        if !(-edge_tol..=1.0 + edge_tol).contains(&t) {
            continue;
        }
        let closest = a + ab * t.clamp(0.0, 1.0);
        if (point - closest).norm() < edge_tol {
            return true;
        }
    }
    false
}
