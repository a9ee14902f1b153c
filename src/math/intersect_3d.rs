use crate::geometry::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship between two planes.
#[derive(Debug)]
pub enum PlanePair {
    /// The planes cross along a line (unit `direction`).
    Line { origin: Point3, direction: Vector3 },
    /// The planes are parallel and distinct.
    Parallel,
    /// The planes coincide.
    Coincident,
}

/// Intersects two planes.
#[must_use]
pub fn plane_plane(a: &Plane, b: &Plane) -> PlanePair {
    let na = a.normal();
    let nb = b.normal();

    let dir = na.cross(nb);
    let dir_len = dir.norm();

    if dir_len < TOLERANCE {
        let dist = (b.origin() - a.origin()).dot(na).abs();
        if dist < TOLERANCE {
            return PlanePair::Coincident;
        }
        return PlanePair::Parallel;
    }
    let dir = dir / dir_len;

    // A point on the line: p = oa + s*na + t*nb with both plane equations
    // satisfied. Solving the 2x2 system gives s and t.
    let d2 = nb.dot(&(b.origin() - a.origin()));
    let dot_nn = na.dot(nb);
    let denom = 1.0 - dot_nn * dot_nn;
    let origin = if denom.abs() < TOLERANCE {
        *a.origin()
    } else {
        let s = -dot_nn * d2 / denom;
        let t = d2 / denom;
        a.origin() + na * s + nb * t
    };

    PlanePair::Line { origin, direction: dir }
}

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlane {
    /// Single intersection point at parameter `t` along the line.
    Point { point: Point3, t: f64 },
    /// The line is parallel to the plane and off it.
    Parallel,
    /// The line lies on the plane.
    OnPlane,
}

/// Intersects the line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlane {
    let normal = plane.normal();
    let denom = normal.dot(dir);
    let numer = normal.dot(&(plane.origin() - origin));

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlane::OnPlane
        } else {
            LinePlane::Parallel
        }
    } else {
        let t = numer / denom;
        LinePlane::Point { point: origin + dir * t, t }
    }
}

/// Signed distance of a point from a plane (positive on the normal side).
#[must_use]
pub fn signed_distance(point: &Point3, plane: &Plane) -> f64 {
    plane.normal().dot(&(point - plane.origin()))
}
