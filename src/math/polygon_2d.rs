use super::{Point2, TOLERANCE};

/// Signed area of a 2D polygon (positive for counter-clockwise winding).
#[must_use]
pub fn signed_area_2d(polygon: &[Point2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    0.5 * sum
}

/// Whether a point lies inside a 2D polygon (crossing-number test).
///
/// Points on the boundary may be classified either way; callers that care
/// about boundary points must test for them separately.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Parameter values in `[0, 1]` at which the segment `a0 -> a1` crosses the
/// segment `b0 -> b1`, if they cross at a single point.
#[must_use]
pub fn segment_crossing_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<f64> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.x * db.y - da.y * db.x;
    if denom.abs() < TOLERANCE {
        return None;
    }
    let diff = b0 - a0;
    let t = (diff.x * db.y - diff.y * db.x) / denom;
    let u = (diff.x * da.y - diff.y * da.x) / denom;
    if (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) && (-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}
