use std::collections::HashMap;

use super::Point3;

/// Spatial-hash point canonicalizer.
///
/// Maps every queried point to the index of the first point seen within
/// `tolerance` of it, so coincident-within-tolerance points share one
/// index. Used by face sewing, cut-result assembly, and mesh node
/// extraction.
#[derive(Debug)]
pub struct PointMerger {
    tolerance: f64,
    points: Vec<Point3>,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl PointMerger {
    /// Creates a merger with the given coincidence tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(f64::MIN_POSITIVE),
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: &Point3) -> (i64, i64, i64) {
        let inv = 1.0 / self.tolerance;
        (
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        )
    }

    /// Looks up the canonical index for a point without inserting it.
    #[must_use]
    pub fn find(&self, point: &Point3) -> Option<usize> {
        let key = self.cell_key(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (key.0 + dx, key.1 + dy, key.2 + dz);
                    if let Some(entries) = self.cells.get(&neighbor) {
                        for &idx in entries {
                            if (point - self.points[idx]).norm() < self.tolerance {
                                return Some(idx);
                            }
                        }
                    }
                }
            }
        }
        None
    }

    /// Returns the canonical index for a point, inserting it if no point
    /// within tolerance has been seen yet.
    pub fn index_of(&mut self, point: &Point3) -> usize {
        if let Some(idx) = self.find(point) {
            return idx;
        }
        let idx = self.points.len();
        self.points.push(*point);
        let key = self.cell_key(point);
        self.cells.entry(key).or_default().push(idx);
        idx
    }

    /// The canonical (first-seen) position for an index.
    #[must_use]
    pub fn point(&self, index: usize) -> &Point3 {
        &self.points[index]
    }

    /// Number of distinct points seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points have been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
