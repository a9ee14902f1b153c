use crate::error::Result;
use crate::geometry::BSpline3;
use crate::math::Point3;
use crate::operations::creation::MakePolylineWire;
use crate::topology::{TopologyStore, WireId};

/// Creates a wire by fitting a clamped cubic B-spline through a point
/// strip and sampling it into a densified polyline.
///
/// Used to smooth sparse section definitions before lofting.
pub struct MakeSplineWire {
    points: Vec<Point3>,
    n_out: usize,
}

impl MakeSplineWire {
    /// Creates a new `MakeSplineWire` operation sampling `n_out` points.
    #[must_use]
    pub fn new(points: Vec<Point3>, n_out: usize) -> Self {
        Self { points, n_out }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be built from the points or
    /// the sampled polyline degenerates.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let spline = BSpline3::cubic(self.points.clone())?;
        let sampled = spline.sample(self.n_out);
        MakePolylineWire::new(sampled, false).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn spline_wire_is_densified() {
        let mut store = TopologyStore::new();
        let wire = MakeSplineWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 1.0, 0.0)],
            33,
        )
        .execute(&mut store)
        .unwrap();
        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 32);
        assert!(!data.is_closed);
    }

    #[test]
    fn spline_wire_hits_endpoints() {
        let mut store = TopologyStore::new();
        let wire = MakeSplineWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(4.0, 0.0, 0.0)],
            9,
        )
        .execute(&mut store)
        .unwrap();
        let pts = store.wire_points(wire).unwrap();
        assert!((pts[0] - p(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((pts[pts.len() - 1] - p(4.0, 0.0, 0.0)).norm() < 1e-12);
    }
}
