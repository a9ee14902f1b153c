use crate::error::{Result, TopologyError};
use crate::geometry::Plane;
use crate::math::LENGTH_PRECISION;
use crate::topology::{FaceData, FaceId, TopologyStore, WireId};

/// Creates a planar face from a closed outer wire and optional hole wires.
///
/// The plane is fitted to the outer boundary; the face normal follows the
/// boundary winding (counter-clockwise seen from the normal side).
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self { outer_wire, inner_wires }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if the outer wire is open, degenerate, or not
    /// planar within the length precision.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let wire = store.wire(self.outer_wire)?;
        if !wire.is_closed {
            return Err(TopologyError::WireNotClosed.into());
        }

        let boundary = store.wire_points(self.outer_wire)?;
        let plane = Plane::fit_polygon(&boundary, LENGTH_PRECISION)?;

        Ok(store.add_face(FaceData {
            plane,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense: true,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakePolylineWire;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn face_from_ccw_square_points_up() {
        let mut store = TopologyStore::new();
        let wire = MakePolylineWire::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let normal = store.face_normal(face).unwrap();
        assert!(normal.z > 0.99);
    }

    #[test]
    fn open_wire_is_rejected() {
        let mut store = TopologyStore::new();
        let wire = MakePolylineWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();
        assert!(MakeFace::new(wire, vec![]).execute(&mut store).is_err());
    }

    #[test]
    fn twisted_quad_is_rejected() {
        let mut store = TopologyStore::new();
        let wire = MakePolylineWire::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.3),
                p(0.0, 1.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        assert!(MakeFace::new(wire, vec![]).execute(&mut store).is_err());
    }
}
