use crate::error::{AeromeshError, GeometryError, OperationError, Result};
use crate::math::polygon_3d::polygon_area_3d;
use crate::math::{Point3, LENGTH_PRECISION};
use crate::operations::creation::{MakeFace, MakePolylineWire};
use crate::topology::{FaceId, TopologyStore, WireId};

/// Builds ruled faces through an ordered sequence of section wires, the
/// equivalent of a C0 through-sections sweep.
///
/// Consecutive wires are connected by quads between matching points; the
/// wires must carry the same number of points. Quads that are not planar
/// within the length precision are split along a diagonal into two
/// triangles, and collapsed quads (converging strips at a tip) degrade to
/// single triangles. No smoothing is applied, so sharp leading and
/// trailing edges stay sharp.
pub struct Loft {
    wires: Vec<WireId>,
}

impl Loft {
    /// Creates a new `Loft` operation over the given section wires.
    #[must_use]
    pub fn new(wires: Vec<WireId>) -> Self {
        Self { wires }
    }

    /// Executes the loft, creating the side faces in the topology store.
    ///
    /// Lofting fewer than two wires is a no-op and returns no faces.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if two consecutive wires
    /// carry different point counts, or an error from face construction.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Vec<FaceId>> {
        let mut faces = Vec::new();
        if self.wires.len() < 2 {
            return Ok(faces);
        }

        for pair in self.wires.windows(2) {
            let left = store.wire_points(pair[0])?;
            let right = store.wire_points(pair[1])?;
            if left.len() != right.len() {
                return Err(OperationError::InvalidInput(format!(
                    "ruled loft requires matching point counts, got {} and {}",
                    left.len(),
                    right.len()
                ))
                .into());
            }
            // A pair of closed section rings lofts all the way around.
            let wrap = store.wire(pair[0])?.is_closed && store.wire(pair[1])?.is_closed;
            let n = left.len();
            let n_quads = if wrap { n } else { n - 1 };
            for i in 0..n_quads {
                let j = (i + 1) % n;
                let quad = [left[i], left[j], right[j], right[i]];
                append_patch(store, &quad, &mut faces)?;
            }
        }
        Ok(faces)
    }
}

/// Adds the faces covering one ruled quad, splitting or degrading it as
/// needed. Degenerate patches are skipped.
fn append_patch(
    store: &mut TopologyStore,
    quad: &[Point3; 4],
    faces: &mut Vec<FaceId>,
) -> Result<()> {
    let min_area = LENGTH_PRECISION * LENGTH_PRECISION;
    if polygon_area_3d(quad) < min_area {
        return Ok(());
    }

    match make_patch_face(store, quad) {
        Ok(face) => {
            faces.push(face);
            Ok(())
        }
        Err(AeromeshError::Geometry(GeometryError::NonPlanar(_))) => {
            // Twisted quad: split along the diagonal into two triangles.
            for tri in [
                [quad[0], quad[1], quad[2]],
                [quad[0], quad[2], quad[3]],
            ] {
                if polygon_area_3d(&tri) < min_area {
                    continue;
                }
                faces.push(make_patch_face(store, &tri)?);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn make_patch_face(store: &mut TopologyStore, loop_points: &[Point3]) -> Result<FaceId> {
    let wire = MakePolylineWire::new(loop_points.to_vec(), true).execute(store)?;
    MakeFace::new(wire, vec![]).execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn strip(store: &mut TopologyStore, pts: Vec<Point3>) -> WireId {
        MakePolylineWire::new(pts, false).execute(store).unwrap()
    }

    #[test]
    fn planar_strips_produce_quads() {
        let mut store = TopologyStore::new();
        let a = strip(
            &mut store,
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)],
        );
        let b = strip(
            &mut store,
            vec![p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 1.0, 0.0)],
        );
        let faces = Loft::new(vec![a, b]).execute(&mut store).unwrap();
        assert_eq!(faces.len(), 2);
        for f in faces {
            assert_eq!(store.face_polygon(f).unwrap().len(), 4);
        }
    }

    #[test]
    fn twisted_quad_is_split_into_triangles() {
        let mut store = TopologyStore::new();
        let a = strip(&mut store, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let b = strip(&mut store, vec![p(0.0, 1.0, 0.2), p(1.0, 1.0, 0.0)]);
        let faces = Loft::new(vec![a, b]).execute(&mut store).unwrap();
        assert_eq!(faces.len(), 2);
        for f in faces {
            assert_eq!(store.face_polygon(f).unwrap().len(), 3);
        }
    }

    #[test]
    fn shared_corner_degrades_quad_to_triangle() {
        let mut store = TopologyStore::new();
        // The strips share their first point, as at a wing tip.
        let a = strip(&mut store, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let b = strip(&mut store, vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0)]);
        let faces = Loft::new(vec![a, b]).execute(&mut store).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(store.face_polygon(faces[0]).unwrap().len(), 3);
    }

    #[test]
    fn mismatched_counts_fail() {
        let mut store = TopologyStore::new();
        let a = strip(&mut store, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let b = strip(
            &mut store,
            vec![p(0.0, 1.0, 0.0), p(0.5, 1.0, 0.0), p(1.0, 1.0, 0.0)],
        );
        assert!(Loft::new(vec![a, b]).execute(&mut store).is_err());
    }

    #[test]
    fn single_wire_is_a_no_op() {
        let mut store = TopologyStore::new();
        let a = strip(&mut store, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let faces = Loft::new(vec![a]).execute(&mut store).unwrap();
        assert!(faces.is_empty());
    }
}
