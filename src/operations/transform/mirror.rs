use crate::error::Result;
use crate::math::Point3;
use crate::operations::creation::{MakeFace, MakePolylineWire};
use crate::topology::{FaceId, Shape, ShellData, ShellId, SolidData, TopologyStore};

/// Creates the XZ-mirror (y → −y) of a shape as a new shape.
///
/// Mirroring reverses orientation, so each face is rebuilt with a winding
/// that keeps its outward normal the mirror image of the original. The
/// source shape is left untouched; shell connectivity and closedness carry
/// over unchanged.
pub struct MirrorXz {
    shape: Shape,
}

impl MirrorXz {
    /// Creates a new `MirrorXz` operation.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    /// Executes the mirror, creating the mirrored shape in the topology
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the source topology cannot be read or a
    /// mirrored face cannot be rebuilt.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Shape> {
        match self.shape {
            Shape::Shell(shell_id) => Ok(Shape::Shell(mirror_shell(store, shell_id)?)),
            Shape::Solid(solid_id) => {
                let solid = store.solid(solid_id)?.clone();
                let outer = mirror_shell(store, solid.outer_shell)?;
                let inners = solid
                    .inner_shells
                    .iter()
                    .map(|&s| mirror_shell(store, s))
                    .collect::<Result<Vec<ShellId>>>()?;
                Ok(Shape::Solid(store.add_solid(SolidData {
                    outer_shell: outer,
                    inner_shells: inners,
                })))
            }
        }
    }
}

fn mirror_shell(store: &mut TopologyStore, shell_id: ShellId) -> Result<ShellId> {
    let source = store.shell(shell_id)?.clone();
    let mut faces = Vec::with_capacity(source.faces.len());
    for face_id in source.faces {
        faces.push(mirror_face(store, face_id)?);
    }
    Ok(store.add_shell(ShellData { faces, is_closed: source.is_closed }))
}

fn mirror_face(store: &mut TopologyStore, face_id: FaceId) -> Result<FaceId> {
    let same_sense = store.face(face_id)?.same_sense;
    let outer = mirror_ring(&store.face_polygon(face_id)?, same_sense);
    let holes: Vec<Vec<Point3>> = store
        .face_holes(face_id)?
        .iter()
        .map(|ring| mirror_ring(ring, same_sense))
        .collect();

    let outer_wire = MakePolylineWire::new(outer, true).execute(store)?;
    let mut hole_wires = Vec::with_capacity(holes.len());
    for ring in holes {
        hole_wires.push(MakePolylineWire::new(ring, true).execute(store)?);
    }
    MakeFace::new(outer_wire, hole_wires).execute(store)
}

/// Mirrors a boundary ring across the XZ plane.
///
/// The order is reversed for `same_sense` faces (and kept for reversed
/// faces) so the rebuilt face, which is always `same_sense`, carries the
/// mirrored outward normal.
fn mirror_ring(ring: &[Point3], same_sense: bool) -> Vec<Point3> {
    let mirrored = ring.iter().map(|p| Point3::new(p.x, -p.y, p.z));
    if same_sense {
        mirrored.rev().collect()
    } else {
        mirrored.collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_3d::polygon_centroid;
    use crate::operations::creation::MakeBox;

    #[test]
    fn mirrored_box_sits_at_negative_y() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 1.0, 0.0), 1.0, 2.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let mirrored = MirrorXz::new(Shape::Solid(solid)).execute(&mut store).unwrap();
        let (min, max) = store.shape_bounding_box(mirrored).unwrap();
        assert!((min.y + 3.0).abs() < 1e-9);
        assert!((max.y + 1.0).abs() < 1e-9);

        // Source is untouched.
        let (src_min, _) = store.shape_bounding_box(Shape::Solid(solid)).unwrap();
        assert!((src_min.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mirrored_normals_point_outward() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 1.0, 0.0), 2.0, 2.0, 2.0)
            .execute(&mut store)
            .unwrap();
        let mirrored = MirrorXz::new(Shape::Solid(solid)).execute(&mut store).unwrap();

        let center = Point3::new(1.0, -2.0, 1.0);
        for face_id in store.shape_faces(mirrored).unwrap() {
            let normal = store.face_normal(face_id).unwrap();
            let polygon = store.face_polygon(face_id).unwrap();
            let to_face = polygon_centroid(&polygon) - center;
            assert!(normal.dot(&to_face) > 0.0, "mirrored face normal flipped inward");
        }
    }

    #[test]
    fn shell_closedness_carries_over() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 0.5, 0.0), 1.0, 1.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let shell_id = store.solid(solid).unwrap().outer_shell;
        let mirrored = MirrorXz::new(Shape::Shell(shell_id)).execute(&mut store).unwrap();
        let Shape::Shell(mirrored_shell) = mirrored else {
            panic!("expected a shell");
        };
        assert!(store.shell(mirrored_shell).unwrap().is_closed);
    }
}
