mod mirror;
mod rotate;
mod scale;
mod translate;

pub use mirror::MirrorXz;
pub use rotate::Rotate;
pub use scale::Scale;
pub use translate::Translate;

use std::collections::HashSet;

use crate::error::Result;
use crate::geometry::Plane;
use crate::math::{Point3, LENGTH_PRECISION};
use crate::topology::{Shape, TopologyStore, VertexId};

/// Applies a point mapping to every vertex of a shape, in place, then
/// refits each face's plane to its transformed boundary.
///
/// Only valid for orientation-preserving mappings; reflections must
/// rebuild faces with reversed windings instead (see [`MirrorXz`]).
pub(crate) fn map_shape_points(
    store: &mut TopologyStore,
    shape: Shape,
    f: &dyn Fn(&Point3) -> Point3,
) -> Result<()> {
    let faces = store.shape_faces(shape)?;

    let mut seen: HashSet<VertexId> = HashSet::new();
    for &face_id in &faces {
        let face = store.face(face_id)?;
        let mut wires = vec![face.outer_wire];
        wires.extend_from_slice(&face.inner_wires);
        for wire_id in wires {
            let edges = store.wire(wire_id)?.edges.clone();
            for oe in edges {
                let edge = *store.edge(oe.edge)?;
                for vid in [edge.start, edge.end] {
                    if seen.insert(vid) {
                        let vertex = store.vertex_mut(vid)?;
                        vertex.point = f(&vertex.point);
                    }
                }
            }
        }
    }

    for face_id in faces {
        let boundary = store.face_polygon(face_id)?;
        let plane = Plane::fit_polygon(&boundary, LENGTH_PRECISION * 10.0)?;
        store.face_mut(face_id)?.plane = plane;
    }
    Ok(())
}
