use crate::error::{OperationError, Result};
use crate::math::{is_same_point, Point3};
use crate::topology::{EdgeData, OrientedEdge, TopologyStore, VertexData, WireData, WireId};

/// Creates a polyline wire from an ordered strip of 3D points.
///
/// Coincident consecutive points (within the length precision) produce
/// zero-length edges and are silently skipped, so discretized section
/// strips with duplicated samples still build a valid wire.
pub struct MakePolylineWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakePolylineWire {
    /// Creates a new `MakePolylineWire` operation. If `close` is set, a
    /// closing edge from the last distinct point back to the first is
    /// added.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotDone`] if fewer than two distinct
    /// points remain after degenerate-edge suppression.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let mut distinct: Vec<Point3> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if distinct.last().is_none_or(|last| !is_same_point(last, p)) {
                distinct.push(*p);
            }
        }
        // A strip that comes back onto its first point closes implicitly.
        let mut close = self.close;
        if distinct.len() > 2 {
            if let (Some(first), Some(last)) = (distinct.first(), distinct.last()) {
                if is_same_point(first, last) {
                    close = true;
                }
            }
        }
        if close {
            while distinct.len() > 1 {
                let drop_last = match (distinct.first(), distinct.last()) {
                    (Some(first), Some(last)) => is_same_point(first, last),
                    _ => false,
                };
                if drop_last {
                    distinct.pop();
                } else {
                    break;
                }
            }
        }

        if distinct.len() < 2 || (close && distinct.len() < 3) {
            return Err(OperationError::NotDone(
                "polyline wire needs at least two distinct points".into(),
            )
            .into());
        }

        let vertex_ids: Vec<_> = distinct
            .iter()
            .map(|p| store.add_vertex(VertexData::new(*p)))
            .collect();

        let n = vertex_ids.len();
        let n_edges = if close { n } else { n - 1 };
        let mut edges = Vec::with_capacity(n_edges);
        for i in 0..n_edges {
            let j = (i + 1) % n;
            let edge_id = store.add_edge(EdgeData::new(vertex_ids[i], vertex_ids[j]));
            edges.push(OrientedEdge::new(edge_id, true));
        }

        Ok(store.add_wire(WireData { edges, is_closed: close }))
    }
}
