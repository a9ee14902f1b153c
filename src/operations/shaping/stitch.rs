use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::point_merger::PointMerger;
use crate::topology::{FaceId, ShellData, ShellId, TopologyStore};

/// Outcome of a sewing operation.
#[derive(Debug)]
pub struct StitchReport {
    /// The shells assembled from the input faces, one per connected
    /// component.
    pub shells: Vec<ShellId>,
    /// Number of edges bordering exactly one face.
    pub free_edges: usize,
    /// Number of edges shared by exactly two faces.
    pub contiguous_edges: usize,
}

impl StitchReport {
    /// Whether the stitch produced a single watertight shell.
    #[must_use]
    pub fn is_single_closed_shell(&self, store: &TopologyStore) -> bool {
        match self.shells.as_slice() {
            [only] => store.shell(*only).is_ok_and(|s| s.is_closed),
            _ => false,
        }
    }
}

/// Sews a set of faces into shells.
///
/// Face boundaries whose endpoints coincide within the sewing tolerance
/// are treated as the same edge; faces connected through shared edges are
/// grouped into one shell. A shell is closed when every one of its edges
/// is shared by exactly two faces.
pub struct Stitcher {
    tolerance: f64,
    faces: Vec<FaceId>,
}

impl Stitcher {
    /// Creates a stitcher with the given sewing tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, faces: Vec::new() }
    }

    /// Adds one face to be sewn.
    pub fn add_face(&mut self, face: FaceId) {
        self.faces.push(face);
    }

    /// Adds several faces to be sewn.
    pub fn add_faces(&mut self, faces: impl IntoIterator<Item = FaceId>) {
        self.faces.extend(faces);
    }

    /// Number of faces queued for sewing.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Performs the sewing, creating the shells in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotDone`] if no faces were added, or a
    /// topology error if a face is stale.
    pub fn perform(&self, store: &mut TopologyStore) -> Result<StitchReport> {
        if self.faces.is_empty() {
            return Err(OperationError::NotDone("no faces to stitch".into()).into());
        }

        // Canonicalize boundary endpoints, then key every boundary edge by
        // its unordered endpoint pair.
        let mut merger = PointMerger::new(self.tolerance);
        let mut edge_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (face_idx, &face_id) in self.faces.iter().enumerate() {
            for ring in face_boundary_rings(store, face_id)? {
                let ids: Vec<usize> = ring.iter().map(|p| merger.index_of(p)).collect();
                let n = ids.len();
                for i in 0..n {
                    let a = ids[i];
                    let b = ids[(i + 1) % n];
                    if a == b {
                        continue;
                    }
                    let key = (a.min(b), a.max(b));
                    edge_faces.entry(key).or_default().push(face_idx);
                }
            }
        }

        let mut free_edges = 0usize;
        let mut contiguous_edges = 0usize;
        let mut uf = UnionFind::new(self.faces.len());
        for users in edge_faces.values() {
            match users.as_slice() {
                [_] => free_edges += 1,
                [a, b] => {
                    contiguous_edges += 1;
                    uf.union(*a, *b);
                }
                // Non-manifold edges join their faces too, but can never
                // close a shell.
                many => {
                    for w in many.windows(2) {
                        uf.union(w[0], w[1]);
                    }
                }
            }
        }

        // Group faces by component, preserving input order within each.
        let mut components: HashMap<usize, Vec<FaceId>> = HashMap::new();
        let mut order: Vec<usize> = Vec::new();
        for (face_idx, &face_id) in self.faces.iter().enumerate() {
            let root = uf.find(face_idx);
            if !components.contains_key(&root) {
                order.push(root);
            }
            components.entry(root).or_default().push(face_id);
        }

        // A component is closed when none of its edges is free or
        // non-manifold.
        let mut open_components: std::collections::HashSet<usize> =
            std::collections::HashSet::new();
        for users in edge_faces.values() {
            if users.len() != 2 {
                open_components.insert(uf.find(users[0]));
            }
        }

        let mut shells = Vec::with_capacity(order.len());
        for root in order {
            let faces = components.remove(&root).unwrap_or_default();
            let is_closed = !open_components.contains(&root);
            shells.push(store.add_shell(ShellData { faces, is_closed }));
        }

        Ok(StitchReport { shells, free_edges, contiguous_edges })
    }
}

/// All boundary rings of a face: the outer wire plus any hole wires.
fn face_boundary_rings(
    store: &TopologyStore,
    face_id: FaceId,
) -> Result<Vec<Vec<crate::math::Point3>>> {
    let mut rings = vec![store.face_polygon(face_id)?];
    rings.extend(store.face_holes(face_id)?);
    Ok(rings)
}

/// Minimal union-find over face indices.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeFace, MakePolylineWire};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn quad_face(store: &mut TopologyStore, pts: [Point3; 4]) -> FaceId {
        let wire = MakePolylineWire::new(pts.to_vec(), true).execute(store).unwrap();
        MakeFace::new(wire, vec![]).execute(store).unwrap()
    }

    #[test]
    fn box_faces_stitch_into_one_closed_shell() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), 1.0, 1.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let shell_id = store.solid(solid).unwrap().outer_shell;
        let faces = store.shell(shell_id).unwrap().faces.clone();

        let mut stitcher = Stitcher::new(1e-4);
        stitcher.add_faces(faces);
        let report = stitcher.perform(&mut store).unwrap();

        assert_eq!(report.shells.len(), 1);
        assert_eq!(report.free_edges, 0);
        assert_eq!(report.contiguous_edges, 12);
        assert!(report.is_single_closed_shell(&store));
    }

    #[test]
    fn two_disjoint_quads_make_two_open_shells() {
        let mut store = TopologyStore::new();
        let a = quad_face(
            &mut store,
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        );
        let b = quad_face(
            &mut store,
            [p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(6.0, 1.0, 0.0), p(5.0, 1.0, 0.0)],
        );

        let mut stitcher = Stitcher::new(1e-4);
        stitcher.add_faces([a, b]);
        let report = stitcher.perform(&mut store).unwrap();

        assert_eq!(report.shells.len(), 2);
        assert_eq!(report.free_edges, 8);
        assert_eq!(report.contiguous_edges, 0);
        for shell in &report.shells {
            assert!(!store.shell(*shell).unwrap().is_closed);
        }
    }

    #[test]
    fn adjacent_quads_share_an_edge_within_tolerance() {
        let mut store = TopologyStore::new();
        let a = quad_face(
            &mut store,
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        );
        // Shares the x=1 edge, offset by less than the tolerance.
        let b = quad_face(
            &mut store,
            [
                p(1.0 + 2e-5, 0.0, 0.0),
                p(2.0, 0.0, 0.0),
                p(2.0, 1.0, 0.0),
                p(1.0 + 2e-5, 1.0, 0.0),
            ],
        );

        let mut stitcher = Stitcher::new(1e-4);
        stitcher.add_faces([a, b]);
        let report = stitcher.perform(&mut store).unwrap();

        assert_eq!(report.shells.len(), 1);
        assert_eq!(report.contiguous_edges, 1);
        assert_eq!(report.free_edges, 6);
    }

    #[test]
    fn no_faces_is_an_error() {
        let mut store = TopologyStore::new();
        let stitcher = Stitcher::new(1e-4);
        assert!(stitcher.perform(&mut store).is_err());
    }
}
