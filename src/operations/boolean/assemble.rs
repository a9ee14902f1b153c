use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::intersect_3d::signed_distance;
use crate::math::point_merger::PointMerger;
use crate::math::polygon_3d::{point_in_polygon_3d, polygon_area_3d};
use crate::math::{Point3, LENGTH_PRECISION, TOLERANCE};
use crate::operations::creation::{MakeFace, MakePolylineWire};
use crate::topology::{FaceId, ShellData, ShellId, TopologyStore};

use super::face_info::FaceInfo;
use super::split::FaceFragment;

/// Assembles surviving face fragments into shells.
///
/// Fragment boundary points are canonicalized through a spatial merger so
/// shared edges coincide exactly, then faces connected through shared
/// edges are grouped into shells. When `seams` is given (the split
/// operation), edges lying on a seam face do not connect fragments, so
/// the two half-bodies of a split separate into distinct shells.
///
/// Closed result shells are reoriented outward: a shell whose signed
/// volume is negative has every face sense flipped, the reversed-shell
/// correction of the cut pipeline.
pub(crate) fn assemble_fragments(
    store: &mut TopologyStore,
    fragments: &[FaceFragment],
    seams: Option<&[FaceInfo]>,
) -> Result<Vec<ShellId>> {
    if fragments.is_empty() {
        return Err(OperationError::Failed("no fragments to assemble".into()).into());
    }

    let mut merger = PointMerger::new(LENGTH_PRECISION * 10.0);

    // Build faces; fragments with a reversed sense are rebuilt with the
    // opposite winding so every result face is same-sense.
    let mut face_ids: Vec<FaceId> = Vec::with_capacity(fragments.len());
    let mut rings: Vec<Vec<usize>> = Vec::with_capacity(fragments.len());
    for frag in fragments {
        let boundary = canonical_ring(&mut merger, &frag.boundary, frag.same_sense);
        if boundary.len() < 3 {
            continue;
        }
        let points: Vec<Point3> = boundary.iter().map(|&i| *merger.point(i)).collect();
        if polygon_area_3d(&points) < TOLERANCE {
            continue;
        }

        let outer_wire = MakePolylineWire::new(points, true).execute(store)?;
        let mut hole_wires = Vec::with_capacity(frag.holes.len());
        for hole in &frag.holes {
            let ring = canonical_ring(&mut merger, hole, frag.same_sense);
            if ring.len() < 3 {
                continue;
            }
            let pts: Vec<Point3> = ring.iter().map(|&i| *merger.point(i)).collect();
            hole_wires.push(MakePolylineWire::new(pts, true).execute(store)?);
        }
        face_ids.push(MakeFace::new(outer_wire, hole_wires).execute(store)?);
        rings.push(boundary);
    }

    if face_ids.is_empty() {
        return Err(OperationError::Failed("all fragments were degenerate".into()).into());
    }

    // Edge usage over canonical indices.
    let mut edge_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (face_idx, ring) in rings.iter().enumerate() {
        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            if a == b {
                continue;
            }
            edge_faces
                .entry((a.min(b), a.max(b)))
                .or_default()
                .push(face_idx);
        }
    }

    let mut uf = UnionFind::new(face_ids.len());
    let mut open_roots: Vec<usize> = Vec::new();
    for (&(a, b), users) in &edge_faces {
        let connects = users.len() == 2
            && !is_seam_edge(merger.point(a), merger.point(b), seams);
        if connects {
            uf.union(users[0], users[1]);
        }
        if users.len() != 2 {
            open_roots.push(users[0]);
        }
    }

    // Group faces by component, preserving fragment order.
    let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut order: Vec<usize> = Vec::new();
    for face_idx in 0..face_ids.len() {
        let root = uf.find(face_idx);
        if !components.contains_key(&root) {
            order.push(root);
        }
        components.entry(root).or_default().push(face_idx);
    }
    let open_roots: std::collections::HashSet<usize> =
        open_roots.into_iter().map(|f| uf.find(f)).collect();

    let mut shells = Vec::with_capacity(order.len());
    for root in order {
        let member_indices = components.remove(&root).unwrap_or_default();
        let faces: Vec<FaceId> = member_indices.iter().map(|&i| face_ids[i]).collect();
        let is_closed = !open_roots.contains(&root) && seams.is_none();
        let shell_id = store.add_shell(ShellData { faces, is_closed });
        if is_closed && store.shell_signed_volume(shell_id)? < 0.0 {
            store.flip_shell(shell_id)?;
        }
        shells.push(shell_id);
    }
    Ok(shells)
}

/// Canonicalizes a ring through the merger, dropping collapsed vertices.
/// Reverses the ring when the source sense is reversed, so the rebuilt
/// face carries the effective outward normal with `same_sense == true`.
fn canonical_ring(merger: &mut PointMerger, ring: &[Point3], same_sense: bool) -> Vec<usize> {
    let mut ids: Vec<usize> = Vec::with_capacity(ring.len());
    let iter: Box<dyn Iterator<Item = &Point3>> = if same_sense {
        Box::new(ring.iter())
    } else {
        Box::new(ring.iter().rev())
    };
    for p in iter {
        let id = merger.index_of(p);
        if ids.last() == Some(&id) {
            continue;
        }
        ids.push(id);
    }
    while ids.len() > 1 && ids.first() == ids.last() {
        ids.pop();
    }
    ids
}

/// Whether an edge lies on the seam face set.
///
/// Both endpoints and the midpoint must each land on some seam face — not
/// necessarily the same one, since a knife is usually faceted into many
/// coplanar patches and a seam edge can span several of them.
fn is_seam_edge(a: &Point3, b: &Point3, seams: Option<&[FaceInfo]>) -> bool {
    let Some(seams) = seams else {
        return false;
    };
    let mid = Point3::from((a.coords + b.coords) * 0.5);
    let result = [a, b, &mid].into_iter().all(|p| {
        seams.iter().any(|seam| {
            signed_distance(p, &seam.plane).abs() < LENGTH_PRECISION * 100.0
                && point_in_polygon_3d(p, &seam.polygon, &seam.plane)
        })
    });
    result
}

/// Minimal union-find over fragment indices.
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
