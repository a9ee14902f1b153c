use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::point_merger::PointMerger;
use crate::math::Vector3;
use crate::oplog::OpLog;
use crate::tessellation::Triangle3d;

use super::{Node, Panel3, Segment3};

/// The working panel mesh: an ordered panel list plus a node array
/// derived from it.
///
/// The node array is rebuildable from the panels at any time; every
/// mutating operation is expected to call
/// [`make_node_array_from_panels`](TriMesh::make_node_array_from_panels)
/// before the mesh is consumed again.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    panels: Vec<Panel3>,
    nodes: Vec<Node>,
}

impl TriMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from a tessellated triangle list and derives its
    /// node array with the given merge distance.
    #[must_use]
    pub fn from_triangles(triangles: &[Triangle3d], merge_distance: f64) -> Self {
        let mut mesh = Self {
            panels: triangles.iter().map(Panel3::from_triangle).collect(),
            nodes: Vec::new(),
        };
        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(merge_distance, &mut log);
        mesh
    }

    /// Number of panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Panel at `index`.
    #[must_use]
    pub fn panel(&self, index: usize) -> &Panel3 {
        &self.panels[index]
    }

    /// All panels.
    #[must_use]
    pub fn panels(&self) -> &[Panel3] {
        &self.panels
    }

    /// Node at `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// All nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Appends a panel. The node array becomes stale until rebuilt.
    pub fn add_panel(&mut self, panel: Panel3) {
        self.panels.push(panel);
    }

    /// Removes the panel at `index`; later panels shift down one slot.
    pub fn remove_panel_at(&mut self, index: usize) {
        if index < self.panels.len() {
            self.panels.remove(index);
        }
    }

    /// Sum of all panel areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.panels.iter().map(Panel3::area).sum()
    }

    /// Rebuilds the node array from the panels.
    ///
    /// Panel vertices closer than `merge_distance` share one node, and
    /// each panel vertex is snapped onto its node's canonical position.
    /// Node normals are the area-weighted average of their panels'
    /// normals. Returns the node count.
    pub fn make_node_array_from_panels(&mut self, merge_distance: f64, log: &mut OpLog) -> usize {
        self.nodes.clear();
        let mut merger = PointMerger::new(merge_distance.max(f64::MIN_POSITIVE));

        for panel_idx in 0..self.panels.len() {
            for iv in 0..3 {
                let vertex = *self.panels[panel_idx].vertex(iv);
                let node_idx = merger.index_of(&vertex);
                if node_idx == self.nodes.len() {
                    self.nodes.push(Node::new(*merger.point(node_idx)));
                }
                let panel = &mut self.panels[panel_idx];
                panel.set_node_index(iv, node_idx);
                panel.set_vertex(iv, self.nodes[node_idx].point);
                self.nodes[node_idx].add_panel_index(panel_idx);
            }
        }

        for node in &mut self.nodes {
            let mut normal = Vector3::zeros();
            for &panel_idx in node.panel_indices() {
                let panel = &self.panels[panel_idx];
                normal += panel.normal() * panel.area();
            }
            let len = normal.norm();
            node.normal = if len > f64::MIN_POSITIVE { normal / len } else { normal };
        }

        log.append(format!(
            "Extracted {} nodes from the array of {} triangles",
            self.nodes.len(),
            self.panels.len()
        ));
        self.nodes.len()
    }

    /// Moves node `src` onto node `dest` and unifies them.
    ///
    /// Every panel referencing `src` gets that vertex re-pointed to
    /// `dest`; panels collapsed to zero area by the move are removed when
    /// `discard_null_panels` is set. The node array must be rebuilt
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for out-of-range or
    /// identical indices, or if the two nodes do not share a panel edge.
    pub fn merge_nodes(
        &mut self,
        src: usize,
        dest: usize,
        discard_null_panels: bool,
        log: &mut OpLog,
    ) -> Result<()> {
        if src >= self.nodes.len() || dest >= self.nodes.len() {
            log.append("Invalid node index, cancelling move operation");
            return Err(OperationError::InvalidInput("node index out of range".into()).into());
        }
        if src == dest {
            log.append("Source and destination nodes are identical, cancelling move operation");
            return Err(OperationError::InvalidInput("identical node indices".into()).into());
        }

        // The pair must form an edge of an existing panel.
        let shares_panel = self.nodes[src]
            .panel_indices()
            .iter()
            .any(|i| self.nodes[dest].panel_indices().contains(i));
        if !shares_panel {
            log.append("The nodes do not form an edge of an existing triangle, cancelling move operation");
            return Err(
                OperationError::InvalidInput("nodes do not share a panel edge".into()).into(),
            );
        }

        let dest_point = self.nodes[dest].point;
        let mut modified: Vec<usize> = Vec::new();
        for &panel_idx in self.nodes[src].panel_indices() {
            let panel = &mut self.panels[panel_idx];
            for iv in 0..3 {
                if panel.node_index(iv) == Some(src) {
                    panel.set_vertex(iv, dest_point);
                    panel.set_node_index(iv, dest);
                    modified.push(panel_idx);
                    break;
                }
            }
        }
        modified.sort_unstable();

        log.append(format!("Modified {} triangle(s)", modified.len()));

        if discard_null_panels {
            for &panel_idx in modified.iter().rev() {
                if panel_idx < self.panels.len() && self.panels[panel_idx].is_null() {
                    log.append(format!("Discarding null triangle {panel_idx}"));
                    self.remove_panel_at(panel_idx);
                }
            }
        }
        Ok(())
    }

    /// Edges bordering exactly one panel.
    ///
    /// Assumes the node array is current; panels without node indices are
    /// ignored.
    #[must_use]
    pub fn free_edges(&self) -> Vec<Segment3> {
        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for panel in &self.panels {
            for i in 0..3 {
                let (Some(a), Some(b)) = (panel.node_index(i), panel.node_index((i + 1) % 3))
                else {
                    continue;
                };
                if a == b {
                    continue;
                }
                *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let mut free = Vec::new();
        for (&(a, b), &count) in &edge_count {
            if count == 1 {
                free.push(Segment3::new(self.nodes[a].point, self.nodes[b].point));
            }
        }
        free
    }

    /// Appends another mesh's panels (positions only); the node array
    /// becomes stale until rebuilt.
    pub fn append(&mut self, other: &TriMesh) {
        for panel in &other.panels {
            let mut p = panel.clone();
            p.clear_node_indices();
            self.panels.push(p);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Two triangles sharing the edge (1,0,0)-(0,1,0).
    fn two_triangle_mesh() -> TriMesh {
        let mut mesh = TriMesh::new();
        mesh.add_panel(Panel3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)));
        mesh.add_panel(Panel3::new(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)));
        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(1e-6, &mut log);
        mesh
    }

    #[test]
    fn node_array_merges_shared_vertices() {
        let mesh = two_triangle_mesh();
        assert_eq!(mesh.panel_count(), 2);
        assert_eq!(mesh.node_count(), 4);
    }

    #[test]
    fn node_array_round_trip_preserves_geometry() {
        let mut mesh = two_triangle_mesh();
        let before: Vec<[Point3; 3]> = mesh
            .panels()
            .iter()
            .map(|panel| [*panel.vertex(0), *panel.vertex(1), *panel.vertex(2)])
            .collect();

        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(1e-6, &mut log);

        for (panel, original) in mesh.panels().iter().zip(&before) {
            for iv in 0..3 {
                // Re-derive the vertex from the rebuilt node array.
                let node_idx = panel.node_index(iv).unwrap();
                let from_node = mesh.node(node_idx).point;
                assert!((from_node - original[iv]).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn free_edges_of_a_quad_strip() {
        let mesh = two_triangle_mesh();
        // 4 boundary edges are free, the diagonal is shared.
        assert_eq!(mesh.free_edges().len(), 4);
    }

    #[test]
    fn merge_nodes_drops_degenerate_panels() {
        let mut mesh = two_triangle_mesh();
        let mut log = OpLog::new();

        // Merge across the shared edge: node of (1,0,0) onto (0,1,0).
        let src = mesh
            .nodes()
            .iter()
            .position(|n| (n.point - p(1.0, 0.0, 0.0)).norm() < 1e-9)
            .unwrap();
        let dest = mesh
            .nodes()
            .iter()
            .position(|n| (n.point - p(0.0, 1.0, 0.0)).norm() < 1e-9)
            .unwrap();

        let node_count_before = mesh.node_count();
        mesh.merge_nodes(src, dest, true, &mut log).unwrap();
        mesh.make_node_array_from_panels(1e-6, &mut log);

        // Both panels referenced the merged edge, so both collapsed.
        assert_eq!(mesh.panel_count(), 0);
        assert_eq!(mesh.node_count(), 0);
        assert!(node_count_before > 0);
    }

    #[test]
    fn merge_of_non_adjacent_nodes_is_rejected() {
        let mut mesh = TriMesh::new();
        mesh.add_panel(Panel3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)));
        mesh.add_panel(Panel3::new(p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(5.0, 1.0, 0.0)));
        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(1e-6, &mut log);

        assert!(mesh.merge_nodes(0, 4, true, &mut log).is_err());
    }

    #[test]
    fn merge_reduces_node_count_by_one() {
        // Three triangles around a fan; merge two adjacent rim nodes.
        let mut mesh = TriMesh::new();
        mesh.add_panel(Panel3::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(1.0, 2.0, 0.0)));
        mesh.add_panel(Panel3::new(p(2.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(1.0, 2.0, 0.0)));
        mesh.add_panel(Panel3::new(p(4.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(1.0, 2.0, 0.0)));
        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(1e-6, &mut log);
        let nodes_before = mesh.node_count();
        let panels_before = mesh.panel_count();

        let src = mesh
            .nodes()
            .iter()
            .position(|n| (n.point - p(4.0, 0.0, 0.0)).norm() < 1e-9)
            .unwrap();
        let dest = mesh
            .nodes()
            .iter()
            .position(|n| (n.point - p(2.0, 0.0, 0.0)).norm() < 1e-9)
            .unwrap();
        mesh.merge_nodes(src, dest, true, &mut log).unwrap();
        mesh.make_node_array_from_panels(1e-6, &mut log);

        // The middle triangle collapsed; the other two survive and the
        // node count drops by exactly the merged node plus none other.
        assert_eq!(mesh.panel_count(), panels_before - 1);
        assert_eq!(mesh.node_count(), nodes_before - 1);
    }
}
