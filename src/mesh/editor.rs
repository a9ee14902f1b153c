use crate::error::{OperationError, Result};
use crate::oplog::OpLog;

use super::{MeshHistory, Panel3, Segment3, TriMesh};

/// The mutually exclusive interaction modes of the mesh editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    /// Next two node picks are (source, destination) of a merge.
    MergingNodes,
    /// Panel picks toggle membership of the deletion selection.
    SelectingPanels,
    /// Every three node picks insert one panel.
    CreatingPanel,
    /// Like `CreatingPanel`, but the pick window shifts by one after each
    /// panel so strips can be entered rapidly.
    CreatingPanelStrip,
}

/// What an editor call did to the mesh, for dependent-view refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    MeshChanged,
}

/// Interactive mesh editing state machine.
///
/// Wraps the working mesh, the pick/selection state of the current mode,
/// the free-edge overlay, and the undo/redo history. Mode transitions are
/// enforced in one place ([`set_mode`](MeshEditor::set_mode)): entering
/// any mode exits all the others and resets transient pick state, so no
/// pair of modes can ever be active at once.
///
/// Every mutating operation rebuilds the node array, pushes a full mesh
/// snapshot, and reports [`EditOutcome::MeshChanged`] so the caller knows
/// to retessellate dependent views.
#[derive(Debug)]
pub struct MeshEditor {
    mesh: TriMesh,
    history: MeshHistory,
    mode: EditMode,
    picked_nodes: Vec<usize>,
    selected_panels: Vec<usize>,
    free_edges: Vec<Segment3>,
    mirror_insert: bool,
    merge_distance: f64,
}

impl MeshEditor {
    /// Creates an editor over a mesh, snapshotting its initial state.
    #[must_use]
    pub fn new(mesh: TriMesh, merge_distance: f64) -> Self {
        let mut history = MeshHistory::new();
        history.take_picture(&mesh);
        let free_edges = mesh.free_edges();
        Self {
            mesh,
            history,
            mode: EditMode::Idle,
            picked_nodes: Vec::new(),
            selected_panels: Vec::new(),
            free_edges,
            mirror_insert: false,
            merge_distance,
        }
    }

    /// The live mesh.
    #[must_use]
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// The free-edge overlay segments.
    #[must_use]
    pub fn free_edges(&self) -> &[Segment3] {
        &self.free_edges
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switches the interaction mode.
    ///
    /// All transient state of the previous mode — picked nodes, panel
    /// selection — is dropped here, and only here, so transitions stay
    /// mutually exclusive without per-pair handling.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.picked_nodes.clear();
        self.selected_panels.clear();
        self.mode = mode;
    }

    /// Also insert the XZ-mirrored copy of every created panel.
    pub fn set_mirror_insert(&mut self, mirror: bool) {
        self.mirror_insert = mirror;
    }

    /// Node picks waiting for the current mode to complete.
    #[must_use]
    pub fn picked_nodes(&self) -> &[usize] {
        &self.picked_nodes
    }

    /// Panels currently selected for deletion.
    #[must_use]
    pub fn selected_panels(&self) -> &[usize] {
        &self.selected_panels
    }

    /// Handles a node pick on the mesh surface.
    ///
    /// In merge mode the second pick triggers the merge; in panel modes
    /// the third pick inserts the panel. Picks in other modes are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range node index or a rejected
    /// merge; the mesh is left unchanged in both cases.
    pub fn pick_node(&mut self, index: usize, log: &mut OpLog) -> Result<EditOutcome> {
        if index >= self.mesh.node_count() {
            log.append("Internal index error picking nodes");
            return Err(OperationError::InvalidInput("picked node out of range".into()).into());
        }
        match self.mode {
            EditMode::MergingNodes => {
                self.picked_nodes.push(index);
                if self.picked_nodes.len() < 2 {
                    return Ok(EditOutcome::Unchanged);
                }
                let (src, dest) = (self.picked_nodes[0], self.picked_nodes[1]);
                self.picked_nodes.clear();
                self.merge_picked(src, dest, log)
            }
            EditMode::CreatingPanel | EditMode::CreatingPanelStrip => {
                self.picked_nodes.push(index);
                if self.picked_nodes.len() < 3 {
                    return Ok(EditOutcome::Unchanged);
                }
                self.insert_picked_panel(log)
            }
            EditMode::Idle | EditMode::SelectingPanels => Ok(EditOutcome::Unchanged),
        }
    }

    /// Toggles a panel in the deletion selection; only meaningful in
    /// [`EditMode::SelectingPanels`].
    pub fn toggle_panel_selection(&mut self, index: usize) {
        if self.mode != EditMode::SelectingPanels || index >= self.mesh.panel_count() {
            return;
        }
        if let Some(pos) = self.selected_panels.iter().position(|&i| i == index) {
            self.selected_panels.swap_remove(pos);
        } else {
            self.selected_panels.push(index);
        }
    }

    /// Deletes every selected panel, highest index first so the remaining
    /// indices stay valid during the removal loop.
    ///
    /// # Errors
    ///
    /// This operation does not fail; the `Result` mirrors the other
    /// mutating entry points.
    pub fn delete_selection(&mut self, log: &mut OpLog) -> Result<EditOutcome> {
        if self.selected_panels.is_empty() {
            log.append("Nothing to delete");
            return Ok(EditOutcome::Unchanged);
        }
        let mut doomed = std::mem::take(&mut self.selected_panels);
        doomed.sort_unstable();
        for &index in doomed.iter().rev() {
            log.append(format!("Deleting panel {index}"));
            self.mesh.remove_panel_at(index);
        }
        log.append(format!(
            "Triangle count = {}\nNode count     = {}",
            self.mesh.panel_count(),
            self.mesh.node_count()
        ));
        self.commit(log);
        Ok(EditOutcome::MeshChanged)
    }

    /// Steps the mesh back one snapshot; a no-op at the bottom.
    pub fn undo(&mut self) -> EditOutcome {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                EditOutcome::MeshChanged
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// Steps the mesh forward one snapshot; a no-op at the top.
    pub fn redo(&mut self) -> EditOutcome {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                EditOutcome::MeshChanged
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// `(position, size)` of the undo stack, for button enablement.
    #[must_use]
    pub fn history_status(&self) -> (usize, usize) {
        self.history.status()
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn merge_picked(&mut self, src: usize, dest: usize, log: &mut OpLog) -> Result<EditOutcome> {
        log.append(format!(
            "Moving node {src} to location of node {dest} and merging"
        ));
        let src_point = self.mesh.node(src).point;
        let dest_point = self.mesh.node(dest).point;

        self.mesh.merge_nodes(src, dest, true, log)?;

        // The merged edge no longer exists; purge overlay segments that
        // touched either node.
        self.free_edges
            .retain(|seg| !seg.touches(&src_point) && !seg.touches(&dest_point));

        self.commit(log);
        Ok(EditOutcome::MeshChanged)
    }

    fn insert_picked_panel(&mut self, log: &mut OpLog) -> Result<EditOutcome> {
        let [i0, i1, i2] = [self.picked_nodes[0], self.picked_nodes[1], self.picked_nodes[2]];
        let panel = Panel3::new(
            self.mesh.node(i0).point,
            self.mesh.node(i1).point,
            self.mesh.node(i2).point,
        );
        if self.mirror_insert {
            let mirrored = panel.xz_symmetric();
            self.mesh.add_panel(panel);
            self.mesh.add_panel(mirrored);
        } else {
            self.mesh.add_panel(panel);
        }

        match self.mode {
            // Strip entry: the last two picks seed the next triangle.
            EditMode::CreatingPanelStrip => {
                self.picked_nodes = vec![i1, i2];
            }
            _ => self.picked_nodes.clear(),
        }

        self.commit(log);
        Ok(EditOutcome::MeshChanged)
    }

    /// Recomputes the free-edge overlay from the live mesh.
    pub fn refresh_free_edges(&mut self) {
        self.free_edges = self.mesh.free_edges();
    }

    /// Post-mutation bookkeeping shared by every mutating operation:
    /// rebuild the node array, then snapshot. The free-edge overlay is
    /// not recomputed here — it only changes through an explicit refresh
    /// or the merge purge.
    fn commit(&mut self, log: &mut OpLog) {
        self.mesh.make_node_array_from_panels(self.merge_distance, log);
        self.history.take_picture(&self.mesh);
    }

    fn restore(&mut self, snapshot: TriMesh) {
        self.mesh = snapshot;
        self.free_edges = self.mesh.free_edges();
    }
}
