use std::collections::VecDeque;

use super::TriMesh;

/// Maximum number of snapshots the history retains.
pub const MAX_SNAPSHOTS: usize = 25;

/// Bounded undo/redo history of full mesh snapshots.
///
/// Invariants: `position < len()` whenever the history is non-empty;
/// taking a picture discards every snapshot beyond the current position
/// (the redo branch) before appending; the oldest snapshot is evicted
/// first once the capacity is reached.
#[derive(Debug, Default)]
pub struct MeshHistory {
    snapshots: VecDeque<TriMesh>,
    position: usize,
    capacity: usize,
}

impl MeshHistory {
    /// Creates a history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_SNAPSHOTS)
    }

    /// Creates a history with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            position: 0,
            capacity: capacity.max(1),
        }
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the history holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current position in the stack.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// `(position, len)` for undo/redo button enablement and labels.
    #[must_use]
    pub fn status(&self) -> (usize, usize) {
        (self.position, self.snapshots.len())
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.position + 1 < self.snapshots.len()
    }

    /// Pushes a snapshot of the mesh.
    ///
    /// The redo branch (snapshots beyond the current position) is pruned
    /// first; the oldest snapshot is evicted if the capacity is exceeded.
    /// The position ends on the new top of the stack.
    pub fn take_picture(&mut self, mesh: &TriMesh) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.position + 1);
        }
        self.snapshots.push_back(mesh.clone());
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.position = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot and returns it, or `None` at the bottom of
    /// the stack (an explicit no-op).
    pub fn undo(&mut self) -> Option<&TriMesh> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.snapshots.get(self.position)
    }

    /// Steps forward one snapshot and returns it, or `None` at the top of
    /// the stack (an explicit no-op).
    pub fn redo(&mut self) -> Option<&TriMesh> {
        if self.position + 1 >= self.snapshots.len() {
            return None;
        }
        self.position += 1;
        self.snapshots.get(self.position)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::Panel3;
    use crate::math::Point3;
    use crate::oplog::OpLog;

    fn mesh_with_panels(n: usize) -> TriMesh {
        let mut mesh = TriMesh::new();
        #[allow(clippy::cast_precision_loss)]
        for i in 0..n {
            let x = i as f64 * 2.0;
            mesh.add_panel(Panel3::new(
                Point3::new(x, 0.0, 0.0),
                Point3::new(x + 1.0, 0.0, 0.0),
                Point3::new(x, 1.0, 0.0),
            ));
        }
        let mut log = OpLog::new();
        mesh.make_node_array_from_panels(1e-6, &mut log);
        mesh
    }

    #[test]
    fn n_pictures_give_size_n_position_top() {
        let mut history = MeshHistory::new();
        for i in 1..=10 {
            history.take_picture(&mesh_with_panels(i));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.position(), 9);
    }

    #[test]
    fn undo_and_redo_move_by_one() {
        let mut history = MeshHistory::new();
        for i in 1..=3 {
            history.take_picture(&mesh_with_panels(i));
        }
        assert_eq!(history.undo().unwrap().panel_count(), 2);
        assert_eq!(history.position(), 1);
        assert_eq!(history.undo().unwrap().panel_count(), 1);
        assert_eq!(history.position(), 0);
        assert!(history.undo().is_none(), "undo at the bottom is a no-op");
        assert_eq!(history.position(), 0);

        assert_eq!(history.redo().unwrap().panel_count(), 2);
        assert_eq!(history.redo().unwrap().panel_count(), 3);
        assert!(history.redo().is_none(), "redo at the top is a no-op");
        assert_eq!(history.position(), 2);
    }

    #[test]
    fn new_picture_after_undo_prunes_the_redo_branch() {
        let mut history = MeshHistory::new();
        for i in 1..=5 {
            history.take_picture(&mesh_with_panels(i));
        }
        history.undo();
        history.undo();
        let position_before = history.position();
        assert_eq!(position_before, 2);

        history.take_picture(&mesh_with_panels(9));
        assert_eq!(history.len(), position_before + 2);
        assert_eq!(history.position(), history.len() - 1);
        assert!(history.redo().is_none());
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut history = MeshHistory::new();
        for i in 1..=30 {
            history.take_picture(&mesh_with_panels(i));
        }
        assert_eq!(history.len(), MAX_SNAPSHOTS);
        assert_eq!(history.position(), MAX_SNAPSHOTS - 1);

        // Walk all the way back: the oldest retained snapshot is #6.
        let mut last_seen = 0;
        while history.can_undo() {
            last_seen = history.undo().unwrap().panel_count();
        }
        assert_eq!(last_seen, 6);
    }

    #[test]
    fn status_reports_position_and_size() {
        let mut history = MeshHistory::new();
        history.take_picture(&mesh_with_panels(1));
        history.take_picture(&mesh_with_panels(2));
        assert_eq!(history.status(), (1, 2));
        history.undo();
        assert_eq!(history.status(), (0, 2));
    }
}
