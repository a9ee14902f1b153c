use crate::error::{Result, TopologyError};
use crate::topology::{ShellId, SolidData, SolidId, TopologyStore};

/// Creates a solid from a closed outer shell and optional void shells.
pub struct MakeSolid {
    outer_shell: ShellId,
    inner_shells: Vec<ShellId>,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation.
    #[must_use]
    pub fn new(outer_shell: ShellId, inner_shells: Vec<ShellId>) -> Self {
        Self { outer_shell, inner_shells }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::ShellNotClosed`] if the outer shell or any
    /// void shell is open.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !store.shell(self.outer_shell)?.is_closed {
            return Err(TopologyError::ShellNotClosed.into());
        }
        for &inner in &self.inner_shells {
            if !store.shell(inner)?.is_closed {
                return Err(TopologyError::ShellNotClosed.into());
            }
        }
        Ok(store.add_solid(SolidData {
            outer_shell: self.outer_shell,
            inner_shells: self.inner_shells.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::ShellData;

    #[test]
    fn open_shell_is_rejected() {
        let mut store = TopologyStore::new();
        let shell = store.add_shell(ShellData { faces: vec![], is_closed: false });
        assert!(MakeSolid::new(shell, vec![]).execute(&mut store).is_err());
    }

    #[test]
    fn closed_shell_builds_a_solid() {
        let mut store = TopologyStore::new();
        let shell = store.add_shell(ShellData { faces: vec![], is_closed: true });
        let solid = MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();
        assert_eq!(store.solid(solid).unwrap().outer_shell, shell);
    }
}
