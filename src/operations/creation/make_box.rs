use crate::error::{OperationError, Result};
use crate::math::{Point3, LENGTH_PRECISION};
use crate::operations::creation::{MakeFace, MakePolylineWire, MakeSolid};
use crate::topology::{ShellData, SolidId, TopologyStore};

/// Creates an axis-aligned box solid.
///
/// Boxes serve as simple cutting tools (wing boxes) and test fixtures.
pub struct MakeBox {
    corner: Point3,
    dx: f64,
    dy: f64,
    dz: f64,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation from the minimum corner and the
    /// three edge lengths.
    #[must_use]
    pub fn new(corner: Point3, dx: f64, dy: f64, dz: f64) -> Self {
        Self { corner, dx, dy, dz }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge length is not positive.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.dx < LENGTH_PRECISION || self.dy < LENGTH_PRECISION || self.dz < LENGTH_PRECISION {
            return Err(OperationError::InvalidInput("box extents must be positive".into()).into());
        }

        let o = self.corner;
        let (dx, dy, dz) = (self.dx, self.dy, self.dz);
        let c = |i: f64, j: f64, k: f64| Point3::new(o.x + i * dx, o.y + j * dy, o.z + k * dz);

        // Each loop is wound counter-clockwise seen from outside the box.
        let quads: [[Point3; 4]; 6] = [
            // bottom (z-)
            [c(0.0, 0.0, 0.0), c(0.0, 1.0, 0.0), c(1.0, 1.0, 0.0), c(1.0, 0.0, 0.0)],
            // top (z+)
            [c(0.0, 0.0, 1.0), c(1.0, 0.0, 1.0), c(1.0, 1.0, 1.0), c(0.0, 1.0, 1.0)],
            // front (y-)
            [c(0.0, 0.0, 0.0), c(1.0, 0.0, 0.0), c(1.0, 0.0, 1.0), c(0.0, 0.0, 1.0)],
            // back (y+)
            [c(0.0, 1.0, 0.0), c(0.0, 1.0, 1.0), c(1.0, 1.0, 1.0), c(1.0, 1.0, 0.0)],
            // left (x-)
            [c(0.0, 0.0, 0.0), c(0.0, 0.0, 1.0), c(0.0, 1.0, 1.0), c(0.0, 1.0, 0.0)],
            // right (x+)
            [c(1.0, 0.0, 0.0), c(1.0, 1.0, 0.0), c(1.0, 1.0, 1.0), c(1.0, 0.0, 1.0)],
        ];

        let mut faces = Vec::with_capacity(6);
        for quad in &quads {
            let wire = MakePolylineWire::new(quad.to_vec(), true).execute(store)?;
            faces.push(MakeFace::new(wire, vec![]).execute(store)?);
        }

        let shell = store.add_shell(ShellData { faces, is_closed: true });
        MakeSolid::new(shell, vec![]).execute(store)
    }
}
