use crate::error::Result;
use crate::math::{Vector3, LENGTH_PRECISION};
use crate::topology::{Shape, TopologyStore};

use super::map_shape_points;

/// Translates a shape by a displacement vector, in place.
pub struct Translate {
    shape: Shape,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(shape: Shape, displacement: Vector3) -> Self {
        Self { shape, displacement }
    }

    /// Executes the translation.
    ///
    /// A displacement shorter than the length precision is a no-op, so
    /// callers need not special-case near-zero positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape's topology cannot be read.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if self.displacement.norm() < LENGTH_PRECISION {
            return Ok(());
        }
        let d = self.displacement;
        map_shape_points(store, self.shape, &|p| p + d)
    }
}
