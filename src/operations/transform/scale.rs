use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{Shape, TopologyStore};

use super::map_shape_points;

/// Scales a shape uniformly about the origin, in place.
pub struct Scale {
    shape: Shape,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(shape: Shape, factor: f64) -> Self {
        Self { shape, factor }
    }

    /// Executes the scaling.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a zero or negative
    /// factor (a negative factor is a reflection, not a scale).
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if self.factor < TOLERANCE {
            return Err(
                OperationError::InvalidInput("scale factor must be positive".into()).into(),
            );
        }
        let k = self.factor;
        map_shape_points(store, self.shape, &|p| Point3::from(p.coords * k))
    }
}
