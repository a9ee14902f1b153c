use nalgebra::{Rotation3, Unit};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{Shape, TopologyStore};

use super::map_shape_points;

/// Rotates a shape about an axis through a point, in place.
pub struct Rotate {
    shape: Shape,
    origin: Point3,
    axis: Vector3,
    angle_rad: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation (angle in radians).
    #[must_use]
    pub fn new(shape: Shape, origin: Point3, axis: Vector3, angle_rad: f64) -> Self {
        Self { shape, origin, axis, angle_rad }
    }

    /// Executes the rotation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero-length axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if self.axis.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(self.axis), self.angle_rad);
        let origin = self.origin;
        map_shape_points(store, self.shape, &|p| origin + rotation * (p - origin))
    }
}
