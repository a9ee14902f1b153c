pub mod intersect_3d;
pub mod point_merger;
pub mod polygon_2d;
pub mod polygon_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Length below which a distance is treated as exactly zero, in metres.
///
/// Used to skip no-op translations and to suppress zero-length edges when
/// building wires from point strips.
pub const LENGTH_PRECISION: f64 = 1e-6;

/// Whether two points coincide within [`LENGTH_PRECISION`].
#[must_use]
pub fn is_same_point(a: &Point3, b: &Point3) -> bool {
    (b - a).norm() < LENGTH_PRECISION
}
