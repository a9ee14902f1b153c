pub mod bspline;
pub mod plane;

pub use bspline::BSpline3;
pub use plane::Plane;
