mod fuse;
mod section;
mod shape_set;
mod surface;
mod wing;

pub use fuse::{Fuse, FuseKind, FuseSource};
pub use section::{FoilProfile, Section};
pub use shape_set::ShapeSet;
pub use surface::Surface;
pub use wing::WingXfl;
