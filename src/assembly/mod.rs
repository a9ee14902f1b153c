mod cutter;
mod foil_wires;
mod fuse_solid;
mod wing_shape;

pub use cutter::{cut_fuse_right_shapes, cut_fuse_shapes, make_fragments};
pub use foil_wires::{make_foil_wires, FoilWires};
pub use fuse_solid::make_fuse_solid;
pub use wing_shape::make_wing_shape;
