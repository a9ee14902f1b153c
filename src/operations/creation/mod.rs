mod make_box;
mod make_face;
mod make_solid;
mod make_spline_wire;
mod make_wire;

pub use make_box::MakeBox;
pub use make_face::MakeFace;
pub use make_solid::MakeSolid;
pub use make_spline_wire::MakeSplineWire;
pub use make_wire::MakePolylineWire;
