mod loft;
mod stitch;

pub use loft::Loft;
pub use stitch::{StitchReport, Stitcher};
