mod assemble;
mod classify;
mod engine;
mod face_info;
mod face_intersection;
mod split;

pub use classify::Containment;
pub use engine::{cut_shell_with_solids, split_shell_with_faces};
pub use split::FaceFragment;

pub(crate) use face_info::FaceInfo;
