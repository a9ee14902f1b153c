use crate::geometry::Plane;

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// Every face is planar: a bounded region of a plane delimited by an outer
/// wire and optional inner wires (holes). `same_sense` relates the face
/// orientation to the plane normal — a face with `same_sense == false` is
/// traversed with its effective normal opposite the plane normal, the
/// reversed-orientation state of a cut result.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The plane on which this face lies.
    pub plane: Plane,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
    /// If `true`, the face normal agrees with the plane normal.
    pub same_sense: bool,
}
