use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a topological vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexData {
    /// Position of the vertex.
    pub point: Point3,
}

impl VertexData {
    /// Creates a vertex at the given position.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}
