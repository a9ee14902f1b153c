use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Data associated with a topological edge.
///
/// All edges are straight segments between two vertices; curved outlines
/// are represented faceted.
#[derive(Debug, Clone, Copy)]
pub struct EdgeData {
    /// Start vertex.
    pub start: VertexId,
    /// End vertex.
    pub end: VertexId,
}

impl EdgeData {
    /// Creates an edge between two vertices.
    #[must_use]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self { start, end }
    }
}
