use thiserror::Error;

/// Top-level error type for the aeromesh kernel.
#[derive(Debug, Error)]
pub enum AeromeshError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("polygon is not planar: max deviation {0}")]
    NonPlanar(f64),
}

/// Errors related to topological entities and their store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("shell is not closed")]
    ShellNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised by modeling operations (builders, transforms, booleans).
///
/// A failed operation leaves its inputs unmodified; the caller decides
/// whether to retry, log, or give up.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),

    #[error("operation not done: {0}")]
    NotDone(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`AeromeshError`].
pub type Result<T> = std::result::Result<T, AeromeshError>;
