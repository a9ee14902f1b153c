use crate::tessellation::MeshParams;

/// Default face-sewing tolerance, in metres.
pub const DEFAULT_STITCH_TOLERANCE: f64 = 1.0e-4;

/// Default distance below which two mesh nodes are considered the same, in metres.
pub const DEFAULT_NODE_MERGE_DISTANCE: f64 = 0.05;

/// Explicit configuration for the shape builder and boolean cutter.
///
/// Passed by value into the pipeline entry points instead of living in
/// process-wide mutable statics, so two concurrent models cannot trample
/// each other's settings.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Tolerance used when sewing faces into shells.
    pub stitch_tolerance: f64,
    /// Distance below which mesh nodes are unified when rebuilding the
    /// node array from panels.
    pub node_merge_distance: f64,
    /// Tessellation quality parameters.
    pub mesh: MeshParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stitch_tolerance: DEFAULT_STITCH_TOLERANCE,
            node_merge_distance: DEFAULT_NODE_MERGE_DISTANCE,
            mesh: MeshParams::default(),
        }
    }
}
