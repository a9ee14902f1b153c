use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::operations::creation::{MakeFace, MakePolylineWire, MakeSolid};
use crate::operations::shaping::{Loft, Stitcher};
use crate::operations::transform::MirrorXz;
use crate::oplog::OpLog;
use crate::mesh::TriMesh;
use crate::tessellation::{MeshParams, TessellateShell, Triangle3d};
use crate::topology::{FaceId, Shape, ShellId, TopologyStore, WireId};

use super::ShapeSet;

/// The kind of a fuselage part, for display and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuseKind {
    /// Parametric hull, bilaterally symmetric about the XZ plane.
    Xfl,
    /// Imported CAD bodies.
    Occ,
    /// Imported triangle soup.
    Stl,
    /// Raw cross-section loops.
    Sections,
}

/// Where a fuselage's geometry comes from.
///
/// One enum instead of a class hierarchy probed with `is_x_type` calls:
/// call sites match once and cannot forget a kind.
#[derive(Debug, Clone)]
pub enum FuseSource {
    /// Right-half cross-section rings, nose to tail. Each ring runs from
    /// the top seam point (y = 0, z high) around the y ≥ 0 side to the
    /// bottom seam point (y = 0, z low), as an open strip.
    Xfl { rings: Vec<Vec<Point3>> },
    /// Shapes are imported and pushed directly onto the shape set.
    Occ,
    /// A fixed triangulation; no BRep topology exists.
    Stl { triangles: Vec<Triangle3d> },
    /// Full closed cross-section loops, nose to tail.
    Sections { rings: Vec<Vec<Point3>> },
}

/// A fuselage part: raw shapes, derived shells, and derived
/// triangulations.
///
/// Invariants: the shell list is regenerable from the shapes
/// ([`make_shells_from_shapes`](Fuse::make_shells_from_shapes)); the
/// triangle buffer and working mesh are regenerable from the shells
/// ([`make_triangulation`](Fuse::make_triangulation)). Staleness is
/// tracked by version stamps instead of call-order discipline.
#[derive(Debug)]
pub struct Fuse {
    name: String,
    position: Point3,
    source: FuseSource,
    shapes: ShapeSet,
    shells: Vec<ShellId>,
    right_shells: Vec<ShellId>,
    shells_built_from: Option<u64>,
    shells_revision: u64,
    triangles: Vec<Triangle3d>,
    triangles_built_from: Option<u64>,
    trimesh: TriMesh,
}

impl Fuse {
    fn new(name: impl Into<String>, source: FuseSource) -> Self {
        Self {
            name: name.into(),
            position: Point3::origin(),
            source,
            shapes: ShapeSet::new(),
            shells: Vec::new(),
            right_shells: Vec::new(),
            shells_built_from: None,
            shells_revision: 0,
            triangles: Vec::new(),
            triangles_built_from: None,
            trimesh: TriMesh::new(),
        }
    }

    /// Creates a parametric symmetric fuselage from right-half rings.
    #[must_use]
    pub fn new_xfl(name: impl Into<String>, rings: Vec<Vec<Point3>>) -> Self {
        Self::new(name, FuseSource::Xfl { rings })
    }

    /// Creates a fuselage for imported CAD bodies.
    #[must_use]
    pub fn new_occ(name: impl Into<String>) -> Self {
        Self::new(name, FuseSource::Occ)
    }

    /// Creates a fuselage from an imported triangulation.
    #[must_use]
    pub fn new_stl(name: impl Into<String>, triangles: Vec<Triangle3d>) -> Self {
        Self::new(name, FuseSource::Stl { triangles })
    }

    /// Creates a fuselage from full cross-section loops.
    #[must_use]
    pub fn new_sections(name: impl Into<String>, rings: Vec<Vec<Point3>>) -> Self {
        Self::new(name, FuseSource::Sections { rings })
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the fuselage frame in the assembly frame.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Moves the fuselage frame.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// The geometry source.
    #[must_use]
    pub fn source(&self) -> &FuseSource {
        &self.source
    }

    /// The part kind.
    #[must_use]
    pub fn kind(&self) -> FuseKind {
        match self.source {
            FuseSource::Xfl { .. } => FuseKind::Xfl,
            FuseSource::Occ => FuseKind::Occ,
            FuseSource::Stl { .. } => FuseKind::Stl,
            FuseSource::Sections { .. } => FuseKind::Sections,
        }
    }

    /// The raw BRep bodies.
    #[must_use]
    pub fn shapes(&self) -> &ShapeSet {
        &self.shapes
    }

    /// Appends a raw body (imported geometry).
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Replaces the raw bodies (fragmentation results).
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes.replace(shapes);
    }

    /// Drops all raw bodies.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    /// The derived shell list.
    #[must_use]
    pub fn shells(&self) -> &[ShellId] {
        &self.shells
    }

    /// The cached right-side shells of a symmetric hull.
    #[must_use]
    pub fn right_shells(&self) -> &[ShellId] {
        &self.right_shells
    }

    /// Replaces the shell list (cut results).
    pub fn set_shells(&mut self, shells: Vec<ShellId>) {
        self.shells = shells;
        self.shells_revision += 1;
    }

    /// Replaces the right-side shell cache (right-side cut results).
    pub fn set_right_shells(&mut self, shells: Vec<ShellId>) {
        self.right_shells = shells;
    }

    /// Whether the shell list is stale relative to the shapes.
    #[must_use]
    pub fn shells_dirty(&self) -> bool {
        self.shells_built_from != Some(self.shapes.version())
    }

    /// Whether the triangulation is stale relative to the shells.
    #[must_use]
    pub fn triangulation_dirty(&self) -> bool {
        self.triangles_built_from != Some(self.shells_revision)
    }

    /// The base triangulation.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle3d] {
        &self.triangles
    }

    /// The working panel mesh.
    #[must_use]
    pub fn tri_mesh(&self) -> &TriMesh {
        &self.trimesh
    }

    /// Mutable access to the working panel mesh (mesh editing).
    pub fn tri_mesh_mut(&mut self) -> &mut TriMesh {
        &mut self.trimesh
    }

    /// Regenerates the raw bodies from the parametric source.
    ///
    /// For an `Xfl` hull this builds the right-half skin (cached for the
    /// symmetric cut fast path), mirrors it, and stitches the two halves
    /// into a solid. A `Sections` fuse lofts its loops into a solid. For
    /// `Occ` and `Stl` sources there is nothing to generate.
    ///
    /// # Errors
    ///
    /// Returns an error if lofting, capping, or stitching fails; the
    /// previous shapes are left in place in that case.
    pub fn make_shape(&mut self, store: &mut TopologyStore, log: &mut OpLog) -> Result<()> {
        let source = self.source.clone();
        match source {
            FuseSource::Xfl { rings } => {
                let (solid, right_shell) = build_symmetric_hull(store, &rings, log)?;
                self.shapes.replace(vec![Shape::Solid(solid)]);
                self.right_shells = vec![right_shell];
                self.make_shells_from_shapes(store)?;
                Ok(())
            }
            FuseSource::Sections { rings } => {
                let solid = build_ring_hull(store, &rings, log)?;
                self.shapes.replace(vec![Shape::Solid(solid)]);
                self.make_shells_from_shapes(store)?;
                Ok(())
            }
            FuseSource::Occ => {
                log.append(format!("{}: imported shapes, nothing to regenerate", self.name));
                Ok(())
            }
            FuseSource::Stl { triangles } => {
                self.triangles = triangles;
                Ok(())
            }
        }
    }

    /// Rebuilds the shell list from the raw bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if a shape's topology cannot be read.
    pub fn make_shells_from_shapes(&mut self, store: &TopologyStore) -> Result<()> {
        let mut shells = Vec::new();
        for shape in &self.shapes {
            shells.extend(store.shape_shells(*shape)?);
        }
        self.shells = shells;
        self.shells_built_from = Some(self.shapes.version());
        self.shells_revision += 1;
        Ok(())
    }

    /// Rebuilds the full shell list from the right-side cache by
    /// mirroring — the regeneration step after a right-side-only cut.
    ///
    /// # Errors
    ///
    /// Returns an error if mirroring fails.
    pub fn rebuild_shells_from_right(&mut self, store: &mut TopologyStore) -> Result<()> {
        let right_shells = self.right_shells.clone();
        let mut shells = right_shells.clone();
        for &right in &right_shells {
            let mirrored = MirrorXz::new(Shape::Shell(right)).execute(store)?;
            let Shape::Shell(left) = mirrored else {
                return Err(OperationError::Failed("mirror of a shell was not a shell".into())
                    .into());
            };
            shells.push(left);
        }
        self.shells = shells;
        self.shells_revision += 1;
        Ok(())
    }

    /// Regenerates the triangle buffer and working mesh from the shells
    /// (or from the fixed source triangulation of an `Stl` part).
    ///
    /// # Errors
    ///
    /// Returns an error if a shell cannot be read.
    pub fn make_triangulation(
        &mut self,
        store: &TopologyStore,
        params: MeshParams,
        node_merge_distance: f64,
        log: &mut OpLog,
    ) -> Result<()> {
        self.triangles = match &self.source {
            FuseSource::Stl { triangles } => triangles.clone(),
            _ => {
                let mut triangles = Vec::new();
                for &shell in &self.shells {
                    triangles.extend(TessellateShell::new(shell, params).execute(store)?);
                }
                triangles
            }
        };
        self.trimesh = TriMesh::from_triangles(&self.triangles, node_merge_distance);
        self.triangles_built_from = Some(self.shells_revision);
        log.append(format!(
            "   New triangulation has {} elements",
            self.triangles.len()
        ));
        Ok(())
    }
}

/// Builds a bilaterally symmetric hull from right-half rings: right skin
/// plus half caps, the mirrored left half, and the stitched solid.
/// Returns the solid and the right-half shell.
fn build_symmetric_hull(
    store: &mut TopologyStore,
    rings: &[Vec<Point3>],
    log: &mut OpLog,
) -> Result<(crate::topology::SolidId, ShellId)> {
    if rings.len() < 2 {
        return Err(OperationError::InvalidInput("hull needs at least 2 rings".into()).into());
    }

    // Right skin: loft the open half rings; the y = 0 seams stay open
    // until the mirrored half meets them.
    let mut wires: Vec<WireId> = Vec::with_capacity(rings.len());
    for ring in rings {
        wires.push(MakePolylineWire::new(ring.clone(), false).execute(store)?);
    }
    let mut right_faces = Loft::new(wires).execute(store)?;

    // Half caps at nose and tail close the ends through the y = 0 chord.
    right_faces.push(cap_face(store, &rings[0])?);
    right_faces.push(cap_face(store, &rings[rings.len() - 1])?);

    let mut stitcher = Stitcher::new(crate::config::DEFAULT_STITCH_TOLERANCE);
    stitcher.add_faces(right_faces.iter().copied());
    let report = stitcher.perform(store)?;
    let [right_shell] = report.shells.as_slice() else {
        log.append("   right half-skin did not stitch into a single shell");
        return Err(OperationError::NotDone("right half-skin is fragmented".into()).into());
    };
    let right_shell = *right_shell;

    // Mirror and sew the two halves into the watertight hull.
    let mirrored = MirrorXz::new(Shape::Shell(right_shell)).execute(store)?;
    let Shape::Shell(left_shell) = mirrored else {
        return Err(OperationError::Failed("mirror of a shell was not a shell".into()).into());
    };

    let mut full = Stitcher::new(crate::config::DEFAULT_STITCH_TOLERANCE);
    full.add_faces(store.shell(right_shell)?.faces.clone());
    full.add_faces(store.shell(left_shell)?.faces.clone());
    let report = full.perform(store)?;
    log.append(format!(
        "   Nb of free edges={}\n   Nb of contiguous edges={}",
        report.free_edges, report.contiguous_edges
    ));
    if !report.is_single_closed_shell(store) {
        log.append("   Fuse stitched shape is not closed");
        return Err(OperationError::NotDone("hull did not close".into()).into());
    }
    let solid = MakeSolid::new(report.shells[0], vec![]).execute(store)?;
    Ok((solid, right_shell))
}

/// Builds a hull solid from full closed rings with planar end caps.
fn build_ring_hull(
    store: &mut TopologyStore,
    rings: &[Vec<Point3>],
    log: &mut OpLog,
) -> Result<crate::topology::SolidId> {
    if rings.len() < 2 {
        return Err(OperationError::InvalidInput("hull needs at least 2 rings".into()).into());
    }

    let mut wires: Vec<WireId> = Vec::with_capacity(rings.len());
    for ring in rings {
        wires.push(MakePolylineWire::new(ring.clone(), true).execute(store)?);
    }
    let mut faces = Loft::new(wires).execute(store)?;
    faces.push(cap_face(store, &rings[0])?);
    faces.push(cap_face(store, &rings[rings.len() - 1])?);

    let mut stitcher = Stitcher::new(crate::config::DEFAULT_STITCH_TOLERANCE);
    stitcher.add_faces(faces.iter().copied());
    let report = stitcher.perform(store)?;
    log.append(format!(
        "   Nb of free edges={}\n   Nb of contiguous edges={}",
        report.free_edges, report.contiguous_edges
    ));
    if !report.is_single_closed_shell(store) {
        log.append("   Fuse stitched shape is not closed");
        return Err(OperationError::NotDone("hull did not close".into()).into());
    }
    MakeSolid::new(report.shells[0], vec![]).execute(store)
}

fn cap_face(store: &mut TopologyStore, ring: &[Point3]) -> Result<FaceId> {
    let wire = MakePolylineWire::new(ring.to_vec(), true).execute(store)?;
    MakeFace::new(wire, vec![]).execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Right-half ring of a circle of radius `r` at station `x`.
    #[allow(clippy::cast_precision_loss)]
    fn half_ring(x: f64, r: f64, n: usize) -> Vec<Point3> {
        (0..n)
            .map(|i| {
                // From (y=0, z=+r) around y > 0 down to (y=0, z=-r).
                let theta = PI * i as f64 / (n - 1) as f64;
                Point3::new(x, r * theta.sin(), r * theta.cos())
            })
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn full_ring(x: f64, r: f64, n: usize) -> Vec<Point3> {
        (0..n)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / n as f64;
                Point3::new(x, r * theta.sin(), r * theta.cos())
            })
            .collect()
    }

    #[test]
    fn xfl_hull_builds_a_solid_and_caches_the_right_half() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_xfl(
            "hull",
            vec![half_ring(0.0, 0.5, 9), half_ring(2.0, 0.5, 9), half_ring(4.0, 0.5, 9)],
        );
        fuse.make_shape(&mut store, &mut log).unwrap();

        assert_eq!(fuse.shapes().len(), 1);
        assert!(matches!(fuse.shapes().as_slice()[0], Shape::Solid(_)));
        assert_eq!(fuse.right_shells().len(), 1);
        assert!(!fuse.shells().is_empty());
        assert!(!fuse.shells_dirty());

        // The cached right half must live strictly on y >= 0.
        let (min, _) = store
            .shape_bounding_box(Shape::Shell(fuse.right_shells()[0]))
            .unwrap();
        assert!(min.y > -1e-9);
    }

    #[test]
    fn sections_hull_closes_into_a_solid() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_sections(
            "tube",
            vec![full_ring(0.0, 0.5, 16), full_ring(4.0, 0.5, 16)],
        );
        fuse.make_shape(&mut store, &mut log).unwrap();
        assert_eq!(fuse.shapes().len(), 1);
        assert!(matches!(fuse.shapes().as_slice()[0], Shape::Solid(_)));
    }

    #[test]
    fn stl_fuse_triangulates_from_its_source() {
        let store = TopologyStore::new();
        let mut log = OpLog::new();
        let triangles = vec![Triangle3d::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )];
        let mut fuse = Fuse::new_stl("scan", triangles);
        fuse.make_triangulation(&store, MeshParams::default(), 1e-6, &mut log)
            .unwrap();
        assert_eq!(fuse.triangles().len(), 1);
        assert_eq!(fuse.tri_mesh().panel_count(), 1);
    }

    #[test]
    fn rebuilding_right_side_restores_full_shell_count() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_xfl(
            "hull",
            vec![half_ring(0.0, 0.5, 9), half_ring(3.0, 0.5, 9)],
        );
        fuse.make_shape(&mut store, &mut log).unwrap();

        fuse.rebuild_shells_from_right(&mut store).unwrap();
        assert_eq!(fuse.shells().len(), 2 * fuse.right_shells().len());
    }

    #[test]
    fn shells_go_stale_when_shapes_change() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_xfl(
            "hull",
            vec![half_ring(0.0, 0.5, 9), half_ring(3.0, 0.5, 9)],
        );
        fuse.make_shape(&mut store, &mut log).unwrap();
        assert!(!fuse.shells_dirty());
        fuse.clear_shapes();
        assert!(fuse.shells_dirty());
    }
}
