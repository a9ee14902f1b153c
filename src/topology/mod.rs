pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::{Point3, Vector3};
use slotmap::SlotMap;

/// A raw BRep body owned by a part: either a full solid or a bare shell.
///
/// Imported geometry and boolean-cut results are often open shells, while
/// built wings and fuselages are solids; parts store both uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Solid(SolidId),
    Shell(ShellId),
}

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

macro_rules! store_accessors {
    ($add:ident, $get:ident, $get_mut:ident, $map:ident, $id:ty, $data:ty, $name:literal) => {
        /// Inserts the entity and returns its ID.
        pub fn $add(&mut self, data: $data) -> $id {
            self.$map.insert(data)
        }

        /// Returns a reference to the entity data.
        ///
        /// # Errors
        ///
        /// Returns [`TopologyError::EntityNotFound`] if the ID is stale.
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$map
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }

        /// Returns a mutable reference to the entity data.
        ///
        /// # Errors
        ///
        /// Returns [`TopologyError::EntityNotFound`] if the ID is stale.
        pub fn $get_mut(&mut self, id: $id) -> Result<&mut $data, TopologyError> {
            self.$map
                .get_mut(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }
    };
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    store_accessors!(add_vertex, vertex, vertex_mut, vertices, VertexId, VertexData, "vertex");
    store_accessors!(add_edge, edge, edge_mut, edges, EdgeId, EdgeData, "edge");
    store_accessors!(add_wire, wire, wire_mut, wires, WireId, WireData, "wire");
    store_accessors!(add_face, face, face_mut, faces, FaceId, FaceData, "face");
    store_accessors!(add_shell, shell, shell_mut, shells, ShellId, ShellData, "shell");
    store_accessors!(add_solid, solid, solid_mut, solids, SolidId, SolidData, "solid");

    // --- Derived queries ---

    /// Collects the vertex positions of a wire in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn wire_points(&self, wire_id: WireId) -> Result<Vec<Point3>, TopologyError> {
        let wire = self.wire(wire_id)?;
        let mut points = Vec::with_capacity(wire.edges.len() + 1);
        for oe in &wire.edges {
            let edge = self.edge(oe.edge)?;
            let vid = if oe.forward { edge.start } else { edge.end };
            points.push(self.vertex(vid)?.point);
        }
        if !wire.is_closed {
            if let Some(oe) = wire.edges.last() {
                let edge = self.edge(oe.edge)?;
                let vid = if oe.forward { edge.end } else { edge.start };
                points.push(self.vertex(vid)?.point);
            }
        }
        Ok(points)
    }

    /// Collects the outer boundary polygon of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn face_polygon(&self, face_id: FaceId) -> Result<Vec<Point3>, TopologyError> {
        let face = self.face(face_id)?;
        self.wire_points(face.outer_wire)
    }

    /// Collects the hole polygons of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn face_holes(&self, face_id: FaceId) -> Result<Vec<Vec<Point3>>, TopologyError> {
        let inner = self.face(face_id)?.inner_wires.clone();
        inner.into_iter().map(|w| self.wire_points(w)).collect()
    }

    /// Effective outward normal of a face, accounting for `same_sense`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing.
    pub fn face_normal(&self, face_id: FaceId) -> Result<Vector3, TopologyError> {
        let face = self.face(face_id)?;
        let n = *face.plane.normal();
        Ok(if face.same_sense { n } else { -n })
    }

    /// The faces of a shape: a shell's own faces, or every face of a
    /// solid's outer and inner shells.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn shape_faces(&self, shape: Shape) -> Result<Vec<FaceId>, TopologyError> {
        match shape {
            Shape::Shell(shell_id) => Ok(self.shell(shell_id)?.faces.clone()),
            Shape::Solid(solid_id) => {
                let solid = self.solid(solid_id)?;
                let mut faces = self.shell(solid.outer_shell)?.faces.clone();
                for &inner in &solid.inner_shells {
                    faces.extend_from_slice(&self.shell(inner)?.faces);
                }
                Ok(faces)
            }
        }
    }

    /// The shells of a shape, outer shell first for solids.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced solid is missing.
    pub fn shape_shells(&self, shape: Shape) -> Result<Vec<ShellId>, TopologyError> {
        match shape {
            Shape::Shell(shell_id) => Ok(vec![shell_id]),
            Shape::Solid(solid_id) => {
                let solid = self.solid(solid_id)?;
                let mut shells = vec![solid.outer_shell];
                shells.extend_from_slice(&solid.inner_shells);
                Ok(shells)
            }
        }
    }

    /// Axis-aligned bounding box of a shape, as `(min, max)` corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no vertices or a referenced
    /// entity is missing.
    pub fn shape_bounding_box(&self, shape: Shape) -> Result<(Point3, Point3), TopologyError> {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut seen = false;
        for face_id in self.shape_faces(shape)? {
            for p in self.face_polygon(face_id)? {
                seen = true;
                min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
                max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
            }
        }
        if !seen {
            return Err(TopologyError::InvalidTopology("shape has no vertices".into()));
        }
        Ok((min, max))
    }

    /// Signed volume enclosed by a closed shell, by the divergence
    /// theorem. Negative when the face senses point into the enclosed
    /// region.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing.
    pub fn shell_signed_volume(&self, shell_id: ShellId) -> Result<f64, TopologyError> {
        let faces = self.shell(shell_id)?.faces.clone();
        let mut volume = 0.0;
        for face_id in faces {
            let polygon = self.face_polygon(face_id)?;
            let normal = self.face_normal(face_id)?;
            let area = crate::math::polygon_3d::polygon_area_3d(&polygon);
            let centroid = crate::math::polygon_3d::polygon_centroid(&polygon);
            volume += centroid.coords.dot(&normal) * area / 3.0;
        }
        Ok(volume)
    }

    /// Flips the sense of every face of a shell, inverting its outward
    /// normals.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced face is missing.
    pub fn flip_shell(&mut self, shell_id: ShellId) -> Result<(), TopologyError> {
        let faces = self.shell(shell_id)?.faces.clone();
        for face_id in faces {
            let face = self.face_mut(face_id)?;
            face.same_sense = !face.same_sense;
        }
        Ok(())
    }

    /// Human-readable topology summary of a shape, for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing.
    pub fn shape_content(&self, shape: Shape, prefix: &str) -> Result<String, TopologyError> {
        let shells = self.shape_shells(shape)?;
        let mut n_faces = 0usize;
        let mut n_edges = 0usize;
        for &shell_id in &shells {
            for &face_id in &self.shell(shell_id)?.faces {
                n_faces += 1;
                let face = self.face(face_id)?;
                n_edges += self.wire(face.outer_wire)?.edges.len();
                for &w in &face.inner_wires {
                    n_edges += self.wire(w)?.edges.len();
                }
            }
        }
        let kind = match shape {
            Shape::Solid(_) => "solid",
            Shape::Shell(_) => "shell",
        };
        Ok(format!(
            "{prefix}{kind}: {} shell(s), {n_faces} face(s), {n_edges} edge(s)",
            shells.len()
        ))
    }
}
