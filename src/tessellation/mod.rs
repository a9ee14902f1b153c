mod ruled;
mod tessellate_face;
mod tessellate_shell;

pub use ruled::TessellateFaceRuled;
pub use tessellate_face::TessellateFace;
pub use tessellate_shell::{tessellate_shape, TessellateShell};

use crate::math::{Point3, Vector3};

/// How the chordal deflection bound is expressed.
#[derive(Debug, Clone, Copy)]
pub enum Deflection {
    /// Fraction of the face diameter.
    Relative(f64),
    /// Absolute length, in metres.
    Absolute(f64),
}

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Bound on the deviation between the mesh and the geometry. For the
    /// planar-facet kernel this sets the maximum element edge length.
    pub deflection: Deflection,
    /// Bound on the angle between adjacent boundary segments, in degrees;
    /// drives the sampling density of curved (splined) outlines.
    pub angular_deviation_deg: f64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            deflection: Deflection::Relative(0.25),
            angular_deviation_deg: 20.0,
        }
    }
}

impl MeshParams {
    /// Maximum element edge length for a face of the given diameter.
    #[must_use]
    pub fn max_edge_length(&self, diameter: f64) -> f64 {
        let len = match self.deflection {
            Deflection::Relative(f) => f * diameter,
            Deflection::Absolute(a) => a,
        };
        len.max(1e-9)
    }
}

/// A single triangle of a tessellated surface: three vertices, the face
/// normal, and per-vertex normals for smooth shading downstream.
#[derive(Debug, Clone, Copy)]
pub struct Triangle3d {
    /// The three vertices, wound counter-clockwise around the normal.
    pub vertices: [Point3; 3],
    /// Unit face normal.
    pub normal: Vector3,
    /// Per-vertex normals; equal to the face normal unless a consumer
    /// smooths them.
    pub vertex_normals: [Vector3; 3],
}

impl Triangle3d {
    /// Builds a triangle, deriving the normal from the winding. Degenerate
    /// triangles get a zero normal.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        let normal = if norm > f64::MIN_POSITIVE {
            cross / norm
        } else {
            Vector3::zeros()
        };
        Self {
            vertices: [a, b, c],
            normal,
            vertex_normals: [normal, normal, normal],
        }
    }

    /// Triangle area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        0.5 * (b - a).cross(&(c - a)).norm()
    }

    /// Whether the triangle has (numerically) no area.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.area() < 1e-12
    }
}

/// Total area of a triangle list.
#[must_use]
pub fn total_area(triangles: &[Triangle3d]) -> f64 {
    triangles.iter().map(Triangle3d::area).sum()
}
