use crate::error::Result;
use crate::math::Point2;
use crate::topology::{FaceId, TopologyStore};

use super::Triangle3d;

/// Grid resolution of the ruled triangulation, per parametric direction.
const GRID_POINTS: usize = 11;

/// Structured alternative to the Delaunay tessellation: samples the face's
/// parametric bounds on a fixed 11×11 grid and emits a ruled
/// quad-triangulation.
///
/// Preferred over adaptive meshing when a predictable, low-distortion grid
/// matters more than boundary fidelity — simple analytic faces whose UV
/// bounds coincide with the face itself.
pub struct TessellateFaceRuled {
    face: FaceId,
}

impl TessellateFaceRuled {
    /// Creates a new `TessellateFaceRuled` operation.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the ruled tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the face cannot be read.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Triangle3d>> {
        let face = store.face(self.face)?;
        let plane = face.plane.clone();
        let same_sense = face.same_sense;

        let uv: Vec<Point2> = store
            .face_polygon(self.face)?
            .iter()
            .map(|p| plane.project(p))
            .collect();
        if uv.len() < 3 {
            return Ok(Vec::new());
        }

        let mut u_min = f64::INFINITY;
        let mut u_max = f64::NEG_INFINITY;
        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;
        for q in &uv {
            u_min = u_min.min(q.x);
            u_max = u_max.max(q.x);
            v_min = v_min.min(q.y);
            v_max = v_max.max(q.y);
        }

        #[allow(clippy::cast_precision_loss)]
        let du = (u_max - u_min) / (GRID_POINTS - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let dv = (v_max - v_min) / (GRID_POINTS - 1) as f64;

        let mut triangles = Vec::with_capacity((GRID_POINTS - 1) * (GRID_POINTS - 1) * 2);
        for i in 0..GRID_POINTS - 1 {
            #[allow(clippy::cast_precision_loss)]
            let u0 = u_min + i as f64 * du;
            let u1 = u0 + du;
            for j in 0..GRID_POINTS - 1 {
                #[allow(clippy::cast_precision_loss)]
                let v0 = v_min + j as f64 * dv;
                let v1 = v0 + dv;

                let p00 = plane.unproject(u0, v0);
                let p10 = plane.unproject(u1, v0);
                let p11 = plane.unproject(u1, v1);
                let p01 = plane.unproject(u0, v1);

                let (t0, t1) = if same_sense {
                    (Triangle3d::new(p00, p10, p11), Triangle3d::new(p00, p11, p01))
                } else {
                    (Triangle3d::new(p00, p11, p10), Triangle3d::new(p00, p01, p11))
                };
                if !t0.is_null() {
                    triangles.push(t0);
                }
                if !t1.is_null() {
                    triangles.push(t1);
                }
            }
        }
        Ok(triangles)
    }
}
