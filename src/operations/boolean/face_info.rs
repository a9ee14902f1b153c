use crate::error::Result;
use crate::geometry::Plane;
use crate::math::{Point3, Vector3};
use crate::topology::{FaceId, TopologyStore};

/// Geometric snapshot of a face, detached from the topology store.
///
/// The boolean engine works on these snapshots so that a failed cut never
/// leaves half-modified topology behind — new entities are only created
/// when the surviving fragments are assembled at the end.
#[derive(Debug, Clone)]
pub(crate) struct FaceInfo {
    /// Outer boundary polygon, in face winding order.
    pub polygon: Vec<Point3>,
    /// Hole polygons.
    pub holes: Vec<Vec<Point3>>,
    /// The face plane.
    pub plane: Plane,
    /// Whether the face normal agrees with the plane normal.
    pub same_sense: bool,
}

impl FaceInfo {
    /// Captures the geometry of a stored face.
    pub fn capture(store: &TopologyStore, face_id: FaceId) -> Result<Self> {
        let face = store.face(face_id)?;
        Ok(Self {
            polygon: store.face_polygon(face_id)?,
            holes: store.face_holes(face_id)?,
            plane: face.plane.clone(),
            same_sense: face.same_sense,
        })
    }

    /// Captures every face of the given list.
    pub fn capture_all(store: &TopologyStore, faces: &[FaceId]) -> Result<Vec<Self>> {
        faces.iter().map(|&f| Self::capture(store, f)).collect()
    }

    /// Effective outward normal, accounting for `same_sense`.
    #[must_use]
    pub fn outward_normal(&self) -> Vector3 {
        let n = *self.plane.normal();
        if self.same_sense {
            n
        } else {
            -n
        }
    }
}
