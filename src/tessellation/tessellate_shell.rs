use crate::error::Result;
use crate::topology::{Shape, ShellId, TopologyStore};

use super::{MeshParams, TessellateFace, Triangle3d};

/// Tessellates every face of a shell into one flat triangle list.
///
/// Faces that fail to produce a valid triangulation (degenerate or
/// self-intersecting boundaries) are skipped so the rest of the shell
/// still comes out — a malformed face never aborts the whole shell.
pub struct TessellateShell {
    shell: ShellId,
    params: MeshParams,
}

impl TessellateShell {
    /// Creates a new `TessellateShell` operation.
    #[must_use]
    pub fn new(shell: ShellId, params: MeshParams) -> Self {
        Self { shell, params }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell itself cannot be read.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Triangle3d>> {
        let faces = store.shell(self.shell)?.faces.clone();
        let mut triangles = Vec::new();
        for face_id in faces {
            match TessellateFace::new(face_id, self.params).execute(store) {
                Ok(face_triangles) => triangles.extend(face_triangles),
                Err(_) => {
                    tracing::warn!(target: "aeromesh::tessellation", ?face_id, "skipping face");
                }
            }
        }
        Ok(triangles)
    }
}

/// Tessellates a whole shape: every shell of a solid, or the bare shell.
///
/// # Errors
///
/// Returns an error if the shape's topology cannot be read.
pub fn tessellate_shape(
    store: &TopologyStore,
    shape: Shape,
    params: MeshParams,
) -> Result<Vec<Triangle3d>> {
    let mut triangles = Vec::new();
    for shell in store.shape_shells(shape)? {
        triangles.extend(TessellateShell::new(shell, params).execute(store)?);
    }
    Ok(triangles)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;
    use crate::tessellation::total_area;

    #[test]
    fn cube_shell_tessellates_to_full_area() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 0.0, 0.0), 2.0, 2.0, 2.0)
            .execute(&mut store)
            .unwrap();
        let shell = store.solid(solid).unwrap().outer_shell;
        let triangles = TessellateShell::new(shell, MeshParams::default())
            .execute(&store)
            .unwrap();
        approx::assert_relative_eq!(total_area(&triangles), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn cube_normals_point_outward() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 0.0, 0.0), 2.0, 2.0, 2.0)
            .execute(&mut store)
            .unwrap();
        let triangles = tessellate_shape(&store, Shape::Solid(solid), MeshParams::default())
            .unwrap();
        let center = Point3::new(1.0, 1.0, 1.0);
        for t in &triangles {
            let centroid = Point3::from(
                (t.vertices[0].coords + t.vertices[1].coords + t.vertices[2].coords) / 3.0,
            );
            assert!(
                t.normal.dot(&(centroid - center)) > 0.0,
                "triangle normal points inward"
            );
        }
    }

    #[test]
    fn retessellation_is_stable() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 0.0, 0.0), 1.0, 2.0, 3.0)
            .execute(&mut store)
            .unwrap();
        let shell = store.solid(solid).unwrap().outer_shell;
        let params = MeshParams::default();
        let first = TessellateShell::new(shell, params).execute(&store).unwrap();
        let second = TessellateShell::new(shell, params).execute(&store).unwrap();
        assert_eq!(first.len(), second.len());
        assert!((total_area(&first) - total_area(&second)).abs() < 1e-12);
    }

    #[test]
    fn empty_shell_yields_no_triangles() {
        let mut store = TopologyStore::new();
        let shell = store.add_shell(crate::topology::ShellData {
            faces: vec![],
            is_closed: false,
        });
        let triangles = TessellateShell::new(shell, MeshParams::default())
            .execute(&store)
            .unwrap();
        assert!(triangles.is_empty());
    }
}
