use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::math::polygon_2d::point_in_polygon_2d;
use crate::math::Point2;
use crate::topology::{FaceId, TopologyStore};

use super::{MeshParams, Triangle3d};

/// Tessellates a planar face into triangles via constrained Delaunay
/// triangulation in the face plane's UV space.
///
/// Boundary rings (outer wire and holes) become constraint loops; long
/// boundary segments are densified to the element size derived from the
/// deflection parameter. Triangle winding follows the face's effective
/// orientation: reversed faces have their second and third vertices
/// swapped so the emitted normals always point along the face's outward
/// normal.
pub struct TessellateFace {
    face: FaceId,
    params: MeshParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: MeshParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation.
    ///
    /// Degenerate faces (under 3 boundary points, vanishing area) yield an
    /// empty list rather than an error, so a malformed face never aborts a
    /// whole-shell tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] if the triangulation rejects
    /// the boundary (self-intersecting constraints).
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Triangle3d>> {
        let face = store.face(self.face)?;
        let plane = face.plane.clone();
        let same_sense = face.same_sense;

        let outer: Vec<Point2> = store
            .face_polygon(self.face)?
            .iter()
            .map(|p| plane.project(p))
            .collect();
        if outer.len() < 3 {
            return Ok(Vec::new());
        }
        let holes: Vec<Vec<Point2>> = store
            .face_holes(self.face)?
            .iter()
            .map(|ring| ring.iter().map(|p| plane.project(p)).collect())
            .collect();

        let max_edge = self.params.max_edge_length(ring_diameter(&outer));

        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
        insert_constraint_ring(&mut cdt, &outer, max_edge)?;
        for hole in &holes {
            if hole.len() >= 3 {
                insert_constraint_ring(&mut cdt, hole, max_edge)?;
            }
        }

        let mut triangles = Vec::new();
        for cdt_face in cdt.inner_faces() {
            let vs = cdt_face.vertices();
            let uv: Vec<Point2> = vs
                .iter()
                .map(|v| Point2::new(v.position().x, v.position().y))
                .collect();
            let centroid = Point2::new(
                (uv[0].x + uv[1].x + uv[2].x) / 3.0,
                (uv[0].y + uv[1].y + uv[2].y) / 3.0,
            );
            if !point_in_polygon_2d(&centroid, &outer) {
                continue;
            }
            if holes.iter().any(|h| point_in_polygon_2d(&centroid, h)) {
                continue;
            }

            let p0 = plane.unproject(uv[0].x, uv[0].y);
            let p1 = plane.unproject(uv[1].x, uv[1].y);
            let p2 = plane.unproject(uv[2].x, uv[2].y);
            // Spade emits counter-clockwise triangles in UV, whose lifted
            // winding normal is the plane normal; reversed faces swap the
            // second and third vertices.
            let tri = if same_sense {
                Triangle3d::new(p0, p1, p2)
            } else {
                Triangle3d::new(p0, p2, p1)
            };
            if !tri.is_null() {
                triangles.push(tri);
            }
        }
        Ok(triangles)
    }
}

/// Diameter (bounding-box diagonal) of a UV ring.
fn ring_diameter(ring: &[Point2]) -> f64 {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in ring {
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
    }
    ((max.x - min.x).powi(2) + (max.y - min.y).powi(2)).sqrt()
}

/// Inserts a closed ring as constraint edges, densifying long segments.
fn insert_constraint_ring(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    ring: &[Point2],
    max_edge: f64,
) -> Result<()> {
    let n = ring.len();
    let mut handles = Vec::new();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let len = (b - a).norm();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_sub = (len / max_edge).ceil().max(1.0) as usize;
        for k in 0..n_sub {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / n_sub as f64;
            let q = Point2::from(a.coords + (b - a) * t);
            let handle = cdt
                .insert(SpadePoint2::new(q.x, q.y))
                .map_err(|e| TessellationError::Failed(format!("vertex insertion: {e:?}")))?;
            handles.push(handle);
        }
    }

    let m = handles.len();
    for i in 0..m {
        let (a, b) = (handles[i], handles[(i + 1) % m]);
        if a == b {
            continue;
        }
        if !cdt.can_add_constraint(a, b) {
            return Err(TessellationError::Failed(
                "boundary constraints intersect".into(),
            )
            .into());
        }
        cdt.add_constraint(a, b);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeFace, MakePolylineWire};
    use crate::tessellation::total_area;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square_face(store: &mut TopologyStore, size: f64) -> FaceId {
        let wire = MakePolylineWire::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(size, 0.0, 0.0),
                p(size, size, 0.0),
                p(0.0, size, 0.0),
            ],
            true,
        )
        .execute(store)
        .unwrap();
        MakeFace::new(wire, vec![]).execute(store).unwrap()
    }

    #[test]
    fn square_tessellation_covers_the_area() {
        let mut store = TopologyStore::new();
        let face = square_face(&mut store, 2.0);
        let triangles = TessellateFace::new(face, MeshParams::default())
            .execute(&store)
            .unwrap();
        assert!(!triangles.is_empty());
        assert!((total_area(&triangles) - 4.0).abs() < 1e-9);
        for t in &triangles {
            assert!(t.normal.z > 0.99, "normal must follow the face");
        }
    }

    #[test]
    fn reversed_face_flips_triangle_winding() {
        let mut store = TopologyStore::new();
        let face = square_face(&mut store, 1.0);
        store.face_mut(face).unwrap().same_sense = false;
        let triangles = TessellateFace::new(face, MeshParams::default())
            .execute(&store)
            .unwrap();
        for t in &triangles {
            assert!(t.normal.z < -0.99, "reversed face must emit flipped normals");
        }
    }

    #[test]
    fn face_with_hole_excludes_it() {
        let mut store = TopologyStore::new();
        let outer = MakePolylineWire::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(4.0, 0.0, 0.0),
                p(4.0, 4.0, 0.0),
                p(0.0, 4.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let hole = MakePolylineWire::new(
            vec![
                p(1.0, 1.0, 0.0),
                p(3.0, 1.0, 0.0),
                p(3.0, 3.0, 0.0),
                p(1.0, 3.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(outer, vec![hole]).execute(&mut store).unwrap();
        let triangles = TessellateFace::new(face, MeshParams::default())
            .execute(&store)
            .unwrap();
        assert!((total_area(&triangles) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn tessellation_is_idempotent() {
        let mut store = TopologyStore::new();
        let face = square_face(&mut store, 3.0);
        let params = MeshParams::default();
        let first = TessellateFace::new(face, params).execute(&store).unwrap();
        let second = TessellateFace::new(face, params).execute(&store).unwrap();
        assert_eq!(first.len(), second.len());
        assert!((total_area(&first) - total_area(&second)).abs() < crate::math::TOLERANCE);
    }

    #[test]
    fn finer_deflection_yields_more_triangles() {
        let mut store = TopologyStore::new();
        let face = square_face(&mut store, 2.0);
        let coarse = TessellateFace::new(
            face,
            MeshParams { deflection: super::super::Deflection::Relative(1.0), ..MeshParams::default() },
        )
        .execute(&store)
        .unwrap();
        let fine = TessellateFace::new(
            face,
            MeshParams { deflection: super::super::Deflection::Absolute(0.25), ..MeshParams::default() },
        )
        .execute(&store)
        .unwrap();
        assert!(fine.len() > coarse.len());
    }
}
