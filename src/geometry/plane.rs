use crate::error::{GeometryError, Result};
use crate::math::polygon_3d::newell_vector;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and two orthonormal direction vectors
/// (`u_dir`, `v_dir`); the normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and two direction vectors.
    ///
    /// The directions are normalized; `v_dir` is re-orthogonalized against
    /// `u_dir` so the frame is always orthonormal.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is zero-length or the two are
    /// parallel.
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let u_len = u_dir.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = u_dir / u_len;

        let normal = u_dir.cross(&v_dir);
        let n_len = normal.norm();
        if n_len < TOLERANCE {
            return Err(GeometryError::Degenerate("plane directions are parallel".into()).into());
        }
        let normal = normal / n_len;
        let v_dir = normal.cross(&u_dir);

        Ok(Self { origin, u_dir, v_dir, normal })
    }

    /// Creates a plane from an origin and a normal vector; the U and V
    /// directions are chosen automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self { origin, u_dir, v_dir, normal })
    }

    /// Fits a plane to a polygon boundary using its Newell normal, with the
    /// first vertex as origin and the first edge as the U direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for polygons with fewer than 3
    /// vertices or a vanishing normal, and [`GeometryError::NonPlanar`] if
    /// any vertex deviates from the fitted plane by more than `tolerance`.
    pub fn fit_polygon(points: &[Point3], tolerance: f64) -> Result<Self> {
        if points.len() < 3 {
            return Err(
                GeometryError::Degenerate("polygon has fewer than 3 vertices".into()).into(),
            );
        }
        let normal = newell_vector(points);
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("polygon normal vanishes".into()).into());
        }

        let origin = points[0];
        let first_edge = points[1] - points[0];
        let plane = if first_edge.norm() > TOLERANCE
            && first_edge.cross(&normal).norm() > TOLERANCE
        {
            Self::new(origin, first_edge, normal.cross(&first_edge))?
        } else {
            Self::from_normal(origin, normal)?
        };

        // The fit must use the winding normal, not its opposite.
        let plane = if plane.normal.dot(&normal) < 0.0 {
            Self { v_dir: -plane.v_dir, normal: -plane.normal, ..plane }
        } else {
            plane
        };

        let mut max_dev = 0.0_f64;
        for p in points {
            max_dev = max_dev.max(plane.normal.dot(&(p - plane.origin)).abs());
        }
        if max_dev > tolerance {
            return Err(GeometryError::NonPlanar(max_dev).into());
        }
        Ok(plane)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Projects a 3D point into the plane's UV space.
    #[must_use]
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Evaluates the plane at the given UV parameters.
    #[must_use]
    pub fn unproject(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_dir * u + self.v_dir * v
    }
}
