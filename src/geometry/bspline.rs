use crate::error::{GeometryError, Result};
use crate::math::Point3;

/// A clamped B-spline curve in 3D, defined by its control points.
///
/// The knot vector is uniform and clamped, so the curve starts at the first
/// control point and ends at the last. Degree is capped by the number of
/// control points.
#[derive(Debug, Clone)]
pub struct BSpline3 {
    ctrl: Vec<Point3>,
    degree: usize,
    knots: Vec<f64>,
}

impl BSpline3 {
    /// Creates a cubic (degree 3) clamped B-spline over the control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are given.
    pub fn cubic(ctrl: Vec<Point3>) -> Result<Self> {
        Self::with_degree(ctrl, 3)
    }

    /// Creates a clamped B-spline of the requested degree.
    ///
    /// The effective degree is `min(degree, n_ctrl - 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are given or the
    /// degree is 0.
    pub fn with_degree(ctrl: Vec<Point3>, degree: usize) -> Result<Self> {
        if ctrl.len() < 2 {
            return Err(
                GeometryError::Degenerate("spline needs at least 2 control points".into()).into(),
            );
        }
        if degree == 0 {
            return Err(GeometryError::Degenerate("spline degree must be >= 1".into()).into());
        }
        let degree = degree.min(ctrl.len() - 1);

        // Clamped uniform knot vector over [0, 1].
        let n = ctrl.len();
        let n_spans = n - degree;
        let mut knots = Vec::with_capacity(n + degree + 1);
        for _ in 0..=degree {
            knots.push(0.0);
        }
        #[allow(clippy::cast_precision_loss)]
        for i in 1..n_spans {
            knots.push(i as f64 / n_spans as f64);
        }
        for _ in 0..=degree {
            knots.push(1.0);
        }

        Ok(Self { ctrl, degree, knots })
    }

    /// Number of control points.
    #[must_use]
    pub fn ctrl_count(&self) -> usize {
        self.ctrl.len()
    }

    /// Curve degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluates the curve at `t` in `[0, 1]` by de Boor's algorithm.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let p = self.degree;
        let n = self.ctrl.len();

        // Find the knot span index k with knots[k] <= t < knots[k+1].
        let mut k = n - 1;
        if t < 1.0 {
            for i in p..n {
                if t >= self.knots[i] && t < self.knots[i + 1] {
                    k = i;
                    break;
                }
            }
        }

        let mut d: Vec<Point3> = (0..=p).map(|j| self.ctrl[j + k - p]).collect();
        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = j + k - p;
                let denom = self.knots[i + p - r + 1] - self.knots[i];
                let alpha = if denom.abs() < f64::EPSILON {
                    0.0
                } else {
                    (t - self.knots[i]) / denom
                };
                d[j] = Point3::from(d[j - 1].coords * (1.0 - alpha) + d[j].coords * alpha);
            }
        }
        d[p]
    }

    /// Samples the curve at `n` uniformly spaced parameters, endpoints
    /// included. Returns at least 2 points.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, n: usize) -> Vec<Point3> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.point_at(i as f64 / (n - 1) as f64))
            .collect()
    }
}
