use crate::error::{OperationError, Result};
use crate::math::Point3;

/// A normalized airfoil outline.
///
/// Top and bottom sides run from the leading edge (`x/c = 0`) to the
/// trailing edge (`x/c = 1`) as `(x/c, z/c)` pairs. A closed trailing
/// edge has both sides ending on the same point.
#[derive(Debug, Clone)]
pub struct FoilProfile {
    name: String,
    top: Vec<(f64, f64)>,
    bottom: Vec<(f64, f64)>,
}

impl FoilProfile {
    /// Creates a profile from its two sides.
    ///
    /// # Errors
    ///
    /// Returns an error if either side has fewer than 2 points.
    pub fn new(
        name: impl Into<String>,
        top: Vec<(f64, f64)>,
        bottom: Vec<(f64, f64)>,
    ) -> Result<Self> {
        if top.len() < 2 || bottom.len() < 2 {
            return Err(
                OperationError::InvalidInput("foil side needs at least 2 points".into()).into(),
            );
        }
        Ok(Self { name: name.into(), top, bottom })
    }

    /// A symmetric biconvex profile with the given thickness ratio — a
    /// convenient closed-trailing-edge test foil.
    #[must_use]
    pub fn biconvex(name: impl Into<String>, thickness: f64, n_points: usize) -> Self {
        let n = n_points.max(3);
        let mut top = Vec::with_capacity(n);
        let mut bottom = Vec::with_capacity(n);
        #[allow(clippy::cast_precision_loss)]
        for i in 0..n {
            let x = i as f64 / (n - 1) as f64;
            let z = 2.0 * thickness * x * (1.0 - x);
            top.push((x, z));
            bottom.push((x, -z));
        }
        Self { name: name.into(), top, bottom }
    }

    /// Profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gap between the two trailing-edge points, in `z/c`.
    #[must_use]
    pub fn te_gap(&self) -> f64 {
        let t = self.top[self.top.len() - 1];
        let b = self.bottom[self.bottom.len() - 1];
        (t.1 - b.1).abs()
    }

    /// Samples the top side at `n` uniform `x/c` stations.
    #[must_use]
    pub fn sample_top(&self, n: usize) -> Vec<(f64, f64)> {
        sample_side(&self.top, n)
    }

    /// Samples the bottom side at `n` uniform `x/c` stations.
    #[must_use]
    pub fn sample_bottom(&self, n: usize) -> Vec<(f64, f64)> {
        sample_side(&self.bottom, n)
    }
}

/// Linear resampling of a side at uniform stations.
fn sample_side(side: &[(f64, f64)], n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    #[allow(clippy::cast_precision_loss)]
    for i in 0..n {
        let x = i as f64 / (n - 1) as f64;
        out.push((x, interpolate(side, x)));
    }
    out
}

fn interpolate(side: &[(f64, f64)], x: f64) -> f64 {
    if x <= side[0].0 {
        return side[0].1;
    }
    for pair in side.windows(2) {
        let (x0, z0) = pair[0];
        let (x1, z1) = pair[1];
        if x <= x1 {
            if (x1 - x0).abs() < f64::EPSILON {
                return z1;
            }
            let t = (x - x0) / (x1 - x0);
            return z0 + t * (z1 - z0);
        }
    }
    side[side.len() - 1].1
}

/// A wing section: an airfoil profile positioned in space.
///
/// The chord runs along +x from the leading edge; the section plane is
/// normal to +y (the span direction).
#[derive(Debug, Clone)]
pub struct Section {
    /// Leading-edge position.
    pub leading_edge: Point3,
    /// Chord length, in metres.
    pub chord: f64,
    /// The airfoil outline.
    pub foil: FoilProfile,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(leading_edge: Point3, chord: f64, foil: FoilProfile) -> Self {
        Self { leading_edge, chord, foil }
    }

    /// 3D points of the top side sampled at `n` stations.
    #[must_use]
    pub fn top_points(&self, n: usize) -> Vec<Point3> {
        self.side_points(&self.foil.sample_top(n))
    }

    /// 3D points of the bottom side sampled at `n` stations.
    #[must_use]
    pub fn bottom_points(&self, n: usize) -> Vec<Point3> {
        self.side_points(&self.foil.sample_bottom(n))
    }

    /// 3D points of the camber mid-line sampled at `n` stations.
    #[must_use]
    pub fn mid_points(&self, n: usize) -> Vec<Point3> {
        let top = self.foil.sample_top(n);
        let bottom = self.foil.sample_bottom(n);
        top.iter()
            .zip(&bottom)
            .map(|(&(x, zt), &(_, zb))| (x, 0.5 * (zt + zb)))
            .map(|(x, z)| self.profile_point(x, z))
            .collect()
    }

    fn side_points(&self, samples: &[(f64, f64)]) -> Vec<Point3> {
        samples.iter().map(|&(x, z)| self.profile_point(x, z)).collect()
    }

    fn profile_point(&self, xc: f64, zc: f64) -> Point3 {
        Point3::new(
            self.leading_edge.x + xc * self.chord,
            self.leading_edge.y,
            self.leading_edge.z + zc * self.chord,
        )
    }
}
