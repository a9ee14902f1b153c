use crate::math::Point3;

/// One spanwise wing segment, bounded by two sections.
///
/// Carries the discretized side point strips the shape builder lofts
/// between, plus the tip flags that decide whether closure patches are
/// needed at its ends. "Left" is the lower-y section, "right" the
/// higher-y one.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Top side of the left section, leading edge to trailing edge.
    pub top_left: Vec<Point3>,
    /// Bottom side of the left section.
    pub bot_left: Vec<Point3>,
    /// Top side of the right section.
    pub top_right: Vec<Point3>,
    /// Bottom side of the right section.
    pub bot_right: Vec<Point3>,
    /// Whether the left section is a true wing tip.
    pub is_tip_left: bool,
    /// Whether the right section is a true wing tip.
    pub is_tip_right: bool,
}

impl Surface {
    /// The closed tip outline at the left section: top side forward,
    /// bottom side back.
    #[must_use]
    pub fn left_tip_outline(&self) -> Vec<Point3> {
        tip_outline(&self.top_left, &self.bot_left)
    }

    /// The closed tip outline at the right section.
    #[must_use]
    pub fn right_tip_outline(&self) -> Vec<Point3> {
        tip_outline(&self.top_right, &self.bot_right)
    }
}

fn tip_outline(top: &[Point3], bottom: &[Point3]) -> Vec<Point3> {
    let mut outline: Vec<Point3> = top.to_vec();
    outline.extend(bottom.iter().rev());
    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn tip_outline_walks_top_then_bottom_back() {
        let surface = Surface {
            top_left: vec![p(0.0, 0.0, 0.0), p(0.5, 0.0, 0.1), p(1.0, 0.0, 0.0)],
            bot_left: vec![p(0.0, 0.0, 0.0), p(0.5, 0.0, -0.1), p(1.0, 0.0, 0.0)],
            top_right: vec![],
            bot_right: vec![],
            is_tip_left: true,
            is_tip_right: false,
        };
        let outline = surface.left_tip_outline();
        assert_eq!(outline.len(), 6);
        // Bottom side comes back trailing edge first.
        assert!((outline[3] - p(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((outline[4] - p(0.5, 0.0, -0.1)).norm() < 1e-12);
    }
}
