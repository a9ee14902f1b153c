use crate::error::{OperationError, Result};
use crate::math::Point3;

use super::{Section, Surface};

/// Default chordwise sampling of the section outlines.
const DEFAULT_CHORD_POINTS: usize = 17;

/// A parametric wing: an ordered list of sections along the span.
///
/// Sections are ordered by increasing y and cover the full span, left tip
/// to right tip. Spanwise [`Surface`] segments between consecutive
/// sections are generated on demand.
#[derive(Debug, Clone)]
pub struct WingXfl {
    name: String,
    sections: Vec<Section>,
    chord_points: usize,
}

impl WingXfl {
    /// Creates a wing from its sections.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 sections are given or their span
    /// positions are not strictly increasing.
    pub fn new(name: impl Into<String>, sections: Vec<Section>) -> Result<Self> {
        if sections.len() < 2 {
            return Err(
                OperationError::InvalidInput("a wing needs at least 2 sections".into()).into(),
            );
        }
        for pair in sections.windows(2) {
            if pair[1].leading_edge.y <= pair[0].leading_edge.y {
                return Err(OperationError::InvalidInput(
                    "wing sections must be ordered by increasing span position".into(),
                )
                .into());
            }
        }
        Ok(Self {
            name: name.into(),
            sections,
            chord_points: DEFAULT_CHORD_POINTS,
        })
    }

    /// Wing name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wing's sections.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Chordwise sampling density of generated surfaces.
    #[must_use]
    pub fn chord_points(&self) -> usize {
        self.chord_points
    }

    /// Overrides the chordwise sampling density (at least 3).
    pub fn set_chord_points(&mut self, n: usize) {
        self.chord_points = n.max(3);
    }

    /// Largest trailing-edge gap over all section foils, in `z/c`.
    #[must_use]
    pub fn max_te_gap(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.foil.te_gap())
            .fold(0.0, f64::max)
    }

    /// Whether the wing straddles or touches the symmetry plane `y = 0`.
    #[must_use]
    pub fn spans_symmetry_plane(&self) -> bool {
        let first = self.sections[0].leading_edge.y;
        let last = self.sections[self.sections.len() - 1].leading_edge.y;
        first <= 0.0 && last >= 0.0
    }

    /// Generates the spanwise surface segments between consecutive
    /// sections. The outermost segments carry the tip flags.
    #[must_use]
    pub fn surfaces(&self) -> Vec<Surface> {
        let n = self.chord_points;
        let last = self.sections.len() - 2;
        self.sections
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Surface {
                top_left: pair[0].top_points(n),
                bot_left: pair[0].bottom_points(n),
                top_right: pair[1].top_points(n),
                bot_right: pair[1].bottom_points(n),
                is_tip_left: i == 0,
                is_tip_right: i == last,
            })
            .collect()
    }

    /// Camber mid-line strips of every section, the sections of the thin
    /// mid-surface used as a fragmentation knife.
    #[must_use]
    pub fn mid_strips(&self) -> Vec<Vec<Point3>> {
        self.sections
            .iter()
            .map(|s| s.mid_points(self.chord_points))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parts::FoilProfile;

    fn section(y: f64, chord: f64) -> Section {
        Section::new(
            Point3::new(0.0, y, 0.0),
            chord,
            FoilProfile::biconvex("test", 0.1, 11),
        )
    }

    #[test]
    fn surfaces_carry_tip_flags_at_the_ends() {
        let wing = WingXfl::new(
            "main",
            vec![section(-2.0, 1.0), section(0.0, 1.5), section(2.0, 1.0)],
        )
        .unwrap();
        let surfaces = wing.surfaces();
        assert_eq!(surfaces.len(), 2);
        assert!(surfaces[0].is_tip_left);
        assert!(!surfaces[0].is_tip_right);
        assert!(!surfaces[1].is_tip_left);
        assert!(surfaces[1].is_tip_right);
    }

    #[test]
    fn unordered_sections_are_rejected() {
        let result = WingXfl::new("bad", vec![section(1.0, 1.0), section(-1.0, 1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn single_section_is_rejected() {
        assert!(WingXfl::new("bad", vec![section(0.0, 1.0)]).is_err());
    }

    #[test]
    fn symmetric_wing_spans_the_symmetry_plane() {
        let wing = WingXfl::new("main", vec![section(-2.0, 1.0), section(2.0, 1.0)]).unwrap();
        assert!(wing.spans_symmetry_plane());

        let half = WingXfl::new("fin", vec![section(1.0, 1.0), section(2.0, 1.0)]).unwrap();
        assert!(!half.spans_symmetry_plane());
    }

    #[test]
    fn mid_strips_match_section_count() {
        let wing = WingXfl::new("main", vec![section(-1.0, 1.0), section(1.0, 1.0)]).unwrap();
        assert_eq!(wing.mid_strips().len(), 2);
    }
}
