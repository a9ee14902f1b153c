use crate::error::Result;
use crate::operations::creation::MakePolylineWire;
use crate::oplog::OpLog;
use crate::parts::Surface;
use crate::topology::{TopologyStore, WireId};

/// The four side wires of one spanwise surface segment.
#[derive(Debug, Clone, Copy)]
pub struct FoilWires {
    pub top_left: WireId,
    pub bot_left: WireId,
    pub top_right: WireId,
    pub bot_right: WireId,
}

/// Builds the four foil polyline wires of a surface segment.
///
/// Coincident consecutive points in the strips are skipped by the wire
/// builder. A strip that cannot produce a wire aborts the operation with
/// a logged diagnostic; the store keeps whatever wires were already
/// built (they are unreachable and harmless).
///
/// # Errors
///
/// Returns an error if any of the four wires cannot be built.
pub fn make_foil_wires(
    store: &mut TopologyStore,
    surface: &Surface,
    log: &mut OpLog,
) -> Result<FoilWires> {
    let top_left = strip_wire(store, &surface.top_left, "top left", log)?;
    let bot_left = strip_wire(store, &surface.bot_left, "bottom left", log)?;
    let top_right = strip_wire(store, &surface.top_right, "top right", log)?;
    let bot_right = strip_wire(store, &surface.bot_right, "bottom right", log)?;
    Ok(FoilWires { top_left, bot_left, top_right, bot_right })
}

fn strip_wire(
    store: &mut TopologyStore,
    strip: &[crate::math::Point3],
    label: &str,
    log: &mut OpLog,
) -> Result<WireId> {
    MakePolylineWire::new(strip.to_vec(), false)
        .execute(store)
        .map_err(|e| {
            log.append(format!("   error making {label} wire"));
            e
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::parts::{FoilProfile, Section, WingXfl};

    #[test]
    fn wires_are_built_for_a_surface() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let foil = FoilProfile::biconvex("test", 0.1, 11);
        let wing = WingXfl::new(
            "main",
            vec![
                Section::new(Point3::new(0.0, -1.0, 0.0), 1.0, foil.clone()),
                Section::new(Point3::new(0.0, 1.0, 0.0), 1.0, foil),
            ],
        )
        .unwrap();
        let surfaces = wing.surfaces();
        let wires = make_foil_wires(&mut store, &surfaces[0], &mut log).unwrap();

        let top_left = store.wire_points(wires.top_left).unwrap();
        assert_eq!(top_left.len(), wing.chord_points());
        assert!(log.is_empty());
    }

    #[test]
    fn degenerate_strip_is_reported() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let q = Point3::new(0.0, 0.0, 0.0);
        let surface = Surface {
            top_left: vec![q, q, q],
            bot_left: vec![q, Point3::new(1.0, 0.0, 0.0)],
            top_right: vec![q, Point3::new(1.0, 1.0, 0.0)],
            bot_right: vec![q, Point3::new(1.0, 1.0, 0.0)],
            is_tip_left: true,
            is_tip_right: true,
        };
        assert!(make_foil_wires(&mut store, &surface, &mut log).is_err());
        assert!(log.text().contains("top left"));
    }
}
