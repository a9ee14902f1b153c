use crate::error::{OperationError, Result};
use crate::operations::creation::{MakeFace, MakePolylineWire, MakeSolid};
use crate::operations::shaping::{Loft, Stitcher};
use crate::oplog::OpLog;
use crate::parts::WingXfl;
use crate::topology::{Shape, TopologyStore};

use super::foil_wires::make_foil_wires;

/// Builds the closed wing solid from its spanwise surfaces.
///
/// For every surface segment: tip-closure faces at true tips (a planar
/// face over the closed top+bottom outline), a ruled loft between the
/// left and right top wires, and another between the bottom wires. The
/// lofts are C0 — no smoothing — so sharp leading and trailing edges
/// survive and the surface cannot self-intersect there. All faces are
/// sewn with `stitch_tolerance`; a single closed stitch result becomes
/// the wing solid.
///
/// A wing whose foils have an open trailing edge cannot close and is
/// rejected up front, matching the open-TE guard of the cut pipeline.
///
/// # Errors
///
/// Returns an error if any wire, face, loft, or the final stitch fails;
/// the log carries the diagnostic and nothing is committed anywhere.
pub fn make_wing_shape(
    store: &mut TopologyStore,
    wing: &WingXfl,
    stitch_tolerance: f64,
    log: &mut OpLog,
) -> Result<Shape> {
    log.append(format!("Processing wing {}", wing.name()));

    if wing.max_te_gap() > 1e-6 {
        log.append(format!(
            "   Cannot make a solid of wing {} due to its open trailing edge",
            wing.name()
        ));
        return Err(OperationError::InvalidInput("open trailing edge".into()).into());
    }

    let mut stitcher = Stitcher::new(stitch_tolerance);

    for surface in wing.surfaces() {
        let wires = make_foil_wires(store, &surface, log)?;

        if surface.is_tip_left {
            let outline = surface.left_tip_outline();
            let wire = MakePolylineWire::new(outline, true).execute(store).map_err(|e| {
                log.append("   Error making left tip patch");
                e
            })?;
            let patch = MakeFace::new(wire, vec![]).execute(store).map_err(|e| {
                log.append("   Error making left tip patch");
                e
            })?;
            stitcher.add_face(patch);
        }
        if surface.is_tip_right {
            let outline = surface.right_tip_outline();
            let wire = MakePolylineWire::new(outline, true).execute(store).map_err(|e| {
                log.append("   Error making right tip patch");
                e
            })?;
            let patch = MakeFace::new(wire, vec![]).execute(store).map_err(|e| {
                log.append("   Error making right tip patch");
                e
            })?;
            stitcher.add_face(patch);
        }

        let top_faces = Loft::new(vec![wires.top_left, wires.top_right])
            .execute(store)
            .map_err(|e| {
                log.append("     error sweeping");
                e
            })?;
        stitcher.add_faces(top_faces);

        let bot_faces = Loft::new(vec![wires.bot_left, wires.bot_right])
            .execute(store)
            .map_err(|e| {
                log.append("     error sweeping");
                e
            })?;
        stitcher.add_faces(bot_faces);
    }

    let report = stitcher.perform(store)?;
    log.append(format!(
        "   Nb of free edges={}\n   Nb of contiguous edges={}",
        report.free_edges, report.contiguous_edges
    ));

    if !report.is_single_closed_shell(store) {
        log.append("   Solid not made... ");
        return Err(OperationError::NotDone("wing skin did not close".into()).into());
    }

    let solid = MakeSolid::new(report.shells[0], vec![]).execute(store)?;
    log.append("   Wing stitching result is a solid");
    Ok(Shape::Solid(solid))
}
