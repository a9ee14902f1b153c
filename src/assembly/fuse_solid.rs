use crate::error::{OperationError, Result};
use crate::operations::creation::MakeSolid;
use crate::operations::shaping::Stitcher;
use crate::oplog::OpLog;
use crate::parts::Fuse;
use crate::topology::{SolidId, TopologyStore};

/// Sewing tolerance of the fuse solid rebuild, in metres.
const FUSE_STITCH_TOLERANCE: f64 = 1.0e-4;

/// Rebuilds the fuselage's shells from its shapes and sews every shell
/// face into one solid.
///
/// Free-edge and contiguous-edge counts are logged after sewing; a stitch
/// that does not close into a single shell fails without modifying the
/// fuse beyond the shell rebuild.
///
/// # Errors
///
/// Returns an error if the fuse has no shapes, the sewing does not
/// close, or topology cannot be read.
pub fn make_fuse_solid(
    store: &mut TopologyStore,
    fuse: &mut Fuse,
    log: &mut OpLog,
) -> Result<SolidId> {
    fuse.make_shells_from_shapes(store)?;
    log.append(format!("Processing fuse {}", fuse.name()));

    if fuse.shells().is_empty() {
        log.append("   Fuse has no shells to stitch");
        return Err(OperationError::NotDone("fuse has no shells".into()).into());
    }

    let mut stitcher = Stitcher::new(FUSE_STITCH_TOLERANCE);
    for &shell in fuse.shells() {
        stitcher.add_faces(store.shell(shell)?.faces.clone());
    }

    let report = stitcher.perform(store)?;
    log.append(format!("   Nb of free edges={}", report.free_edges));
    log.append(format!("   Nb of contiguous edges={}", report.contiguous_edges));

    if !report.is_single_closed_shell(store) {
        log.append("   Solid not made... ");
        return Err(OperationError::NotDone("fuse stitch did not close".into()).into());
    }

    let solid = MakeSolid::new(report.shells[0], vec![]).execute(store)?;
    log.append("   Fuse stitching result is a solid");
    log.append(store.shape_content(crate::topology::Shape::Solid(solid), "   ")?);
    Ok(solid)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use std::f64::consts::PI;

    #[allow(clippy::cast_precision_loss)]
    fn half_ring(x: f64, r: f64, n: usize) -> Vec<Point3> {
        (0..n)
            .map(|i| {
                let theta = PI * i as f64 / (n - 1) as f64;
                Point3::new(x, r * theta.sin(), r * theta.cos())
            })
            .collect()
    }

    #[test]
    fn hull_shapes_stitch_back_into_a_solid() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_xfl(
            "hull",
            vec![half_ring(0.0, 0.5, 9), half_ring(4.0, 0.5, 9)],
        );
        fuse.make_shape(&mut store, &mut log).unwrap();

        let solid = make_fuse_solid(&mut store, &mut fuse, &mut log).unwrap();
        let shell = store.solid(solid).unwrap().outer_shell;
        assert!(store.shell(shell).unwrap().is_closed);
        assert!(log.text().contains("Nb of free edges=0"));
    }

    #[test]
    fn empty_fuse_is_rejected() {
        let mut store = TopologyStore::new();
        let mut log = OpLog::new();
        let mut fuse = Fuse::new_occ("empty");
        assert!(make_fuse_solid(&mut store, &mut fuse, &mut log).is_err());
    }
}
