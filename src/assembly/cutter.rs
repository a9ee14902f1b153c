use crate::config::Config;
use crate::error::Result;
use crate::math::{Point3, Vector3, LENGTH_PRECISION};
use crate::operations::boolean::{cut_shell_with_solids, split_shell_with_faces};
use crate::operations::creation::MakePolylineWire;
use crate::operations::shaping::Loft;
use crate::operations::transform::Translate;
use crate::oplog::OpLog;
use crate::parts::{Fuse, WingXfl};
use crate::topology::{FaceId, Shape, ShellData, ShellId, SolidId, TopologyStore, WireId};

/// Subtracts wing knife solids from a fuselage's shells.
///
/// The knives are translated into the fuse's local frame, the fuse's
/// shells are rebuilt from its shapes, and each shell is cut in its
/// stored order. Any cut failure aborts the whole operation and leaves
/// the fuse with its pre-cut shells — no partial mutation is committed —
/// while the log carries the diagnostic. On success the shell list is
/// replaced by the cut results and the fuse is re-triangulated.
///
/// # Errors
///
/// Returns the engine error of the first failing shell cut.
pub fn cut_fuse_shapes(
    store: &mut TopologyStore,
    fuse: &mut Fuse,
    fuse_position: &Point3,
    tools: &[SolidId],
    config: &Config,
    log: &mut OpLog,
) -> Result<()> {
    if fuse.shapes().is_empty() {
        log.append("   Fuse has no topology shapes to cut.");
        return Ok(());
    }

    log.append("Cutting body shape with selected wings...");
    translate_tools(store, tools, fuse_position)?;
    fuse.make_shells_from_shapes(store)?;

    let new_shells = match cut_shells(store, fuse.shells(), tools, log) {
        Ok(shells) => shells,
        Err(e) => {
            log.append("Error cutting shape with wings");
            return Err(e);
        }
    };

    log.append(format!(
        "   Cut operation has produced {} shell(s)",
        new_shells.len()
    ));
    for &shell in &new_shells {
        log.append(store.shape_content(Shape::Shell(shell), "   ")?);
    }

    fuse.set_shells(new_shells);
    fuse.make_triangulation(store, config.mesh, config.node_merge_distance, log)
}

/// Symmetry fast path: cuts only the fuselage's cached right-side
/// shells; rebuilding the left side is the caller's mirror step
/// ([`Fuse::rebuild_shells_from_right`], invoked here on success).
///
/// Cutting one half and mirroring halves the cutting cost of a
/// bilaterally symmetric fuselage. The knife set is assumed symmetric
/// about the XZ plane; nothing checks this, and an asymmetric knife set
/// silently produces a symmetric (wrong) result, so callers route
/// asymmetric configurations through [`cut_fuse_shapes`].
///
/// # Errors
///
/// Returns the engine error of the first failing shell cut; the fuse
/// keeps its pre-cut right-side shells and full shell list in that case.
pub fn cut_fuse_right_shapes(
    store: &mut TopologyStore,
    fuse: &mut Fuse,
    fuse_position: &Point3,
    tools: &[SolidId],
    config: &Config,
    log: &mut OpLog,
) -> Result<()> {
    if fuse.right_shells().is_empty() {
        log.append("   Fuse has no right-side shells to cut.");
        return Ok(());
    }

    log.append("Cutting fuse shape with selected wings...");
    translate_tools(store, tools, fuse_position)?;

    let new_right = match cut_shells(store, fuse.right_shells(), tools, log) {
        Ok(shells) => shells,
        Err(e) => {
            log.append("Error cutting shape with wings");
            return Err(e);
        }
    };

    fuse.set_right_shells(new_right);
    fuse.rebuild_shells_from_right(store)?;

    log.append(format!(
        "   Cut operation has produced {} shell(s)",
        fuse.shells().len()
    ));

    fuse.make_triangulation(store, config.mesh, config.node_merge_distance, log)
}

/// Fragments the fuselage's shells with the wing's thin mid-surface,
/// retaining both half-bodies.
///
/// A splitter, not a subtraction: every fragment survives, and the cut
/// seams separate the result into (potentially several) shells whose
/// content is logged for diagnosis. The fragmented bodies replace the
/// fuse's shapes.
///
/// # Errors
///
/// Returns an error if the knife cannot be built or any shell split
/// fails; the fuse is unchanged in that case.
pub fn make_fragments(
    store: &mut TopologyStore,
    wing: &WingXfl,
    fuse: &mut Fuse,
    config: &Config,
    log: &mut OpLog,
) -> Result<()> {
    if fuse.shapes().is_empty() {
        log.append("   Fuse has no topology shapes to cut.");
        return Ok(());
    }

    let knife = make_mid_surface_knife(store, wing, fuse.position(), log)?;

    fuse.make_shells_from_shapes(store)?;
    for (i, &shell) in fuse.shells().iter().enumerate() {
        log.append(format!("   Shell {i}:"));
        log.append(store.shape_content(Shape::Shell(shell), "      ")?);
    }

    log.append("Fragmenting body shape with selected wings...");

    let mut fragments: Vec<ShellId> = Vec::new();
    for &shell in fuse.shells() {
        match split_shell_with_faces(store, shell, &knife) {
            Ok(shells) => {
                for (i, &s) in shells.iter().enumerate() {
                    log.append(format!("   Cutting shell {}", i + 1));
                    log.append(store.shape_content(Shape::Shell(s), "      ")?);
                }
                fragments.extend(shells);
            }
            Err(e) => {
                log.append("Error fragmenting shape with wings");
                return Err(e);
            }
        }
    }

    // The fragmented bodies become the fuse's new shapes.
    fuse.replace_shapes(fragments.iter().map(|&s| Shape::Shell(s)).collect());
    fuse.make_shells_from_shapes(store)?;
    fuse.make_triangulation(store, config.mesh, config.node_merge_distance, log)
}

/// Cuts each shell in stored order, accumulating the result shells.
fn cut_shells(
    store: &mut TopologyStore,
    shells: &[ShellId],
    tools: &[SolidId],
    log: &mut OpLog,
) -> Result<Vec<ShellId>> {
    let shells = shells.to_vec();
    let mut new_shells = Vec::new();
    for shell in shells {
        let cut = cut_shell_with_solids(store, shell, tools)?;
        for i in 0..cut.len() {
            log.append(format!("   Cutting shell {}", i + 1));
        }
        new_shells.extend(cut);
    }
    Ok(new_shells)
}

/// Translates the knife tools by the opposite of the fuse position, so
/// cutting happens in the fuse's local frame. Components below the
/// length precision are treated as exactly zero; a fully zero offset
/// skips the transform altogether.
fn translate_tools(
    store: &mut TopologyStore,
    tools: &[SolidId],
    fuse_position: &Point3,
) -> Result<()> {
    let comp = |v: f64| if v.abs() > LENGTH_PRECISION { -v } else { 0.0 };
    let offset = Vector3::new(
        comp(fuse_position.x),
        comp(fuse_position.y),
        comp(fuse_position.z),
    );
    if offset.norm() < LENGTH_PRECISION {
        return Ok(());
    }
    for &tool in tools {
        Translate::new(Shape::Solid(tool), offset).execute(store)?;
    }
    Ok(())
}

/// Builds the thin mid-surface knife of a wing: the camber mid-lines of
/// its sections, lofted into an open face strip in the fuse frame.
fn make_mid_surface_knife(
    store: &mut TopologyStore,
    wing: &WingXfl,
    fuse_position: &Point3,
    log: &mut OpLog,
) -> Result<Vec<FaceId>> {
    let mut wires: Vec<WireId> = Vec::new();
    for strip in wing.mid_strips() {
        wires.push(MakePolylineWire::new(strip, false).execute(store)?);
    }
    let faces = Loft::new(wires).execute(store).map_err(|e| {
        log.append("   Error sweeping the wing mid-surface");
        e
    })?;

    // Wrap the knife in a shell so it can ride the shape transforms.
    let knife_shell = store.add_shell(ShellData { faces: faces.clone(), is_closed: false });
    let comp = |v: f64| if v.abs() > LENGTH_PRECISION { -v } else { 0.0 };
    let offset = Vector3::new(
        comp(fuse_position.x),
        comp(fuse_position.y),
        comp(fuse_position.z),
    );
    if offset.norm() >= LENGTH_PRECISION {
        Translate::new(Shape::Shell(knife_shell), offset).execute(store)?;
    }
    Ok(faces)
}
