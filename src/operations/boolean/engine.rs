use crate::error::{OperationError, Result};
use crate::math::polygon_3d::polygon_centroid;
use crate::math::TOLERANCE;
use crate::topology::{FaceId, Shape, ShellId, SolidId, TopologyStore};

use super::assemble::assemble_fragments;
use super::classify::{classify_against_tools, Containment};
use super::face_info::FaceInfo;
use super::face_intersection::intersect_faces;
use super::split::{split_face, FaceFragment};

/// Cuts a shell's faces with a set of closed tool solids.
///
/// Every target face is split along its intersections with the tool
/// faces; fragments whose centroid falls inside any tool are removed and
/// the survivors are reassembled into shells. Fragments lying on a tool
/// boundary are kept, so a cut flush with a tool wall does not open the
/// shell.
///
/// The input shell is not modified; the returned shells are new entities,
/// which is what makes the caller's keep-the-old-shells rollback possible
/// on failure.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] if a tool is not a closed
/// solid, and [`OperationError::Failed`] if the cut removes every
/// fragment or a face with holes would need splitting.
pub fn cut_shell_with_solids(
    store: &mut TopologyStore,
    shell: ShellId,
    tools: &[SolidId],
) -> Result<Vec<ShellId>> {
    let tool_faces = capture_tools(store, tools)?;
    let targets = FaceInfo::capture_all(store, &store.shell(shell)?.faces.clone())?;

    // Tools whose bounds don't reach the shell can't contribute cuts.
    let active_tools = overlapping_tools(store, shell, tools, &tool_faces)?;

    let mut kept: Vec<FaceFragment> = Vec::new();
    for target in &targets {
        for fragment in split_against_tools(target, &active_tools)? {
            let centroid = polygon_centroid(&fragment.boundary);
            match classify_against_tools(&centroid, &active_tools) {
                Containment::Inside => {}
                Containment::Outside | Containment::OnBoundary => kept.push(fragment),
            }
        }
    }

    if kept.is_empty() {
        return Err(OperationError::Failed("cut produced an empty result".into()).into());
    }
    assemble_fragments(store, &kept, None)
}

/// Splits a shell's faces along a knife face set, keeping both sides.
///
/// Unlike [`cut_shell_with_solids`] nothing is discarded: every fragment
/// survives, and fragment edges lying on a knife face act as seams so the
/// half-bodies separate into distinct shells.
///
/// # Errors
///
/// Returns an error if the knife is empty or a face with holes would
/// need splitting.
pub fn split_shell_with_faces(
    store: &mut TopologyStore,
    shell: ShellId,
    knife: &[FaceId],
) -> Result<Vec<ShellId>> {
    if knife.is_empty() {
        return Err(OperationError::InvalidInput("splitter needs at least one knife face".into())
            .into());
    }
    let knife_faces = FaceInfo::capture_all(store, knife)?;
    let targets = FaceInfo::capture_all(store, &store.shell(shell)?.faces.clone())?;

    let mut fragments: Vec<FaceFragment> = Vec::new();
    for target in &targets {
        let mut cuts = Vec::new();
        for kf in &knife_faces {
            cuts.extend(intersect_faces(target, kf));
        }
        fragments.extend(split_face(target, &cuts)?);
    }

    if fragments.is_empty() {
        return Err(OperationError::Failed("split produced no fragments".into()).into());
    }
    assemble_fragments(store, &fragments, Some(&knife_faces))
}

/// Captures the outer-shell faces of every tool, validating closedness.
fn capture_tools(store: &TopologyStore, tools: &[SolidId]) -> Result<Vec<Vec<FaceInfo>>> {
    let mut captured = Vec::with_capacity(tools.len());
    for &tool in tools {
        let outer = store.solid(tool)?.outer_shell;
        if !store.shell(outer)?.is_closed {
            return Err(
                OperationError::InvalidInput("cut tool is not a closed solid".into()).into(),
            );
        }
        let faces = store.shell(outer)?.faces.clone();
        captured.push(FaceInfo::capture_all(store, &faces)?);
    }
    Ok(captured)
}

/// Keeps only the tools whose bounding box overlaps the target shell's.
fn overlapping_tools(
    store: &TopologyStore,
    shell: ShellId,
    tools: &[SolidId],
    tool_faces: &[Vec<FaceInfo>],
) -> Result<Vec<Vec<FaceInfo>>> {
    let (smin, smax) = store.shape_bounding_box(Shape::Shell(shell))?;
    let mut active = Vec::new();
    for (&tool, faces) in tools.iter().zip(tool_faces.iter()) {
        let (tmin, tmax) = store.shape_bounding_box(Shape::Solid(tool))?;
        let overlaps = smin.x <= tmax.x + TOLERANCE
            && smax.x >= tmin.x - TOLERANCE
            && smin.y <= tmax.y + TOLERANCE
            && smax.y >= tmin.y - TOLERANCE
            && smin.z <= tmax.z + TOLERANCE
            && smax.z >= tmin.z - TOLERANCE;
        if overlaps {
            active.push(faces.clone());
        }
    }
    Ok(active)
}

/// Splits one target face along its intersections with every tool face.
fn split_against_tools(
    target: &FaceInfo,
    tools: &[Vec<FaceInfo>],
) -> Result<Vec<FaceFragment>> {
    let mut cuts = Vec::new();
    for tool in tools {
        for tool_face in tool {
            cuts.extend(intersect_faces(target, tool_face));
        }
    }
    split_face(target, &cuts)
}
