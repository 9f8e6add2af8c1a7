//! Face merging post-pass.
//!
//! Combines runs of coplanar faces that share a block and a side and touch
//! end to end along the side's second in-plane axis into one stretched quad.
//! The unmerged face list stays the reference output; this pass only runs when
//! face merging is switched on.

use std::collections::BTreeMap;

use log::debug;
use web_time::Instant;

use super::face::Face;

/// Faces that may merge share a side, a plane and a `u` coordinate.
type RunKey = (u8, u8, u8);

fn run_key(face: &Face) -> RunKey {
    let normal_axis = face.side.axis() as usize;
    let (u_axis, _) = face.side.plane_axes();
    (
        face.side as u8,
        face.origin[normal_axis],
        face.origin[u_axis as usize],
    )
}

fn v_start(face: &Face) -> u8 {
    let (_, v_axis) = face.side.plane_axes();
    face.origin[v_axis as usize]
}

/// Merges every contiguous run in `faces`.
///
/// The output is ordered by side, plane, `u` coordinate and then `v`
/// coordinate, so identical inputs always produce identical meshes.
pub fn merge_faces(faces: &[Face]) -> Vec<Face> {
    let start = Instant::now();

    let mut runs: BTreeMap<RunKey, Vec<Face>> = BTreeMap::new();
    for face in faces {
        runs.entry(run_key(face)).or_default().push(*face);
    }

    let mut merged = Vec::with_capacity(faces.len());
    for run in runs.values_mut() {
        run.sort_by_key(v_start);
        let mut current: Option<Face> = None;
        for face in run.iter() {
            current = match current {
                Some(open) => match open.merge_along_v(face) {
                    Some(grown) => Some(grown),
                    None => {
                        merged.push(open);
                        Some(*face)
                    }
                },
                None => Some(*face),
            };
        }
        merged.extend(current);
    }

    debug!(
        "Merged {} faces into {} in {:?}",
        faces.len(),
        merged.len(),
        start.elapsed()
    );
    merged
}
