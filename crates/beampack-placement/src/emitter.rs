//! Assignment emitter — binds beam groups to nodes and multicast groups.

use tracing::info;

use beampack_core::{Assignment, BeamGroup, NodeAssignment};

/// Map each group to a node and a multicast group id.
///
/// Node indices follow the group order (0-based, contiguous). The
/// multicast group of node `i` is `multicast_base + i`.
pub fn emit(groups: &[BeamGroup], multicast_base: u32) -> Assignment {
    let rows: Vec<NodeAssignment> = groups
        .iter()
        .enumerate()
        .map(|(node_index, group)| {
            let mut beams = group.beams.clone();
            beams.sort_unstable();
            NodeAssignment {
                node_index,
                multicast_group: u64::from(multicast_base) + node_index as u64,
                beams,
                spread: group.spread,
            }
        })
        .collect();

    let total_spread: f64 = rows.iter().map(|r| r.spread.total).sum();
    let max_diameter = rows
        .iter()
        .map(|r| r.spread.diameter)
        .fold(0.0, f64::max);

    info!(
        nodes = rows.len(),
        multicast_base,
        total_spread,
        max_diameter,
        "emitted assignment"
    );

    Assignment {
        rows,
        total_spread,
        max_diameter,
    }
}
