//! Shared types used across beampack crates.

use serde::{Deserialize, Serialize};

/// 1-based beam identifier, assigned in catalog order at load time.
pub type BeamId = usize;

/// A coherent beam pointing, as an offset from the field centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: BeamId,
    pub x: f64,
    pub y: f64,
}

impl Beam {
    pub fn new(id: BeamId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Intra-group compactness of a set of beams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSpread {
    /// Sum of all pairwise distances.
    pub total: f64,
    /// Largest pairwise distance.
    pub diameter: f64,
}

/// A set of at most `bunch` beams destined for one compute node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamGroup {
    /// Position of the group in traversal order (0-based).
    pub index: usize,
    /// Member beams in the order the partitioner visited them.
    pub beams: Vec<BeamId>,
    pub spread: GroupSpread,
}

impl BeamGroup {
    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}

/// One row of the emitted assignment: a group bound to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAssignment {
    pub node_index: usize,
    pub multicast_group: u64,
    /// Member beam ids, ascending.
    pub beams: Vec<BeamId>,
    pub spread: GroupSpread,
}

/// The complete beam → node / multicast group mapping for one catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub rows: Vec<NodeAssignment>,
    /// Sum of every group's total spread.
    pub total_spread: f64,
    /// Largest diameter over all groups.
    pub max_diameter: f64,
}

impl Assignment {
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn beam_count(&self) -> usize {
        self.rows.iter().map(|r| r.beams.len()).sum()
    }

    /// Find the node a beam was assigned to.
    pub fn node_for(&self, beam: BeamId) -> Option<&NodeAssignment> {
        self.rows.iter().find(|r| r.beams.binary_search(&beam).is_ok())
    }
}
