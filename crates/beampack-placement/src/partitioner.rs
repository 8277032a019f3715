//! Capacity-constrained partitioner.
//!
//! Orders the beams along a locality-preserving key, then cuts the
//! sequence into consecutive groups of `bunch`. The final group is
//! short when the beam count is not a multiple of `bunch`. Spread is
//! recorded per group for reporting only and never feeds back into the
//! grouping.

use std::num::NonZeroUsize;

use tracing::{debug, info};

use beampack_core::{Beam, BeamGroup, PackResult, PackingConfig, Strategy};

use crate::distance::{DistanceCache, DistanceModel, Euclidean, group_spread};
use crate::ordering::{greedy_order, hilbert_order, morton_order, strip_order};

#[derive(Debug, Clone)]
pub struct Partitioner<M = Euclidean> {
    bunch: NonZeroUsize,
    strategy: Strategy,
    strip_width: Option<f64>,
    model: M,
}

impl Partitioner<Euclidean> {
    pub fn new(bunch: NonZeroUsize, strategy: Strategy) -> Self {
        Self {
            bunch,
            strategy,
            strip_width: None,
            model: Euclidean,
        }
    }

    /// Build a partitioner from a validated configuration.
    pub fn from_config(config: &PackingConfig) -> PackResult<Self> {
        let bunch = config.validate()?;
        Ok(Self::new(bunch, config.strategy).with_strip_width(config.strip_width))
    }
}

impl<M: DistanceModel> Partitioner<M> {
    /// Swap the distance model used by the greedy strategy and spread figures.
    pub fn with_model<N: DistanceModel>(self, model: N) -> Partitioner<N> {
        Partitioner {
            bunch: self.bunch,
            strategy: self.strategy,
            strip_width: self.strip_width,
            model,
        }
    }

    pub fn with_strip_width(mut self, width: Option<f64>) -> Self {
        self.strip_width = width;
        self
    }

    pub fn bunch(&self) -> usize {
        self.bunch.get()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of groups (and nodes) needed for `beam_count` beams.
    pub fn group_count(&self, beam_count: usize) -> usize {
        beam_count.div_ceil(self.bunch.get())
    }

    /// Split `beams` into groups of at most `bunch`, indexed in traversal order.
    pub fn partition(&self, beams: &[Beam]) -> Vec<BeamGroup> {
        let mut cache = DistanceCache::new(&self.model);
        let group_count = self.group_count(beams.len());

        let ordered = match self.strategy {
            Strategy::Hilbert => hilbert_order(beams),
            Strategy::Morton => morton_order(beams),
            Strategy::Strips => strip_order(beams, self.strip_width, group_count),
            Strategy::Greedy => greedy_order(beams, self.bunch, &mut cache),
        };

        let groups: Vec<BeamGroup> = ordered
            .chunks(self.bunch.get())
            .enumerate()
            .map(|(index, members)| {
                let spread = group_spread(members, &mut cache);
                let group = BeamGroup {
                    index,
                    beams: members.iter().map(|b| b.id).collect(),
                    spread,
                };
                debug!(
                    group = index,
                    beams = ?group.beams,
                    spread = spread.total,
                    diameter = spread.diameter,
                    "formed beam group"
                );
                group
            })
            .collect();

        info!(
            beams = beams.len(),
            groups = groups.len(),
            bunch = self.bunch.get(),
            strategy = %self.strategy,
            distances = cache.len(),
            "partitioned beams"
        );

        groups
    }
}
