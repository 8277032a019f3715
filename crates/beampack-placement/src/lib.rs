//! beampack placement — assign sky beams to compute nodes.
//!
//! Beams that sit next to each other on the sky are packed onto the
//! same node so that multi-beam filtering and candidate sifting can run
//! locally. The pipeline is strictly forward:
//!
//! - **`distance`** — Distance model and pairwise cache
//! - **`ordering`** — Locality-preserving beam orderings (Hilbert, Morton, strips, greedy)
//! - **`partitioner`** — Fixed-capacity grouping along an ordering
//! - **`emitter`** — Group → node / multicast group mapping
//! - **`report`** — Text, JSON and TSV rendering

pub mod distance;
pub mod emitter;
pub mod ordering;
pub mod partitioner;
pub mod report;

pub use distance::{DistanceCache, DistanceModel, Euclidean, group_spread};
pub use emitter::emit;
pub use partitioner::Partitioner;
pub use report::{OutputFormat, format_beam_table, format_table, render, to_json};

use beampack_core::{Assignment, BeamCatalog, PackResult, PackingConfig};

/// Run the whole packing pipeline over a loaded catalog.
///
/// Only the first `max_beams` beams are packed when the limit is set.
pub fn pack(catalog: &BeamCatalog, config: &PackingConfig) -> PackResult<Assignment> {
    let partitioner = Partitioner::from_config(config)?;

    let beams = match config.max_beams {
        Some(max) if max < catalog.len() => {
            tracing::warn!(
                kept = max,
                dropped = catalog.len() - max,
                "catalog exceeds max_beams, dropping trailing beams"
            );
            &catalog.beams()[..max]
        }
        _ => catalog.beams(),
    };

    let groups = partitioner.partition(beams);
    Ok(emit(&groups, config.multicast_base))
}
