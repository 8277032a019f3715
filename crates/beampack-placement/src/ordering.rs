//! Locality-preserving beam orderings.
//!
//! Sorting beams on one raw coordinate scatters sky neighbours across
//! the sequence. Each ordering here keeps beams that are close on the
//! sky close in the sequence, so cutting it into consecutive runs of
//! `bunch` yields compact groups. Every ordering is total: ties fall
//! back to the beam id.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use beampack_core::{Beam, BeamId};

use crate::distance::{DistanceCache, DistanceModel};

/// Bits per axis of the space-filling curve grid.
pub const CURVE_ORDER: u32 = 16;

const GRID_SIZE: u64 = 1 << CURVE_ORDER;

/// Square cell grid over the catalog's bounding box.
///
/// Both axes share one scale so the curve sees the true aspect ratio.
struct Grid {
    min_x: f64,
    min_y: f64,
    scale: f64,
}

impl Grid {
    fn fit(beams: &[Beam]) -> Self {
        let (min_x, max_x) = bounds(beams.iter().map(|b| b.x));
        let (min_y, max_y) = bounds(beams.iter().map(|b| b.y));
        let span = (max_x - min_x).max(max_y - min_y);

        // All beams coincident (or a single beam): every beam lands in cell 0.
        let scale = if span.is_finite() && span > 0.0 {
            (GRID_SIZE - 1) as f64 / span
        } else {
            0.0
        };

        Self {
            min_x,
            min_y,
            scale,
        }
    }

    fn cell(&self, beam: &Beam) -> (u32, u32) {
        let max = (GRID_SIZE - 1) as f64;
        let cx = ((beam.x - self.min_x) * self.scale).round().clamp(0.0, max);
        let cy = ((beam.y - self.min_y) * self.scale).round().clamp(0.0, max);
        (cx as u32, cy as u32)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Position of cell `(x, y)` along a Hilbert curve of [`CURVE_ORDER`].
pub fn hilbert_index(x: u32, y: u32) -> u64 {
    let mut x = u64::from(x) & (GRID_SIZE - 1);
    let mut y = u64::from(y) & (GRID_SIZE - 1);
    let mut d = 0;

    let mut s = GRID_SIZE / 2;
    while s > 0 {
        let rx = u64::from(x & s > 0);
        let ry = u64::from(y & s > 0);
        d += s * s * ((3 * rx) ^ ry);

        // Rotate the quadrant so the sub-curve has canonical orientation.
        if ry == 0 {
            if rx == 1 {
                x = GRID_SIZE - 1 - x;
                y = GRID_SIZE - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }

    d
}

/// Z-order index: the bits of `x` and `y` interleaved, `x` in the low bit.
pub fn morton_index(x: u32, y: u32) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1)
}

fn spread_bits(v: u32) -> u64 {
    let mut v = u64::from(v);
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

pub fn hilbert_order(beams: &[Beam]) -> Vec<&Beam> {
    curve_order(beams, hilbert_index)
}

pub fn morton_order(beams: &[Beam]) -> Vec<&Beam> {
    curve_order(beams, morton_index)
}

fn curve_order(beams: &[Beam], index: fn(u32, u32) -> u64) -> Vec<&Beam> {
    if beams.is_empty() {
        return Vec::new();
    }

    let grid = Grid::fit(beams);
    let mut keyed: Vec<(u64, &Beam)> = beams
        .iter()
        .map(|b| {
            let (cx, cy) = grid.cell(b);
            (index(cx, cy), b)
        })
        .collect();

    keyed.sort_by(|(ka, a), (kb, b)| ka.cmp(kb).then(a.id.cmp(&b.id)));
    keyed.into_iter().map(|(_, b)| b).collect()
}

/// Boustrophedon walk over vertical strips.
///
/// Beams are binned into strips of `width` along x. Even strips are
/// walked upwards in y, odd strips downwards, so the end of one strip
/// meets the start of the next. Without an explicit width the x-span is
/// split into `ceil(sqrt(group_count))` strips.
pub fn strip_order(beams: &[Beam], width: Option<f64>, group_count: usize) -> Vec<&Beam> {
    if beams.is_empty() {
        return Vec::new();
    }

    let (min_x, max_x) = bounds(beams.iter().map(|b| b.x));
    let (width, last_strip) = match width {
        Some(w) => (w, u64::MAX),
        None => {
            let strips = (group_count as f64).sqrt().ceil().max(1.0);
            ((max_x - min_x) / strips, strips as u64 - 1)
        }
    };

    let strip_of = |beam: &Beam| -> u64 {
        if width.is_finite() && width > 0.0 {
            (((beam.x - min_x) / width).floor() as u64).min(last_strip)
        } else {
            0
        }
    };

    let mut keyed: Vec<(u64, &Beam)> = beams.iter().map(|b| (strip_of(b), b)).collect();
    keyed.sort_by(|(sa, a), (sb, b)| {
        sa.cmp(sb)
            .then_with(|| {
                let along = a.y.total_cmp(&b.y);
                if sa % 2 == 0 { along } else { along.reverse() }
            })
            .then_with(|| a.x.total_cmp(&b.x))
            .then(a.id.cmp(&b.id))
    });
    keyed.into_iter().map(|(_, b)| b).collect()
}

/// Greedy nearest-neighbour packing.
///
/// Beams are visited in ascending x. The first unvisited beam seeds a
/// group and pulls in its `bunch - 1` nearest unvisited neighbours
/// (distance ties by id). Consecutive runs of `bunch` in the returned
/// sequence are exactly the greedy groups.
pub fn greedy_order<'a, M: DistanceModel>(
    beams: &'a [Beam],
    bunch: NonZeroUsize,
    cache: &mut DistanceCache<'_, M>,
) -> Vec<&'a Beam> {
    let mut work: Vec<&Beam> = beams.iter().collect();
    work.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.id.cmp(&b.id)));

    let mut ordered = Vec::with_capacity(beams.len());
    while let Some((&seed, rest)) = work.split_first() {
        let mut candidates: Vec<(f64, &Beam)> = rest
            .iter()
            .map(|&b| (cache.distance(seed, b), b))
            .collect();
        candidates.sort_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)));

        let picked: HashSet<BeamId> = candidates
            .iter()
            .take(bunch.get() - 1)
            .map(|(_, b)| b.id)
            .collect();

        ordered.push(seed);
        ordered.extend(
            candidates
                .iter()
                .take(bunch.get() - 1)
                .map(|&(_, b)| b),
        );
        work.retain(|b| b.id != seed.id && !picked.contains(&b.id));
    }

    ordered
}
