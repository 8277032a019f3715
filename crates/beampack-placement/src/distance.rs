//! Distance between beams on the sky.
//!
//! The partitioner only relies on the model being symmetric and
//! non-negative; spread figures are additionally meaningful when it
//! obeys the triangle inequality.

use std::collections::HashMap;

use beampack_core::{Beam, BeamId, GroupSpread};

/// A pure, stateless metric over beam positions.
pub trait DistanceModel {
    fn distance(&self, a: &Beam, b: &Beam) -> f64;
}

/// Straight-line distance in the catalog coordinate plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceModel for Euclidean {
    fn distance(&self, a: &Beam, b: &Beam) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

/// Memoised distances keyed by the unordered beam id pair.
pub struct DistanceCache<'m, M> {
    model: &'m M,
    cache: HashMap<(BeamId, BeamId), f64>,
}

impl<'m, M: DistanceModel> DistanceCache<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            cache: HashMap::new(),
        }
    }

    pub fn distance(&mut self, a: &Beam, b: &Beam) -> f64 {
        if a.id == b.id {
            return 0.0;
        }
        let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
        let model = self.model;
        *self
            .cache
            .entry(key)
            .or_insert_with(|| model.distance(a, b))
    }

    /// Number of distinct pairs computed so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Sum and maximum of all pairwise distances within a group.
pub fn group_spread<M: DistanceModel>(
    members: &[&Beam],
    cache: &mut DistanceCache<'_, M>,
) -> GroupSpread {
    let mut spread = GroupSpread::default();
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            let d = cache.distance(a, b);
            spread.total += d;
            spread.diameter = spread.diameter.max(d);
        }
    }
    spread
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_distance() {
        let a = Beam::new(1, 0.0, 0.0);
        let b = Beam::new(2, 3.0, 4.0);
        assert_eq!(Euclidean.distance(&a, &b), 5.0);
        assert_eq!(Euclidean.distance(&b, &a), 5.0);
        assert_eq!(Euclidean.distance(&a, &a), 0.0);
    }

    #[test]
    fn euclidean_triangle_inequality() {
        let beams = [
            Beam::new(1, -1.5, 2.0),
            Beam::new(2, 0.25, -3.0),
            Beam::new(3, 4.0, 4.0),
            Beam::new(4, 0.0, 0.0),
        ];
        for a in &beams {
            for b in &beams {
                for c in &beams {
                    let direct = Euclidean.distance(a, c);
                    let via = Euclidean.distance(a, b) + Euclidean.distance(b, c);
                    assert!(direct <= via + 1e-12);
                }
            }
        }
    }

    #[test]
    fn cache_is_keyed_by_unordered_pair() {
        let a = Beam::new(1, 0.0, 0.0);
        let b = Beam::new(2, 0.0, 2.0);
        let mut cache = DistanceCache::new(&Euclidean);

        assert_eq!(cache.distance(&a, &b), 2.0);
        assert_eq!(cache.distance(&b, &a), 2.0);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.distance(&a, &a), 0.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn spread_of_triangle() {
        let beams = [
            Beam::new(1, 0.0, 0.0),
            Beam::new(2, 3.0, 0.0),
            Beam::new(3, 3.0, 4.0),
        ];
        let members: Vec<&Beam> = beams.iter().collect();
        let mut cache = DistanceCache::new(&Euclidean);

        let spread = group_spread(&members, &mut cache);
        assert_eq!(spread.total, 3.0 + 4.0 + 5.0);
        assert_eq!(spread.diameter, 5.0);
    }

    #[test]
    fn spread_of_singleton_and_empty() {
        let beam = Beam::new(1, 7.0, 7.0);
        let mut cache = DistanceCache::new(&Euclidean);

        assert_eq!(group_spread(&[&beam], &mut cache), GroupSpread::default());
        assert_eq!(group_spread(&[], &mut cache), GroupSpread::default());
        assert!(cache.is_empty());
    }
}
