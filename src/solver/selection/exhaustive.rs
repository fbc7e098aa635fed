use rayon::prelude::*;
use tracing::{debug, warn};

use super::greedy::GreedySelector;
use super::{lightest_fitting, ShipmentSelector};
use crate::config::constant::{EXHAUSTIVE_POOL_LIMIT, PARALLEL_ENUMERATION_THRESHOLD};
use crate::domain::types::{Load, Shipment};

/// Masks are `usize`; keep clear of the sign bit on 32-bit targets.
const MAX_ENUMERABLE: usize = 30;

/// Scores of one feasible subset.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    mask: usize,
    count: usize,
    total_weight: f64,
    max_distance: f64,
}

impl Candidate {
    /// More packages, then heavier, then shorter farthest distance.
    fn outranks(&self, other: &Candidate) -> bool {
        self.count > other.count
            || (self.count == other.count && self.total_weight > other.total_weight)
            || (self.count == other.count
                && self.total_weight == other.total_weight
                && self.max_distance < other.max_distance)
    }

    /// Exact ties go to the lower mask, i.e. the subset met first in enumeration order.
    /// This keeps parallel reduction identical to a sequential scan.
    fn better(a: Candidate, b: Candidate) -> Candidate {
        if b.outranks(&a) {
            b
        } else if a.outranks(&b) || a.mask < b.mask {
            a
        } else {
            b
        }
    }
}

/// Bitmask enumeration of every non-empty subset. Optimal on (count, weight, distance)
/// but exponential: pools larger than `pool_limit` go to [`GreedySelector`].
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSelector {
    pool_limit: usize,
    parallel_threshold: usize,
}

impl Default for ExhaustiveSelector {
    fn default() -> Self {
        Self {
            pool_limit: EXHAUSTIVE_POOL_LIMIT,
            parallel_threshold: PARALLEL_ENUMERATION_THRESHOLD,
        }
    }
}

impl ExhaustiveSelector {
    pub fn with_pool_limit(mut self, pool_limit: usize) -> Self {
        self.pool_limit = pool_limit.min(MAX_ENUMERABLE);
        self
    }

    /// Pools of at least this size are enumerated on the rayon thread pool.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    fn best_candidate(&self, pool: &[Load], capacity: f64) -> Option<Candidate> {
        let end: usize = 1 << pool.len();
        if pool.len() >= self.parallel_threshold {
            (1..end)
                .into_par_iter()
                .filter_map(|mask| evaluate(pool, capacity, mask))
                .reduce_with(Candidate::better)
        } else {
            (1..end)
                .filter_map(|mask| evaluate(pool, capacity, mask))
                .reduce(Candidate::better)
        }
    }
}

impl ShipmentSelector for ExhaustiveSelector {
    fn select(&self, pool: &[Load], capacity: f64) -> Shipment {
        if pool.is_empty() {
            return Shipment::empty();
        }
        if pool.len() > self.pool_limit {
            warn!(
                "Pool of {} packages exceeds exhaustive limit {}, selecting greedily",
                pool.len(),
                self.pool_limit
            );
            return GreedySelector.select(pool, capacity);
        }

        match self.best_candidate(pool, capacity) {
            Some(best) => {
                debug!(
                    "Best subset: {} packages, weight {:.2}, farthest {:.2}",
                    best.count, best.total_weight, best.max_distance
                );
                Shipment::from_members(members_of(best.mask, pool.len()))
            }
            None => lightest_fitting(pool, capacity),
        }
    }
}

/// `None` once the running weight exceeds capacity.
fn evaluate(pool: &[Load], capacity: f64, mask: usize) -> Option<Candidate> {
    let mut total_weight = 0.0;
    let mut max_distance: f64 = 0.0;
    let mut count = 0;

    for (i, load) in pool.iter().enumerate() {
        if mask & (1 << i) == 0 {
            continue;
        }
        total_weight += load.weight;
        if total_weight > capacity {
            return None;
        }
        count += 1;
        max_distance = max_distance.max(load.distance);
    }

    Some(Candidate {
        mask,
        count,
        total_weight,
        max_distance,
    })
}

fn members_of(mask: usize, n: usize) -> Vec<usize> {
    (0..n).filter(|i| mask & (1 << i) != 0).collect()
}
