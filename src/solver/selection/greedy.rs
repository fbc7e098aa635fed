use itertools::Itertools;

use super::{lightest_fitting, ShipmentSelector};
use crate::domain::types::{Load, Shipment};

/// Lightest-first packing. Walks the pool by ascending weight and skips, without
/// backtracking, any package that would push the load over capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySelector;

impl ShipmentSelector for GreedySelector {
    fn select(&self, pool: &[Load], capacity: f64) -> Shipment {
        let mut total_weight = 0.0;
        let mut members = Vec::new();

        // stable sort: equal weights keep pool order
        for (index, load) in pool
            .iter()
            .enumerate()
            .sorted_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight))
        {
            if total_weight + load.weight <= capacity {
                total_weight += load.weight;
                members.push(index);
            }
        }

        if members.is_empty() {
            return lightest_fitting(pool, capacity);
        }
        Shipment::from_members(members)
    }
}
