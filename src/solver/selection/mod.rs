//! Shipment selection: choose the next trip's packages from a pool under a capacity bound.
//!
//! Two interchangeable strategies implement [`ShipmentSelector`]:
//! - [`ExhaustiveSelector`] enumerates every subset as a bitmask. That is only viable for
//!   small pools (`O(2^n * n)`), so pools above
//!   [`EXHAUSTIVE_POOL_LIMIT`](crate::config::constant::EXHAUSTIVE_POOL_LIMIT) are handed to
//!   the greedy strategy instead.
//! - [`GreedySelector`] takes the lightest packages first. Bounded cost, no optimality guarantee.

pub mod exhaustive;
pub mod greedy;

use std::str::FromStr;

pub use exhaustive::ExhaustiveSelector;
pub use greedy::GreedySelector;

use crate::config::constant::SELECTION_VAR;
use crate::domain::types::{Load, Shipment};
use crate::error::ConfigError;

pub trait ShipmentSelector: Send + Sync {
    /// Picks the packages for one trip. Never mutates `pool`; an empty pool, or one where
    /// no package fits on its own, yields an empty shipment.
    fn select(&self, pool: &[Load], capacity: f64) -> Shipment;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    #[default]
    Exhaustive,
    Greedy,
}

impl SelectionPolicy {
    pub fn selector(self) -> Box<dyn ShipmentSelector> {
        match self {
            SelectionPolicy::Exhaustive => Box::new(ExhaustiveSelector::default()),
            SelectionPolicy::Greedy => Box::new(GreedySelector),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" => Ok(SelectionPolicy::Exhaustive),
            "greedy" => Ok(SelectionPolicy::Greedy),
            other => Err(ConfigError::InvalidValue {
                key: SELECTION_VAR,
                value: other.to_string(),
            }),
        }
    }
}

/// Lightest package that fits on its own; ties go to the earliest position.
pub(crate) fn lightest_fitting(pool: &[Load], capacity: f64) -> Shipment {
    pool.iter()
        .enumerate()
        .filter(|(_, load)| load.weight <= capacity)
        .min_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight))
        .map(|(index, _)| Shipment::from_members(vec![index]))
        .unwrap_or_default()
}
