use tracing::trace;

use crate::config::constant::{DISTANCE_RATE, WEIGHT_RATE};
use crate::domain::offer::OfferTable;
use crate::domain::types::{Package, PricedPackage, Quote};
use crate::error::PricingError;
use crate::utils::round_to_unit;

/// Cost = base + weight * 10 + distance * 5, less any applicable offer discount.
#[derive(Debug, Clone)]
pub struct PricingRule {
    offers: OfferTable,
}

impl Default for PricingRule {
    fn default() -> Self {
        Self::new(OfferTable::standard())
    }
}

impl PricingRule {
    pub fn new(offers: OfferTable) -> Self {
        Self { offers }
    }

    pub fn offers(&self) -> &OfferTable {
        &self.offers
    }

    pub fn delivery_cost(
        &self,
        base_cost: f64,
        weight: f64,
        distance: f64,
    ) -> Result<u64, PricingError> {
        // `!(x >= 0.0)` also rejects NaN
        if !(base_cost >= 0.0) || !(weight >= 0.0) || !(distance >= 0.0) {
            return Err(PricingError::NegativeInput {
                base: base_cost,
                weight,
                distance,
            });
        }
        Ok(round_to_unit(base_cost + weight * WEIGHT_RATE + distance * DISTANCE_RATE))
    }

    /// Zero for unknown codes or when weight/distance fall outside the offer ranges.
    pub fn discount(
        &self,
        offer_code: Option<&str>,
        weight: f64,
        distance: f64,
        delivery_cost: u64,
    ) -> u64 {
        match self.offers.get_offer(offer_code) {
            Some(offer) if offer.applies_to(weight, distance) => {
                round_to_unit(offer.percent / 100.0 * delivery_cost as f64)
            }
            _ => 0,
        }
    }

    pub fn quote(&self, package: &Package, base_cost: f64) -> Result<Quote, PricingError> {
        let delivery_cost = self.delivery_cost(base_cost, package.weight, package.distance)?;
        let discount = self.discount(
            package.offer_code.as_deref(),
            package.weight,
            package.distance,
            delivery_cost,
        );
        trace!(
            "Priced {}: cost {}, discount {}",
            package.id,
            delivery_cost,
            discount
        );

        Ok(Quote {
            delivery_cost,
            discount,
            // builder-made offers are not range-checked, so clamp at zero
            total_cost: delivery_cost.saturating_sub(discount),
        })
    }

    pub fn price(&self, package: &Package, base_cost: f64) -> Result<PricedPackage, PricingError> {
        Ok(PricedPackage {
            package: package.clone(),
            quote: self.quote(package, base_cost)?,
        })
    }
}
