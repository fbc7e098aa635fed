use tracing::info;

use crate::domain::types::{CostEstimate, Package};
use crate::error::PricingError;
use crate::pricing::rule::PricingRule;

/// Discount and total cost per package, in input order.
pub fn estimate_costs(
    rule: &PricingRule,
    packages: &[Package],
    base_cost: f64,
) -> Result<Vec<CostEstimate>, PricingError> {
    let estimates = packages
        .iter()
        .map(|package| {
            let quote = rule.quote(package, base_cost)?;
            Ok(CostEstimate {
                id: package.id.clone(),
                discount: quote.discount,
                total_cost: quote.total_cost,
            })
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    info!("Estimated costs for {} packages", estimates.len());
    Ok(estimates)
}
