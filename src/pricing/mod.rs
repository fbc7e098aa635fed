pub mod estimate;
pub mod rule;

pub use estimate::estimate_costs;
pub use rule::PricingRule;
