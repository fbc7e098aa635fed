pub mod offer;
pub mod types;

pub use offer::{InclusiveRange, Offer, OfferTable, OfferTableBuilder};
pub use types::*;
