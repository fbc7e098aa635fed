//! Delivery cost estimation and fleet dispatch scheduling.
//!
//! Packages are priced by a [`PricingRule`](pricing::PricingRule), grouped into shipments by a
//! [`ShipmentSelector`](solver::ShipmentSelector) and loaded onto whichever vehicle frees up
//! first, yielding an ETA per package.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod pricing;
pub mod report;
pub mod setup;
pub mod solver;
pub mod utils;

pub use domain::types::{DispatchRecord, FleetConfig, Package};
pub use error::{ConfigError, InputError, PricingError, ScheduleError};
pub use solver::{schedule_deliveries, DispatchScheduler, SelectionPolicy};
