use crate::domain::types::{FleetConfig, Package};

/// First input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub base_cost: f64,
    pub package_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostInput {
    pub base_cost: f64,
    pub packages: Vec<Package>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryInput {
    pub base_cost: f64,
    pub packages: Vec<Package>,
    pub fleet: FleetConfig,
}
