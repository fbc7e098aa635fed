use serde::Serialize;

use crate::error::InputError;

/// One package as read from input. Weight and distance never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub id: String,
    pub weight: f64,
    pub distance: f64,
    pub offer_code: Option<String>,
}

impl Package {
    pub fn new(
        id: impl Into<String>,
        weight: f64,
        distance: f64,
        offer_code: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            weight,
            distance,
            offer_code: offer_code.map(str::to_string),
        }
    }

    pub fn load(&self) -> Load {
        Load {
            weight: self.weight,
            distance: self.distance,
        }
    }
}

/// The two numbers shipment selection cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Load {
    pub weight: f64,
    pub distance: f64,
}

impl Load {
    pub fn new(weight: f64, distance: f64) -> Self {
        Self { weight, distance }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub delivery_cost: u64,
    pub discount: u64,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedPackage {
    #[serde(flatten)]
    pub package: Package,
    #[serde(flatten)]
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostEstimate {
    pub id: String,
    pub discount: u64,
    pub total_cost: u64,
}

/// A priced package with its arrival time and the trip that carries it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRecord {
    #[serde(flatten)]
    pub priced: PricedPackage,
    pub eta: f64,
    pub vehicle: usize,
    pub departed_at: f64,
}

impl DispatchRecord {
    pub fn id(&self) -> &str {
        &self.priced.package.id
    }

    pub fn discount(&self) -> u64 {
        self.priced.quote.discount
    }

    pub fn total_cost(&self) -> u64 {
        self.priced.quote.total_cost
    }
}

/// Positions (into the pool it was chosen from) of the packages sent out on one trip,
/// in ascending pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shipment {
    pub members: Vec<usize>,
}

impl Shipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_members(mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        Self { members }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn total_weight(&self, pool: &[Load]) -> f64 {
        self.members.iter().map(|&i| pool[i].weight).sum()
    }

    pub fn max_distance(&self, pool: &[Load]) -> f64 {
        self.members
            .iter()
            .map(|&i| pool[i].distance)
            .fold(0.0, f64::max)
    }
}

/// Fleet parameters. Construction rejects non-positive values, so every
/// `FleetConfig` in circulation is usable by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetConfig {
    num_vehicles: usize,
    max_speed: f64,
    capacity: f64,
}

impl FleetConfig {
    pub fn new(num_vehicles: usize, max_speed: f64, capacity: f64) -> Result<Self, InputError> {
        if num_vehicles == 0 {
            return Err(InputError::NotPositive { line: 0, field: "number of vehicles" });
        }
        // `!(x > 0.0)` also rejects NaN
        if !(max_speed > 0.0) {
            return Err(InputError::NotPositive { line: 0, field: "max speed" });
        }
        if !(capacity > 0.0) {
            return Err(InputError::NotPositive { line: 0, field: "capacity" });
        }

        Ok(Self {
            num_vehicles,
            max_speed,
            capacity,
        })
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}
