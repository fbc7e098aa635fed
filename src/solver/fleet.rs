use tracing::trace;

use crate::config::constant::ETA_DECIMALS;
use crate::domain::types::FleetConfig;
use crate::utils::round_to;

/// Per-vehicle availability clocks for one scheduling run. Every vehicle starts free at 0.
#[derive(Debug, Clone)]
pub struct FleetClock {
    available_at: Vec<f64>,
    max_speed: f64,
    capacity: f64,
}

impl FleetClock {
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            available_at: vec![0.0; config.num_vehicles()],
            max_speed: config.max_speed(),
            capacity: config.capacity(),
        }
    }

    /// Vehicle with the earliest clock, lowest index on ties, and that clock.
    pub fn next_free_vehicle(&self) -> (usize, f64) {
        let mut index = 0;
        let mut earliest = self.available_at[0];

        for (i, &time) in self.available_at.iter().enumerate().skip(1) {
            if time < earliest {
                earliest = time;
                index = i;
            }
        }

        (index, earliest)
    }

    /// Sets the vehicle's clock to `return_time`. Clocks never run backwards.
    pub fn advance(&mut self, vehicle: usize, return_time: f64) {
        debug_assert!(
            return_time >= self.available_at[vehicle],
            "vehicle {} clock would go back from {} to {}",
            vehicle,
            self.available_at[vehicle],
            return_time
        );
        trace!("Vehicle {} free again at {:.2}", vehicle, return_time);
        self.available_at[vehicle] = return_time;
    }

    pub fn available_at(&self, vehicle: usize) -> f64 {
        self.available_at[vehicle]
    }

    pub fn num_vehicles(&self) -> usize {
        self.available_at.len()
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Time the last vehicle gets back.
    pub fn makespan(&self) -> f64 {
        self.available_at.iter().copied().fold(0.0, f64::max)
    }
}

/// `current_time + distance / speed`, rounded to two decimals.
pub fn calculate_eta(current_time: f64, distance: f64, max_speed: f64) -> f64 {
    round_to(current_time + distance / max_speed, ETA_DECIMALS)
}

/// Round trip to the farthest drop. Not rounded; the clock keeps full precision.
pub fn calculate_return_time(current_time: f64, max_distance: f64, max_speed: f64) -> f64 {
    current_time + 2.0 * max_distance / max_speed
}
