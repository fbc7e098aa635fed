use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::types::{FleetConfig, Package};
use crate::error::InputError;

const OFFER_CODES: [&str; 5] = ["OFR001", "OFR002", "OFR003", "OFFR0008", "NA"];

/// Generates `count` packages with whole-number weights in `1..=max_weight` and
/// distances in `1..=max_distance`. The same seed always yields the same batch.
pub fn generate_random_packages(
    count: usize,
    seed: u64,
    max_weight: u32,
    max_distance: u32,
) -> Vec<Package> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let packages: Vec<Package> = (1..=count)
        .map(|n| {
            let weight = rng.gen_range(1..=max_weight.max(1)) as f64;
            let distance = rng.gen_range(1..=max_distance.max(1)) as f64;
            let offer_code = OFFER_CODES.choose(&mut rng).copied();
            Package::new(format!("PKG{}", n), weight, distance, offer_code)
        })
        .collect();

    debug!("Generated {} packages from seed {}", packages.len(), seed);
    packages
}

/// 1 to 4 vehicles, speed 40 to 100, capacity 150 to 250.
pub fn generate_fleet(seed: u64) -> Result<FleetConfig, InputError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let vehicles = rng.gen_range(1..=4);
    let speed = rng.gen_range(40..=100) as f64;
    let capacity = rng.gen_range(150..=250) as f64;
    FleetConfig::new(vehicles, speed, capacity)
}
