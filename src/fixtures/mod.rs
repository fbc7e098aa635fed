pub mod data_generator;

pub use data_generator::{generate_fleet, generate_random_packages};
