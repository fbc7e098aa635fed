use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::solver::selection::SelectionPolicy;

pub mod constant {
    pub const WEIGHT_RATE: f64 = 10.0;
    pub const DISTANCE_RATE: f64 = 5.0;
    pub const ETA_DECIMALS: i32 = 2;
    /// Largest pool the bitmask enumeration will take on before handing over to greedy.
    pub const EXHAUSTIVE_POOL_LIMIT: usize = 24;
    pub const PARALLEL_ENUMERATION_THRESHOLD: usize = 16;

    pub(crate) const SELECTION_VAR: &str = "COURIER_SELECTION";
    pub(crate) const OFFERS_FILE_VAR: &str = "COURIER_OFFERS_FILE";
    pub(crate) const RESULTS_CSV_VAR: &str = "COURIER_RESULTS_CSV";
    pub(crate) const OUTPUT_VAR: &str = "COURIER_OUTPUT";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: constant::OUTPUT_VAR,
                value: other.to_string(),
            }),
        }
    }
}

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub selection: SelectionPolicy,
    pub offers_file: Option<PathBuf>,
    pub results_csv: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let selection = match non_empty(constant::SELECTION_VAR) {
            Some(value) => value.parse()?,
            None => SelectionPolicy::default(),
        };
        let output = match non_empty(constant::OUTPUT_VAR) {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        let settings = Settings {
            selection,
            offers_file: non_empty(constant::OFFERS_FILE_VAR).map(PathBuf::from),
            results_csv: non_empty(constant::RESULTS_CSV_VAR).map(PathBuf::from),
            output,
        };
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}
