use std::error::Error;
use std::io;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::{error, info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{OutputFormat, Settings};
use crate::domain::offer::OfferTable;
use crate::error::ConfigError;
use crate::pricing::{estimate_costs, PricingRule};
use crate::report::{render_cost_table, render_delivery_table, render_json, save_to_csv};
use crate::setup::{parse_cost_input, parse_delivery_input, read_lines};
use crate::solver::DispatchScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Discount and total cost only.
    Cost,
    /// Cost plus vehicle scheduling and ETAs.
    #[default]
    Delivery,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Mode::Cost),
            "delivery" | "time" => Ok(Mode::Delivery),
            other => Err(ConfigError::InvalidValue {
                key: "mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Initialize tracing and environment. Logs go to stderr; stdout carries results only.
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

fn load_offers(settings: &Settings) -> Result<OfferTable, ConfigError> {
    match &settings.offers_file {
        Some(path) => OfferTable::from_path(path),
        None => Ok(OfferTable::standard()),
    }
}

/// Runs one batch of already-read input lines and returns what should be printed.
pub fn process_input(
    mode: Mode,
    lines: &[(usize, String)],
    settings: &Settings,
) -> Result<String, Box<dyn Error>> {
    let pricing = PricingRule::new(load_offers(settings)?);

    match mode {
        Mode::Cost => {
            let input = parse_cost_input(lines)?;
            let estimates = estimate_costs(&pricing, &input.packages, input.base_cost)?;
            Ok(match settings.output {
                OutputFormat::Table => render_cost_table(&estimates),
                OutputFormat::Json => render_json(&estimates)?,
            })
        }
        Mode::Delivery => {
            let input = parse_delivery_input(lines)?;
            let scheduler = DispatchScheduler::with_policy(pricing, settings.selection);
            let schedule = scheduler.schedule(&input.packages, input.base_cost, &input.fleet)?;

            if let Some(path) = &settings.results_csv {
                save_to_csv(&schedule.records, path)?;
            }

            Ok(match settings.output {
                OutputFormat::Table => render_delivery_table(&schedule.records),
                OutputFormat::Json => render_json(&schedule.records)?,
            })
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;

    let mode = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Mode::default(),
    };
    let settings = Settings::from_env()?;

    let run_span = span!(Level::INFO, "run", mode = ?mode, selection = ?settings.selection);
    let _run_guard = run_span.enter();

    let lines = read_lines(io::stdin().lock())?;
    info!("Read {} input lines", lines.len());

    match process_input(mode, &lines, &settings) {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Error processing input: {}", e);
            Err(e)
        }
    }
}
