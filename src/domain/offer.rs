use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclusiveRange {
    pub min: f64,
    pub max: f64,
}

impl InclusiveRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A percentage discount granted when both weight and distance fall inside their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub percent: f64,
    pub weight_range: InclusiveRange,
    pub distance_range: InclusiveRange,
}

impl Offer {
    pub fn new(percent: f64, weight_range: InclusiveRange, distance_range: InclusiveRange) -> Self {
        Self {
            percent,
            weight_range,
            distance_range,
        }
    }

    pub fn applies_to(&self, weight: f64, distance: f64) -> bool {
        self.weight_range.contains(weight) && self.distance_range.contains(distance)
    }

    pub fn has_valid_percent(&self) -> bool {
        (0.0..=100.0).contains(&self.percent)
    }
}

/// Immutable lookup of offer codes. Build one explicitly and hand it to the pricing rule;
/// there is no shared global table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferTable {
    offers: HashMap<String, Offer>,
}

impl OfferTable {
    /// OFR001, OFR002 and OFR003.
    pub fn standard() -> Self {
        Self::builder()
            .with_offer(
                "OFR001",
                Offer::new(10.0, InclusiveRange::new(70.0, 200.0), InclusiveRange::new(0.0, 199.0)),
            )
            .with_offer(
                "OFR002",
                Offer::new(
                    7.0,
                    InclusiveRange::new(100.0, 250.0),
                    InclusiveRange::new(50.0, 150.0),
                ),
            )
            .with_offer(
                "OFR003",
                Offer::new(5.0, InclusiveRange::new(10.0, 150.0), InclusiveRange::new(50.0, 250.0)),
            )
            .build()
    }

    pub fn builder() -> OfferTableBuilder {
        OfferTableBuilder::default()
    }

    /// Parses a JSON object keyed by offer code, e.g.
    /// `{"OFR001": {"percent": 10, "weight_range": {"min": 70, "max": 200},
    /// "distance_range": {"min": 0, "max": 199}}}`.
    ///
    /// Percentages outside `0..=100` are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let offers: HashMap<String, Offer> = serde_json::from_str(json)?;
        if let Some((code, offer)) = offers.iter().find(|(_, offer)| !offer.has_valid_percent()) {
            return Err(ConfigError::InvalidOffer {
                code: code.clone(),
                percent: offer.percent,
            });
        }
        Ok(Self { offers })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        info!("Loaded {} offers from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn is_valid_offer(&self, code: Option<&str>) -> bool {
        self.get_offer(code).is_some()
    }

    pub fn get_offer(&self, code: Option<&str>) -> Option<&Offer> {
        code.and_then(|c| self.offers.get(c))
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.offers.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferTableBuilder {
    offers: HashMap<String, Offer>,
}

impl OfferTableBuilder {
    /// Starts from an existing table, e.g. to add a promotion on top of the standard offers.
    pub fn from_table(table: &OfferTable) -> Self {
        Self {
            offers: table.offers.clone(),
        }
    }

    /// Adds the offer, replacing any existing offer with the same code.
    pub fn with_offer(mut self, code: impl Into<String>, offer: Offer) -> Self {
        self.offers.insert(code.into(), offer);
        self
    }

    pub fn without_offer(mut self, code: &str) -> Self {
        self.offers.remove(code);
        self
    }

    pub fn build(self) -> OfferTable {
        OfferTable { offers: self.offers }
    }
}
