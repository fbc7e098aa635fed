use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Insufficient input: expected at least {expected} lines, got {found}")]
    MissingLines { expected: usize, found: usize },

    #[error("Line {line}: expected {expected} fields, got {found}")]
    FieldCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("Line {line}: {field} must be a number, got '{value}'")]
    NotANumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: {field} must be non-negative")]
    Negative { line: usize, field: &'static str },

    #[error("Line {line}: {field} must be positive")]
    NotPositive { line: usize, field: &'static str },

    #[error("Line {line}: duplicate package id '{id}'")]
    DuplicateId { line: usize, id: String },
}

impl InputError {
    /// Re-labels a validation error raised away from the parser with the offending line.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            InputError::Negative { field, .. } => InputError::Negative { line, field },
            InputError::NotPositive { field, .. } => InputError::NotPositive { line, field },
            other => other,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error(
        "Cost, weight, and distance must be non-negative \
         (base {base}, weight {weight}, distance {distance})"
    )]
    NegativeInput { base: f64, weight: f64, distance: f64 },
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Unable to schedule remaining packages: {}", remaining.join(", "))]
    Unschedulable { remaining: Vec<String> },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Offer {code}: percent must be between 0 and 100, got {percent}")]
    InvalidOffer { code: String, percent: f64 },

    #[error("Failed to read offer table")]
    ReadOffers(#[from] std::io::Error),

    #[error("Failed to parse offer table: {0}")]
    ParseOffers(#[from] serde_json::Error),
}
