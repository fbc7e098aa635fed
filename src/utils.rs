/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rounds half away from zero to a whole amount.
/// Inputs are non-negative, so the cast never truncates a sign.
pub fn round_to_unit(value: f64) -> u64 {
    value.round() as u64
}
