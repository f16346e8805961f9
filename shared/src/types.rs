//! Numeric helpers shared by the engine and its records

/// Round to a fixed number of decimal places (half away from zero)
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Clamp a derived signal into the unit interval
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
