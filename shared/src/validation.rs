//! Validation utilities for Climate Risk Analytics
//!
//! Range checks for configuration values and model inputs.

use crate::models::{CropProfile, HazardSensitivity};

// ============================================================================
// Window Validations
// ============================================================================

/// Validate a history length in days
pub fn validate_history_days(days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("History length must be at least one day");
    }
    Ok(())
}

/// Validate a forecast horizon in days
pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("Forecast horizon must be at least one day");
    }
    Ok(())
}

/// Validate a trailing window (scoring, baseline or chart window)
pub fn validate_window_days(days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("Window must be at least one day");
    }
    Ok(())
}

// ============================================================================
// Model Input Validations
// ============================================================================

/// Validate a region identifier
pub fn validate_region_id(region: &str) -> Result<(), &'static str> {
    if region.trim().is_empty() {
        return Err("Region identifier cannot be empty");
    }
    if region.len() > 128 {
        return Err("Region identifier must be at most 128 characters");
    }
    Ok(())
}

/// Validate a probability-like value is within [0, 1]
pub fn validate_probability(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Probability must be a finite number");
    }
    if !(0.0..=1.0).contains(&value) {
        return Err("Probability must be between 0 and 1");
    }
    Ok(())
}

/// Validate hazard sensitivities are fractions in [0, 1]
pub fn validate_sensitivity(sensitivity: &HazardSensitivity) -> Result<(), &'static str> {
    for value in [sensitivity.drought, sensitivity.flood, sensitivity.heatwave] {
        validate_probability(value).map_err(|_| "Hazard sensitivity must be between 0 and 1")?;
    }
    Ok(())
}

/// Validate a crop profile
pub fn validate_crop_profile(profile: &CropProfile) -> Result<(), &'static str> {
    validate_region_id(&profile.region)?;
    validate_sensitivity(&profile.historical_yield_sensitivity)
}
