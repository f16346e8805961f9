//! Crop impact assessment models

use serde::{Deserialize, Serialize};

/// Qualitative bucket for the overall risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Bucket an overall risk: below 0.20 is Low, below 0.45 is Moderate
    pub fn from_risk(overall_risk: f64) -> Self {
        if overall_risk < 0.2 {
            RiskLevel::Low
        } else if overall_risk < 0.45 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Hazard risks, combined risk and alerts for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactAssessment {
    pub crop: String,
    pub drought_risk: f64,
    pub flood_risk: f64,
    pub heatwave_risk: f64,
    /// Noisy-OR of the hazard risks, rounded to 2 decimals
    pub overall_risk: f64,
    pub risk_level: RiskLevel,
    /// Signed yield change as a fraction (negative means loss)
    pub expected_yield_impact: f64,
    pub alerts: Vec<String>,
}
