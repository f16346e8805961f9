//! Crop pattern models

use serde::{Deserialize, Serialize};

/// Dominant crop rotation for a region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropPattern {
    CerealRotation,
    PaddyWheatRotation,
    OilseedDominated,
    MixedCropping,
}

impl CropPattern {
    pub const ALL: [CropPattern; 4] = [
        CropPattern::CerealRotation,
        CropPattern::PaddyWheatRotation,
        CropPattern::OilseedDominated,
        CropPattern::MixedCropping,
    ];
}

impl std::fmt::Display for CropPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropPattern::CerealRotation => write!(f, "Cereal rotation"),
            CropPattern::PaddyWheatRotation => write!(f, "Paddy-wheat rotation"),
            CropPattern::OilseedDominated => write!(f, "Oilseed dominated"),
            CropPattern::MixedCropping => write!(f, "Mixed cropping"),
        }
    }
}

/// Historical yield sensitivity to each hazard, as a fraction in (0, 1)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HazardSensitivity {
    pub drought: f64,
    pub flood: f64,
    pub heatwave: f64,
}

impl Default for HazardSensitivity {
    fn default() -> Self {
        Self {
            drought: 0.2,
            flood: 0.15,
            heatwave: 0.2,
        }
    }
}

/// Crop profile for a region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub region: String,
    pub dominant_pattern: CropPattern,
    pub historical_yield_sensitivity: HazardSensitivity,
}
