//! Short-horizon forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Climate scenario applied on top of the recent baseline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Baseline,
    Hotter,
    Drier,
    Wetter,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Baseline,
        Scenario::Hotter,
        Scenario::Drier,
        Scenario::Wetter,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Hotter => "hotter",
            Scenario::Drier => "drier",
            Scenario::Wetter => "wetter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::Hotter => "Warmer than normal",
            Scenario::Drier => "Drier than normal",
            Scenario::Wetter => "Wetter than normal",
        }
    }

    /// Additive temperature shift in °C
    pub fn temperature_shift(&self) -> f64 {
        match self {
            Scenario::Baseline => 0.0,
            Scenario::Hotter => 2.0,
            Scenario::Drier => 1.0,
            Scenario::Wetter => -0.5,
        }
    }

    /// Rainfall shift in mm, reached at the end of the horizon
    pub fn rainfall_shift(&self) -> f64 {
        match self {
            Scenario::Baseline => 0.0,
            Scenario::Hotter => -5.0,
            Scenario::Drier => -10.0,
            Scenario::Wetter => 15.0,
        }
    }
}

/// Unknown names fall back to the baseline scenario
impl From<&str> for Scenario {
    fn from(name: &str) -> Self {
        Scenario::ALL
            .into_iter()
            .find(|s| s.code() == name.trim())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub temp: f64,
    pub rain: f64,
    pub drought_prob: f64,
    pub flood_prob: f64,
    pub heatwave_prob: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_from_name() {
        assert_eq!(Scenario::from("hotter"), Scenario::Hotter);
        assert_eq!(Scenario::from("wetter"), Scenario::Wetter);
        assert_eq!(Scenario::from(" drier "), Scenario::Drier);
    }

    #[test]
    fn test_unknown_scenario_defaults_to_baseline() {
        assert_eq!(Scenario::from("monsoon"), Scenario::Baseline);
        assert_eq!(Scenario::from(""), Scenario::Baseline);
        assert_eq!(Scenario::from("HOTTER"), Scenario::Baseline);
    }

    #[test]
    fn test_scenario_shifts() {
        assert_eq!(Scenario::Baseline.temperature_shift(), 0.0);
        assert_eq!(Scenario::Hotter.rainfall_shift(), -5.0);
        assert_eq!(Scenario::Drier.temperature_shift(), 1.0);
        assert_eq!(Scenario::Wetter.rainfall_shift(), 15.0);
    }
}
