//! Anomaly detection output models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Crop hazards tracked by the flags and the impact assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Drought,
    Flood,
    Heatwave,
}

impl Hazard {
    pub const ALL: [Hazard; 3] = [Hazard::Drought, Hazard::Flood, Hazard::Heatwave];
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hazard::Drought => write!(f, "drought"),
            Hazard::Flood => write!(f, "flood"),
            Hazard::Heatwave => write!(f, "heatwave"),
        }
    }
}

/// Classification of a scored day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyLabel {
    Normal,
    Drought,
    Flood,
    Heatwave,
    Generic,
}

impl AnomalyLabel {
    pub fn is_anomalous(&self) -> bool {
        !matches!(self, AnomalyLabel::Normal)
    }

    /// Hazard flag raised by this label, if any
    pub fn hazard(&self) -> Option<Hazard> {
        match self {
            AnomalyLabel::Drought => Some(Hazard::Drought),
            AnomalyLabel::Flood => Some(Hazard::Flood),
            AnomalyLabel::Heatwave => Some(Hazard::Heatwave),
            AnomalyLabel::Normal | AnomalyLabel::Generic => None,
        }
    }
}

impl std::fmt::Display for AnomalyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyLabel::Normal => write!(f, "normal"),
            AnomalyLabel::Drought => write!(f, "drought"),
            AnomalyLabel::Flood => write!(f, "flood"),
            AnomalyLabel::Heatwave => write!(f, "heatwave"),
            AnomalyLabel::Generic => write!(f, "generic"),
        }
    }
}

/// Per-day anomaly score against the trained baseline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub tavg: f64,
    pub rain: f64,
    pub spi: f64,
    pub spei: f64,
    /// Mean absolute z-score over tavg, rain, spi and spei
    pub score: f64,
    pub label: AnomalyLabel,
}

/// Category flags raised during one scoring pass
///
/// Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnomalyFlags {
    pub drought_anomaly: bool,
    pub flood_anomaly: bool,
    pub heatwave_anomaly: bool,
    pub user_flagged_event: bool,
}

impl AnomalyFlags {
    /// Flags for a run where the user supplied the given event description
    pub fn for_user_event(user_event: &str) -> Self {
        Self {
            user_flagged_event: !user_event.trim().is_empty(),
            ..Self::default()
        }
    }

    pub fn raise(&mut self, hazard: Hazard) {
        match hazard {
            Hazard::Drought => self.drought_anomaly = true,
            Hazard::Flood => self.flood_anomaly = true,
            Hazard::Heatwave => self.heatwave_anomaly = true,
        }
    }

    pub fn is_raised(&self, hazard: Hazard) -> bool {
        match hazard {
            Hazard::Drought => self.drought_anomaly,
            Hazard::Flood => self.flood_anomaly,
            Hazard::Heatwave => self.heatwave_anomaly,
        }
    }

    pub fn any_hazard(&self) -> bool {
        Hazard::ALL.iter().any(|h| self.is_raised(*h))
    }
}
