//! Observation models: weather, vegetation, soil, climate indices and events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of (synthetic) weather observations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherPoint {
    pub date: NaiveDate,
    /// Daily mean temperature in °C
    pub average_temperature: f64,
    /// Daily rainfall in mm, never negative
    pub rainfall_mm: f64,
    /// Mean wind speed in m/s
    pub wind_speed: f64,
}

/// A single day of vegetation greenness
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetationPoint {
    pub date: NaiveDate,
    /// Normalized difference vegetation index, within [0.1, 0.9]
    pub ndvi: f64,
    /// Enhanced vegetation index, within [0.05, 0.8]
    pub evi: f64,
}

/// Static soil and terrain snapshot for a region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilTerrain {
    pub slope_deg: f64,
    pub aspect_deg: u32,
    pub elevation_m: u32,
    pub erodibility_index: f64,
}

/// One dated value of a standardized index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndexValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// SPI and SPEI series, parallel and keyed by date
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClimateIndexSeries {
    pub spi: Vec<IndexValue>,
    pub spei: Vec<IndexValue>,
}

impl ClimateIndexSeries {
    pub fn len(&self) -> usize {
        self.spi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spi.is_empty()
    }

    /// Keep only the most recent `days` entries of both series
    pub fn tail(&self, days: usize) -> ClimateIndexSeries {
        ClimateIndexSeries {
            spi: tail(&self.spi, days).to_vec(),
            spei: tail(&self.spei, days).to_vec(),
        }
    }
}

/// Slice holding the last `n` items (or all of them when shorter)
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Kind of recorded extreme event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Fire,
    Flood,
    Heatwave,
    Storm,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Fire,
        EventKind::Flood,
        EventKind::Heatwave,
        EventKind::Storm,
    ];
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Fire => write!(f, "fire"),
            EventKind::Flood => write!(f, "flood"),
            EventKind::Heatwave => write!(f, "heatwave"),
            EventKind::Storm => write!(f, "storm"),
        }
    }
}

/// Severity of an extreme event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Moderate,
    Severe,
    Extreme,
}

impl EventSeverity {
    pub const ALL: [EventSeverity; 3] = [
        EventSeverity::Moderate,
        EventSeverity::Severe,
        EventSeverity::Extreme,
    ];
}

/// An extreme event from the (synthetic) fire/flood archives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtremeEvent {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub severity: EventSeverity,
}

/// A regional climate bulletin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bulletin {
    pub date: NaiveDate,
    pub source: String,
    pub title: String,
    pub summary: String,
}

/// Description of the data sources backing a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMetadata {
    pub sources: Vec<String>,
    pub note: String,
}
