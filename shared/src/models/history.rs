//! Training history used to fit the anomaly baseline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of features the anomaly baseline is fitted on
pub const FEATURE_COUNT: usize = 4;

/// One day of training data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub tavg: f64,
    pub rain: f64,
    pub spi: f64,
    pub spei: f64,
}

impl HistoryRow {
    /// Feature vector in baseline order: tavg, rain, spi, spei
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.tavg, self.rain, self.spi, self.spei]
    }
}

/// Multi-year daily history, ordered by date
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrainingHistory {
    pub rows: Vec<HistoryRow>,
}

impl TrainingHistory {
    pub fn new(rows: Vec<HistoryRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
