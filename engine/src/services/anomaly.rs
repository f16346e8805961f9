//! Gaussian anomaly detector
//!
//! A per-feature mean/standard-deviation baseline is fitted once on the
//! training history. Recent days are scored by their mean absolute z-score
//! and, when above the baseline threshold, classified by an ordered rule
//! table.

use serde::Serialize;
use std::collections::HashMap;

use chrono::NaiveDate;
use shared::{
    round_to, tail, AnomalyFlags, AnomalyLabel, AnomalyRecord, ClimateIndexSeries, EventKind,
    ExtremeEvent, Hazard, IndexValue, TrainingHistory, WeatherPoint, FEATURE_COUNT,
};

use crate::error::{AppError, AppResult};

/// Trailing days scored when no window is configured
pub const DEFAULT_SCORING_WINDOW_DAYS: usize = 90;

/// Added to every standard deviation so constant features never divide by zero
pub const STD_EPSILON: f64 = 1e-6;

/// Margin added to the mean historical score to form the threshold
pub const THRESHOLD_MARGIN: f64 = 2.0;

// ============================================================================
// Baseline
// ============================================================================

/// Fitted baseline over tavg, rain, spi and spei
///
/// Immutable once fitted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnomalyBaseline {
    mean: [f64; FEATURE_COUNT],
    std_dev: [f64; FEATURE_COUNT],
    threshold: f64,
    rows: usize,
}

impl AnomalyBaseline {
    /// Fit mean, standard deviation and threshold from a training history
    pub fn fit(history: &TrainingHistory) -> AppResult<Self> {
        if history.is_empty() {
            return Err(AppError::EmptyTrainingHistory);
        }

        let n = history.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        for row in &history.rows {
            for (m, x) in mean.iter_mut().zip(row.features()) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut std_dev = [0.0; FEATURE_COUNT];
        for row in &history.rows {
            for ((s, m), x) in std_dev.iter_mut().zip(mean).zip(row.features()) {
                *s += (x - m).powi(2);
            }
        }
        std_dev
            .iter_mut()
            .for_each(|s| *s = (*s / n).sqrt() + STD_EPSILON);

        let mut baseline = Self {
            mean,
            std_dev,
            threshold: 0.0,
            rows: history.len(),
        };

        let mean_score = history
            .rows
            .iter()
            .map(|row| baseline.score(&row.features()))
            .sum::<f64>()
            / n;
        baseline.threshold = mean_score + THRESHOLD_MARGIN;

        Ok(baseline)
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn std_dev(&self) -> &[f64; FEATURE_COUNT] {
        &self.std_dev
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of history rows the baseline was fitted on
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn z_scores(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut z = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            z[i] = ((features[i] - self.mean[i]) / self.std_dev[i]).abs();
        }
        z
    }

    /// Mean absolute z-score of a feature vector
    pub fn score(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.z_scores(features).iter().sum::<f64>() / FEATURE_COUNT as f64
    }

    pub fn is_anomalous(&self, score: f64) -> bool {
        score > self.threshold
    }
}

// ============================================================================
// Classification Rules
// ============================================================================

/// Features of a single scored day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayFeatures {
    pub tavg: f64,
    pub rain: f64,
    pub spi: f64,
    pub spei: f64,
}

impl DayFeatures {
    pub fn to_array(self) -> [f64; FEATURE_COUNT] {
        [self.tavg, self.rain, self.spi, self.spei]
    }
}

/// A label with the predicate that selects it and the flag it raises
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub label: AnomalyLabel,
    pub hazard: Hazard,
    pub applies: fn(&DayFeatures) -> bool,
}

fn is_drought(day: &DayFeatures) -> bool {
    day.spi < -1.0 || day.spei < -1.0
}

fn is_flood(day: &DayFeatures) -> bool {
    day.rain > 60.0
}

fn is_heatwave(day: &DayFeatures) -> bool {
    day.tavg > 35.0
}

/// Rules in priority order; the first match wins
pub const CLASSIFICATION_RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        label: AnomalyLabel::Drought,
        hazard: Hazard::Drought,
        applies: is_drought,
    },
    ClassificationRule {
        label: AnomalyLabel::Flood,
        hazard: Hazard::Flood,
        applies: is_flood,
    },
    ClassificationRule {
        label: AnomalyLabel::Heatwave,
        hazard: Hazard::Heatwave,
        applies: is_heatwave,
    },
];

/// Classify an above-threshold day; `None` hazard means a generic anomaly
pub fn classify(day: &DayFeatures) -> (AnomalyLabel, Option<Hazard>) {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.applies)(day))
        .map(|rule| (rule.label, Some(rule.hazard)))
        .unwrap_or((AnomalyLabel::Generic, None))
}

/// Hazard flag forced by a recorded extreme event
pub fn event_hazard(kind: EventKind) -> Option<Hazard> {
    match kind {
        EventKind::Fire | EventKind::Heatwave => Some(Hazard::Heatwave),
        EventKind::Flood => Some(Hazard::Flood),
        EventKind::Storm => None,
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Anomaly detector; untrained until a baseline is fitted or supplied
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    baseline: Option<AnomalyBaseline>,
    scoring_window_days: usize,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetector {
    /// Create an untrained detector
    pub fn new() -> Self {
        Self {
            baseline: None,
            scoring_window_days: DEFAULT_SCORING_WINDOW_DAYS,
        }
    }

    /// Create a detector from an already fitted baseline
    pub fn from_baseline(baseline: AnomalyBaseline) -> Self {
        Self {
            baseline: Some(baseline),
            ..Self::new()
        }
    }

    pub fn with_scoring_window(mut self, days: usize) -> Self {
        self.scoring_window_days = days;
        self
    }

    pub fn scoring_window_days(&self) -> usize {
        self.scoring_window_days
    }

    pub fn is_trained(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> AppResult<&AnomalyBaseline> {
        self.baseline.as_ref().ok_or(AppError::ModelNotTrained)
    }

    /// Fit the baseline; a detector can only be trained once
    pub fn train(&mut self, history: &TrainingHistory) -> AppResult<&AnomalyBaseline> {
        if self.baseline.is_some() {
            return Err(AppError::InvalidStateTransition(
                "anomaly baseline is already trained".to_string(),
            ));
        }

        let baseline = AnomalyBaseline::fit(history)?;
        tracing::info!(
            "Trained anomaly baseline on {} rows (threshold {:.3})",
            baseline.rows(),
            baseline.threshold()
        );

        Ok(self.baseline.insert(baseline))
    }

    /// Score the trailing window of the weather series
    ///
    /// SPI/SPEI are matched by exact date; dates missing from the index
    /// series score as 0.0.
    pub fn score(
        &self,
        weather_series: &[WeatherPoint],
        climate_indices: &ClimateIndexSeries,
        extreme_events: &[ExtremeEvent],
        user_event: &str,
    ) -> AppResult<(Vec<AnomalyRecord>, AnomalyFlags)> {
        let baseline = self.baseline()?;

        let spi_by_date = index_by_date(&climate_indices.spi);
        let spei_by_date = index_by_date(&climate_indices.spei);

        let mut flags = AnomalyFlags::for_user_event(user_event);
        let window = tail(weather_series, self.scoring_window_days);
        let mut records = Vec::with_capacity(window.len());

        for point in window {
            let day = DayFeatures {
                tavg: point.average_temperature,
                rain: point.rainfall_mm,
                spi: spi_by_date.get(&point.date).copied().unwrap_or(0.0),
                spei: spei_by_date.get(&point.date).copied().unwrap_or(0.0),
            };
            let score = baseline.score(&day.to_array());

            let label = if baseline.is_anomalous(score) {
                let (label, hazard) = classify(&day);
                if let Some(hazard) = hazard {
                    flags.raise(hazard);
                }
                label
            } else {
                AnomalyLabel::Normal
            };

            records.push(AnomalyRecord {
                date: point.date,
                tavg: round_to(day.tavg, 1),
                rain: round_to(day.rain, 1),
                spi: round_to(day.spi, 2),
                spei: round_to(day.spei, 2),
                score: round_to(score, 3),
                label,
            });
        }

        for event in extreme_events {
            if let Some(hazard) = event_hazard(event.kind) {
                flags.raise(hazard);
            }
        }

        tracing::debug!(
            "Scored {} days: {} anomalous, flags {:?}",
            records.len(),
            records.iter().filter(|r| r.label.is_anomalous()).count(),
            flags
        );

        Ok((records, flags))
    }
}

fn index_by_date(values: &[IndexValue]) -> HashMap<NaiveDate, f64> {
    values.iter().map(|v| (v.date, v.value)).collect()
}
