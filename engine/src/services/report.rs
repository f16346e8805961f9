//! Report assembly for the presentation layer
//!
//! Collects the slices of each stage's output that the summary chart and
//! results page display. Rendering itself happens elsewhere.

use serde::Serialize;

use shared::{
    tail, AnomalyFlags, AnomalyRecord, ClimateIndexSeries, ForecastPoint, ImpactAssessment,
    WeatherPoint,
};

use crate::config::ReportConfig;
use crate::error::{AppError, AppResult};

/// Data behind the four-panel summary chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub weather: Vec<WeatherPoint>,
    pub climate_indices: ClimateIndexSeries,
    pub forecast: Vec<ForecastPoint>,
    pub anomaly_flags: AnomalyFlags,
    pub summary: Vec<String>,
}

/// Headline numbers shown above the chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeadlineMetrics {
    pub drought_risk: f64,
    pub flood_risk: f64,
    pub heatwave_risk: f64,
    pub overall_climate_risk: f64,
    pub expected_yield_impact: f64,
}

impl From<&ImpactAssessment> for HeadlineMetrics {
    fn from(impact: &ImpactAssessment) -> Self {
        Self {
            drought_risk: impact.drought_risk,
            flood_risk: impact.flood_risk,
            heatwave_risk: impact.heatwave_risk,
            overall_climate_risk: impact.overall_risk,
            expected_yield_impact: impact.expected_yield_impact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportingService {
    config: ReportConfig,
}

impl Default for ReportingService {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl ReportingService {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Slice the series down to what the chart shows
    pub fn chart_payload(
        &self,
        weather_series: &[WeatherPoint],
        climate_indices: &ClimateIndexSeries,
        forecast: &[ForecastPoint],
        anomaly_flags: &AnomalyFlags,
        impact: &ImpactAssessment,
    ) -> ChartPayload {
        let history_days = self.config.chart_history_days as usize;
        let forecast_days = (self.config.chart_forecast_days as usize).min(forecast.len());

        ChartPayload {
            weather: tail(weather_series, history_days).to_vec(),
            climate_indices: climate_indices.tail(history_days),
            forecast: forecast[..forecast_days].to_vec(),
            anomaly_flags: *anomaly_flags,
            summary: self.summary_lines(anomaly_flags, impact),
        }
    }

    /// Text for the summary panel
    pub fn summary_lines(&self, flags: &AnomalyFlags, impact: &ImpactAssessment) -> Vec<String> {
        let mut lines = vec![
            format!("Drought anomaly: {}", flags.drought_anomaly),
            format!("Flood anomaly: {}", flags.flood_anomaly),
            format!("Heatwave anomaly: {}", flags.heatwave_anomaly),
            String::new(),
            format!(
                "Overall climate risk: {:.2} ({})",
                impact.overall_risk, impact.risk_level
            ),
            format!(
                "Expected yield impact: {:.2} (fractional)",
                impact.expected_yield_impact
            ),
            String::new(),
            "Top alerts:".to_string(),
        ];

        lines.extend(
            impact
                .alerts
                .iter()
                .take(self.config.max_alerts)
                .map(|alert| format!("- {}", alert)),
        );

        lines
    }

    /// Anomaly records as CSV, header first, one row per scored day
    pub fn anomaly_records_csv(records: &[AnomalyRecord]) -> AppResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::with_capacity(records.len() * 48));

        records
            .iter()
            .try_for_each(|record| writer.serialize(record))?;

        let buffer = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("flushing anomaly CSV: {}", e.error())))?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::Internal(format!("anomaly CSV is not UTF-8: {}", e)))
    }
}
