//! Configuration management for the Climate Risk Analytics engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CRA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Analytics window configuration
    pub analytics: AnalyticsConfig,

    /// Report assembly configuration
    pub report: ReportConfig,

    /// Request executed by the pipeline binary
    pub run: RunConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Days of synthetic history (training and observed series)
    pub history_days: u32,

    /// Forecast horizon in days
    pub forecast_days: u32,

    /// Trailing days scored by the anomaly detector
    pub scoring_window_days: u32,

    /// Trailing days averaged into the forecast baseline
    pub baseline_window_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Trailing days of weather and indices in the chart payload
    pub chart_history_days: u32,

    /// Leading forecast days in the chart payload
    pub chart_forecast_days: u32,

    /// Alerts listed in the summary panel
    pub max_alerts: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    pub region: String,
    pub crop: String,
    pub scenario: String,
    pub user_event: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CRA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("analytics.history_days", 365 * 3)?
            .set_default("analytics.forecast_days", 60)?
            .set_default("analytics.scoring_window_days", 90)?
            .set_default("analytics.baseline_window_days", 60)?
            .set_default("report.chart_history_days", 120)?
            .set_default("report.chart_forecast_days", 60)?
            .set_default("report.max_alerts", 4)?
            .set_default("run.region", "Region-001")?
            .set_default("run.crop", "Maize")?
            .set_default("run.scenario", "baseline")?
            .set_default("run.user_event", "")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CRA_ prefix)
            .add_source(
                Environment::with_prefix("CRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject window sizes the analytics cannot work with
    pub fn validate(&self) -> AppResult<()> {
        let checks = [
            (
                "analytics.history_days",
                shared::validate_history_days(self.analytics.history_days),
            ),
            (
                "analytics.forecast_days",
                shared::validate_forecast_days(self.analytics.forecast_days),
            ),
            (
                "analytics.scoring_window_days",
                shared::validate_window_days(self.analytics.scoring_window_days),
            ),
            (
                "analytics.baseline_window_days",
                shared::validate_window_days(self.analytics.baseline_window_days),
            ),
            (
                "report.chart_history_days",
                shared::validate_window_days(self.report.chart_history_days),
            ),
            (
                "report.chart_forecast_days",
                shared::validate_window_days(self.report.chart_forecast_days),
            ),
            ("run.region", shared::validate_region_id(&self.run.region)),
        ];

        for (field, result) in checks {
            result.map_err(|message| AppError::validation(field, message))?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            analytics: AnalyticsConfig::default(),
            report: ReportConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            history_days: 365 * 3,
            forecast_days: 60,
            scoring_window_days: 90,
            baseline_window_days: 60,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_history_days: 120,
            chart_forecast_days: 60,
            max_alerts: 4,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            region: "Region-001".to_string(),
            crop: "Maize".to_string(),
            scenario: "baseline".to_string(),
            user_event: String::new(),
        }
    }
}
