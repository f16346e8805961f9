//! End-to-end analysis pipeline
//!
//! generate → forecast → detect → assess → rank → report. The trained
//! detector is built once by the process entry point and shared read-only
//! by every run; everything else is created fresh per run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use shared::{
    AnomalyFlags, AnomalyRecord, Bulletin, CropProfile, ExtremeEvent, ForecastPoint,
    ImpactAssessment, Scenario, SoilTerrain, SourceMetadata, StrategyRanking, VegetationPoint,
};

use crate::config::{Config, RunConfig};
use crate::error::{AppError, AppResult};
use crate::services::report::{ChartPayload, HeadlineMetrics};
use crate::services::{
    AnomalyDetector, ImpactAssessor, ReportingService, SeriesGenerator, StrategyRanker,
    TemporalForecaster,
};

/// One analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub region: String,
    pub crop: String,
    pub scenario: Scenario,
    pub user_event: String,
}

impl AnalysisRequest {
    pub fn new(region: &str, crop: &str) -> Self {
        Self {
            region: region.to_string(),
            crop: crop.to_string(),
            scenario: Scenario::Baseline,
            user_event: String::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn with_user_event(mut self, user_event: &str) -> Self {
        self.user_event = user_event.to_string();
        self
    }
}

impl From<&RunConfig> for AnalysisRequest {
    fn from(run: &RunConfig) -> Self {
        Self {
            region: run.region.clone(),
            crop: run.crop.clone(),
            scenario: Scenario::from(run.scenario.as_str()),
            user_event: run.user_event.clone(),
        }
    }
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub region: String,
    pub crop: String,
    pub scenario: Scenario,
    pub scenario_label: String,
    pub user_event: String,
    pub metrics: HeadlineMetrics,
    pub forecast: Vec<ForecastPoint>,
    pub anomaly_scores: Vec<AnomalyRecord>,
    pub anomaly_flags: AnomalyFlags,
    pub impact: ImpactAssessment,
    pub strategies: StrategyRanking,
    pub crop_profile: CropProfile,
    pub soil_terrain: SoilTerrain,
    pub latest_vegetation: Option<VegetationPoint>,
    pub extreme_events: Vec<ExtremeEvent>,
    pub bulletins: Vec<Bulletin>,
    pub sources: SourceMetadata,
    pub chart: ChartPayload,
}

pub struct ClimateRiskPipeline {
    generator: SeriesGenerator,
    detector: Arc<AnomalyDetector>,
    forecaster: TemporalForecaster,
    assessor: ImpactAssessor,
    ranker: StrategyRanker,
    reporting: ReportingService,
    history_days: u32,
}

impl ClimateRiskPipeline {
    /// Generate the training history and fit a detector for it
    pub fn train_detector(config: &Config, generator: &SeriesGenerator) -> AppResult<AnomalyDetector> {
        let history = generator.generate_training_history(config.analytics.history_days);
        let mut detector = AnomalyDetector::new()
            .with_scoring_window(config.analytics.scoring_window_days as usize);
        detector.train(&history)?;
        Ok(detector)
    }

    /// Assemble a pipeline around an already trained detector
    pub fn new(
        config: &Config,
        generator: SeriesGenerator,
        detector: Arc<AnomalyDetector>,
    ) -> AppResult<Self> {
        config.validate()?;
        if !detector.is_trained() {
            return Err(AppError::ModelNotTrained);
        }

        Ok(Self {
            generator,
            detector,
            forecaster: TemporalForecaster::new(config.analytics.forecast_days as usize)
                .with_baseline_window(config.analytics.baseline_window_days as usize),
            assessor: ImpactAssessor::new(),
            ranker: StrategyRanker::new(),
            reporting: ReportingService::new(config.report.clone()),
            history_days: config.analytics.history_days,
        })
    }

    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    pub fn run(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport> {
        shared::validate_region_id(&request.region)
            .map_err(|message| AppError::validation("region", message))?;

        let run_id = Uuid::new_v4();
        let region = request.region.as_str();
        tracing::info!(
            "Starting analysis {} for {} / {} ({})",
            run_id,
            region,
            request.crop,
            request.scenario
        );

        let weather_series = self.generator.weather_series(region, self.history_days);
        let vegetation = self.generator.vegetation_series(region);
        let soil_terrain = self.generator.soil_terrain(region);
        let climate_indices = self.generator.climate_indices(region, self.history_days);
        let extreme_events = self.generator.extreme_events(region);
        let crop_profile = self.generator.crop_patterns(region);
        shared::validate_crop_profile(&crop_profile)
            .map_err(|message| AppError::validation("crop_profile", message))?;

        let forecast = self
            .forecaster
            .forecast(&weather_series, &climate_indices, request.scenario)?;

        let (anomaly_scores, anomaly_flags) = self.detector.score(
            &weather_series,
            &climate_indices,
            &extreme_events,
            &request.user_event,
        )?;

        let impact = self
            .assessor
            .assess(&request.crop, &anomaly_flags, &crop_profile);
        let strategies = self.ranker.rank(impact.overall_risk);

        let chart = self.reporting.chart_payload(
            &weather_series,
            &climate_indices,
            &forecast,
            &anomaly_flags,
            &impact,
        );

        tracing::info!(
            "Finished analysis {}: overall risk {:.2} ({}), best strategy: {}",
            run_id,
            impact.overall_risk,
            impact.risk_level,
            strategies.best_strategy.strategy
        );

        Ok(AnalysisReport {
            run_id,
            generated_at: Utc::now(),
            region: request.region.clone(),
            crop: request.crop.clone(),
            scenario: request.scenario,
            scenario_label: request.scenario.label().to_string(),
            user_event: request.user_event.clone(),
            metrics: HeadlineMetrics::from(&impact),
            forecast,
            anomaly_scores,
            anomaly_flags,
            impact,
            strategies,
            crop_profile,
            soil_terrain,
            latest_vegetation: vegetation.last().cloned(),
            extreme_events,
            bulletins: self.generator.bulletins(region),
            sources: self.generator.source_metadata(),
            chart,
        })
    }
}
