//! Climate Risk Analytics - pipeline runner
//!
//! Trains the anomaly baseline once, runs the configured analysis and prints
//! the report as JSON.

use std::sync::Arc;

use climate_risk_engine::services::SeriesGenerator;
use climate_risk_engine::{AnalysisRequest, ClimateRiskPipeline, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "climate_risk_engine=debug,cra_pipeline=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("CRA_LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    tracing::info!("Starting Climate Risk Analytics pipeline");
    tracing::info!("Environment: {}", config.environment);

    let generator = SeriesGenerator::new();

    // Train the anomaly baseline once; every run shares it read-only
    let detector = Arc::new(ClimateRiskPipeline::train_detector(&config, &generator)?);
    let pipeline = ClimateRiskPipeline::new(&config, generator, detector)?;

    let request = AnalysisRequest::from(&config.run);
    let report = pipeline.run(&request)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
