//! Climate Risk Analytics engine
//!
//! Synthetic climate series, a Gaussian anomaly detector, a short-horizon
//! forecaster, crop impact assessment and mitigation strategy ranking.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use pipeline::{AnalysisReport, AnalysisRequest, ClimateRiskPipeline};
