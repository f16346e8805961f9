//! Analytics services for the Climate Risk Analytics engine

pub mod anomaly;
pub mod forecast;
pub mod impact;
pub mod report;
pub mod series;
pub mod strategy;

pub use anomaly::{AnomalyBaseline, AnomalyDetector};
pub use forecast::TemporalForecaster;
pub use impact::ImpactAssessor;
pub use report::ReportingService;
pub use series::SeriesGenerator;
pub use strategy::StrategyRanker;
