//! Mitigation strategy models

use serde::{Deserialize, Serialize};

/// Catalogue of mitigation strategies, in catalogue order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStrategy {
    MaintainCurrentPractice,
    AdjustPlanting,
    IncreaseIrrigation,
    TolerantCultivars,
    ClimateInsurance,
}

impl MitigationStrategy {
    pub const ALL: [MitigationStrategy; 5] = [
        MitigationStrategy::MaintainCurrentPractice,
        MitigationStrategy::AdjustPlanting,
        MitigationStrategy::IncreaseIrrigation,
        MitigationStrategy::TolerantCultivars,
        MitigationStrategy::ClimateInsurance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MitigationStrategy::MaintainCurrentPractice => "Maintain current practice",
            MitigationStrategy::AdjustPlanting => "Adjust planting dates / varieties",
            MitigationStrategy::IncreaseIrrigation => "Increase irrigation / water harvesting",
            MitigationStrategy::TolerantCultivars => "Adopt drought/flood-tolerant cultivars",
            MitigationStrategy::ClimateInsurance => "Purchase climate insurance package",
        }
    }
}

impl std::fmt::Display for MitigationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Simulated outcome of one strategy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyOutcome {
    pub strategy: String,
    pub residual_risk: f64,
    pub expected_reward: f64,
}

/// Outcomes sorted by expected reward, best first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyRanking {
    pub strategies: Vec<StrategyOutcome>,
    pub best_strategy: StrategyOutcome,
    pub notes: String,
}
