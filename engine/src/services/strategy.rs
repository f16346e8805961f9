//! Mitigation strategy ranking
//!
//! Monte Carlo-style stand-in for a reinforcement-learning agent: each
//! strategy draws a mitigation factor and is scored by the risk it leaves.
//! Callers only rely on the outcomes being sorted best first.

use rand::Rng;

use shared::{round_to, MitigationStrategy, StrategyOutcome, StrategyRanking};

/// Range of the mitigation factor drawn for each strategy
pub const MITIGATION_RANGE: std::ops::RangeInclusive<f64> = 0.1..=0.5;

pub const RANKING_NOTES: &str =
    "Synthetic Monte Carlo-style ranking. Swap with a reinforcement-learning agent later.";

#[derive(Debug, Clone, Default)]
pub struct StrategyRanker;

impl StrategyRanker {
    pub fn new() -> Self {
        Self
    }

    /// Outcome of a strategy for a given risk and mitigation factor
    pub fn outcome(
        strategy: MitigationStrategy,
        overall_risk: f64,
        mitigation_factor: f64,
    ) -> StrategyOutcome {
        let residual_risk = (overall_risk * (1.0 - mitigation_factor)).max(0.0);
        let expected_reward = (1.0 - residual_risk).max(0.0);

        StrategyOutcome {
            strategy: strategy.name().to_string(),
            residual_risk: round_to(residual_risk, 2),
            expected_reward: round_to(expected_reward, 2),
        }
    }

    pub fn rank(&self, overall_risk: f64) -> StrategyRanking {
        self.rank_with_rng(overall_risk, &mut rand::thread_rng())
    }

    /// Rank the catalogue; equal rewards keep catalogue order
    pub fn rank_with_rng<R: Rng + ?Sized>(&self, overall_risk: f64, rng: &mut R) -> StrategyRanking {
        let mut strategies: Vec<StrategyOutcome> = MitigationStrategy::ALL
            .iter()
            .map(|strategy| {
                let factor = rng.gen_range(MITIGATION_RANGE);
                Self::outcome(*strategy, overall_risk, factor)
            })
            .collect();

        strategies.sort_by(|a, b| b.expected_reward.total_cmp(&a.expected_reward));

        // The catalogue is non-empty, so the first outcome always exists.
        let best_strategy = strategies[0].clone();

        tracing::debug!(
            "Ranked {} strategies for risk {:.2}; best: {} ({:.2})",
            strategies.len(),
            overall_risk,
            best_strategy.strategy,
            best_strategy.expected_reward
        );

        StrategyRanking {
            strategies,
            best_strategy,
            notes: RANKING_NOTES.to_string(),
        }
    }
}
