//! Crop impact assessment
//!
//! Maps anomaly flags and crop sensitivities to per-hazard risks, a combined
//! noisy-OR risk, a risk level, an expected yield impact and alerts.

use shared::{round_to, AnomalyFlags, CropProfile, Hazard, ImpactAssessment, RiskLevel};

/// Share of a hazard's sensitivity applied when no anomaly was flagged
pub fn background_factor(hazard: Hazard) -> f64 {
    match hazard {
        Hazard::Drought => 0.4,
        Hazard::Flood => 0.3,
        Hazard::Heatwave => 0.4,
    }
}

/// Yield loss per unit of overall risk
pub const YIELD_DAMAGE_COEFFICIENT: f64 = 0.3;

pub const DROUGHT_ALERT: &str = "Drought-like anomaly detected in recent climate signals.";
pub const FLOOD_ALERT: &str = "Flood-related conditions detected.";
pub const HEATWAVE_ALERT: &str = "Heatwave-like conditions detected.";
pub const USER_EVENT_ALERT: &str =
    "User reported a local extreme event. Prioritize ground-truth verification.";

/// Risk that at least one independent hazard occurs
pub fn noisy_or(risks: &[f64]) -> f64 {
    1.0 - risks.iter().map(|r| 1.0 - r).product::<f64>()
}

#[derive(Debug, Clone, Default)]
pub struct ImpactAssessor;

impl ImpactAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Risk for one hazard: full sensitivity when flagged, damped otherwise
    pub fn hazard_risk(sensitivity: f64, flagged: bool, hazard: Hazard) -> f64 {
        if flagged {
            sensitivity
        } else {
            sensitivity * background_factor(hazard)
        }
    }

    /// Assess the impact of the flagged anomalies on a crop
    pub fn assess(
        &self,
        crop: &str,
        anomaly_flags: &AnomalyFlags,
        crop_profile: &CropProfile,
    ) -> ImpactAssessment {
        let sens = &crop_profile.historical_yield_sensitivity;

        let drought_risk = Self::hazard_risk(
            sens.drought,
            anomaly_flags.drought_anomaly,
            Hazard::Drought,
        );
        let flood_risk = Self::hazard_risk(sens.flood, anomaly_flags.flood_anomaly, Hazard::Flood);
        let heatwave_risk = Self::hazard_risk(
            sens.heatwave,
            anomaly_flags.heatwave_anomaly,
            Hazard::Heatwave,
        );

        let overall_risk = round_to(noisy_or(&[drought_risk, flood_risk, heatwave_risk]), 2);
        let expected_yield_impact = -round_to(overall_risk * YIELD_DAMAGE_COEFFICIENT, 2);
        let risk_level = RiskLevel::from_risk(overall_risk);
        let alerts = Self::alerts(anomaly_flags);

        tracing::debug!(
            "Assessed {} in {}: overall risk {:.2} ({})",
            crop,
            crop_profile.region,
            overall_risk,
            risk_level
        );

        ImpactAssessment {
            crop: crop.to_string(),
            drought_risk,
            flood_risk,
            heatwave_risk,
            overall_risk,
            risk_level,
            expected_yield_impact,
            alerts,
        }
    }

    /// One alert per raised flag: drought, flood, heatwave, then user report
    pub fn alerts(flags: &AnomalyFlags) -> Vec<String> {
        [
            (flags.drought_anomaly, DROUGHT_ALERT),
            (flags.flood_anomaly, FLOOD_ALERT),
            (flags.heatwave_anomaly, HEATWAVE_ALERT),
            (flags.user_flagged_event, USER_EVENT_ALERT),
        ]
        .iter()
        .filter(|(raised, _)| *raised)
        .map(|(_, message)| message.to_string())
        .collect()
    }
}
