//! Anomaly detector integration tests
//!
//! Tests for baseline training and scoring including:
//! - Property 4: Scoring an untrained detector is a precondition error
//! - Property 5: Threshold is the mean absolute z-score plus 2.0
//! - Property 6: Classification follows drought > flood > heatwave > generic
//! - Property 7: Event-driven flags are unioned with score-driven flags

use chrono::{Duration, NaiveDate};
use climate_risk_engine::services::anomaly::{AnomalyBaseline, AnomalyDetector, STD_EPSILON};
use climate_risk_engine::services::series::SeriesGenerator;
use climate_risk_engine::AppError;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{
    AnomalyLabel, ClimateIndexSeries, EventKind, EventSeverity, ExtremeEvent, HistoryRow,
    IndexValue, TrainingHistory, WeatherPoint,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// History alternating around tavg 25, rain 5, spi 0, spei 0 with unit spread
/// for temperature and rain and 0.1 spread for the indices
fn tight_history(days: usize) -> TrainingHistory {
    let rows = (0..days)
        .map(|i| {
            let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
            HistoryRow {
                date: start() + Duration::days(i as i64),
                tavg: 25.0 + sign,
                rain: 5.0 + sign,
                spi: 0.1 * sign,
                spei: 0.1 * sign,
            }
        })
        .collect();
    TrainingHistory::new(rows)
}

fn trained_detector() -> AnomalyDetector {
    let mut detector = AnomalyDetector::new();
    detector.train(&tight_history(730)).unwrap();
    detector
}

/// Weather sitting exactly on the baseline mean
fn calm_weather(days: usize) -> Vec<WeatherPoint> {
    (0..days)
        .map(|i| WeatherPoint {
            date: start() + Duration::days(i as i64),
            average_temperature: 25.0,
            rainfall_mm: 5.0,
            wind_speed: 3.0,
        })
        .collect()
}

fn zero_indices(weather: &[WeatherPoint]) -> ClimateIndexSeries {
    ClimateIndexSeries {
        spi: weather.iter().map(|p| IndexValue { date: p.date, value: 0.0 }).collect(),
        spei: weather.iter().map(|p| IndexValue { date: p.date, value: 0.0 }).collect(),
    }
}

fn event(kind: EventKind) -> ExtremeEvent {
    ExtremeEvent {
        date: start(),
        kind,
        severity: EventSeverity::Severe,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_score_before_training_fails() {
        let detector = AnomalyDetector::new();
        let weather = calm_weather(10);
        let indices = zero_indices(&weather);

        let result = detector.score(&weather, &indices, &[], "");

        assert!(matches!(result, Err(AppError::ModelNotTrained)));
        assert!(!detector.is_trained());
    }

    #[test]
    fn test_training_twice_is_rejected() {
        let mut detector = trained_detector();
        let result = detector.train(&tight_history(100));

        match result {
            Err(e) => assert!(e.is_precondition()),
            Ok(_) => panic!("second training should fail"),
        }
    }

    #[test]
    fn test_training_on_empty_history_fails() {
        let mut detector = AnomalyDetector::new();
        let result = detector.train(&TrainingHistory::default());

        assert!(matches!(result, Err(AppError::EmptyTrainingHistory)));
        assert!(!detector.is_trained());
    }

    #[test]
    fn test_baseline_statistics() {
        let baseline = AnomalyBaseline::fit(&tight_history(730)).unwrap();

        let expected_mean = [25.0, 5.0, 0.0, 0.0];
        let expected_std = [1.0, 1.0, 0.1, 0.1];
        for i in 0..4 {
            assert!((baseline.mean()[i] - expected_mean[i]).abs() < 1e-9);
            assert!((baseline.std_dev()[i] - (expected_std[i] + STD_EPSILON)).abs() < 1e-9);
        }
        assert_eq!(baseline.rows(), 730);
    }

    #[test]
    fn test_threshold_is_mean_abs_z_plus_two() {
        let mut rng = StdRng::seed_from_u64(42);
        let history = SeriesGenerator::with_anchor(start())
            .generate_training_history_with_rng(1095, &mut rng);
        let baseline = AnomalyBaseline::fit(&history).unwrap();

        let n = history.len() as f64;
        let mut mean = [0.0; 4];
        for row in &history.rows {
            for (i, x) in row.features().iter().enumerate() {
                mean[i] += x / n;
            }
        }
        let mut std = [0.0; 4];
        for row in &history.rows {
            for (i, x) in row.features().iter().enumerate() {
                std[i] += (x - mean[i]).powi(2) / n;
            }
        }
        let std: Vec<f64> = std.iter().map(|v| v.sqrt() + 1e-6).collect();

        let mut total = 0.0;
        for row in &history.rows {
            for (i, x) in row.features().iter().enumerate() {
                total += ((x - mean[i]) / std[i]).abs();
            }
        }
        let expected = total / (n * 4.0) + 2.0;

        assert!((baseline.threshold() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_training_is_reproducible() {
        let history = tight_history(365);
        let a = AnomalyBaseline::fit(&history).unwrap();
        let b = AnomalyBaseline::fit(&history).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_drought_day_is_classified() {
        let detector = trained_detector();
        let mut weather = calm_weather(120);
        let mut indices = zero_indices(&weather);

        let day = 110;
        weather[day].average_temperature = 25.0;
        weather[day].rainfall_mm = 5.0;
        indices.spi[day].value = -1.5;

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();
        let record = records.iter().find(|r| r.date == weather[day].date).unwrap();

        assert!(record.score > detector.baseline().unwrap().threshold());
        assert_eq!(record.label, AnomalyLabel::Drought);
        assert!(flags.drought_anomaly);
        assert!(!flags.flood_anomaly);
        assert!(!flags.heatwave_anomaly);
    }

    #[test]
    fn test_flood_day_is_classified() {
        let detector = trained_detector();
        let mut weather = calm_weather(90);
        weather[50].rainfall_mm = 80.0;
        let indices = zero_indices(&weather);

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records[50].label, AnomalyLabel::Flood);
        assert!(flags.flood_anomaly);
        assert!(!flags.drought_anomaly);
    }

    #[test]
    fn test_heatwave_day_is_classified() {
        let detector = trained_detector();
        let mut weather = calm_weather(90);
        weather[10].average_temperature = 40.0;
        let indices = zero_indices(&weather);

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records[10].label, AnomalyLabel::Heatwave);
        assert!(flags.heatwave_anomaly);
    }

    #[test]
    fn test_drought_takes_priority_over_flood() {
        let detector = trained_detector();
        let mut weather = calm_weather(90);
        weather[20].rainfall_mm = 80.0;
        weather[20].average_temperature = 40.0;
        let mut indices = zero_indices(&weather);
        indices.spei[20].value = -2.0;

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records[20].label, AnomalyLabel::Drought);
        assert!(flags.drought_anomaly);
        assert!(!flags.flood_anomaly);
        assert!(!flags.heatwave_anomaly);
    }

    #[test]
    fn test_generic_anomaly_sets_no_flag() {
        let detector = trained_detector();
        let mut weather = calm_weather(90);
        weather[30].average_temperature = 5.0;
        let indices = zero_indices(&weather);

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records[30].label, AnomalyLabel::Generic);
        assert!(!flags.any_hazard());
    }

    #[test]
    fn test_calm_weather_is_normal() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let indices = zero_indices(&weather);

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert!(records.iter().all(|r| r.label == AnomalyLabel::Normal));
        assert!(records.iter().all(|r| r.score == 0.0));
        assert_eq!(flags, Default::default());
    }

    #[test]
    fn test_only_last_90_days_are_scored() {
        let detector = trained_detector();
        let mut weather = calm_weather(120);
        weather[5].rainfall_mm = 80.0;
        let indices = zero_indices(&weather);

        let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records.len(), 90);
        assert_eq!(records[0].date, weather[30].date);
        assert!(!flags.flood_anomaly);
    }

    #[test]
    fn test_short_series_scores_every_day() {
        let detector = trained_detector();
        let weather = calm_weather(12);
        let indices = zero_indices(&weather);

        let (records, _) = detector.score(&weather, &indices, &[], "").unwrap();
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_missing_index_dates_default_to_zero() {
        let detector = trained_detector();
        let weather = calm_weather(90);

        let (records, flags) = detector
            .score(&weather, &ClimateIndexSeries::default(), &[], "")
            .unwrap();

        assert!(records.iter().all(|r| r.spi == 0.0 && r.spei == 0.0));
        assert!(!flags.drought_anomaly);
    }

    #[test]
    fn test_flood_event_forces_flood_flag() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let indices = zero_indices(&weather);

        let (records, flags) = detector
            .score(&weather, &indices, &[event(EventKind::Flood)], "")
            .unwrap();

        assert!(records.iter().all(|r| r.label == AnomalyLabel::Normal));
        assert!(flags.flood_anomaly);
        assert!(!flags.heatwave_anomaly);
    }

    #[test]
    fn test_fire_and_heatwave_events_force_heatwave_flag() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let indices = zero_indices(&weather);

        for kind in [EventKind::Fire, EventKind::Heatwave] {
            let (_, flags) = detector.score(&weather, &indices, &[event(kind)], "").unwrap();
            assert!(flags.heatwave_anomaly);
            assert!(!flags.flood_anomaly);
        }
    }

    #[test]
    fn test_storm_event_sets_no_flag() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let indices = zero_indices(&weather);

        let (_, flags) = detector
            .score(&weather, &indices, &[event(EventKind::Storm)], "")
            .unwrap();
        assert!(!flags.any_hazard());
    }

    #[test]
    fn test_event_flags_union_with_score_flags() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let mut indices = zero_indices(&weather);
        indices.spi[60].value = -2.5;

        let (_, flags) = detector
            .score(&weather, &indices, &[event(EventKind::Flood), event(EventKind::Fire)], "")
            .unwrap();

        assert!(flags.drought_anomaly);
        assert!(flags.flood_anomaly);
        assert!(flags.heatwave_anomaly);
    }

    #[test]
    fn test_user_event_flag() {
        let detector = trained_detector();
        let weather = calm_weather(90);
        let indices = zero_indices(&weather);

        let (_, blank) = detector.score(&weather, &indices, &[], "   ").unwrap();
        let (_, reported) = detector
            .score(&weather, &indices, &[], "Hailstorm flattened the maize")
            .unwrap();

        assert!(!blank.user_flagged_event);
        assert!(reported.user_flagged_event);
    }

    #[test]
    fn test_records_are_rounded_for_display() {
        let detector = trained_detector();
        let mut weather = calm_weather(90);
        weather[0].average_temperature = 25.04;
        weather[0].rainfall_mm = 5.06;
        let mut indices = zero_indices(&weather);
        indices.spi[0].value = 0.123;

        let (records, _) = detector.score(&weather, &indices, &[], "").unwrap();

        assert_eq!(records[0].tavg, 25.0);
        assert_eq!(records[0].rain, 5.1);
        assert_eq!(records[0].spi, 0.12);
    }

    #[test]
    fn test_from_baseline_is_trained() {
        let baseline = AnomalyBaseline::fit(&tight_history(100)).unwrap();
        let detector = AnomalyDetector::from_baseline(baseline.clone());

        assert!(detector.is_trained());
        assert_eq!(detector.baseline().unwrap(), &baseline);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn weather_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
        prop::collection::vec((-10.0f64..50.0, 0.0f64..120.0, -3.0f64..3.0), 1..150)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 6: without events, a hazard flag is raised iff a day carries its label
        #[test]
        fn prop_flags_match_labels(days in weather_strategy()) {
            let detector = trained_detector();
            let weather: Vec<WeatherPoint> = days
                .iter()
                .enumerate()
                .map(|(i, (t, r, _))| WeatherPoint {
                    date: start() + Duration::days(i as i64),
                    average_temperature: *t,
                    rainfall_mm: *r,
                    wind_speed: 3.0,
                })
                .collect();
            let indices = ClimateIndexSeries {
                spi: days
                    .iter()
                    .enumerate()
                    .map(|(i, (_, _, s))| IndexValue { date: start() + Duration::days(i as i64), value: *s })
                    .collect(),
                spei: Vec::new(),
            };

            let (records, flags) = detector.score(&weather, &indices, &[], "").unwrap();

            prop_assert_eq!(records.len(), weather.len().min(90));
            prop_assert_eq!(flags.drought_anomaly, records.iter().any(|r| r.label == AnomalyLabel::Drought));
            prop_assert_eq!(flags.flood_anomaly, records.iter().any(|r| r.label == AnomalyLabel::Flood));
            prop_assert_eq!(flags.heatwave_anomaly, records.iter().any(|r| r.label == AnomalyLabel::Heatwave));
            prop_assert!(records.iter().all(|r| r.score >= 0.0));
        }

        /// Property 7: event-driven flags are never reset by scoring
        #[test]
        fn prop_flood_event_always_sets_flood(days in weather_strategy()) {
            let detector = trained_detector();
            let weather: Vec<WeatherPoint> = days
                .iter()
                .enumerate()
                .map(|(i, (t, r, _))| WeatherPoint {
                    date: start() + Duration::days(i as i64),
                    average_temperature: *t,
                    rainfall_mm: *r,
                    wind_speed: 3.0,
                })
                .collect();

            let (_, flags) = detector
                .score(&weather, &ClimateIndexSeries::default(), &[event(EventKind::Flood)], "")
                .unwrap();

            prop_assert!(flags.flood_anomaly);
        }
    }
}
