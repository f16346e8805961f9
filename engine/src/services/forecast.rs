//! Short-horizon temporal forecaster
//!
//! Extrapolates the recent temperature and rainfall means under a named
//! scenario and derives independent drought, flood and heatwave signals.

use chrono::Duration;

use shared::{clamp_unit, round_to, tail, ClimateIndexSeries, ForecastPoint, Scenario, WeatherPoint};

use crate::error::{AppError, AppResult};
use crate::services::series::season_factor;

pub const DEFAULT_HORIZON_DAYS: usize = 60;
pub const DEFAULT_BASELINE_WINDOW_DAYS: usize = 60;

/// Drought signal: rises as rainfall drops below 30mm
pub fn drought_probability(rain: f64) -> f64 {
    clamp_unit((30.0 - rain) / 50.0)
}

/// Flood signal: rises as rainfall exceeds 60mm
pub fn flood_probability(rain: f64) -> f64 {
    clamp_unit((rain - 60.0) / 50.0)
}

/// Heatwave signal: rises as temperature exceeds 32°C
pub fn heatwave_probability(temp: f64) -> f64 {
    clamp_unit((temp - 32.0) / 10.0)
}

#[derive(Debug, Clone)]
pub struct TemporalForecaster {
    horizon_days: usize,
    baseline_window_days: usize,
}

impl Default for TemporalForecaster {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS)
    }
}

impl TemporalForecaster {
    pub fn new(horizon_days: usize) -> Self {
        Self {
            horizon_days,
            baseline_window_days: DEFAULT_BASELINE_WINDOW_DAYS,
        }
    }

    pub fn with_baseline_window(mut self, days: usize) -> Self {
        self.baseline_window_days = days;
        self
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Forecast the days following the last observation
    ///
    /// The index series are accepted for parity with the other stages but do
    /// not influence the extrapolation.
    pub fn forecast(
        &self,
        weather_series: &[WeatherPoint],
        _climate_indices: &ClimateIndexSeries,
        scenario: Scenario,
    ) -> AppResult<Vec<ForecastPoint>> {
        let last = weather_series.last().ok_or(AppError::EmptyWeatherSeries)?;

        let recent = tail(weather_series, self.baseline_window_days.max(1));
        let n = recent.len() as f64;
        let avg_temp = recent.iter().map(|p| p.average_temperature).sum::<f64>() / n;
        let avg_rain = recent.iter().map(|p| p.rainfall_mm).sum::<f64>() / n;

        let temp_shift = scenario.temperature_shift();
        let rain_shift = scenario.rainfall_shift();
        let horizon = self.horizon_days as f64;

        let forecast: Vec<ForecastPoint> = (0..self.horizon_days)
            .map(|i| {
                let date = last.date + Duration::days(i as i64 + 1);
                let season = season_factor(date);
                let ramp = i as f64 / horizon;

                let temp = avg_temp + temp_shift + 3.0 * season;
                let rain = (avg_rain + rain_shift * ramp + 5.0 * (1.0 - season)).max(0.0);

                ForecastPoint {
                    date,
                    temp: round_to(temp, 1),
                    rain: round_to(rain, 1),
                    drought_prob: round_to(drought_probability(rain), 2),
                    flood_prob: round_to(flood_probability(rain), 2),
                    heatwave_prob: round_to(heatwave_probability(temp), 2),
                }
            })
            .collect();

        tracing::debug!(
            "Forecast {} days under {} scenario (base temp {:.1}, base rain {:.1})",
            forecast.len(),
            scenario,
            avg_temp,
            avg_rain
        );

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_boundaries() {
        assert_eq!(drought_probability(500.0), 0.0);
        assert_eq!(drought_probability(-100.0), 1.0);
        assert_eq!(flood_probability(500.0), 1.0);
        assert_eq!(flood_probability(0.0), 0.0);
        assert_eq!(heatwave_probability(60.0), 1.0);
        assert_eq!(heatwave_probability(-10.0), 0.0);
    }

    #[test]
    fn test_probability_midpoints() {
        assert!((drought_probability(5.0) - 0.5).abs() < 1e-12);
        assert!((flood_probability(85.0) - 0.5).abs() < 1e-12);
        assert!((heatwave_probability(37.0) - 0.5).abs() < 1e-12);
    }
}
