//! Synthetic series generator
//!
//! Stands in for the weather, satellite, soil, drought-index, event and crop
//! databases a production deployment would read from. Day-to-day values are
//! random; region-derived constants come from a generator seeded with a
//! SHA-256 digest of the region identifier, so they are stable per region.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::f64::consts::PI;

use shared::{
    round_to, Bulletin, ClimateIndexSeries, CropPattern, CropProfile, EventKind, EventSeverity,
    ExtremeEvent, HazardSensitivity, HistoryRow, IndexValue, SoilTerrain, SourceMetadata,
    TrainingHistory, VegetationPoint, WeatherPoint,
};

/// Length of the vegetation series in days
pub const VEGETATION_DAYS: u32 = 365;

/// Days before the anchor on which extreme events are recorded
const EVENT_OFFSETS: [i64; 4] = [200, 120, 60, 20];

/// Constants derived deterministically from a region identifier
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RegionConstants {
    pub vegetation_baseline: f64,
    pub slope_deg: f64,
    pub aspect_deg: u32,
    pub elevation_m: u32,
    pub dominant_pattern: CropPattern,
}

impl RegionConstants {
    pub fn derive(region: &str) -> Self {
        let mut vegetation = region_rng(region, "vegetation");
        let mut terrain = region_rng(region, "terrain");
        let mut crops = region_rng(region, "crops");

        Self {
            vegetation_baseline: 0.5 + vegetation.gen_range(0..20) as f64 / 100.0,
            slope_deg: 1.0 + terrain.gen_range(0..15) as f64,
            aspect_deg: terrain.gen_range(0..360),
            elevation_m: 100 + terrain.gen_range(0..500),
            dominant_pattern: CropPattern::ALL[crops.gen_range(0..CropPattern::ALL.len())],
        }
    }
}

/// Stable 64-bit seed for a region and a purpose
pub fn region_seed(region: &str, purpose: &str) -> u64 {
    let digest = Sha256::new()
        .chain_update(region.as_bytes())
        .chain_update(b":")
        .chain_update(purpose.as_bytes())
        .finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

fn region_rng(region: &str, purpose: &str) -> StdRng {
    StdRng::seed_from_u64(region_seed(region, purpose))
}

/// Seasonal factor in [-1, 1] for a date
pub fn season_factor(date: NaiveDate) -> f64 {
    (2.0 * PI * date.ordinal() as f64 / 365.0).sin()
}

fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Synthetic data generator anchored at a reference date
///
/// Every daily series ends the day before the anchor.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    anchor: NaiveDate,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator {
    /// Generator anchored at today (UTC)
    pub fn new() -> Self {
        Self {
            anchor: Utc::now().date_naive(),
        }
    }

    pub fn with_anchor(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Consecutive dates ending the day before the anchor
    ///
    /// Starts no earlier than `NaiveDate::MIN`, so a day count reaching past
    /// the calendar yields a shorter series instead of failing.
    fn dates(&self, days: u32) -> impl Iterator<Item = NaiveDate> {
        let anchor = self.anchor;
        let start = anchor
            .checked_sub_signed(Duration::days(days as i64))
            .unwrap_or(NaiveDate::MIN);
        start.iter_days().take_while(move |date| *date < anchor)
    }

    // ========================================================================
    // Training History
    // ========================================================================

    /// Multi-year daily history used to fit the anomaly baseline
    pub fn generate_training_history(&self, days: u32) -> TrainingHistory {
        self.generate_training_history_with_rng(days, &mut rand::thread_rng())
    }

    pub fn generate_training_history_with_rng<R: Rng + ?Sized>(
        &self,
        days: u32,
        rng: &mut R,
    ) -> TrainingHistory {
        let rows = self
            .dates(days)
            .map(|date| {
                let tavg = 20.0 + 10.0 * season_factor(date) + gauss(rng, 0.0, 2.0);
                let rain = gauss(rng, 3.0, 5.0).max(0.0);
                let spi = gauss(rng, 0.0, 0.8);
                let spei = spi + gauss(rng, 0.0, 0.3);
                HistoryRow {
                    date,
                    tavg,
                    rain,
                    spi,
                    spei,
                }
            })
            .collect();

        TrainingHistory::new(rows)
    }

    // ========================================================================
    // Observed Series
    // ========================================================================

    /// Daily weather for the region, oldest first
    pub fn weather_series(&self, region: &str, days: u32) -> Vec<WeatherPoint> {
        self.weather_series_with_rng(region, days, &mut rand::thread_rng())
    }

    pub fn weather_series_with_rng<R: Rng + ?Sized>(
        &self,
        region: &str,
        days: u32,
        rng: &mut R,
    ) -> Vec<WeatherPoint> {
        tracing::debug!("Generating {} days of weather for {}", days, region);

        self.dates(days)
            .map(|date| WeatherPoint {
                date,
                average_temperature: 20.0 + 8.0 * season_factor(date) + gauss(rng, 0.0, 1.5),
                rainfall_mm: gauss(rng, 2.0, 4.0).max(0.0),
                wind_speed: gauss(rng, 3.0, 1.0).max(0.5),
            })
            .collect()
    }

    /// One year of NDVI/EVI around the region's vegetation baseline
    pub fn vegetation_series(&self, region: &str) -> Vec<VegetationPoint> {
        let base = RegionConstants::derive(region).vegetation_baseline;
        let mut rng = rand::thread_rng();

        self.dates(VEGETATION_DAYS)
            .map(|date| {
                let ndvi = (base + 0.3 * season_factor(date) + rng.gen_range(-0.05..=0.05))
                    .clamp(0.1, 0.9);
                let evi = (ndvi - 0.05 + rng.gen_range(-0.02..=0.02)).clamp(0.05, 0.8);
                VegetationPoint { date, ndvi, evi }
            })
            .collect()
    }

    pub fn soil_terrain(&self, region: &str) -> SoilTerrain {
        let constants = RegionConstants::derive(region);
        let erodibility = (0.2 + constants.slope_deg / 20.0).clamp(0.1, 1.0);

        SoilTerrain {
            slope_deg: round_to(constants.slope_deg, 1),
            aspect_deg: constants.aspect_deg,
            elevation_m: constants.elevation_m,
            erodibility_index: round_to(erodibility, 2),
        }
    }

    /// SPI and SPEI series; SPEI tracks SPI with extra noise
    pub fn climate_indices(&self, region: &str, days: u32) -> ClimateIndexSeries {
        self.climate_indices_with_rng(region, days, &mut rand::thread_rng())
    }

    pub fn climate_indices_with_rng<R: Rng + ?Sized>(
        &self,
        region: &str,
        days: u32,
        rng: &mut R,
    ) -> ClimateIndexSeries {
        tracing::debug!("Generating {} days of SPI/SPEI for {}", days, region);

        let mut series = ClimateIndexSeries::default();
        for date in self.dates(days) {
            let spi = gauss(rng, 0.0, 0.9);
            let spei = spi + gauss(rng, 0.0, 0.3);
            series.spi.push(IndexValue { date, value: spi });
            series.spei.push(IndexValue { date, value: spei });
        }
        series
    }

    /// Recent fire/flood/heatwave/storm events
    pub fn extreme_events(&self, region: &str) -> Vec<ExtremeEvent> {
        let mut rng = rand::thread_rng();

        let events: Vec<ExtremeEvent> = EVENT_OFFSETS
            .iter()
            .filter_map(|offset| self.anchor.checked_sub_signed(Duration::days(*offset)))
            .map(|date| ExtremeEvent {
                date,
                kind: EventKind::ALL[rng.gen_range(0..EventKind::ALL.len())],
                severity: EventSeverity::ALL[rng.gen_range(0..EventSeverity::ALL.len())],
            })
            .collect();

        tracing::debug!("Generated {} extreme events for {}", events.len(), region);
        events
    }

    /// Dominant rotation and yield sensitivities for the region
    pub fn crop_patterns(&self, region: &str) -> CropProfile {
        let mut rng = rand::thread_rng();

        CropProfile {
            region: region.to_string(),
            dominant_pattern: RegionConstants::derive(region).dominant_pattern,
            historical_yield_sensitivity: HazardSensitivity {
                drought: round_to(rng.gen_range(0.1..0.4), 2),
                flood: round_to(rng.gen_range(0.05..0.3), 2),
                heatwave: round_to(rng.gen_range(0.1..0.35), 2),
            },
        }
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// Sample drought-watch and heatwave bulletins
    pub fn bulletins(&self, region: &str) -> Vec<Bulletin> {
        vec![
            Bulletin {
                date: self.anchor,
                source: "FAO synthetic".to_string(),
                title: format!("Regional drought watch bulletin: {}", region),
                summary: "Below-normal rainfall observed in the last month; close monitoring recommended."
                    .to_string(),
            },
            Bulletin {
                date: self.anchor,
                source: "NewsAPI synthetic".to_string(),
                title: "Heatwave conditions reported in nearby districts".to_string(),
                summary: "Daytime temperatures exceeded long-term averages by 4-5°C.".to_string(),
            },
        ]
    }

    pub fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            sources: [
                "Open-Meteo historical & forecast climate (synthetic stub)",
                "Sentinel-2 / MODIS NDVI/EVI (synthetic stub)",
                "Copernicus soil & terrain (offline stub)",
                "NewsAPI & FAO climate bulletins (synthetic summaries)",
                "EuroCropsML historical crop patterns (offline stub)",
                "SPI / SPEI indices (synthetic)",
                "NASA FIRMS & global flood archives (synthetic events)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            note: "Replace stubs with actual EO, climate, and news feeds in production."
                .to_string(),
        }
    }
}
