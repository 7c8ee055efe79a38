//! End-to-end correlation analysis over the cleaned tables.
//!
//! The pipeline loads every cleaned source, builds the wide monthly
//! table, computes the correlation matrix and extracts the strong
//! pairs. Rendering and printing stay with the caller; the pipeline
//! returns everything it derived as one report.

use anyhow::{Context, Result};
use log::{info, warn};
use polars::prelude::DataFrame;
use std::path::PathBuf;

use crate::core::domain::{SELECTED_COLUMNS, STRONG_CORRELATION_THRESHOLD};
use crate::core::error::DataError;
use crate::core::paths;
use crate::io::loaders::{WeatherEncoding, WeatherFileFailure, WeatherFolderLoader};
use crate::parsing::csv_source::read_csv_file;
use crate::services::correlation::{
    compute_correlation_matrix, non_null_counts, select_present_columns, strong_pairs,
    CorrelationMatrix, CorrelationPair,
};
use crate::services::monthly::{build_monthly_table, MonthlySources, MonthlyTable};

/// Where the analysis reads its inputs and which threshold it applies.
pub struct AnalysisConfig {
    pub weather_dir: PathBuf,
    pub air_quality_path: PathBuf,
    pub sport_path: PathBuf,
    pub mental_health_path: PathBuf,
    pub correlation_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weather_dir: PathBuf::from(paths::CLEAN_WEATHER_DIR),
            air_quality_path: PathBuf::from(paths::CLEAN_AIR_QUALITY),
            sport_path: PathBuf::from(paths::SPORT_SURVEY),
            mental_health_path: PathBuf::from(paths::MENTAL_HEALTH_SURVEY),
            correlation_threshold: STRONG_CORRELATION_THRESHOLD,
        }
    }
}

/// Everything one analysis run derives.
#[derive(Debug)]
pub struct AnalysisReport {
    /// The wide monthly table the matrix was computed from.
    pub monthly: DataFrame,
    /// Monthly weather means, kept for diagnostics.
    pub weather_means: DataFrame,
    pub matrix: CorrelationMatrix,
    pub strong_pairs: Vec<CorrelationPair>,
    /// Weather files that failed to load.
    pub weather_failures: Vec<WeatherFileFailure>,
    /// Non-null counts over the selected columns.
    pub non_null_counts: Vec<(String, usize)>,
}

/// Correlation analysis pipeline.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Pipeline over the fixed default locations.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Runs the full analysis.
    ///
    /// Per-file weather failures are tolerated and reported; a weather
    /// folder yielding nothing at all aborts the run.
    pub fn run(&self) -> Result<AnalysisReport> {
        let weather =
            WeatherFolderLoader::load_folder(&self.config.weather_dir, WeatherEncoding::Utf8)?;
        if weather.is_empty() {
            return Err(DataError::EmptyWeatherSet(self.config.weather_dir.clone()).into());
        }
        if !weather.failures.is_empty() {
            warn!(
                "{} weather file(s) skipped during loading",
                weather.failures.len()
            );
        }

        let air_quality = read_csv_file(&self.config.air_quality_path)
            .context("Failed to load the cleaned air-quality table")?;
        let sport = read_csv_file(&self.config.sport_path)
            .context("Failed to load the physical-activity survey")?;
        let mental_health = read_csv_file(&self.config.mental_health_path)
            .context("Failed to load the mental-health survey")?;

        let MonthlyTable {
            table,
            weather_means,
        } = build_monthly_table(MonthlySources {
            sport: &sport,
            mental_health: &mental_health,
            weather_files: &weather.files,
            air_quality: &air_quality,
        })?;

        let selected = select_present_columns(&table, &SELECTED_COLUMNS);
        info!(
            "Correlating {} of {} candidate columns over {} month(s)",
            selected.len(),
            SELECTED_COLUMNS.len(),
            table.height()
        );

        let matrix = compute_correlation_matrix(&table, &selected)?;
        let pairs = strong_pairs(&matrix, self.config.correlation_threshold);
        let counts = non_null_counts(&table, &selected)?;

        Ok(AnalysisReport {
            monthly: table,
            weather_means,
            matrix,
            strong_pairs: pairs,
            weather_failures: weather.failures,
            non_null_counts: counts,
        })
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}
