//! Per-month weather file cleaning.
//!
//! Every raw export gets the same treatment: keep the columns that look
//! like weather variables, coerce them to numbers (the portal writes
//! decimal commas), and fill what is missing with the column mean. One
//! broken file never aborts the sweep; it lands in the report instead.

use anyhow::Result;
use log::info;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::core::error::DataError;
use crate::io::export::write_csv_file;
use crate::io::loaders::{WeatherEncoding, WeatherFileFailure, WeatherFolderLoader};
use crate::parsing::columns::is_weather_label;
use crate::transformations::cleaning::{coerce_numeric, impute_with_mean};

/// One successfully cleaned weather file.
#[derive(Debug, Clone, Serialize)]
pub struct CleanedWeatherFile {
    pub file_name: String,
    pub columns: Vec<String>,
    pub rows: usize,
}

/// Outcome of cleaning a weather folder.
#[derive(Debug, Default)]
pub struct WeatherCleanReport {
    pub cleaned: Vec<CleanedWeatherFile>,
    pub failures: Vec<WeatherFileFailure>,
}

/// Cleans every raw weather file of `input_dir` into `output_dir`,
/// one cleaned CSV per readable input file, same file name.
pub fn clean_weather_folder(input_dir: &Path, output_dir: &Path) -> Result<WeatherCleanReport> {
    let load = WeatherFolderLoader::load_folder(input_dir, WeatherEncoding::Latin1)?;
    let mut report = WeatherCleanReport {
        cleaned: Vec::new(),
        failures: load.failures,
    };

    for file in load.files {
        let file_name = file
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.csv", file.month_key));

        let outcome = clean_weather_frame(&file.dataframe)
            .and_then(|mut cleaned| {
                write_csv_file(&mut cleaned, &output_dir.join(&file_name))?;
                Ok(cleaned)
            });

        match outcome {
            Ok(cleaned) => {
                let columns: Vec<String> = cleaned
                    .get_column_names_str()
                    .iter()
                    .map(|name| name.to_string())
                    .collect();
                info!("Cleaned weather file {file_name} | columns: {columns:?}");
                report.cleaned.push(CleanedWeatherFile {
                    file_name,
                    columns,
                    rows: cleaned.height(),
                });
            }
            Err(err) => {
                log::warn!("Failed to clean weather file {file_name}: {err:#}");
                report.failures.push(WeatherFileFailure {
                    path: file.path,
                    reason: format!("{err:#}"),
                });
            }
        }
    }
    Ok(report)
}

/// Cleans one raw weather frame: weather-column detection, numeric
/// coercion, column-mean imputation.
///
/// Cleaning its own output is a no-op apart from the integer-to-float
/// widening: detection still matches, values already parse, and a fully
/// populated column leaves the mean fill with nothing to do.
pub fn clean_weather_frame(df: &DataFrame) -> Result<DataFrame> {
    let detected: Vec<String> = df
        .get_column_names_str()
        .iter()
        .filter(|name| is_weather_label(name))
        .map(|name| name.to_string())
        .collect();
    if detected.is_empty() {
        return Err(DataError::NoTargetColumns.into());
    }

    let mut columns: Vec<Column> = Vec::with_capacity(detected.len());
    for name in &detected {
        let series = df.column(name)?.as_materialized_series().clone();
        let coerced = coerce_numeric(&series)?;
        let filled = impute_with_mean(&coerced)?;
        columns.push(filled.into_column());
    }
    Ok(DataFrame::new(columns)?)
}
