//! Folder-level loading of the per-month weather files.
//!
//! A weather folder is a bag of independent exports, and one bad file
//! must not take down the run. The loader therefore returns an explicit
//! per-file outcome: every file either contributes a DataFrame tagged
//! with its month key, or a failure entry carrying the reason. Deciding
//! whether an empty result set is fatal is the caller's business.

use anyhow::{Context, Result};
use log::warn;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parsing::csv_source::{file_month_key, read_csv_file, read_latin1_csv_file};

/// Text encoding of a weather export folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEncoding {
    /// Cleaned outputs, written by this crate.
    Utf8,
    /// Raw portal exports.
    Latin1,
}

/// One successfully loaded weather file.
#[derive(Debug)]
pub struct LoadedWeatherFile {
    pub path: PathBuf,
    /// Lowercased file stem; the month this file stands for.
    pub month_key: String,
    pub dataframe: DataFrame,
}

/// A weather file that could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherFileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of sweeping one weather folder.
#[derive(Debug, Default)]
pub struct WeatherLoadReport {
    pub files: Vec<LoadedWeatherFile>,
    pub failures: Vec<WeatherFileFailure>,
}

impl WeatherLoadReport {
    /// True when not a single file loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn record_failure(&mut self, path: PathBuf, reason: String) {
        warn!("Skipping weather file {}: {}", path.display(), reason);
        self.failures.push(WeatherFileFailure { path, reason });
    }
}

/// Loads every `*.csv` of a weather folder, one outcome per file.
pub struct WeatherFolderLoader;

impl WeatherFolderLoader {
    /// Sweeps `dir` in file-name order. Per-file errors end up in the
    /// report's failure list; only an unreadable folder is an error.
    pub fn load_folder(dir: &Path, encoding: WeatherEncoding) -> Result<WeatherLoadReport> {
        let mut report = WeatherLoadReport::default();
        for path in Self::csv_files(dir)? {
            let month_key = match file_month_key(&path) {
                Some(key) => key,
                None => {
                    report.record_failure(path, "file name is not valid UTF-8".to_string());
                    continue;
                }
            };
            let loaded = match encoding {
                WeatherEncoding::Utf8 => read_csv_file(&path),
                WeatherEncoding::Latin1 => read_latin1_csv_file(&path),
            };
            match loaded {
                Ok(dataframe) => report.files.push(LoadedWeatherFile {
                    path,
                    month_key,
                    dataframe,
                }),
                Err(err) => report.record_failure(path, format!("{err:#}")),
            }
        }
        Ok(report)
    }

    fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read weather folder {}", dir.display()))?;
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list weather folder {}", dir.display()))?
                .path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if is_csv {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
