//! CSV readers for the raw and cleaned exports.
//!
//! Two encodings exist in the wild here: everything modern is UTF-8, but
//! the per-month weather exports come out of the legacy portal as
//! ISO-8859-1. That encoding maps every byte to the same Unicode code
//! point, so decoding is a direct byte-to-char widening before the CSV
//! parser runs.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Parses a UTF-8 CSV file into a DataFrame.
pub fn read_csv_file(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse CSV {}", path.display()))?;
    Ok(df)
}

/// Parses an ISO-8859-1 CSV file into a DataFrame.
pub fn read_latin1_csv_file(path: &Path) -> Result<DataFrame> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let decoded = decode_latin1(&bytes);
    read_csv_bytes(decoded.into_bytes())
        .with_context(|| format!("Failed to parse CSV {}", path.display()))
}

/// Decodes ISO-8859-1 bytes; every byte value is its own code point.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn read_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}

/// Derives the month key a weather file stands for: its file stem,
/// lowercased.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::parsing::file_month_key;
/// use std::path::Path;
///
/// assert_eq!(
///     file_month_key(Path::new("data/meteo_nettoye/Janvier.csv")),
///     Some("janvier".to_string())
/// );
/// ```
pub fn file_month_key(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_lowercase())
}
