//! RSQA air-quality cleaning.
//!
//! The raw index spans 2022–2024; the analysis only wants one year.
//! Cleaning parses the dates, keeps the target year, drops the unused
//! hourly column when the export carries one, and removes every row
//! that is incomplete in the four columns the analysis joins on.

use anyhow::{Context, Result};
use chrono::Datelike;
use log::info;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::core::domain::AIR_REQUIRED_COLUMNS;
use crate::core::error::DataError;
use crate::io::export::write_csv_file;
use crate::parsing::csv_source::read_csv_file;
use crate::transformations::cleaning::coerce_date;

/// Column the raw export sometimes carries and the analysis never reads.
const HOUR_COLUMN: &str = "heure";

/// Summary of one air-quality cleaning run.
#[derive(Debug, Clone, Serialize)]
pub struct AirQualityCleanSummary {
    pub rows_in: usize,
    pub rows_kept: usize,
}

/// Cleans the raw air-quality CSV and writes the cleaned table.
pub fn clean_air_quality_file(
    input: &Path,
    output: &Path,
    target_year: i32,
) -> Result<AirQualityCleanSummary> {
    let raw = read_csv_file(input)?;
    let rows_in = raw.height();
    let mut cleaned = clean_air_quality_frame(&raw, target_year)?;
    write_csv_file(&mut cleaned, output)?;

    let summary = AirQualityCleanSummary {
        rows_in,
        rows_kept: cleaned.height(),
    };
    info!(
        "Kept {} of {} air-quality rows for {} in {}",
        summary.rows_kept,
        summary.rows_in,
        target_year,
        output.display()
    );
    Ok(summary)
}

/// Cleans an in-memory air-quality table for one target year.
pub fn clean_air_quality_frame(df: &DataFrame, target_year: i32) -> Result<DataFrame> {
    for column in AIR_REQUIRED_COLUMNS {
        if !df.get_column_names_str().contains(&column) {
            return Err(DataError::MissingColumn(column.to_string()).into());
        }
    }

    let mut df = df.clone();
    if df.get_column_names_str().contains(&HOUR_COLUMN) {
        df = df.drop(HOUR_COLUMN)?;
    }

    let dates = coerce_date(df.column("date")?.as_materialized_series())
        .context("Failed to parse 'date'")?;
    df.with_column(dates.clone())?;

    // Keep the target year only; unparseable dates drop out here
    let year_mask: BooleanChunked = dates
        .date()?
        .as_date_iter()
        .map(|date| Some(date.map(|d| d.year() == target_year).unwrap_or(false)))
        .collect();
    let df = df.filter(&year_mask)?;

    // Drop rows incomplete in any of the required columns
    let mut complete = df
        .column(AIR_REQUIRED_COLUMNS[0])?
        .as_materialized_series()
        .is_not_null();
    for column in &AIR_REQUIRED_COLUMNS[1..] {
        complete = &complete & &df.column(column)?.as_materialized_series().is_not_null();
    }
    Ok(df.filter(&complete)?)
}
