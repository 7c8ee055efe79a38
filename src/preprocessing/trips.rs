//! BIXI trip-count cleaning.
//!
//! The raw export decorates its two count columns with spaces and other
//! non-digit bytes. Cleaning strips the decoration, derives the total
//! column and orders rows chronologically: year ascending, then the
//! fixed French month sequence. A count that holds no digits at all is
//! a hard failure; a trip table with invented zeros is worse than no
//! table.

use anyhow::{bail, Context, Result};
use log::info;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::core::domain::{
    month_rank, TripRecord, MONTH_COLUMN, TRIP_COUNT_COLUMNS, TRIP_TOTAL_COLUMN,
    TRIP_YEAR_COLUMN,
};
use crate::io::export::write_csv_file;
use crate::parsing::csv_source::read_csv_file;
use crate::transformations::cleaning::coerce_count;

/// Summary of one trip-cleaning run.
#[derive(Debug, Clone, Serialize)]
pub struct TripCleanSummary {
    pub rows: usize,
    pub total_trips: i64,
}

/// Cleans the raw trip CSV and writes the cleaned table.
pub fn clean_trips_file(input: &Path, output: &Path) -> Result<TripCleanSummary> {
    let raw = read_csv_file(input)?;
    let mut cleaned = clean_trips_frame(&raw)?;
    write_csv_file(&mut cleaned, output)?;

    let total_trips = cleaned
        .column(TRIP_TOTAL_COLUMN)?
        .i64()?
        .sum()
        .unwrap_or(0);
    let summary = TripCleanSummary {
        rows: cleaned.height(),
        total_trips,
    };
    info!(
        "Cleaned {} trip rows ({} trips) into {}",
        summary.rows,
        summary.total_trips,
        output.display()
    );
    Ok(summary)
}

/// Cleans an in-memory trip table: count coercion, total column,
/// chronological ordering.
pub fn clean_trips_frame(df: &DataFrame) -> Result<DataFrame> {
    let mut df = df.clone();
    for column in TRIP_COUNT_COLUMNS {
        let series = df
            .column(column)
            .with_context(|| format!("Raw trip table is missing '{column}'"))?
            .as_materialized_series()
            .clone();
        let counts = coerce_count(&series)?;
        if counts.null_count() > 0 {
            bail!(
                "Column '{column}' holds {} value(s) without any digit",
                counts.null_count()
            );
        }
        df.with_column(counts)?;
    }

    let df = df
        .lazy()
        .with_column(
            (col(TRIP_COUNT_COLUMNS[0]) + col(TRIP_COUNT_COLUMNS[1])).alias(TRIP_TOTAL_COLUMN),
        )
        .collect()?;

    sort_chronologically(&df)
}

/// Sorts by year ascending, then by the fixed month sequence. A month
/// outside the twelve-name vocabulary is a hard failure.
fn sort_chronologically(df: &DataFrame) -> Result<DataFrame> {
    let months = df
        .column(MONTH_COLUMN)
        .context("Raw trip table is missing 'mois'")?
        .str()?;
    let mut ranks: Vec<u32> = Vec::with_capacity(months.len());
    for month in months.into_iter() {
        match month.and_then(month_rank) {
            Some(rank) => ranks.push(rank),
            None => bail!("Unknown month name: {:?}", month.unwrap_or("<null>")),
        }
    }

    let rank_column = "mois_rang";
    let mut keyed = df.clone();
    keyed.with_column(Series::new(rank_column.into(), ranks))?;
    let sorted = keyed.sort(
        [TRIP_YEAR_COLUMN, rank_column],
        SortMultipleOptions::default(),
    )?;
    Ok(sorted.drop(rank_column)?)
}

/// Converts a cleaned trip table into typed records.
pub fn trip_records_from_dataframe(df: &DataFrame) -> Result<Vec<TripRecord>> {
    let years = df.column(TRIP_YEAR_COLUMN)?.i64()?;
    let months = df.column(MONTH_COLUMN)?.str()?;
    let members = df.column(TRIP_COUNT_COLUMNS[0])?.i64()?;
    let casuals = df.column(TRIP_COUNT_COLUMNS[1])?.i64()?;
    let totals = df.column(TRIP_TOTAL_COLUMN)?.i64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let record = TripRecord {
            year: years.get(i).context("null year in cleaned trip table")?,
            month: months
                .get(i)
                .context("null month in cleaned trip table")?
                .to_string(),
            member_trips: members.get(i).context("null member count")?,
            casual_trips: casuals.get(i).context("null casual count")?,
            total_trips: totals.get(i).context("null total count")?,
        };
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    const RAW: &str = "\
mois,année,deplacements_membre,deplacements_occasionnel
juin,2023,\"1 200\",\"300\"
janvier,2023,\"450\",\"50\"
décembre,2022,\"100 000\",\"2 000\"
";

    #[test]
    fn test_clean_trips_totals_and_order() {
        let input = create_temp_csv(RAW);
        let output = NamedTempFile::new().unwrap();
        let summary = clean_trips_file(input.path(), output.path()).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.total_trips, 1500 + 500 + 102_000);

        let cleaned = read_csv_file(output.path()).unwrap();
        let records = trip_records_from_dataframe(&cleaned).unwrap();

        // 2022 before 2023, then the fixed month sequence inside a year
        let order: Vec<(i64, &str)> = records
            .iter()
            .map(|r| (r.year, r.month.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(2022, "décembre"), (2023, "janvier"), (2023, "juin")]
        );

        for record in &records {
            assert!(record.total_is_consistent());
            assert!(record.month_is_known());
        }
    }

    #[test]
    fn test_clean_trips_rejects_digitless_counts() {
        let input = create_temp_csv(
            "mois,année,deplacements_membre,deplacements_occasionnel\nmai,2023,abc,10\n",
        );
        let output = NamedTempFile::new().unwrap();
        assert!(clean_trips_file(input.path(), output.path()).is_err());
    }

    #[test]
    fn test_clean_trips_rejects_unknown_month() {
        let input = create_temp_csv(
            "mois,année,deplacements_membre,deplacements_occasionnel\nthermidor,2023,1,2\n",
        );
        let output = NamedTempFile::new().unwrap();
        assert!(clean_trips_file(input.path(), output.path()).is_err());
    }

    #[test]
    fn test_clean_trips_missing_count_column() {
        let input = create_temp_csv("mois,année,deplacements_membre\nmai,2023,1\n");
        let output = NamedTempFile::new().unwrap();
        assert!(clean_trips_file(input.path(), output.path()).is_err());
    }
}
