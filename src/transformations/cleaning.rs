//! Numeric coercion and imputation for messy CSV columns.
//!
//! The raw exports mix decimal commas, thousands separators, stray
//! whitespace and plain garbage into otherwise numeric columns. The
//! helpers here follow one rule: a value that cannot be read as a number
//! becomes null, and nulls are only ever repaired explicitly (mean
//! imputation), never silently invented.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days between 0001-01-01 (CE) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parses a decimal number, accepting `","` as the decimal separator.
///
/// Returns `None` for anything that is not a number once trimmed.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::transformations::parse_decimal;
///
/// assert_eq!(parse_decimal("21,4"), Some(21.4));
/// assert_eq!(parse_decimal(" -3.5 "), Some(-3.5));
/// assert_eq!(parse_decimal("n/a"), None);
/// ```
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

/// Drops every non-digit byte from a raw count value.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::transformations::strip_to_digits;
///
/// assert_eq!(strip_to_digits("1 234 567"), "1234567");
/// assert_eq!(strip_to_digits("n/d"), "");
/// ```
pub fn strip_to_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Coerces a column to `Float64`, turning unparseable values into nulls.
///
/// String columns are parsed value by value with [`parse_decimal`];
/// anything already numeric is cast.
pub fn coerce_numeric(series: &Series) -> PolarsResult<Series> {
    match series.dtype() {
        DataType::String => {
            let ca = series.str()?;
            let parsed: Float64Chunked = ca
                .into_iter()
                .map(|value| value.and_then(parse_decimal))
                .collect();
            Ok(parsed.with_name(series.name().clone()).into_series())
        }
        _ => series.cast(&DataType::Float64),
    }
}

/// Coerces a count column to `Int64` after stripping non-digit bytes.
///
/// Values with no digits at all become null; the caller decides whether
/// that is tolerable for its column.
pub fn coerce_count(series: &Series) -> PolarsResult<Series> {
    match series.dtype() {
        DataType::String => {
            let ca = series.str()?;
            let parsed: Int64Chunked = ca
                .into_iter()
                .map(|value| value.and_then(|v| strip_to_digits(v).parse::<i64>().ok()))
                .collect();
            Ok(parsed.with_name(series.name().clone()).into_series())
        }
        _ => series.cast(&DataType::Int64),
    }
}

/// Parses an ISO `YYYY-MM-DD` date, `None` on anything else.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Coerces a column to the `Date` dtype, turning unparseable values
/// into nulls. Already-parsed date columns pass through unchanged.
pub fn coerce_date(series: &Series) -> PolarsResult<Series> {
    match series.dtype() {
        DataType::Date => Ok(series.clone()),
        DataType::String => {
            let ca = series.str()?;
            let parsed: Int32Chunked = ca
                .into_iter()
                .map(|value| {
                    value
                        .and_then(parse_iso_date)
                        .map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
                })
                .collect();
            Ok(parsed
                .with_name(series.name().clone())
                .into_date()
                .into_series())
        }
        other => Err(PolarsError::ComputeError(
            format!("cannot read dates from a {other} column").into(),
        )),
    }
}

/// Replaces the nulls of a numeric column with the column mean.
///
/// The mean is computed over the non-null values. A column with no
/// non-null value is returned unchanged (there is nothing to impute
/// from).
pub fn impute_with_mean(series: &Series) -> PolarsResult<Series> {
    let values = series.cast(&DataType::Float64)?;
    let ca = values.f64()?;
    let mean = match ca.mean() {
        Some(mean) => mean,
        None => return Ok(values),
    };
    let filled: Float64Chunked = ca.into_iter().map(|v| v.or(Some(mean))).collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}
