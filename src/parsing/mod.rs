//! Parsers and label utilities for the raw CSV exports.
//!
//! # Modules
//!
//! - [`csv_source`]: CSV readers (default encoding and the legacy
//!   ISO-8859-1 weather exports) and month-key derivation from file names
//! - [`columns`]: pure functions deciding which raw weather columns to
//!   keep and what their canonical names are

pub mod columns;
pub mod csv_source;


pub use columns::{canonical_weather_name, is_weather_label, normalize_label};
pub use csv_source::{file_month_key, read_csv_file, read_latin1_csv_file};
