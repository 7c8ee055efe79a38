//! The three dataset cleaners: load raw → clean → write cleaned.
//!
//! Each cleaner is a one-shot transform over a fixed raw drop, producing
//! the CSV the correlation analysis later consumes:
//!
//! - [`trips`]: BIXI bicycle-trip counts
//! - [`weather`]: per-month station weather exports
//! - [`air_quality`]: RSQA air-quality index

pub mod air_quality;
pub mod trips;
pub mod weather;

pub use air_quality::{clean_air_quality_file, AirQualityCleanSummary};
pub use trips::{clean_trips_file, TripCleanSummary};
pub use weather::{clean_weather_folder, WeatherCleanReport};
