//! Data cleaning and monthly correlation analysis for Montreal open
//! data: BIXI trip counts, station weather exports, the RSQA
//! air-quality index and two simulated wellbeing surveys.
//!
//! The crate backs four one-shot binaries. Three cleaners each turn one
//! raw drop into a cleaned CSV (`clean-trips`, `clean-weather`,
//! `clean-air-quality`); `correlation-report` then aggregates every
//! cleaned source to one row per French month, joins them, computes a
//! Pearson correlation matrix and renders it as an annotated heatmap.

pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;
