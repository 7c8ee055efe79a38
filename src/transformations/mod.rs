//! Column-level cleaning operations shared by the preprocessors.
//!
//! # Modules
//!
//! - [`cleaning`]: numeric coercion, count-column digit stripping and
//!   column-mean imputation

pub mod cleaning;

pub use cleaning::{
    coerce_count, coerce_date, coerce_numeric, impute_with_mean, parse_decimal, parse_iso_date,
    strip_to_digits,
};
