//! Core domain vocabulary, error types and fixed file locations.

pub mod domain;
pub mod error;
pub mod paths;

pub use domain::{OrdinalScale, TripRecord};
pub use error::DataError;
