//! Typed failure conditions shared across the cleaners and the analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Failure conditions this crate raises itself. Everything else (I/O,
/// polars) is propagated through `anyhow` with context attached.
#[derive(Debug, Error)]
pub enum DataError {
    /// The analysis needs at least one weather table to run.
    #[error("no weather file could be loaded from {0}")]
    EmptyWeatherSet(PathBuf),

    /// A column the operation cannot proceed without is absent.
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// A weather file exposed none of the known weather columns.
    #[error("no target column detected")]
    NoTargetColumns,
}
