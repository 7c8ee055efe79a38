//! CSV output for the cleaned tables.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Writes a DataFrame as a headered CSV file, creating parent folders
/// as needed. Existing files are overwritten; every run regenerates its
/// outputs from scratch.
pub fn write_csv_file(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create folder {}", parent.display()))?;
        }
    }
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV {}", path.display()))?;
    Ok(())
}
