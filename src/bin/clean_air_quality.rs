//! Cleans the raw RSQA air-quality index down to the target year.

use anyhow::Result;
use std::path::Path;

use mtl_wellbeing::core::domain::TARGET_YEAR;
use mtl_wellbeing::core::paths;
use mtl_wellbeing::preprocessing::air_quality::clean_air_quality_file;

fn main() -> Result<()> {
    env_logger::init();

    let summary = clean_air_quality_file(
        Path::new(paths::RAW_AIR_QUALITY),
        Path::new(paths::CLEAN_AIR_QUALITY),
        TARGET_YEAR,
    )?;
    println!(
        "Cleaned air-quality data for {} saved to {} ({} of {} rows kept)",
        TARGET_YEAR,
        paths::CLEAN_AIR_QUALITY,
        summary.rows_kept,
        summary.rows_in
    );
    Ok(())
}
