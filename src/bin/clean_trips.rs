//! Cleans the raw BIXI trip export.

use anyhow::Result;
use std::path::Path;

use mtl_wellbeing::core::paths;
use mtl_wellbeing::preprocessing::trips::clean_trips_file;

fn main() -> Result<()> {
    env_logger::init();

    let summary = clean_trips_file(Path::new(paths::RAW_TRIPS), Path::new(paths::CLEAN_TRIPS))?;
    println!(
        "Cleaned trip data saved to {} ({} rows, {} trips in total)",
        paths::CLEAN_TRIPS,
        summary.rows,
        summary.total_trips
    );
    Ok(())
}
