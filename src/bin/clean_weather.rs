//! Cleans every raw per-month weather export.

use anyhow::Result;
use std::path::Path;

use mtl_wellbeing::core::paths;
use mtl_wellbeing::preprocessing::weather::clean_weather_folder;

fn main() -> Result<()> {
    env_logger::init();

    let report = clean_weather_folder(
        Path::new(paths::RAW_WEATHER_DIR),
        Path::new(paths::CLEAN_WEATHER_DIR),
    )?;

    for file in &report.cleaned {
        println!(
            "Cleaned {} ({} rows) | columns: {}",
            file.file_name,
            file.rows,
            file.columns.join(", ")
        );
    }
    for failure in &report.failures {
        println!("Skipped {}: {}", failure.path.display(), failure.reason);
    }
    println!(
        "{} file(s) cleaned into {}, {} skipped",
        report.cleaned.len(),
        paths::CLEAN_WEATHER_DIR,
        report.failures.len()
    );
    Ok(())
}
