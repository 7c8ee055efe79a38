//! Runs the monthly correlation analysis and renders the heatmap.

use anyhow::Result;
use std::path::Path;

use mtl_wellbeing::core::paths;
use mtl_wellbeing::services::analysis::AnalysisPipeline;
use mtl_wellbeing::services::heatmap::render_heatmap;

const HEATMAP_TITLE: &str =
    "Correlations: physical activity, weather, pollution and mental health — Québec 2023";

fn main() -> Result<()> {
    env_logger::init();

    let report = AnalysisPipeline::new().run()?;

    println!("Non-null counts over the selected columns:");
    for (name, count) in &report.non_null_counts {
        println!("  {name}: {count}");
    }

    println!("\nMonthly weather means:\n{}", report.weather_means);

    println!("\nStrong correlations (|r| >= 0.5):");
    if report.strong_pairs.is_empty() {
        println!("  none detected");
    }
    for pair in &report.strong_pairs {
        println!(
            "  {:>6.3}  {} ~ {}",
            pair.coefficient, pair.variable_1, pair.variable_2
        );
    }

    if !report.weather_failures.is_empty() {
        println!(
            "\n{} weather file(s) could not be loaded:",
            report.weather_failures.len()
        );
        for failure in &report.weather_failures {
            println!("  {}: {}", failure.path.display(), failure.reason);
        }
    }

    render_heatmap(&report.matrix, HEATMAP_TITLE, Path::new(paths::HEATMAP_IMAGE))?;
    println!("\nHeatmap saved to {}", paths::HEATMAP_IMAGE);
    Ok(())
}
