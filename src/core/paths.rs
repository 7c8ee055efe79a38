//! Fixed relative locations of every input and output file.
//!
//! The cleaners and the analysis are one-shot scripts over a known data
//! drop; none of them takes flags or environment variables. Paths are
//! resolved against the working directory the binaries are started from.

/// Raw BIXI trip counts, 2022–2025.
pub const RAW_TRIPS: &str = "data/bixi_deplacements_2022_2025.csv";

/// Cleaned trip table written by `clean-trips`.
pub const CLEAN_TRIPS: &str = "data/bixi_deplacements_nettoye.csv";

/// Folder of raw per-month weather exports (ISO-8859-1).
pub const RAW_WEATHER_DIR: &str = "data/meteo_montreal";

/// Folder of cleaned weather files written by `clean-weather`.
pub const CLEAN_WEATHER_DIR: &str = "data/meteo_nettoye";

/// Raw RSQA air-quality index, 2022–2024.
pub const RAW_AIR_QUALITY: &str = "data/rsqa-indice-qualite-air-2022-2024.csv";

/// Cleaned air-quality table written by `clean-air-quality`.
pub const CLEAN_AIR_QUALITY: &str = "data/rsqa_air_montreal_2023_nettoye.csv";

/// Simulated monthly physical-activity survey, Québec 2023.
pub const SPORT_SURVEY: &str = "data/activite_physique_mensuelle_2023.csv";

/// Simulated monthly mental-health survey, Québec 2023.
pub const MENTAL_HEALTH_SURVEY: &str = "data/sante_mentale_2023.csv";

/// Heatmap image written by `correlation-report`.
pub const HEATMAP_IMAGE: &str = "correlation_heatmap.png";
