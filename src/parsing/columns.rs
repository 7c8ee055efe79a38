//! Weather column detection and canonicalization.
//!
//! The station exports never agree on column labels: casing drifts,
//! degree signs arrive as mojibake (`√`, `¬`, `©`) and two stations
//! spell the pressure column differently. Detection is therefore fuzzy
//! by construction, a substring match over a normalized label, and is
//! kept here as pure functions so the ambiguity stays in one auditable
//! place.

use crate::core::domain::{COLUMN_RENAMES, LABEL_ARTIFACTS, WEATHER_KEYWORDS};

/// Normalizes a raw column label for keyword matching: lowercases,
/// strips the known mojibake artifacts and trims whitespace.
pub fn normalize_label(raw: &str) -> String {
    let mut label = raw.to_lowercase();
    for artifact in LABEL_ARTIFACTS {
        label = label.replace(artifact, "");
    }
    label.trim().to_string()
}

/// True when a raw label matches one of the weather keywords.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::parsing::is_weather_label;
///
/// assert!(is_weather_label("Temp (¬∞C)"));
/// assert!(is_weather_label("Hum. rel (%)"));
/// assert!(!is_weather_label("Jour"));
/// ```
pub fn is_weather_label(raw: &str) -> bool {
    let normalized = normalize_label(raw);
    WEATHER_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

/// Maps a known spelling variant to its canonical column name; labels
/// outside the rename table pass through unchanged.
pub fn canonical_weather_name(raw: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(variant, _)| *variant == raw)
        .map(|&(_, canonical)| canonical)
        .unwrap_or(raw)
}
