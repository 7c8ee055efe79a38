//! Domain vocabulary for the Montreal monthly datasets.
//!
//! Every monthly source in this project joins on the same key: one of the
//! twelve French month names in [`MONTH_ORDER`]. This module owns that
//! vocabulary together with the other fixed lookup tables (English month
//! translation, weather column canonicalization, ordinal survey scales)
//! and the cleaned trip record type. All tables are immutable constants;
//! the functions that need one take it from here instead of carrying
//! their own copy.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The twelve French month names, calendar order.
///
/// This is both the closed vocabulary for the `mois` join key and the
/// sort order used when a table must be laid out chronologically.
pub const MONTH_ORDER: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Lowercased English month names, calendar order.
///
/// Used as the intermediate step when deriving a month key from a
/// calendar date before translating into French.
pub const MONTH_NAMES_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Fixed English → French month-name translation table.
pub static MONTH_EN_TO_FR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    MONTH_NAMES_EN
        .iter()
        .zip(MONTH_ORDER.iter())
        .map(|(&en, &fr)| (en, fr))
        .collect()
});

/// Returns the zero-based calendar rank of a French month name.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::core::domain::month_rank;
///
/// assert_eq!(month_rank("janvier"), Some(0));
/// assert_eq!(month_rank("décembre"), Some(11));
/// assert_eq!(month_rank("brumaire"), None);
/// ```
pub fn month_rank(month: &str) -> Option<u32> {
    MONTH_ORDER
        .iter()
        .position(|&m| m == month)
        .map(|i| i as u32)
}

/// Translates a one-based calendar month number into the French month name.
pub fn french_month_name(month_number: u32) -> Option<&'static str> {
    let english = MONTH_NAMES_EN.get(month_number.checked_sub(1)? as usize)?;
    MONTH_EN_TO_FR.get(english).copied()
}

/// Keywords that identify a weather column of interest, matched as
/// substrings of the normalized raw label.
pub const WEATHER_KEYWORDS: [&str; 6] = [
    "temp",
    "rosée",
    "hum. rel",
    "précip",
    "vent (km/h)",
    "pression",
];

/// Punctuation artifacts left behind by the legacy export's mis-encoded
/// degree signs; stripped before keyword matching.
pub const LABEL_ARTIFACTS: [&str; 3] = ["√", "¬", "©"];

/// Known spelling variants of the weather columns, mapped to the
/// canonical name. A source using a spelling outside this table simply
/// keeps its own label and falls out of the canonical set.
pub const COLUMN_RENAMES: [(&str, &str); 3] = [
    ("Temp", "Temp (°C)"),
    ("Point de rosée", "Point de rosée (°C)"),
    ("Pression de la station (kPa)", "Pression à la station (kPa)"),
];

/// The six canonical weather variables carried into the monthly table.
pub const WEATHER_VARIABLES: [&str; 6] = [
    "Temp (°C)",
    "Point de rosée (°C)",
    "Hum. rel (%)",
    "Hauteur de précip. (mm)",
    "Vit. du vent (km/h)",
    "Pression à la station (kPa)",
];

/// Column holding the month key in every monthly table.
pub const MONTH_COLUMN: &str = "mois";

/// Raw trip-count columns cleaned by the trip preprocessor.
pub const TRIP_COUNT_COLUMNS: [&str; 2] = ["deplacements_membre", "deplacements_occasionnel"];

/// Derived total column added by the trip preprocessor.
pub const TRIP_TOTAL_COLUMN: &str = "total_deplacements";

/// Year column of the raw trip table.
pub const TRIP_YEAR_COLUMN: &str = "année";

/// Air-quality columns that must be populated for a record to survive
/// cleaning.
pub const AIR_REQUIRED_COLUMNS: [&str; 4] = ["stationId", "polluant", "valeur", "date"];

/// Calendar year the analysis is restricted to.
pub const TARGET_YEAR: i32 = 2023;

/// Minimum absolute Pearson coefficient for a pair to count as strong.
pub const STRONG_CORRELATION_THRESHOLD: f64 = 0.5;

/// A three-level ordinal scale mapping a categorical survey column to an
/// integer score column.
///
/// Labels outside the scale produce a null score, never an error.
#[derive(Debug, Clone, Copy)]
pub struct OrdinalScale {
    /// Categorical source column.
    pub column: &'static str,
    /// Integer score column written next to it.
    pub score_column: &'static str,
    /// Label → score pairs.
    pub levels: [(&'static str, i64); 3],
}

impl OrdinalScale {
    /// Looks up the score for a label.
    ///
    /// # Examples
    ///
    /// ```
    /// use mtl_wellbeing::core::domain::STRESS_SCALE;
    ///
    /// assert_eq!(STRESS_SCALE.score("modéré"), Some(2));
    /// assert_eq!(STRESS_SCALE.score("inconnu"), None);
    /// ```
    pub fn score(&self, label: &str) -> Option<i64> {
        self.levels
            .iter()
            .find(|(name, _)| *name == label)
            .map(|&(_, score)| score)
    }
}

/// Dominant stress level reported by the mental-health survey.
pub const STRESS_SCALE: OrdinalScale = OrdinalScale {
    column: "niveau_stress_dominant",
    score_column: "stress_score",
    levels: [("faible", 1), ("modéré", 2), ("élevé", 3)],
};

/// Dominant wellbeing level reported by the mental-health survey.
pub const WELLBEING_SCALE: OrdinalScale = OrdinalScale {
    column: "niveau_bien_etre_dominant",
    score_column: "bien_etre_score",
    levels: [("faible", 1), ("moyen", 2), ("bon", 3)],
};

/// Columns considered for the correlation matrix, intersected with the
/// columns actually present in the joined monthly table.
pub const SELECTED_COLUMNS: [&str; 15] = [
    "nb_moyen_sportifs_par_jour",
    "duree_moyenne_minutes",
    "stress_score",
    "bien_etre_score",
    "Temp (°C)",
    "Point de rosée (°C)",
    "Hum. rel (%)",
    "Hauteur de précip. (mm)",
    "Vit. du vent (km/h)",
    "Pression à la station (kPa)",
    "PM",
    "NO2",
    "O3",
    "CO",
    "SO2",
];

/// One cleaned bicycle-trip row.
///
/// # Examples
///
/// ```
/// use mtl_wellbeing::core::domain::TripRecord;
///
/// let record = TripRecord {
///     year: 2023,
///     month: "juin".to_string(),
///     member_trips: 900,
///     casual_trips: 100,
///     total_trips: 1000,
/// };
/// assert!(record.total_is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub year: i64,
    pub month: String,
    pub member_trips: i64,
    pub casual_trips: i64,
    pub total_trips: i64,
}

impl TripRecord {
    /// True when the stored total equals the sum of the two count fields.
    pub fn total_is_consistent(&self) -> bool {
        self.total_trips == self.member_trips + self.casual_trips
    }

    /// True when the month belongs to the fixed twelve-name vocabulary.
    pub fn month_is_known(&self) -> bool {
        month_rank(&self.month).is_some()
    }
}
