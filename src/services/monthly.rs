//! Monthly cross-domain aggregation and joining.
//!
//! Every source lands here at a different granularity: weather as one
//! table per month, pollution as many station readings per day, the
//! surveys already monthly. This module brings them all to one row per
//! French month and joins them into the wide table the correlation
//! step consumes.
//!
//! The join is anchored on the survey base: survey months missing from
//! weather or pollution keep their row with nulls in those columns,
//! while weather or pollution months the surveys never cover are
//! dropped.

use anyhow::{Context, Result};
use chrono::Datelike;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::domain::{
    french_month_name, month_rank, OrdinalScale, MONTH_COLUMN, STRESS_SCALE, WEATHER_VARIABLES,
    WELLBEING_SCALE,
};
use crate::core::error::DataError;
use crate::io::loaders::LoadedWeatherFile;
use crate::parsing::columns::canonical_weather_name;
use crate::transformations::cleaning::{coerce_date, coerce_numeric};

/// Everything the monthly join consumes.
pub struct MonthlySources<'a> {
    pub sport: &'a DataFrame,
    pub mental_health: &'a DataFrame,
    pub weather_files: &'a [LoadedWeatherFile],
    pub air_quality: &'a DataFrame,
}

/// The joined monthly table plus the weather means kept for diagnostics.
pub struct MonthlyTable {
    pub table: DataFrame,
    pub weather_means: DataFrame,
}

/// Builds the wide monthly table: weather means, pollution means per
/// pollutant, survey merge, ordinal scores.
pub fn build_monthly_table(sources: MonthlySources<'_>) -> Result<MonthlyTable> {
    let weather_means = weather_monthly_means(sources.weather_files)?;
    let pollution_means = pollution_monthly_means(sources.air_quality)?;
    let merged = merge_monthly_sources(
        sources.sport,
        sources.mental_health,
        &weather_means,
        &pollution_means,
    )?;
    let table = encode_ordinal_scores(&merged, &[STRESS_SCALE, WELLBEING_SCALE])?;
    Ok(MonthlyTable {
        table,
        weather_means,
    })
}

/// Averages every canonical weather variable per month across the
/// loaded files. Spelling variants are folded into their canonical
/// names first; columns outside the canonical set are ignored.
pub fn weather_monthly_means(files: &[LoadedWeatherFile]) -> Result<DataFrame> {
    let mut months: Vec<String> = Vec::new();
    let mut variables: Vec<String> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();

    for file in files {
        let harmonized = canonicalize_columns(&file.dataframe)?;
        for variable in WEATHER_VARIABLES {
            let column = match harmonized.column(variable) {
                Ok(column) => column,
                Err(_) => continue,
            };
            let coerced = coerce_numeric(column.as_materialized_series())
                .with_context(|| format!("Failed to coerce '{variable}'"))?;
            for value in coerced.f64()?.into_iter() {
                months.push(file.month_key.clone());
                variables.push(variable.to_string());
                values.push(value);
            }
        }
    }

    let long = DataFrame::new(vec![
        Column::new(MONTH_COLUMN.into(), months),
        Column::new("variable".into(), variables),
        Column::new("valeur".into(), values),
    ])?;
    monthly_category_means(&long, "variable")
}

/// Averages the pollution readings per month and pollutant, one column
/// per pollutant. The month key comes from the reading's date, via the
/// fixed English→French translation; readings whose month cannot be
/// derived are excluded.
pub fn pollution_monthly_means(air: &DataFrame) -> Result<DataFrame> {
    for column in ["polluant", "valeur", "date"] {
        if !air.get_column_names_str().contains(&column) {
            return Err(DataError::MissingColumn(column.to_string()).into());
        }
    }

    let dates = coerce_date(air.column("date")?.as_materialized_series())
        .context("Failed to parse 'date'")?;
    let months: StringChunked = dates
        .date()?
        .as_date_iter()
        .map(|date| date.and_then(|d| french_month_name(d.month())))
        .collect();
    let values = coerce_numeric(air.column("valeur")?.as_materialized_series())?;

    let long = DataFrame::new(vec![
        months.with_name(MONTH_COLUMN.into()).into_series().into_column(),
        air.column("polluant")?.as_materialized_series().clone().into_column(),
        values.into_column(),
    ])?;
    monthly_category_means(&long, "polluant")
}

/// Folds known spelling variants into their canonical column names.
/// When a frame somehow carries both spellings the canonical one wins
/// and the variant is left alone.
fn canonicalize_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut df = df.clone();
    let names: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let canonical = canonical_weather_name(&name);
        if canonical != name && !df.get_column_names_str().contains(&canonical) {
            df.rename(&name, canonical.into())?;
        }
    }
    Ok(df)
}

/// Groups a long `(mois, category, valeur)` frame by month and category,
/// averages ignoring nulls, and pivots categories into columns. Rows
/// come back in calendar-month order, columns in name order.
pub fn monthly_category_means(long: &DataFrame, category_column: &str) -> Result<DataFrame> {
    let grouped = long
        .clone()
        .lazy()
        .filter(col(MONTH_COLUMN).is_not_null())
        .group_by([col(MONTH_COLUMN), col(category_column)])
        .agg([col("valeur").mean()])
        .collect()?;

    let month_keys = grouped.column(MONTH_COLUMN)?.str()?;
    let categories_col = grouped.column(category_column)?.str()?;
    let means = grouped.column("valeur")?.f64()?;

    let mut categories: BTreeSet<String> = BTreeSet::new();
    let mut cells: BTreeMap<String, HashMap<String, f64>> = BTreeMap::new();
    for i in 0..grouped.height() {
        let (month, category) = match (month_keys.get(i), categories_col.get(i)) {
            (Some(month), Some(category)) => (month, category),
            _ => continue,
        };
        categories.insert(category.to_string());
        let row = cells.entry(month.to_string()).or_default();
        if let Some(mean) = means.get(i) {
            row.insert(category.to_string(), mean);
        }
    }

    let mut month_order: Vec<String> = cells.keys().cloned().collect();
    month_order.sort_by_key(|month| (month_rank(month).unwrap_or(u32::MAX), month.clone()));

    let mut columns = vec![Column::new(MONTH_COLUMN.into(), month_order.clone())];
    for category in &categories {
        let series: Vec<Option<f64>> = month_order
            .iter()
            .map(|month| cells.get(month).and_then(|row| row.get(category)).copied())
            .collect();
        columns.push(Column::new(category.as_str().into(), series));
    }
    Ok(DataFrame::new(columns)?)
}

/// Joins the four monthly tables on the month key: surveys inner, then
/// weather and pollution left onto the survey base.
pub fn merge_monthly_sources(
    sport: &DataFrame,
    mental_health: &DataFrame,
    weather_means: &DataFrame,
    pollution_means: &DataFrame,
) -> Result<DataFrame> {
    for (label, df) in [
        ("physical-activity survey", sport),
        ("mental-health survey", mental_health),
        ("weather means", weather_means),
        ("pollution means", pollution_means),
    ] {
        if !df.get_column_names_str().contains(&MONTH_COLUMN) {
            return Err(DataError::MissingColumn(MONTH_COLUMN.to_string()))
                .with_context(|| format!("{label} has no month key"));
        }
    }

    let joined = sport
        .clone()
        .lazy()
        .join(
            mental_health.clone().lazy(),
            [col(MONTH_COLUMN)],
            [col(MONTH_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .join(
            weather_means.clone().lazy(),
            [col(MONTH_COLUMN)],
            [col(MONTH_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            pollution_means.clone().lazy(),
            [col(MONTH_COLUMN)],
            [col(MONTH_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    sort_by_month(&joined)
}

/// Adds the integer score column of each ordinal scale. Labels outside
/// a scale yield a null score.
pub fn encode_ordinal_scores(df: &DataFrame, scales: &[OrdinalScale]) -> Result<DataFrame> {
    let mut df = df.clone();
    for scale in scales {
        let labels = df
            .column(scale.column)
            .map_err(|_| DataError::MissingColumn(scale.column.to_string()))?
            .str()
            .with_context(|| format!("Column '{}' is not categorical", scale.column))?;
        let scores: Int64Chunked = labels
            .into_iter()
            .map(|label| label.and_then(|label| scale.score(label)))
            .collect();
        df.with_column(scores.with_name(scale.score_column.into()).into_series())?;
    }
    Ok(df)
}

fn sort_by_month(df: &DataFrame) -> Result<DataFrame> {
    let months = df.column(MONTH_COLUMN)?.str()?;
    let ranks: UInt32Chunked = months
        .into_iter()
        .map(|month| Some(month.and_then(month_rank).unwrap_or(u32::MAX)))
        .collect();
    let rank_column = "mois_rang";
    let mut keyed = df.clone();
    keyed.with_column(ranks.with_name(rank_column.into()).into_series())?;
    let sorted = keyed.sort([rank_column], SortMultipleOptions::default())?;
    Ok(sorted.drop(rank_column)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_file(month_key: &str, dataframe: DataFrame) -> LoadedWeatherFile {
        LoadedWeatherFile {
            path: PathBuf::from(format!("{month_key}.csv")),
            month_key: month_key.to_string(),
            dataframe,
        }
    }

    fn survey_frames() -> (DataFrame, DataFrame) {
        let months: Vec<&str> = crate::core::domain::MONTH_ORDER.to_vec();
        let sport = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), months.clone()),
            Column::new(
                "nb_moyen_sportifs_par_jour".into(),
                (1..=12).map(|v| v as f64).collect::<Vec<f64>>(),
            ),
            Column::new(
                "duree_moyenne_minutes".into(),
                (1..=12).map(|v| (v * 2) as f64).collect::<Vec<f64>>(),
            ),
        ])
        .unwrap();
        let mental_health = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), months),
            Column::new("niveau_stress_dominant".into(), vec!["faible"; 12]),
            Column::new("niveau_bien_etre_dominant".into(), vec!["bon"; 12]),
        ])
        .unwrap();
        (sport, mental_health)
    }

    #[test]
    fn test_weather_monthly_means_averages_per_month() {
        let janvier = DataFrame::new(vec![Column::new(
            "Temp (°C)".into(),
            &[10.0f64, 20.0],
        )])
        .unwrap();
        let fevrier =
            DataFrame::new(vec![Column::new("Temp (°C)".into(), &[30.0f64])]).unwrap();
        let files = vec![
            fixture_file("janvier", janvier),
            fixture_file("février", fevrier),
        ];

        let means = weather_monthly_means(&files).unwrap();
        assert_eq!(means.height(), 2);
        let months: Vec<Option<&str>> = means
            .column(MONTH_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(months, vec![Some("janvier"), Some("février")]);
        let temps: Vec<Option<f64>> = means
            .column("Temp (°C)")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(temps, vec![Some(15.0), Some(30.0)]);
    }

    #[test]
    fn test_weather_monthly_means_folds_spelling_variants() {
        // Two files for the same month, one with the bare "Temp" label
        let a = DataFrame::new(vec![Column::new("Temp".into(), &[10.0f64])]).unwrap();
        let b = DataFrame::new(vec![Column::new("Temp (°C)".into(), &[20.0f64])]).unwrap();
        let files = vec![fixture_file("mars", a), fixture_file("mars", b)];

        let means = weather_monthly_means(&files).unwrap();
        assert_eq!(means.height(), 1);
        let temp = means.column("Temp (°C)").unwrap().f64().unwrap().get(0);
        assert_eq!(temp, Some(15.0));
    }

    #[test]
    fn test_pollution_monthly_means_pivots_pollutants() {
        let air = DataFrame::new(vec![
            Column::new("polluant".into(), &["NO2", "NO2", "O3", "NO2"]),
            Column::new("valeur".into(), &[10.0f64, 20.0, 30.0, 40.0]),
            Column::new(
                "date".into(),
                &["2023-01-02", "2023-01-20", "2023-01-05", "2023-02-01"],
            ),
        ])
        .unwrap();

        let means = pollution_monthly_means(&air).unwrap();
        assert_eq!(means.height(), 2);
        let no2: Vec<Option<f64>> = means
            .column("NO2")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(no2, vec![Some(15.0), Some(40.0)]);
        let o3: Vec<Option<f64>> = means
            .column("O3")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        // O3 has no February reading; the cell stays empty
        assert_eq!(o3, vec![Some(30.0), None]);
    }

    #[test]
    fn test_merge_keeps_survey_months_missing_elsewhere() {
        let (sport, mental_health) = survey_frames();
        // Weather covers eleven months; décembre is absent
        let files: Vec<LoadedWeatherFile> = crate::core::domain::MONTH_ORDER[..11]
            .iter()
            .map(|month| {
                fixture_file(
                    month,
                    DataFrame::new(vec![Column::new("Temp (°C)".into(), &[5.0f64])]).unwrap(),
                )
            })
            .collect();
        let air = DataFrame::new(vec![
            Column::new("polluant".into(), &["NO2"]),
            Column::new("valeur".into(), &[10.0f64]),
            Column::new("date".into(), &["2023-01-02"]),
        ])
        .unwrap();

        let monthly = build_monthly_table(MonthlySources {
            sport: &sport,
            mental_health: &mental_health,
            weather_files: &files,
            air_quality: &air,
        })
        .unwrap();

        let table = &monthly.table;
        assert_eq!(table.height(), 12);

        let months: Vec<Option<&str>> = table
            .column(MONTH_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(months[0], Some("janvier"));
        assert_eq!(months[11], Some("décembre"));

        // décembre kept its row, with a hole in the weather column
        let temp = table.column("Temp (°C)").unwrap().f64().unwrap();
        assert!(temp.get(0).is_some());
        assert!(temp.get(11).is_none());

        // Ordinal labels encoded on every row
        let stress = table.column("stress_score").unwrap().i64().unwrap();
        assert_eq!(stress.get(0), Some(1));
        let wellbeing = table.column("bien_etre_score").unwrap().i64().unwrap();
        assert_eq!(wellbeing.get(11), Some(3));
    }

    #[test]
    fn test_merge_drops_months_outside_survey_base() {
        let months = ["janvier", "février"];
        let sport = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), months.as_slice()),
            Column::new("nb_moyen_sportifs_par_jour".into(), &[1.0f64, 2.0]),
        ])
        .unwrap();
        let mental_health = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), months.as_slice()),
            Column::new("niveau_stress_dominant".into(), &["faible", "élevé"]),
            Column::new("niveau_bien_etre_dominant".into(), &["bon", "faible"]),
        ])
        .unwrap();
        // Weather knows about juillet; the surveys never mention it
        let weather = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), &["janvier", "juillet"]),
            Column::new("Temp (°C)".into(), &[-10.0f64, 25.0]),
        ])
        .unwrap();
        let pollution = DataFrame::new(vec![
            Column::new(MONTH_COLUMN.into(), &["janvier"]),
            Column::new("NO2".into(), &[12.0f64]),
        ])
        .unwrap();

        let merged =
            merge_monthly_sources(&sport, &mental_health, &weather, &pollution).unwrap();
        assert_eq!(merged.height(), 2);
        let mois: Vec<Option<&str>> = merged
            .column(MONTH_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(mois, vec![Some("janvier"), Some("février")]);
    }

    #[test]
    fn test_encode_ordinal_scores_maps_unknown_to_null() {
        let df = DataFrame::new(vec![
            Column::new("niveau_stress_dominant".into(), &["faible", "intense"]),
            Column::new("niveau_bien_etre_dominant".into(), &["moyen", "bon"]),
        ])
        .unwrap();
        let encoded = encode_ordinal_scores(&df, &[STRESS_SCALE, WELLBEING_SCALE]).unwrap();
        let stress: Vec<Option<i64>> = encoded
            .column("stress_score")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(stress, vec![Some(1), None]);
    }

    #[test]
    fn test_encode_ordinal_scores_missing_column() {
        let df = DataFrame::new(vec![Column::new("autre".into(), &[1i64])]).unwrap();
        assert!(encode_ordinal_scores(&df, &[STRESS_SCALE]).is_err());
    }
}
