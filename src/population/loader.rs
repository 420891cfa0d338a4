//! Load country profiles and baseline age distributions from the data directory
//!
//! Layout:
//! - `data/countries.json`
//! - `data/age_distributions/{CODE}_{YEAR}.csv` with columns `age,male,female`

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::cohorts::{PopulationState, MAX_AGE};
use super::data::{CountryCatalog, DEFAULT_SYNTHETIC_POPULATION};
use crate::error::Result;

/// Default path to the data directory
pub const DEFAULT_DATA_PATH: &str = "data";

const AGE_DISTRIBUTION_DIR: &str = "age_distributions";

/// Observed population for a past year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSnapshot {
    pub year: i32,
    pub population: PopulationState,
}

/// Raw CSV row of an age distribution file
#[derive(Debug, Deserialize)]
struct AgeRow {
    age: i64,
    male: f64,
    female: f64,
}

/// Load the country catalog from `countries.json` in the data directory
pub fn load_countries(data_dir: &Path) -> Result<CountryCatalog> {
    let file = File::open(data_dir.join("countries.json"))?;
    let catalog = load_countries_from_reader(file)?;
    info!("Loaded {} country profiles", catalog.countries.len());
    Ok(catalog)
}

/// Load the country catalog from any reader
pub fn load_countries_from_reader<R: Read>(reader: R) -> Result<CountryCatalog> {
    Ok(serde_json::from_reader(reader)?)
}

/// Path of the age distribution file for a country and year
pub fn age_distribution_path(data_dir: &Path, country_code: &str, year: i32) -> PathBuf {
    data_dir
        .join(AGE_DISTRIBUTION_DIR)
        .join(format!("{}_{}.csv", country_code, year))
}

/// Load an age distribution from a CSV file
pub fn load_age_distribution<P: AsRef<Path>>(path: P) -> Result<PopulationState> {
    load_age_distribution_from_reader(File::open(path)?)
}

/// Load an age distribution from any reader
///
/// Rows with a negative age or an age above 100 are ignored; ages missing from
/// the file are zero.
pub fn load_age_distribution_from_reader<R: Read>(reader: R) -> Result<PopulationState> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut state = PopulationState::default();

    for result in csv_reader.deserialize() {
        let row: AgeRow = result?;
        let Ok(age) = usize::try_from(row.age) else {
            continue;
        };
        if age <= MAX_AGE {
            state.male[age] = row.male;
            state.female[age] = row.female;
        }
    }

    state.validate()?;
    Ok(state)
}

/// Load the baseline for a country, falling back to a flat synthetic distribution
///
/// The synthetic total is the catalog population for the country when known.
pub fn load_baseline(
    data_dir: &Path,
    catalog: Option<&CountryCatalog>,
    country_code: &str,
    year: i32,
) -> Result<PopulationState> {
    let path = age_distribution_path(data_dir, country_code, year);
    if path.exists() {
        let state = load_age_distribution(&path)?;
        info!(
            "Loaded {} {} baseline: {:.0} persons",
            country_code,
            year,
            state.total()
        );
        return Ok(state);
    }

    let population = catalog
        .and_then(|c| c.find(country_code))
        .map(|profile| profile.population)
        .unwrap_or(DEFAULT_SYNTHETIC_POPULATION);

    warn!(
        "No age distribution at {}; using flat synthetic baseline of {:.0}",
        path.display(),
        population
    );
    Ok(PopulationState::synthetic(population))
}

/// Sorted years with an age distribution file for the country
pub fn available_years(data_dir: &Path, country_code: &str) -> Result<Vec<i32>> {
    let dir = data_dir.join(AGE_DISTRIBUTION_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}_", country_code);
    let mut years = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let year = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| stem.strip_prefix(&prefix))
            .and_then(|y| y.parse::<i32>().ok());
        if let Some(year) = year {
            years.push(year);
        }
    }

    years.sort_unstable();
    Ok(years)
}

/// Observed snapshots for years in `[first_year, before_year)` that exist on disk
pub fn load_history(
    data_dir: &Path,
    country_code: &str,
    first_year: i32,
    before_year: i32,
) -> Result<Vec<HistoricalSnapshot>> {
    available_years(data_dir, country_code)?
        .into_iter()
        .filter(|&year| year >= first_year && year < before_year)
        .map(|year| {
            let population =
                load_age_distribution(age_distribution_path(data_dir, country_code, year))?;
            Ok(HistoricalSnapshot { year, population })
        })
        .collect()
}
