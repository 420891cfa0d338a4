//! Country profiles matching the countries.json format

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::projection::ProjectionConfig;

/// Used when a country has no baseline file and no recorded population
pub const DEFAULT_SYNTHETIC_POPULATION: f64 = 1_000_000.0;

fn default_sex_ratio() -> f64 {
    105.0
}

/// Demographic defaults for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// ISO 3166 alpha-3 code (e.g. "KOR")
    pub code: String,
    pub name: String,
    pub population: f64,
    pub tfr: f64,
    pub life_expectancy_male: f64,
    pub life_expectancy_female: f64,
    pub net_migration: i64,
    #[serde(default = "default_sex_ratio")]
    pub sex_ratio_at_birth: f64,
    pub baseline_year: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CountryProfile {
    /// Parameter bundle seeded from this country's observed rates
    pub fn projection_config(&self, num_years: u32) -> ProjectionConfig {
        ProjectionConfig {
            tfr: self.tfr,
            life_expectancy_male: self.life_expectancy_male,
            life_expectancy_female: self.life_expectancy_female,
            net_migration: self.net_migration,
            sex_ratio_at_birth: self.sex_ratio_at_birth,
            start_year: self.baseline_year,
            num_years,
            ..Default::default()
        }
    }
}

/// All known country profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryCatalog {
    pub countries: Vec<CountryProfile>,
}

impl CountryCatalog {
    /// Look up a profile by code, case-insensitively
    pub fn find(&self, code: &str) -> Option<&CountryProfile> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn get(&self, code: &str) -> Result<&CountryProfile> {
        self.find(code)
            .ok_or_else(|| ProjectionError::UnknownCountry(code.to_string()))
    }
}
