//! Population vectors, age-band aggregation, and baseline data loading

mod cohorts;
mod bands;
mod data;
pub mod loader;

pub use cohorts::{AgeVector, PopulationState, Sex, AGE_BUCKETS, MAX_AGE};
pub use bands::{
    pyramid_bins, pyramid_labels, AgeBandTotals, PyramidBin, CHILD_MAX_AGE, PYRAMID_BIN_WIDTH,
    WORKING_MAX_AGE,
};
pub use data::{CountryCatalog, CountryProfile, DEFAULT_SYNTHETIC_POPULATION};
pub use loader::{
    available_years, load_age_distribution, load_age_distribution_from_reader, load_baseline,
    load_countries, load_countries_from_reader, load_history, HistoricalSnapshot,
};
