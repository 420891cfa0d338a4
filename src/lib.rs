//! Population Projection - cohort-component demographic projection engine
//!
//! This library provides:
//! - Fertility schedules shaped from a total fertility rate
//! - Mortality schedules from a Gompertz-Makeham hazard calibrated to life expectancy
//! - Net migration distributed across a target age band
//! - Annual two-sex, single-year-of-age projections (mortality, births, ageing, migration)
//! - Multi-scenario runs, age-band aggregation, and CSV export

pub mod error;
pub mod population;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use population::{AgeVector, PopulationState, Sex, AGE_BUCKETS, MAX_AGE};
pub use assumptions::{Assumptions, FertilitySchedule, MortalitySchedule, MigrationProfile};
pub use projection::{run_projection, ProjectionEngine, ProjectionConfig, ProjectionResult, YearResult};
pub use scenario::ScenarioRunner;
