//! Projection assumptions: fertility, mortality, and migration schedules

mod fertility;
mod mortality;
mod migration;

pub use fertility::{FertilitySchedule, FERTILE_AGE_MAX, FERTILE_AGE_MIN};
pub use mortality::{
    GompertzMakeham, MortalitySchedule, BACKGROUND_HAZARD, CALIBRATION_ITERATIONS, INITIAL_BETA,
    SENESCENCE_RATE,
};
pub use migration::{distribute_migration, MigrantIncrements, MigrationProfile};

use crate::population::Sex;
use crate::projection::ProjectionConfig;

/// Container for all schedules used by one projection run
///
/// Built fresh from a parameter bundle; nothing is cached between runs.
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub fertility: FertilitySchedule,
    pub male_mortality: MortalitySchedule,
    pub female_mortality: MortalitySchedule,
    pub migration: MigrationProfile,
}

impl Assumptions {
    /// Derive schedules from the scalar parameters of a config
    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self {
            fertility: FertilitySchedule::from_tfr(config.tfr),
            male_mortality: MortalitySchedule::calibrated(
                config.life_expectancy_male,
                config.mortality_multiplier,
            ),
            female_mortality: MortalitySchedule::calibrated(
                config.life_expectancy_female,
                config.mortality_multiplier,
            ),
            migration: config.migration_profile(),
        }
    }

    pub fn mortality(&self, sex: Sex) -> &MortalitySchedule {
        match sex {
            Sex::Male => &self.male_mortality,
            Sex::Female => &self.female_mortality,
        }
    }
}
