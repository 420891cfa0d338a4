//! Core projection engine for annual cohort-component projections

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::results::{ProjectionResult, YearResult};
use super::state::ProjectionState;
use crate::assumptions::{Assumptions, MigrationProfile};
use crate::error::{ProjectionError, Result};
use crate::population::PopulationState;

/// Parameters for a projection run
///
/// Plain value type: copied into the engine, never shared or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Total fertility rate (lifetime births per woman)
    pub tfr: f64,

    /// Male life expectancy at birth
    pub life_expectancy_male: f64,

    /// Female life expectancy at birth
    pub life_expectancy_female: f64,

    /// Immigrants minus emigrants per year
    pub net_migration: i64,

    /// Males born per 100 females
    pub sex_ratio_at_birth: f64,

    /// Uniform scale on all mortality hazards
    pub mortality_multiplier: f64,

    /// Concentrate migrants in ages 25-34 instead of 20-39
    pub concentrated_migration: bool,

    /// Calendar year of the baseline population
    pub start_year: i32,

    /// Number of years to project
    pub num_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            tfr: 2.1,
            life_expectancy_male: 78.0,
            life_expectancy_female: 83.0,
            net_migration: 0,
            sex_ratio_at_birth: 105.0,
            mortality_multiplier: 1.0,
            concentrated_migration: false,
            start_year: 2025,
            num_years: 50,
        }
    }
}

impl ProjectionConfig {
    pub fn migration_profile(&self) -> MigrationProfile {
        MigrationProfile::from_concentrated(self.concentrated_migration)
    }

    /// Final calendar year of the projection, saturating at `i32::MAX`
    pub fn end_year(&self) -> i32 {
        i32::try_from(self.num_years)
            .map_or(i32::MAX, |years| self.start_year.saturating_add(years))
    }

    /// Reject parameters outside the model's domain
    pub fn validate(&self) -> Result<()> {
        check_finite("tfr", self.tfr)?;
        if self.tfr < 0.0 {
            return Err(invalid("tfr", self.tfr, "must not be negative"));
        }
        for (name, value) in [
            ("life_expectancy_male", self.life_expectancy_male),
            ("life_expectancy_female", self.life_expectancy_female),
            ("sex_ratio_at_birth", self.sex_ratio_at_birth),
            ("mortality_multiplier", self.mortality_multiplier),
        ] {
            check_finite(name, value)?;
            if value <= 0.0 {
                return Err(invalid(name, value, "must be positive"));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> ProjectionError {
    ProjectionError::InvalidParameter {
        name,
        value,
        reason,
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite"))
    }
}

/// Main projection engine
///
/// Schedules are derived once at construction. `project` can be called any
/// number of times; every call works on its own copy of the baseline.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine, building fresh schedules from the config
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            assumptions: Assumptions::from_config(&config),
            config,
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection from a baseline population
    ///
    /// Always returns `num_years + 1` results, the first being the baseline.
    pub fn project(&self, baseline: &PopulationState) -> ProjectionResult {
        let mut result = ProjectionResult::with_capacity(self.config.num_years as usize + 1);
        let mut state = ProjectionState::from_baseline(baseline, self.config.start_year);

        result.add_year(YearResult::baseline(state.year, state.population.clone()));

        info!(
            "Projecting {} years from {} (baseline {:.0})",
            self.config.num_years,
            self.config.start_year,
            baseline.total()
        );

        for _ in 0..self.config.num_years {
            let row = self.project_year(&mut state);
            debug!(
                "{}: population={} births={} deaths={}",
                row.year, row.total_population, row.births, row.deaths
            );
            result.add_year(row);
        }

        if let Some(last) = result.final_year() {
            info!("Projection complete: {} in {}", last.total_population, last.year);
        }

        result
    }

    /// Advance the state by one year: mortality, births, ageing, migration
    pub fn project_year(&self, state: &mut ProjectionState) -> YearResult {
        let removed = state.apply_mortality(&self.assumptions);
        let deaths = removed.round().max(0.0) as u64;

        let births = state.compute_births(&self.assumptions, self.config.sex_ratio_at_birth);

        state.age_cohorts(&births);

        state.apply_migration(&self.assumptions, self.config.net_migration);

        YearResult {
            year: state.year,
            total_population: state.rounded_total(),
            population: state.population.clone(),
            births: births.total,
            deaths,
            net_migration: self.config.net_migration,
        }
    }
}

/// Validate inputs and run a single projection
pub fn run_projection(baseline: &PopulationState, config: ProjectionConfig) -> Result<ProjectionResult> {
    config.validate()?;
    baseline.validate()?;
    Ok(ProjectionEngine::new(config).project(baseline))
}
