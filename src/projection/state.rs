//! Working population state advanced by the projection engine
//!
//! Each method is one step of the annual transition. The engine calls them in the
//! fixed order mortality, births, ageing, migration.

use crate::assumptions::{distribute_migration, Assumptions};
use crate::population::{PopulationState, Sex, MAX_AGE};

/// Births for one year, split by sex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthCohort {
    /// Rounded total births
    pub total: u64,
    pub male: f64,
    pub female: f64,
}

/// Mutable state of a single projection run
///
/// Owns its own copy of the population; nothing outside the run aliases it.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Calendar year the population currently describes
    pub year: i32,

    /// Population by sex and single year of age
    pub population: PopulationState,
}

impl ProjectionState {
    /// Start a run from a copy of the baseline
    pub fn from_baseline(baseline: &PopulationState, start_year: i32) -> Self {
        Self {
            year: start_year,
            population: baseline.clone(),
        }
    }

    /// Remove expected deaths from every cohort and return the mass removed
    pub fn apply_mortality(&mut self, assumptions: &Assumptions) -> f64 {
        let mut removed = 0.0;
        for sex in [Sex::Male, Sex::Female] {
            let deaths = assumptions.mortality(sex).expected_deaths(self.population.cohort(sex));
            let cohort = self.population.cohort_mut(sex);
            for (value, died) in cohort.iter_mut().zip(deaths.iter()) {
                *value -= died;
            }
            cohort.clamp_non_negative();
            removed += deaths.total();
        }
        removed
    }

    /// Births from the current (post-mortality) female population
    ///
    /// `sex_ratio_at_birth` is males per 100 females.
    pub fn compute_births(&self, assumptions: &Assumptions, sex_ratio_at_birth: f64) -> BirthCohort {
        let expected = assumptions.fertility.expected_births(&self.population.female);
        let total = expected.round().max(0.0) as u64;
        let male_fraction = sex_ratio_at_birth / (100.0 + sex_ratio_at_birth);
        let male = total as f64 * male_fraction;

        BirthCohort {
            total,
            male,
            female: total as f64 - male,
        }
    }

    /// Shift every cohort up one year and place births at age 0
    ///
    /// The terminal bucket keeps its own survivors and absorbs age 99.
    pub fn age_cohorts(&mut self, births: &BirthCohort) {
        for (sex, newborns) in [(Sex::Male, births.male), (Sex::Female, births.female)] {
            let cohort = self.population.cohort_mut(sex);
            let nonagenarians = cohort[MAX_AGE - 1];
            cohort[MAX_AGE] += nonagenarians;
            cohort.copy_within(0..MAX_AGE - 1, 1);
            cohort[0] = newborns;
        }
        self.year += 1;
    }

    /// Add this year's migrants and clamp any cohort driven below zero
    pub fn apply_migration(&mut self, assumptions: &Assumptions, net_migration: i64) {
        let increments = distribute_migration(net_migration, &self.population, assumptions.migration);
        self.population.male += &increments.male;
        self.population.female += &increments.female;
        self.population.clamp_non_negative();
    }

    /// Total population rounded to whole persons
    pub fn rounded_total(&self) -> u64 {
        self.population.total().round().max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::AgeVector;
    use crate::projection::ProjectionConfig;
    use approx::assert_relative_eq;

    fn assumptions() -> Assumptions {
        Assumptions::from_config(&ProjectionConfig::default())
    }

    #[test]
    fn test_ageing_shifts_and_merges_terminal_bucket() {
        let mut male = AgeVector::zeros();
        for age in 0..=MAX_AGE {
            male[age] = age as f64;
        }
        let baseline = PopulationState::new(male, AgeVector::zeros());
        let mut state = ProjectionState::from_baseline(&baseline, 2025);

        let births = BirthCohort {
            total: 10,
            male: 6.0,
            female: 4.0,
        };
        state.age_cohorts(&births);

        assert_eq!(state.year, 2026);
        assert_eq!(state.population.male[0], 6.0);
        assert_eq!(state.population.female[0], 4.0);
        assert_eq!(state.population.male[1], 0.0);
        assert_eq!(state.population.male[50], 49.0);
        assert_eq!(state.population.male[99], 98.0);
        assert_eq!(state.population.male[MAX_AGE], 199.0);
    }

    #[test]
    fn test_mortality_removes_expected_mass() {
        let assumptions = assumptions();
        let baseline = PopulationState::synthetic(2_020_000.0);
        let mut state = ProjectionState::from_baseline(&baseline, 2025);

        let removed = state.apply_mortality(&assumptions);
        assert!(removed > 0.0);
        assert_relative_eq!(
            state.population.total() + removed,
            baseline.total(),
            max_relative = 1e-12
        );
        assert_eq!(state.population.male[MAX_AGE], 0.0);
    }

    #[test]
    fn test_births_split_by_sex_ratio() {
        let assumptions = assumptions();
        let mut female = AgeVector::zeros();
        for age in 15..=49 {
            female[age] = 10_000.0;
        }
        let baseline = PopulationState::new(AgeVector::zeros(), female);
        let state = ProjectionState::from_baseline(&baseline, 2025);

        let births = state.compute_births(&assumptions, 105.0);
        // TFR 2.1 spread over 10,000 women at each fertile age
        assert_eq!(births.total, 21_000);
        assert_relative_eq!(births.male, 21_000.0 * 105.0 / 205.0);
        assert_relative_eq!(births.male + births.female, 21_000.0);
    }

    #[test]
    fn test_migration_never_leaves_negative_cohorts() {
        let assumptions = assumptions();
        let baseline = PopulationState::synthetic(10_000.0);
        let mut state = ProjectionState::from_baseline(&baseline, 2025);

        state.apply_migration(&assumptions, -1_000_000);
        assert!(state.population.male.iter().all(|&v| v >= 0.0));
        assert!(state.population.female.iter().all(|&v| v >= 0.0));
        assert_eq!(state.population.range_total(20..=39), 0.0);
    }

    #[test]
    fn test_state_does_not_alias_baseline() {
        let assumptions = assumptions();
        let baseline = PopulationState::synthetic(10_000.0);
        let mut state = ProjectionState::from_baseline(&baseline, 2025);
        state.apply_mortality(&assumptions);
        assert_eq!(baseline, PopulationState::synthetic(10_000.0));
    }
}
