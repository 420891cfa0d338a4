//! Scenario runner for comparing parameter sets against one baseline
//!
//! Holds the baseline population once, then runs any number of projections with
//! different parameter bundles. Every run starts from its own copy of the baseline,
//! so scenarios can be evaluated in parallel without sharing state.

use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::error::Result;
use crate::population::{loader, CountryCatalog, PopulationState};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(baseline)?;
///
/// for tfr in [1.2, 1.6, 2.1] {
///     let config = ProjectionConfig { tfr, ..Default::default() };
///     let result = runner.run(config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    baseline: PopulationState,
}

impl ScenarioRunner {
    /// Create a runner from a validated baseline
    pub fn new(baseline: PopulationState) -> Result<Self> {
        baseline.validate()?;
        Ok(Self { baseline })
    }

    /// Create a runner from a country's baseline in the data directory
    ///
    /// Falls back to a synthetic baseline when no age distribution exists.
    pub fn from_country(
        data_dir: &Path,
        catalog: &CountryCatalog,
        country_code: &str,
    ) -> Result<Self> {
        let profile = catalog.get(country_code)?;
        let baseline =
            loader::load_baseline(data_dir, Some(catalog), &profile.code, profile.baseline_year)?;
        Self::new(baseline)
    }

    /// Run a single projection with the given config
    pub fn run(&self, config: ProjectionConfig) -> Result<ProjectionResult> {
        config.validate()?;
        Ok(ProjectionEngine::new(config).project(&self.baseline))
    }

    /// Run several configs one after another; results follow input order
    pub fn run_scenarios(&self, configs: &[ProjectionConfig]) -> Result<Vec<ProjectionResult>> {
        configs.iter().map(|&config| self.run(config)).collect()
    }

    /// Run several configs in parallel; results follow input order
    pub fn run_scenarios_parallel(
        &self,
        configs: &[ProjectionConfig],
    ) -> Result<Vec<ProjectionResult>> {
        info!("Running {} scenarios in parallel", configs.len());
        configs.par_iter().map(|&config| self.run(config)).collect()
    }

    pub fn baseline(&self) -> &PopulationState {
        &self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use crate::population::CountryProfile;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(PopulationState::synthetic(5_000_000.0)).unwrap()
    }

    fn configs() -> Vec<ProjectionConfig> {
        [1.2, 2.1, 3.0]
            .iter()
            .map(|&tfr| ProjectionConfig {
                tfr,
                num_years: 40,
                net_migration: 20_000,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_scenario_runner_batch() {
        let results = runner().run_scenarios(&configs()).unwrap();
        assert_eq!(results.len(), 3);

        // Higher fertility should result in a larger final population
        let end = |i: usize| results[i].summary().end_population;
        assert!(end(2) > end(1) && end(1) > end(0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = runner();
        let sequential = runner.run_scenarios(&configs()).unwrap();
        let parallel = runner.run_scenarios_parallel(&configs()).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(runner.baseline(), &PopulationState::synthetic(5_000_000.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = ProjectionConfig {
            life_expectancy_male: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            runner().run_scenarios(&[ProjectionConfig::default(), bad]),
            Err(ProjectionError::InvalidParameter { name: "life_expectancy_male", .. })
        ));
    }

    #[test]
    fn test_invalid_baseline_is_rejected() {
        let mut baseline = PopulationState::synthetic(1_000.0);
        baseline.male[3] = f64::NAN;
        assert!(ScenarioRunner::new(baseline).is_err());
    }

    #[test]
    fn test_from_country_uses_synthetic_fallback() {
        let catalog = CountryCatalog {
            countries: vec![CountryProfile {
                code: "TST".to_string(),
                name: "Testland".to_string(),
                population: 2_020_000.0,
                tfr: 1.5,
                life_expectancy_male: 75.0,
                life_expectancy_female: 81.0,
                net_migration: 0,
                sex_ratio_at_birth: 105.0,
                baseline_year: 2020,
                notes: None,
            }],
        };
        let runner =
            ScenarioRunner::from_country(Path::new("does/not/exist"), &catalog, "TST").unwrap();
        assert!((runner.baseline().total() - 2_020_000.0).abs() < 1e-3);

        assert!(ScenarioRunner::from_country(Path::new("does/not/exist"), &catalog, "XYZ").is_err());
    }
}
