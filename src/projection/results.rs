//! Year-by-year output structures for projections

use serde::{Deserialize, Serialize};

use crate::population::{AgeBandTotals, PopulationState};

/// Snapshot of the population at the end of one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    pub year: i32,
    pub total_population: u64,
    /// Independent copy of the population; never shared with the running state
    pub population: PopulationState,
    pub births: u64,
    pub deaths: u64,
    pub net_migration: i64,
}

impl YearResult {
    /// Baseline snapshot with no births, deaths, or migration
    pub fn baseline(year: i32, population: PopulationState) -> Self {
        Self {
            year,
            total_population: population.total().round().max(0.0) as u64,
            population,
            births: 0,
            deaths: 0,
            net_migration: 0,
        }
    }

    pub fn age_bands(&self) -> AgeBandTotals {
        AgeBandTotals::from_state(&self.population)
    }
}

/// Complete projection result; index 0 is the baseline year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<YearResult>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { years: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            years: Vec::with_capacity(capacity),
        }
    }

    /// Append a year; earlier years are never modified
    pub fn add_year(&mut self, year: YearResult) {
        self.years.push(year);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn baseline(&self) -> Option<&YearResult> {
        self.years.first()
    }

    pub fn final_year(&self) -> Option<&YearResult> {
        self.years.last()
    }

    pub fn year_list(&self) -> Vec<i32> {
        self.years.iter().map(|y| y.year).collect()
    }

    pub fn population_series(&self) -> Vec<u64> {
        self.years.iter().map(|y| y.total_population).collect()
    }

    pub fn births_series(&self) -> Vec<u64> {
        self.years.iter().map(|y| y.births).collect()
    }

    pub fn deaths_series(&self) -> Vec<u64> {
        self.years.iter().map(|y| y.deaths).collect()
    }

    pub fn migration_series(&self) -> Vec<i64> {
        self.years.iter().map(|y| y.net_migration).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let start = self.baseline();
        let end = self.final_year();

        let start_population = start.map(|y| y.total_population).unwrap_or(0);
        let end_population = end.map(|y| y.total_population).unwrap_or(0);
        let change = end_population as i64 - start_population as i64;
        let pct_change = if start_population > 0 {
            change as f64 / start_population as f64 * 100.0
        } else {
            0.0
        };

        ProjectionSummary {
            start_year: start.map(|y| y.year).unwrap_or(0),
            end_year: end.map(|y| y.year).unwrap_or(0),
            start_population,
            end_population,
            change,
            pct_change,
            total_births: self.years.iter().map(|y| y.births).sum(),
            total_deaths: self.years.iter().map(|y| y.deaths).sum(),
            total_net_migration: self.years.iter().map(|y| y.net_migration).sum(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub start_year: i32,
    pub end_year: i32,
    pub start_population: u64,
    pub end_population: u64,
    pub change: i64,
    pub pct_change: f64,
    pub total_births: u64,
    pub total_deaths: u64,
    pub total_net_migration: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(year: i32, total: f64, births: u64, deaths: u64, migration: i64) -> YearResult {
        YearResult {
            births,
            deaths,
            net_migration: migration,
            ..YearResult::baseline(year, PopulationState::synthetic(total))
        }
    }

    #[test]
    fn test_baseline_has_no_flows() {
        let baseline = YearResult::baseline(2025, PopulationState::synthetic(1_000.4));
        assert_eq!(baseline.total_population, 1_000);
        assert_eq!((baseline.births, baseline.deaths, baseline.net_migration), (0, 0, 0));
    }

    #[test]
    fn test_series_and_summary() {
        let mut result = ProjectionResult::new();
        result.add_year(YearResult::baseline(2025, PopulationState::synthetic(1_000.0)));
        result.add_year(year(2026, 1_050.0, 80, 40, 10));
        result.add_year(year(2027, 1_100.0, 90, 50, 10));

        assert_eq!(result.year_list(), vec![2025, 2026, 2027]);
        assert_eq!(result.population_series(), vec![1_000, 1_050, 1_100]);
        assert_eq!(result.births_series(), vec![0, 80, 90]);
        assert_eq!(result.deaths_series(), vec![0, 40, 50]);
        assert_eq!(result.migration_series(), vec![0, 10, 10]);

        let summary = result.summary();
        assert_eq!(summary.start_year, 2025);
        assert_eq!(summary.end_year, 2027);
        assert_eq!(summary.change, 100);
        assert!((summary.pct_change - 10.0).abs() < 1e-12);
        assert_eq!(summary.total_births, 170);
        assert_eq!(summary.total_deaths, 90);
        assert_eq!(summary.total_net_migration, 20);
    }

    #[test]
    fn test_summary_of_empty_population() {
        let mut result = ProjectionResult::new();
        result.add_year(YearResult::baseline(2025, PopulationState::default()));
        let summary = result.summary();
        assert_eq!(summary.pct_change, 0.0);
        assert_eq!(summary.change, 0);
    }
}
