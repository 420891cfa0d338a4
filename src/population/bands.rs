//! Coarse age-band aggregation
//!
//! Band boundaries are inclusive on both ends:
//! - Children: 0-17
//! - Working age: 18-64
//! - Elderly: 65 and over
//!
//! Pyramid bins are five years wide (0-4, 5-9, ..., 95-99) with a final 100+ bin.

use serde::{Deserialize, Serialize};

use super::cohorts::{PopulationState, MAX_AGE};

/// Last age counted as a child
pub const CHILD_MAX_AGE: usize = 17;

/// Last age counted as working age
pub const WORKING_MAX_AGE: usize = 64;

/// Width of a population pyramid bin in years
pub const PYRAMID_BIN_WIDTH: usize = 5;

/// Population totals by broad age band (both sexes)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgeBandTotals {
    pub children: f64,
    pub working: f64,
    pub elderly: f64,
}

impl AgeBandTotals {
    pub fn from_state(state: &PopulationState) -> Self {
        Self {
            children: state.range_total(0..=CHILD_MAX_AGE),
            working: state.range_total(CHILD_MAX_AGE + 1..=WORKING_MAX_AGE),
            elderly: state.range_total(WORKING_MAX_AGE + 1..=MAX_AGE),
        }
    }

    pub fn total(&self) -> f64 {
        self.children + self.working + self.elderly
    }

    /// Dependents (children + elderly) per working-age person; 0 if nobody is of working age
    pub fn dependency_ratio(&self) -> f64 {
        if self.working <= 0.0 {
            0.0
        } else {
            (self.children + self.elderly) / self.working
        }
    }
}

/// One bar of a population pyramid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidBin {
    pub label: String,
    pub start_age: usize,
    pub end_age: usize,
    pub male: f64,
    pub female: f64,
}

/// Aggregate a population into five-year pyramid bins, youngest first
pub fn pyramid_bins(state: &PopulationState) -> Vec<PyramidBin> {
    (0..=MAX_AGE)
        .step_by(PYRAMID_BIN_WIDTH)
        .map(|start_age| {
            let end_age = (start_age + PYRAMID_BIN_WIDTH - 1).min(MAX_AGE);
            PyramidBin {
                label: pyramid_label(start_age, end_age),
                start_age,
                end_age,
                male: state.male.range_total(start_age..=end_age),
                female: state.female.range_total(start_age..=end_age),
            }
        })
        .collect()
}

/// Labels for every pyramid bin in order ("0-4", ..., "95-99", "100+")
pub fn pyramid_labels() -> Vec<String> {
    (0..=MAX_AGE)
        .step_by(PYRAMID_BIN_WIDTH)
        .map(|start_age| pyramid_label(start_age, (start_age + PYRAMID_BIN_WIDTH - 1).min(MAX_AGE)))
        .collect()
}

fn pyramid_label(start_age: usize, end_age: usize) -> String {
    if end_age < MAX_AGE {
        format!("{}-{}", start_age, end_age)
    } else {
        format!("{}+", MAX_AGE)
    }
}
