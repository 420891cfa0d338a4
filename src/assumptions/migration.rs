//! Distribution of net migration across ages and sexes
//!
//! Migrants are allocated within a target age band in proportion to the existing
//! population of each age-sex cohort in that band, so the migrant profile follows
//! the shape of the population as it evolves.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::population::{AgeVector, PopulationState};

/// Target age band for net migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MigrationProfile {
    /// Ages 20-39
    #[default]
    Spread,
    /// Ages 25-34
    Concentrated,
}

impl MigrationProfile {
    pub fn from_concentrated(concentrated: bool) -> Self {
        if concentrated {
            MigrationProfile::Concentrated
        } else {
            MigrationProfile::Spread
        }
    }

    /// Youngest and oldest age receiving migrants
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            MigrationProfile::Spread => (20, 39),
            MigrationProfile::Concentrated => (25, 34),
        }
    }

    pub fn ages(self) -> RangeInclusive<usize> {
        let (lo, hi) = self.bounds();
        lo..=hi
    }
}

/// Migrant increments by age for each sex (negative under net emigration)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MigrantIncrements {
    pub male: AgeVector,
    pub female: AgeVector,
}

impl MigrantIncrements {
    pub fn total(&self) -> f64 {
        self.male.total() + self.female.total()
    }
}

/// Split `net_migration` across the profile's age band
///
/// A zero count returns all-zero increments. If the band holds nobody, the count
/// is split uniformly across the band's ages and both sexes.
pub fn distribute_migration(
    net_migration: i64,
    population: &PopulationState,
    profile: MigrationProfile,
) -> MigrantIncrements {
    let mut increments = MigrantIncrements::default();
    if net_migration == 0 {
        return increments;
    }

    let ages = profile.ages();
    let mut total_weight = population.range_total(ages.clone());
    let uniform = total_weight <= 0.0;
    if uniform {
        total_weight = 2.0 * ages.clone().count() as f64;
    }

    let net = net_migration as f64;
    for age in ages {
        let (male_weight, female_weight) = if uniform {
            (1.0, 1.0)
        } else {
            (population.male[age], population.female[age])
        };
        increments.male[age] = net * male_weight / total_weight;
        increments.female[age] = net * female_weight / total_weight;
    }

    increments
}
