//! Mortality assumptions based on a Gompertz-Makeham hazard calibrated to life expectancy
//!
//! The hazard at age x is `alpha + beta * exp(gamma * x)`:
//! - `alpha` is a constant background (accident) hazard
//! - `gamma` is a fixed senescence rate
//! - `beta` is fitted so that the implied life expectancy matches the target
//!
//! Implied life expectancy is the sum of discrete survival probabilities across
//! ages 0-100, an approximation of the continuous survival integral.

use log::debug;

use crate::population::{AgeVector, AGE_BUCKETS, MAX_AGE};

/// Background hazard independent of age
pub const BACKGROUND_HAZARD: f64 = 0.0005;

/// Exponential rate of ageing
pub const SENESCENCE_RATE: f64 = 0.085;

/// Starting value for the calibrated scale parameter
pub const INITIAL_BETA: f64 = 0.00005;

/// Fixed number of calibration passes
pub const CALIBRATION_ITERATIONS: usize = 80;

/// Gompertz-Makeham hazard parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GompertzMakeham {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl GompertzMakeham {
    pub fn new(beta: f64) -> Self {
        Self {
            alpha: BACKGROUND_HAZARD,
            beta,
            gamma: SENESCENCE_RATE,
        }
    }

    /// Fit `beta` so the implied life expectancy approaches `target_life_expectancy`
    ///
    /// Each pass rescales beta by implied / target. The loop always runs
    /// `CALIBRATION_ITERATIONS` times; it has no stopping tolerance.
    pub fn calibrate(target_life_expectancy: f64) -> Self {
        let mut model = Self::new(INITIAL_BETA);

        for _ in 0..CALIBRATION_ITERATIONS {
            let implied = model.implied_life_expectancy();
            model.beta *= implied / target_life_expectancy;
        }

        debug!(
            "Calibrated beta={:.6e} for target e0={:.2} (implied {:.3})",
            model.beta,
            target_life_expectancy,
            model.implied_life_expectancy()
        );

        model
    }

    /// Instantaneous hazard at an age
    pub fn hazard(&self, age: usize) -> f64 {
        self.alpha + self.beta * (self.gamma * age as f64).exp()
    }

    /// Probability of surviving through each age: exp(-cumulative hazard)
    pub fn survival_curve(&self) -> AgeVector {
        let mut survival = AgeVector::zeros();
        let mut cumulative_hazard = 0.0;
        for age in 0..AGE_BUCKETS {
            cumulative_hazard += self.hazard(age);
            survival[age] = (-cumulative_hazard).exp();
        }
        survival
    }

    /// Discrete life expectancy proxy: sum of survival probabilities
    pub fn implied_life_expectancy(&self) -> f64 {
        self.survival_curve().total()
    }
}

/// Annual death probabilities by age
///
/// Values lie in [0, 1] and the terminal bucket is always 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MortalitySchedule {
    rates: AgeVector,
    model: GompertzMakeham,
    multiplier: f64,
}

impl MortalitySchedule {
    /// Calibrate to a life expectancy at birth and scale hazards by `multiplier`
    pub fn calibrated(life_expectancy: f64, multiplier: f64) -> Self {
        Self::from_model(GompertzMakeham::calibrate(life_expectancy), multiplier)
    }

    /// Build death probabilities from a fitted hazard model
    pub fn from_model(model: GompertzMakeham, multiplier: f64) -> Self {
        let mut rates = AgeVector::zeros();
        for age in 0..AGE_BUCKETS {
            let hazard = model.hazard(age) * multiplier;
            rates[age] = (1.0 - (-hazard).exp()).clamp(0.0, 1.0);
        }
        rates[MAX_AGE] = 1.0;

        Self {
            rates,
            model,
            multiplier,
        }
    }

    /// Death probability at an age; ages past the terminal bucket always die
    pub fn rate(&self, age: usize) -> f64 {
        self.rates.get(age).copied().unwrap_or(1.0)
    }

    pub fn rates(&self) -> &AgeVector {
        &self.rates
    }

    pub fn model(&self) -> &GompertzMakeham {
        &self.model
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Life expectancy implied by the unscaled hazard model
    pub fn implied_life_expectancy(&self) -> f64 {
        self.model.implied_life_expectancy()
    }

    /// Expected deaths for a cohort vector over one year
    pub fn expected_deaths(&self, population: &AgeVector) -> AgeVector {
        let mut deaths = AgeVector::zeros();
        for age in 0..AGE_BUCKETS {
            deaths[age] = population[age] * self.rates[age];
        }
        deaths
    }
}
