//! Age-specific fertility rates derived from a total fertility rate
//!
//! Rates follow a Beta(2, 5) shape over the fertile ages 15-49 mapped onto [0, 1],
//! which peaks in the early twenties, and are scaled so that they sum to the TFR.

use crate::population::AgeVector;

/// Youngest fertile age
pub const FERTILE_AGE_MIN: usize = 15;

/// Oldest fertile age
pub const FERTILE_AGE_MAX: usize = 49;

const BETA_SHAPE_A: f64 = 2.0;
const BETA_SHAPE_B: f64 = 5.0;

/// Expected births per woman by age, zero outside ages 15-49
#[derive(Debug, Clone, PartialEq)]
pub struct FertilitySchedule {
    rates: AgeVector,
    tfr: f64,
}

impl FertilitySchedule {
    /// Build a schedule whose fertile-age rates sum to `tfr`
    pub fn from_tfr(tfr: f64) -> Self {
        let span = (FERTILE_AGE_MAX - FERTILE_AGE_MIN) as f64;
        let weights: Vec<f64> = (FERTILE_AGE_MIN..=FERTILE_AGE_MAX)
            .map(|age| {
                let t = (age - FERTILE_AGE_MIN) as f64 / span;
                t.powf(BETA_SHAPE_A - 1.0) * (1.0 - t).powf(BETA_SHAPE_B - 1.0)
            })
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        let mut rates = AgeVector::zeros();
        for (age, weight) in (FERTILE_AGE_MIN..=FERTILE_AGE_MAX).zip(weights) {
            rates[age] = weight / weight_sum * tfr;
        }

        Self { rates, tfr }
    }

    /// Fertility rate at a given age (0 outside the fertile range)
    pub fn rate(&self, age: usize) -> f64 {
        self.rates.get(age).copied().unwrap_or(0.0)
    }

    pub fn rates(&self) -> &AgeVector {
        &self.rates
    }

    pub fn tfr(&self) -> f64 {
        self.tfr
    }

    /// Expected births from a female population over one year
    pub fn expected_births(&self, female: &AgeVector) -> f64 {
        (FERTILE_AGE_MIN..=FERTILE_AGE_MAX)
            .map(|age| female[age] * self.rates[age])
            .sum()
    }

    /// Rate-weighted mean age at childbearing
    pub fn mean_age_of_childbearing(&self) -> f64 {
        let total: f64 = self.rates.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.rates
            .iter()
            .enumerate()
            .map(|(age, rate)| age as f64 * rate)
            .sum::<f64>()
            / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::MAX_AGE;
    use approx::assert_relative_eq;

    #[test]
    fn test_rates_sum_to_tfr() {
        for tfr in [0.5, 1.0, 2.1, 3.75, 8.0] {
            let schedule = FertilitySchedule::from_tfr(tfr);
            let fertile_sum: f64 = (FERTILE_AGE_MIN..=FERTILE_AGE_MAX)
                .map(|age| schedule.rate(age))
                .sum();
            assert_relative_eq!(fertile_sum, tfr, max_relative = 1e-12);
            assert_relative_eq!(schedule.rates().total(), tfr, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_outside_fertile_ages() {
        let schedule = FertilitySchedule::from_tfr(2.1);
        for age in (0..FERTILE_AGE_MIN).chain(FERTILE_AGE_MAX + 1..=MAX_AGE) {
            assert_eq!(schedule.rate(age), 0.0, "age {} should be infertile", age);
        }
        assert_eq!(schedule.rate(500), 0.0);
    }

    #[test]
    fn test_zero_tfr_gives_empty_schedule() {
        let schedule = FertilitySchedule::from_tfr(0.0);
        assert!(schedule.rates().iter().all(|&r| r == 0.0));
        assert_eq!(schedule.mean_age_of_childbearing(), 0.0);
    }

    #[test]
    fn test_peak_in_early_twenties() {
        let schedule = FertilitySchedule::from_tfr(2.1);
        let peak_age = (FERTILE_AGE_MIN..=FERTILE_AGE_MAX)
            .max_by(|&a, &b| schedule.rate(a).total_cmp(&schedule.rate(b)))
            .unwrap();
        assert!((21..=24).contains(&peak_age), "peak at {}", peak_age);

        let mean_age = schedule.mean_age_of_childbearing();
        assert!(mean_age > 22.0 && mean_age < 28.0, "mean age {}", mean_age);
    }

    #[test]
    fn test_expected_births() {
        let schedule = FertilitySchedule::from_tfr(2.0);
        let female = AgeVector::filled(1000.0);
        assert_relative_eq!(schedule.expected_births(&female), 2000.0, max_relative = 1e-12);
    }
}
