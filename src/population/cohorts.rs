//! Single-year-of-age population vectors and the two-sex population state

use std::ops::{AddAssign, Deref, DerefMut, RangeInclusive};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProjectionError, Result};

/// Oldest tracked age; the bucket at this index holds everyone aged 100 and over
pub const MAX_AGE: usize = 100;

/// Number of age buckets (ages 0..=100)
pub const AGE_BUCKETS: usize = MAX_AGE + 1;

/// Sex of a cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Fixed-size vector indexed by age in completed years
///
/// Index 100 is the open-ended "100 and older" bucket. The buffer is a plain
/// array, so cloning produces a fully independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeVector([f64; AGE_BUCKETS]);

impl AgeVector {
    /// All-zero vector
    pub const fn zeros() -> Self {
        Self([0.0; AGE_BUCKETS])
    }

    /// Same value at every age
    pub const fn filled(value: f64) -> Self {
        Self([value; AGE_BUCKETS])
    }

    /// Sum over all ages
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Sum over an inclusive age range, truncated at the terminal bucket
    pub fn range_total(&self, ages: RangeInclusive<usize>) -> f64 {
        let start = *ages.start();
        let end = (*ages.end()).min(MAX_AGE);
        if start > end {
            return 0.0;
        }
        self.0[start..=end].iter().sum()
    }

    /// Replace negative entries (floating-point drift) with zero
    pub fn clamp_non_negative(&mut self) {
        for value in &mut self.0 {
            if *value < 0.0 {
                *value = 0.0;
            }
        }
    }
}

impl AddAssign<&AgeVector> for AgeVector {
    fn add_assign(&mut self, other: &AgeVector) {
        for (value, delta) in self.0.iter_mut().zip(other.0.iter()) {
            *value += delta;
        }
    }
}

impl Default for AgeVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Deref for AgeVector {
    type Target = [f64; AGE_BUCKETS];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AgeVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl TryFrom<&[f64]> for AgeVector {
    type Error = usize;

    /// Fails with the offending length when it is not exactly 101
    fn try_from(values: &[f64]) -> std::result::Result<Self, Self::Error> {
        <[f64; AGE_BUCKETS]>::try_from(values)
            .map(Self)
            .map_err(|_| values.len())
    }
}

impl Serialize for AgeVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AgeVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        AgeVector::try_from(values.as_slice())
            .map_err(|len| D::Error::invalid_length(len, &"101 age buckets"))
    }
}

/// Male and female population by single year of age
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationState {
    pub male: AgeVector,
    pub female: AgeVector,
}

impl PopulationState {
    pub fn new(male: AgeVector, female: AgeVector) -> Self {
        Self { male, female }
    }

    /// Build from caller-supplied slices, checking length and values
    pub fn from_slices(male: &[f64], female: &[f64]) -> Result<Self> {
        let to_vector = |sex: Sex, values: &[f64]| {
            AgeVector::try_from(values).map_err(|len| ProjectionError::BucketCount {
                sex,
                len,
                expected: AGE_BUCKETS,
            })
        };

        let state = Self {
            male: to_vector(Sex::Male, male)?,
            female: to_vector(Sex::Female, female)?,
        };
        state.validate()?;
        Ok(state)
    }

    /// Flat distribution of `total` persons across both sexes and all ages
    pub fn synthetic(total: f64) -> Self {
        let per_bucket = total / (2 * AGE_BUCKETS) as f64;
        Self {
            male: AgeVector::filled(per_bucket),
            female: AgeVector::filled(per_bucket),
        }
    }

    /// Check that every cohort is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for sex in [Sex::Male, Sex::Female] {
            for (age, &value) in self.cohort(sex).iter().enumerate() {
                if !value.is_finite() {
                    return Err(ProjectionError::NonFiniteCohort { sex, age });
                }
                if value < 0.0 {
                    return Err(ProjectionError::NegativeCohort { sex, age, value });
                }
            }
        }
        Ok(())
    }

    pub fn cohort(&self, sex: Sex) -> &AgeVector {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    pub fn cohort_mut(&mut self, sex: Sex) -> &mut AgeVector {
        match sex {
            Sex::Male => &mut self.male,
            Sex::Female => &mut self.female,
        }
    }

    /// Total persons across both sexes
    pub fn total(&self) -> f64 {
        self.male.total() + self.female.total()
    }

    /// Persons of both sexes within an inclusive age range
    pub fn range_total(&self, ages: RangeInclusive<usize>) -> f64 {
        self.male.range_total(ages.clone()) + self.female.range_total(ages)
    }

    pub fn clamp_non_negative(&mut self) {
        self.male.clamp_non_negative();
        self.female.clamp_non_negative();
    }
}
