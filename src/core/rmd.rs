use std::collections::BTreeMap;

use super::config::RmdConfig;
use crate::error::{AdvisorError, Result};

/// Required-minimum-distribution schedule: an age-indexed divisor table with a
/// fixed divisor for ages past the end of the table.
#[derive(Clone, Debug)]
pub struct RmdModel {
    start_age: u32,
    fallback_divisor: f64,
    divisors: BTreeMap<u32, f64>,
}

impl RmdModel {
    pub fn new(config: &RmdConfig) -> Result<Self> {
        if !config.fallback_divisor.is_finite() || config.fallback_divisor <= 0.0 {
            return Err(AdvisorError::Config(
                "rmd fallback_divisor must be > 0".to_string(),
            ));
        }

        let mut previous: Option<f64> = None;
        for (expected_age, (&age, &divisor)) in (config.start_age..).zip(&config.divisors) {
            if age != expected_age {
                return Err(AdvisorError::Config(format!(
                    "rmd divisors must cover consecutive ages from start_age {}; expected age {expected_age}, found {age}",
                    config.start_age
                )));
            }
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(AdvisorError::Config(format!(
                    "rmd divisor for age {age} must be > 0"
                )));
            }
            if previous.is_some_and(|p| divisor > p) {
                return Err(AdvisorError::Config(format!(
                    "rmd divisor for age {age} must not exceed the previous age's divisor"
                )));
            }
            previous = Some(divisor);
        }
        if previous.is_some_and(|last| config.fallback_divisor > last) {
            return Err(AdvisorError::Config(
                "rmd fallback_divisor must not exceed the divisor for the last table age"
                    .to_string(),
            ));
        }

        Ok(Self {
            start_age: config.start_age,
            fallback_divisor: config.fallback_divisor,
            divisors: config.divisors.clone(),
        })
    }

    pub fn start_age(&self) -> u32 {
        self.start_age
    }

    pub fn divisor(&self, age: u32) -> f64 {
        self.divisors
            .get(&age)
            .copied()
            .unwrap_or(self.fallback_divisor)
    }

    pub fn calculate_rmd(&self, balance: f64, age: u32) -> f64 {
        if age < self.start_age {
            return 0.0;
        }
        balance / self.divisor(age)
    }
}

impl Default for RmdModel {
    fn default() -> Self {
        Self::new(&RmdConfig::default()).expect("built-in rmd table is valid")
    }
}
