//! Engine configuration: bracket tables, the filing-status mapping and the
//! RMD divisor table. Defaults reproduce the 2026 projection; a JSON file may
//! override any section.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::rmd::RmdModel;
use super::tax::TaxModel;
use super::types::FilingStatus;
use crate::error::Result;

/// One row of a bracket table. `upper: None` marks the unbounded top bracket.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BracketSpec {
    pub upper: Option<f64>,
    pub rate: f64,
}

impl BracketSpec {
    const fn bounded(upper: f64, rate: f64) -> Self {
        Self {
            upper: Some(upper),
            rate,
        }
    }

    const fn unbounded(rate: f64) -> Self {
        Self { upper: None, rate }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKey {
    Single,
    Married,
}

/// Which bracket table each filing status is taxed on.
///
/// Single, married-filing-separately and head-of-household all share the
/// single table by default.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilingStatusMap {
    pub single: TableKey,
    pub married_jointly: TableKey,
    pub married_separately: TableKey,
    pub head_of_household: TableKey,
}

impl Default for FilingStatusMap {
    fn default() -> Self {
        Self {
            single: TableKey::Single,
            married_jointly: TableKey::Married,
            married_separately: TableKey::Single,
            head_of_household: TableKey::Single,
        }
    }
}

impl FilingStatusMap {
    pub fn table_for(&self, status: FilingStatus) -> TableKey {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::MarriedJointly => self.married_jointly,
            FilingStatus::MarriedSeparately => self.married_separately,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxConfig {
    pub single: Vec<BracketSpec>,
    pub married: Vec<BracketSpec>,
    pub filing_status_map: FilingStatusMap,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            single: vec![
                BracketSpec::bounded(11_600.0, 0.10),
                BracketSpec::bounded(47_150.0, 0.12),
                BracketSpec::bounded(100_525.0, 0.22),
                BracketSpec::bounded(191_950.0, 0.24),
                BracketSpec::bounded(243_725.0, 0.32),
                BracketSpec::bounded(609_350.0, 0.35),
                BracketSpec::unbounded(0.37),
            ],
            married: vec![
                BracketSpec::bounded(23_200.0, 0.10),
                BracketSpec::bounded(94_300.0, 0.12),
                BracketSpec::bounded(201_050.0, 0.22),
                BracketSpec::bounded(383_900.0, 0.24),
                BracketSpec::bounded(487_450.0, 0.32),
                BracketSpec::bounded(731_200.0, 0.35),
                BracketSpec::unbounded(0.37),
            ],
            filing_status_map: FilingStatusMap::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RmdConfig {
    pub start_age: u32,
    pub fallback_divisor: f64,
    pub divisors: BTreeMap<u32, f64>,
}

impl Default for RmdConfig {
    fn default() -> Self {
        let divisors = [
            26.5, 25.5, 24.6, 23.7, 22.9, 22.0, 21.1, 20.2, 19.4, 18.5, 17.7, 16.8, 16.0, 15.2,
            14.4, 13.7, 12.9, 12.2, 11.5, 10.8, 10.1, 9.5, 8.9,
        ];
        Self {
            start_age: 73,
            fallback_divisor: 8.0,
            divisors: (73u32..).zip(divisors).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tax: TaxConfig,
    pub rmd: RmdConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the bracket tables and the RMD schedule the way the engine
    /// will build them.
    pub fn validate(&self) -> Result<()> {
        TaxModel::new(&self.tax)?;
        RmdModel::new(&self.rmd)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }
}
