use super::config::{BracketSpec, FilingStatusMap, TableKey, TaxConfig};
use super::types::FilingStatus;
use crate::error::{AdvisorError, Result};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Bracket {
    upper: f64,
    rate: f64,
}

/// Progressive bracket table covering `[0, inf)`. The last bracket is always
/// unbounded.
#[derive(Clone, Debug, PartialEq)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(name: &str, specs: &[BracketSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(AdvisorError::Config(format!(
                "{name} bracket table must not be empty"
            )));
        }

        let mut brackets = Vec::with_capacity(specs.len());
        let mut previous = 0.0;
        for (idx, spec) in specs.iter().enumerate() {
            if !spec.rate.is_finite() || !(0.0..=1.0).contains(&spec.rate) {
                return Err(AdvisorError::Config(format!(
                    "{name} bracket {idx} rate must be between 0 and 1"
                )));
            }
            let is_last = idx + 1 == specs.len();
            let upper = match (spec.upper, is_last) {
                (None, true) => f64::INFINITY,
                (None, false) => {
                    return Err(AdvisorError::Config(format!(
                        "{name} bracket {idx} is unbounded but is not the last bracket"
                    )));
                }
                (Some(_), true) => {
                    return Err(AdvisorError::Config(format!(
                        "{name} last bracket must be unbounded"
                    )));
                }
                (Some(upper), false) => upper,
            };
            if upper.is_nan() || upper <= previous {
                return Err(AdvisorError::Config(format!(
                    "{name} bracket thresholds must be strictly increasing and positive"
                )));
            }
            brackets.push(Bracket {
                upper,
                rate: spec.rate,
            });
            previous = upper;
        }

        Ok(Self { brackets })
    }

    pub fn tax(&self, income: f64) -> f64 {
        let income = income.max(0.0);
        let mut tax = 0.0;
        let mut floor = 0.0;
        for bracket in &self.brackets {
            if income <= floor {
                break;
            }
            tax += (income.min(bracket.upper) - floor) * bracket.rate;
            floor = bracket.upper;
        }
        tax
    }

    pub fn marginal_rate(&self, income: f64) -> f64 {
        self.brackets
            .iter()
            .find(|bracket| income <= bracket.upper)
            .map_or(self.top_rate(), |bracket| bracket.rate)
    }

    pub fn top_rate(&self) -> f64 {
        self.brackets[self.brackets.len() - 1].rate
    }
}

/// Federal income tax lookup over injected bracket tables.
#[derive(Clone, Debug)]
pub struct TaxModel {
    single: BracketTable,
    married: BracketTable,
    status_map: FilingStatusMap,
}

impl TaxModel {
    pub fn new(config: &TaxConfig) -> Result<Self> {
        Ok(Self {
            single: BracketTable::new("single", &config.single)?,
            married: BracketTable::new("married", &config.married)?,
            status_map: config.filing_status_map,
        })
    }

    pub fn table(&self, filing_status: FilingStatus) -> &BracketTable {
        match self.status_map.table_for(filing_status) {
            TableKey::Single => &self.single,
            TableKey::Married => &self.married,
        }
    }

    pub fn calculate_tax(&self, income: f64, filing_status: FilingStatus) -> f64 {
        self.table(filing_status).tax(income)
    }

    pub fn marginal_rate(&self, income: f64, filing_status: FilingStatus) -> f64 {
        self.table(filing_status).marginal_rate(income)
    }
}

impl Default for TaxModel {
    fn default() -> Self {
        Self::new(&TaxConfig::default()).expect("built-in bracket tables are valid")
    }
}
