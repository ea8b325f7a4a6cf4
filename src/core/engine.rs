use super::breakeven::breakeven_years;
use super::config::EngineConfig;
use super::projection::{project_taxfree, project_traditional};
use super::rmd::RmdModel;
use super::tax::TaxModel;
use super::types::{AnalysisRequest, AnalysisResult, Capital, Demographics, Recommendation};
use crate::error::Result;

const HIGH_BRACKET_RATE: f64 = 0.24;
const RMD_RUNWAY_YEARS: u32 = 10;
const LARGE_BALANCE: f64 = 500_000.0;
const LONG_HORIZON_YEARS: u32 = 20;
const STRONG_SAVINGS_MULTIPLE: f64 = 2.0;
const STRONG_BREAKEVEN_YEARS: u32 = 15;
const MODERATE_SAVINGS_MULTIPLE: f64 = 1.0;
const MODERATE_BREAKEVEN_YEARS: u32 = 25;

const PARTIAL_CONVERSION_FACTOR: &str = "Consider partial conversions in lower-income years";
const FALLBACK_FACTOR: &str = "Analysis based on current tax rates and assumptions";

/// Balances and blended return rates for the whole household.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdAccounts {
    pub traditional_balance: f64,
    pub traditional_return: f64,
    pub roth_balance: f64,
    pub roth_return: f64,
}

impl HouseholdAccounts {
    pub fn from_capital(capital: &Capital) -> Self {
        let traditional_balance =
            capital.before_tax_ira_person1 + capital.before_tax_ira_person2.unwrap_or(0.0);
        let roth_balance = capital.roth_person1 + capital.roth_person2.unwrap_or(0.0);

        Self {
            traditional_balance,
            traditional_return: weighted_return(
                (capital.before_tax_ira_person1, capital.return_traditional_person1),
                capital.before_tax_ira_person2.zip(capital.return_traditional_person2),
            ),
            roth_balance,
            roth_return: weighted_return(
                (capital.roth_person1, capital.return_roth_person1),
                capital.roth_person2.zip(capital.return_roth_person2),
            ),
        }
    }
}

/// Balance-weighted mean of two accounts' returns. Falls back to the first
/// account's rate when the second is absent or the combined balance is zero.
fn weighted_return(first: (f64, f64), second: Option<(f64, f64)>) -> f64 {
    let (first_balance, first_rate) = first;
    let Some((second_balance, second_rate)) = second else {
        return first_rate;
    };
    let total = first_balance + second_balance;
    if total <= 0.0 {
        return first_rate;
    }
    (first_balance * first_rate + second_balance * second_rate) / total
}

/// Age at which the household's projections end. Married households plan to
/// the longer of the two life expectancies.
pub fn planning_longevity(demographics: &Demographics) -> u32 {
    match demographics.longevity_person2 {
        Some(second) if demographics.filing_status.is_married() => {
            demographics.longevity_person1.max(second)
        }
        _ => demographics.longevity_person1,
    }
}

/// Inputs to the factor and tier rules, already reduced to numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionInputs {
    pub marginal_rate: f64,
    pub years_until_rmd: u32,
    pub traditional_balance: f64,
    pub horizon_years: u32,
    pub conversion_tax_cost: f64,
    pub lifetime_tax_savings: f64,
    pub breakeven_years: u32,
}

pub fn classify(inputs: &DecisionInputs) -> Recommendation {
    let savings = inputs.lifetime_tax_savings;
    let cost = inputs.conversion_tax_cost;
    if savings > cost * STRONG_SAVINGS_MULTIPLE && inputs.breakeven_years < STRONG_BREAKEVEN_YEARS
    {
        Recommendation::Strong
    } else if savings > cost * MODERATE_SAVINGS_MULTIPLE
        && inputs.breakeven_years < MODERATE_BREAKEVEN_YEARS
    {
        Recommendation::Moderate
    } else {
        Recommendation::NotRecommended
    }
}

pub fn key_factors(inputs: &DecisionInputs, recommendation: Recommendation) -> Vec<String> {
    let mut factors = Vec::new();

    if inputs.marginal_rate >= HIGH_BRACKET_RATE {
        factors.push(format!(
            "Currently in high tax bracket ({:.0}%)",
            inputs.marginal_rate * 100.0
        ));
    }
    if inputs.years_until_rmd > RMD_RUNWAY_YEARS {
        factors.push(format!(
            "{} years until RMDs begin - more time for tax-free growth",
            inputs.years_until_rmd
        ));
    }
    if inputs.traditional_balance > LARGE_BALANCE {
        factors.push("Large IRA balance will trigger substantial RMDs".to_string());
    }
    if inputs.horizon_years > LONG_HORIZON_YEARS {
        factors.push(format!(
            "{} year time horizon provides growth opportunity",
            inputs.horizon_years
        ));
    }

    if recommendation == Recommendation::NotRecommended {
        factors.push(PARTIAL_CONVERSION_FACTOR.to_string());
    }
    if factors.is_empty() {
        factors.push(FALLBACK_FACTOR.to_string());
    }
    factors
}

pub fn summary(recommendation: Recommendation, savings: f64, breakeven_years: u32) -> String {
    let savings = format_dollars(savings);
    match recommendation {
        Recommendation::Strong => format!(
            "Strong candidate for Roth conversion. You could save approximately {savings} in lifetime taxes with a breakeven period of {breakeven_years} years."
        ),
        Recommendation::Moderate => format!(
            "Moderate benefit from Roth conversion. Estimated lifetime tax savings of {savings} with a breakeven period of {breakeven_years} years."
        ),
        Recommendation::NotRecommended => format!(
            "Roth conversion may not be optimal. The breakeven period of {breakeven_years} years and lifetime savings of {savings} suggest keeping the traditional IRA may be better."
        ),
    }
}

/// Whole dollars with thousands separators, e.g. `$1,234,568`. Halves round
/// to even.
pub fn format_dollars(amount: f64) -> String {
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && digits != "0" {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Conversion analysis over an immutable tax and RMD configuration.
#[derive(Debug, Clone)]
pub struct RothAnalyzer {
    tax: TaxModel,
    rmd: RmdModel,
}

impl Default for RothAnalyzer {
    fn default() -> Self {
        Self {
            tax: TaxModel::default(),
            rmd: RmdModel::default(),
        }
    }
}

impl RothAnalyzer {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            tax: TaxModel::new(&config.tax)?,
            rmd: RmdModel::new(&config.rmd)?,
        })
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let demographics = &request.demographics;
        let accounts = HouseholdAccounts::from_capital(&request.capital);

        let age = demographics.age_person1;
        let longevity = planning_longevity(demographics);
        let marginal_rate = self
            .tax
            .marginal_rate(demographics.taxable_income, demographics.filing_status);

        let conversion_tax_cost = accounts.traditional_balance * marginal_rate;
        let converted_balance = accounts.traditional_balance - conversion_tax_cost;

        let traditional = project_traditional(
            &self.rmd,
            accounts.traditional_balance,
            age,
            longevity,
            accounts.traditional_return,
            marginal_rate,
        );
        let roth_end_value = project_taxfree(
            converted_balance + accounts.roth_balance,
            age,
            longevity,
            accounts.roth_return,
        );

        let lifetime_tax_savings =
            roth_end_value - traditional.final_balance - traditional.total_tax_paid;

        let breakeven = breakeven_years(
            accounts.traditional_balance,
            accounts.traditional_return,
            converted_balance,
            accounts.roth_return,
        );

        let decision = DecisionInputs {
            marginal_rate,
            years_until_rmd: self.rmd.start_age().saturating_sub(age),
            traditional_balance: accounts.traditional_balance,
            horizon_years: longevity.saturating_sub(age),
            conversion_tax_cost,
            lifetime_tax_savings,
            breakeven_years: breakeven,
        };
        let recommendation = classify(&decision);
        let reported_savings = lifetime_tax_savings.max(0.0);

        tracing::debug!(
            marginal_rate,
            horizon_years = decision.horizon_years,
            breakeven_years = breakeven,
            lifetime_tax_savings,
            ?recommendation,
            "roth conversion analysed"
        );

        AnalysisResult {
            recommendation,
            summary: summary(recommendation, reported_savings, breakeven),
            conversion_tax_cost,
            breakeven_years: breakeven,
            lifetime_tax_savings: reported_savings,
            key_factors: key_factors(&decision, recommendation),
            projected_traditional_ira_value: traditional.final_balance,
            projected_roth_value: roth_end_value,
        }
    }
}
