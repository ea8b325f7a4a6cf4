use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    #[serde(alias = "married_filing_jointly", alias = "couple")]
    MarriedJointly,
    #[serde(alias = "married_filing_separately")]
    MarriedSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn is_married(self) -> bool {
        matches!(
            self,
            FilingStatus::MarriedJointly | FilingStatus::MarriedSeparately
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Strong,
    Moderate,
    NotRecommended,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Demographics {
    /// Older clients send this as `num_people` with `single` or `couple`.
    #[serde(alias = "num_people")]
    pub filing_status: FilingStatus,
    pub age_person1: u32,
    #[serde(default)]
    pub age_person2: Option<u32>,
    #[serde(default = "default_longevity")]
    pub longevity_person1: u32,
    #[serde(default)]
    pub longevity_person2: Option<u32>,
    pub retirement_year_person1: u32,
    #[serde(default)]
    pub retirement_year_person2: Option<u32>,
    pub taxable_income: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Inheritance {
    pub amount: f64,
    pub year: u32,
}

/// Household income streams. Accepted and validated, but the conversion
/// projection does not draw on them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IncomeSources {
    pub social_security_person1: f64,
    pub social_security_start_age_person1: Option<u32>,
    pub pension_person1: f64,
    pub pension_cola_person1: bool,
    pub pension_survivorship_person1: f64,

    pub social_security_person2: Option<f64>,
    pub social_security_start_age_person2: Option<u32>,
    pub pension_person2: Option<f64>,
    pub pension_cola_person2: Option<bool>,
    pub pension_survivorship_person2: Option<f64>,

    pub rental_income: f64,
    pub inheritances: Vec<Inheritance>,
    pub other_income: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Capital {
    pub bank_accounts_person1: f64,
    pub brokerage_non_retirement_person1: f64,
    pub crypto_person1: f64,
    pub precious_metals_person1: f64,
    pub bank_accounts_person2: Option<f64>,
    pub brokerage_non_retirement_person2: Option<f64>,
    pub crypto_person2: Option<f64>,
    pub precious_metals_person2: Option<f64>,

    pub emergency_fund: f64,
    pub large_purchases: f64,

    pub before_tax_ira_person1: f64,
    pub before_tax_ira_person2: Option<f64>,
    pub roth_person1: f64,
    pub roth_person2: Option<f64>,

    pub allocation_traditional_person1: u32,
    pub return_traditional_person1: f64,
    pub allocation_traditional_person2: Option<u32>,
    pub return_traditional_person2: Option<f64>,
    pub allocation_roth_person1: u32,
    pub return_roth_person1: f64,
    pub allocation_roth_person2: Option<u32>,
    pub return_roth_person2: Option<f64>,
}

impl Default for Capital {
    fn default() -> Self {
        Self {
            bank_accounts_person1: 0.0,
            brokerage_non_retirement_person1: 0.0,
            crypto_person1: 0.0,
            precious_metals_person1: 0.0,
            bank_accounts_person2: None,
            brokerage_non_retirement_person2: None,
            crypto_person2: None,
            precious_metals_person2: None,
            emergency_fund: 0.0,
            large_purchases: 0.0,
            before_tax_ira_person1: 0.0,
            before_tax_ira_person2: None,
            roth_person1: 0.0,
            roth_person2: None,
            allocation_traditional_person1: DEFAULT_STOCK_ALLOCATION,
            return_traditional_person1: DEFAULT_RETURN,
            allocation_traditional_person2: None,
            return_traditional_person2: None,
            allocation_roth_person1: DEFAULT_STOCK_ALLOCATION,
            return_roth_person1: DEFAULT_RETURN,
            allocation_roth_person2: None,
            return_roth_person2: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub demographics: Demographics,
    #[serde(default)]
    pub income: IncomeSources,
    #[serde(default)]
    pub capital: Capital,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub recommendation: Recommendation,
    pub summary: String,
    pub conversion_tax_cost: f64,
    pub breakeven_years: u32,
    pub lifetime_tax_savings: f64,
    pub key_factors: Vec<String>,
    pub projected_traditional_ira_value: f64,
    pub projected_roth_value: f64,
}

pub const DEFAULT_LONGEVITY: u32 = 90;
pub const DEFAULT_RETURN: f64 = 0.08;
pub const DEFAULT_STOCK_ALLOCATION: u32 = 60;

fn default_longevity() -> u32 {
    DEFAULT_LONGEVITY
}
