use crate::core::{AnalysisRequest, Capital, Demographics, IncomeSources};
use crate::error::{AdvisorError, Result};

const AGE_RANGE: (u32, u32) = (18, 100);
const LONGEVITY_RANGE: (u32, u32) = (60, 120);
const RETIREMENT_YEAR_RANGE: (u32, u32) = (1950, 2100);
const SOCIAL_SECURITY_AGE_RANGE: (u32, u32) = (62, 70);
const INHERITANCE_YEAR_RANGE: (u32, u32) = (2024, 2100);
const MAX_RETURN_RATE: f64 = 0.30;

/// Checks every precondition the engine relies on and reports the first
/// violation by field path.
pub fn validate_request(request: &AnalysisRequest) -> Result<()> {
    validate_demographics(&request.demographics)?;
    validate_income(&request.income)?;
    validate_capital(&request.capital)?;
    Ok(())
}

fn validate_demographics(demo: &Demographics) -> Result<()> {
    check_range("demographics.age_person1", demo.age_person1, AGE_RANGE)?;
    check_optional_range("demographics.age_person2", demo.age_person2, AGE_RANGE)?;
    check_range(
        "demographics.longevity_person1",
        demo.longevity_person1,
        LONGEVITY_RANGE,
    )?;
    check_optional_range(
        "demographics.longevity_person2",
        demo.longevity_person2,
        LONGEVITY_RANGE,
    )?;
    check_range(
        "demographics.retirement_year_person1",
        demo.retirement_year_person1,
        RETIREMENT_YEAR_RANGE,
    )?;
    check_optional_range(
        "demographics.retirement_year_person2",
        demo.retirement_year_person2,
        RETIREMENT_YEAR_RANGE,
    )?;
    check_amount("demographics.taxable_income", demo.taxable_income)
}

fn validate_income(income: &IncomeSources) -> Result<()> {
    for (name, value) in [
        ("income.social_security_person1", income.social_security_person1),
        ("income.pension_person1", income.pension_person1),
        ("income.rental_income", income.rental_income),
        ("income.other_income", income.other_income),
    ] {
        check_amount(name, value)?;
    }
    for (name, value) in [
        ("income.social_security_person2", income.social_security_person2),
        ("income.pension_person2", income.pension_person2),
    ] {
        if let Some(value) = value {
            check_amount(name, value)?;
        }
    }

    check_optional_range(
        "income.social_security_start_age_person1",
        income.social_security_start_age_person1,
        SOCIAL_SECURITY_AGE_RANGE,
    )?;
    check_optional_range(
        "income.social_security_start_age_person2",
        income.social_security_start_age_person2,
        SOCIAL_SECURITY_AGE_RANGE,
    )?;

    check_percent(
        "income.pension_survivorship_person1",
        income.pension_survivorship_person1,
    )?;
    if let Some(value) = income.pension_survivorship_person2 {
        check_percent("income.pension_survivorship_person2", value)?;
    }

    for (idx, inheritance) in income.inheritances.iter().enumerate() {
        check_amount(&format!("income.inheritances[{idx}].amount"), inheritance.amount)?;
        check_range(
            &format!("income.inheritances[{idx}].year"),
            inheritance.year,
            INHERITANCE_YEAR_RANGE,
        )?;
    }
    Ok(())
}

fn validate_capital(capital: &Capital) -> Result<()> {
    for (name, value) in [
        ("capital.bank_accounts_person1", capital.bank_accounts_person1),
        (
            "capital.brokerage_non_retirement_person1",
            capital.brokerage_non_retirement_person1,
        ),
        ("capital.crypto_person1", capital.crypto_person1),
        ("capital.precious_metals_person1", capital.precious_metals_person1),
        ("capital.emergency_fund", capital.emergency_fund),
        ("capital.large_purchases", capital.large_purchases),
        ("capital.before_tax_ira_person1", capital.before_tax_ira_person1),
        ("capital.roth_person1", capital.roth_person1),
    ] {
        check_amount(name, value)?;
    }
    for (name, value) in [
        ("capital.bank_accounts_person2", capital.bank_accounts_person2),
        (
            "capital.brokerage_non_retirement_person2",
            capital.brokerage_non_retirement_person2,
        ),
        ("capital.crypto_person2", capital.crypto_person2),
        ("capital.precious_metals_person2", capital.precious_metals_person2),
        ("capital.before_tax_ira_person2", capital.before_tax_ira_person2),
        ("capital.roth_person2", capital.roth_person2),
    ] {
        if let Some(value) = value {
            check_amount(name, value)?;
        }
    }

    for (name, value) in [
        (
            "capital.allocation_traditional_person1",
            Some(capital.allocation_traditional_person1),
        ),
        (
            "capital.allocation_traditional_person2",
            capital.allocation_traditional_person2,
        ),
        (
            "capital.allocation_roth_person1",
            Some(capital.allocation_roth_person1),
        ),
        ("capital.allocation_roth_person2", capital.allocation_roth_person2),
    ] {
        check_optional_range(name, value, (0, 100))?;
    }

    for (name, value) in [
        (
            "capital.return_traditional_person1",
            Some(capital.return_traditional_person1),
        ),
        (
            "capital.return_traditional_person2",
            capital.return_traditional_person2,
        ),
        ("capital.return_roth_person1", Some(capital.return_roth_person1)),
        ("capital.return_roth_person2", capital.return_roth_person2),
    ] {
        if let Some(rate) = value {
            if !rate.is_finite() || !(0.0..=MAX_RETURN_RATE).contains(&rate) {
                return Err(AdvisorError::Validation(format!(
                    "{name} must be between 0 and {MAX_RETURN_RATE}"
                )));
            }
        }
    }
    Ok(())
}

fn check_range(name: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(AdvisorError::Validation(format!(
            "{name} must be between {min} and {max}"
        )));
    }
    Ok(())
}

fn check_optional_range(name: &str, value: Option<u32>, range: (u32, u32)) -> Result<()> {
    match value {
        Some(value) => check_range(name, value, range),
        None => Ok(()),
    }
}

fn check_amount(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AdvisorError::Validation(format!("{name} must be >= 0")));
    }
    Ok(())
}

fn check_percent(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AdvisorError::Validation(format!(
            "{name} must be between 0 and 100"
        )));
    }
    Ok(())
}
