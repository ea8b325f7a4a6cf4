use super::rmd::RmdModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraditionalProjection {
    pub final_balance: f64,
    pub total_tax_paid: f64,
}

#[derive(Debug)]
struct ProjectionState {
    balance: f64,
    tax_paid: f64,
}

/// Keep-traditional scenario: grow the balance each year from `start_age`
/// through `end_age` inclusive and take the RMD from the post-growth balance
/// once distributions begin.
///
/// RMDs are taxed at `marginal_rate` for every year. The rate is not
/// re-derived from the withdrawals themselves, so bracket creep from large
/// RMDs is not modelled.
pub fn project_traditional(
    rmd: &RmdModel,
    initial_balance: f64,
    start_age: u32,
    end_age: u32,
    return_rate: f64,
    marginal_rate: f64,
) -> TraditionalProjection {
    let mut state = ProjectionState {
        balance: initial_balance,
        tax_paid: 0.0,
    };

    for age in start_age..=end_age {
        apply_year(rmd, &mut state, age, return_rate, marginal_rate);
    }

    TraditionalProjection {
        final_balance: state.balance,
        total_tax_paid: state.tax_paid,
    }
}

fn apply_year(
    rmd: &RmdModel,
    state: &mut ProjectionState,
    age: u32,
    return_rate: f64,
    marginal_rate: f64,
) {
    state.balance *= 1.0 + return_rate;
    if age >= rmd.start_age() {
        let distribution = rmd.calculate_rmd(state.balance, age);
        state.balance -= distribution;
        state.tax_paid += distribution * marginal_rate;
    }
}

/// Convert scenario: tax-free compounding with no withdrawals.
pub fn project_taxfree(initial_balance: f64, start_age: u32, end_age: u32, return_rate: f64) -> f64 {
    let years = end_age.saturating_sub(start_age);
    compound(initial_balance, return_rate, years)
}

pub(crate) fn compound(principal: f64, rate: f64, years: u32) -> f64 {
    principal * (1.0 + rate).powi(years as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn single_rmd_year_withdraws_and_taxes_distribution() {
        let rmd = RmdModel::default();
        let projection = project_traditional(&rmd, 26_500.0, 73, 73, 0.0, 0.22);
        assert_approx(projection.final_balance, 25_500.0);
        assert_approx(projection.total_tax_paid, 220.0);
    }

    #[test]
    fn rmd_is_taken_after_growth() {
        let rmd = RmdModel::default();
        let projection = project_traditional(&rmd, 25_000.0, 73, 73, 0.06, 0.10);
        // 26_500 after growth, then 1_000 distributed.
        assert_approx(projection.final_balance, 25_500.0);
        assert_approx(projection.total_tax_paid, 100.0);
    }

    #[test]
    fn growth_only_before_distribution_age() {
        let rmd = RmdModel::default();
        let projection = project_traditional(&rmd, 100_000.0, 60, 62, 0.10, 0.24);
        assert_approx(projection.final_balance, 133_100.0);
        assert_approx(projection.total_tax_paid, 0.0);
    }

    #[test]
    fn reversed_ages_leave_traditional_balance_untouched() {
        let rmd = RmdModel::default();
        let projection = project_traditional(&rmd, 50_000.0, 80, 75, 0.08, 0.22);
        assert_approx(projection.final_balance, 50_000.0);
        assert_approx(projection.total_tax_paid, 0.0);
    }

    #[test]
    fn taxfree_compounds_over_age_gap() {
        assert_approx(project_taxfree(100_000.0, 60, 62, 0.10), 121_000.0);
    }

    #[test]
    fn taxfree_reversed_ages_do_not_shrink_balance() {
        assert_approx(project_taxfree(100_000.0, 70, 65, 0.10), 100_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_taxfree_zero_horizon_is_identity(
            balance in 0u32..5_000_000,
            age in 18u32..120,
            rate_bp in 0u32..3_001,
        ) {
            let projected = project_taxfree(balance as f64, age, age, rate_bp as f64 / 10_000.0);
            prop_assert!((projected - balance as f64).abs() <= EPS);
        }

        #[test]
        fn prop_zero_return_before_rmd_age_is_identity(
            balance in 0u32..5_000_000,
            start_age in 18u32..73,
            span in 0u32..20,
        ) {
            let rmd = RmdModel::default();
            let end_age = (start_age + span).min(72);
            let projection = project_traditional(&rmd, balance as f64, start_age, end_age, 0.0, 0.37);
            prop_assert!((projection.final_balance - balance as f64).abs() <= EPS);
            prop_assert!(projection.total_tax_paid == 0.0);
        }

        #[test]
        fn prop_traditional_balance_and_tax_stay_non_negative(
            balance in 0u32..5_000_000,
            start_age in 18u32..100,
            span in 0u32..40,
            rate_bp in 0u32..3_001,
            marginal_bp in 0u32..3_701,
        ) {
            let rmd = RmdModel::default();
            let projection = project_traditional(
                &rmd,
                balance as f64,
                start_age,
                start_age + span,
                rate_bp as f64 / 10_000.0,
                marginal_bp as f64 / 10_000.0,
            );
            prop_assert!(projection.final_balance >= 0.0);
            prop_assert!(projection.total_tax_paid >= 0.0);
        }
    }
}
