use super::projection::compound;

/// Last candidate year the search looks at.
pub const BREAKEVEN_SEARCH_YEARS: u32 = 49;
/// Reported when the converted balance never overtakes within the search.
pub const NO_BREAKEVEN: u32 = BREAKEVEN_SEARCH_YEARS + 1;

/// First year in which the converted balance, compounding at `converted_rate`,
/// strictly exceeds the untouched traditional balance compounding at
/// `traditional_rate`. This is a plain compounding comparison; RMDs and their
/// tax are not part of it.
pub fn breakeven_years(
    traditional_balance: f64,
    traditional_rate: f64,
    converted_balance: f64,
    converted_rate: f64,
) -> u32 {
    (1..=BREAKEVEN_SEARCH_YEARS)
        .find(|&year| {
            compound(converted_balance, converted_rate, year)
                > compound(traditional_balance, traditional_rate, year)
        })
        .unwrap_or(NO_BREAKEVEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn equal_rates_never_break_even_after_paying_tax() {
        assert_eq!(breakeven_years(200_000.0, 0.08, 156_000.0, 0.08), NO_BREAKEVEN);
    }

    #[test]
    fn faster_converted_growth_crosses_over() {
        // 0.78 * (1.10 / 1.05)^y > 1 first holds at y = 6.
        assert_eq!(breakeven_years(200_000.0, 0.05, 156_000.0, 0.10), 6);
    }

    #[test]
    fn converted_ahead_from_the_start_breaks_even_in_first_year() {
        assert_eq!(breakeven_years(100_000.0, 0.05, 100_001.0, 0.05), 1);
    }

    #[test]
    fn crossover_past_search_bound_reports_sentinel() {
        // 0.5 * (1.01)^y > 1 needs about 70 years.
        assert_eq!(breakeven_years(100_000.0, 0.0, 50_000.0, 0.01), NO_BREAKEVEN);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_breakeven_stays_within_search_range(
            traditional in 1u32..5_000_000,
            converted in 0u32..5_000_000,
            traditional_bp in 0u32..3_001,
            converted_bp in 0u32..3_001,
        ) {
            let years = breakeven_years(
                traditional as f64,
                traditional_bp as f64 / 10_000.0,
                converted as f64,
                converted_bp as f64 / 10_000.0,
            );
            prop_assert!((1..=NO_BREAKEVEN).contains(&years));
        }

        #[test]
        fn prop_no_rate_advantage_and_smaller_start_never_breaks_even(
            traditional in 1_000u32..5_000_000,
            haircut_bp in 1u32..10_000,
            traditional_bp in 0u32..3_001,
            rate_gap_bp in 0u32..3_001,
        ) {
            let traditional_rate = traditional_bp as f64 / 10_000.0;
            let converted_rate = (traditional_rate - rate_gap_bp as f64 / 10_000.0).max(0.0);
            let converted = traditional as f64 * (1.0 - haircut_bp as f64 / 10_000.0);
            let years = breakeven_years(traditional as f64, traditional_rate, converted, converted_rate);
            prop_assert_eq!(years, NO_BREAKEVEN);
        }
    }
}
