use chrono::NaiveDate;

use super::types::{
    DAYS_PER_YEAR, DerivedMetrics, FinancialProfile, Profile, RunwayStatus, WEEKS_PER_YEAR,
};

const ALERT_RUNWAY_MONTHS: f64 = 3.0;
const SHIELDED_RUNWAY_MONTHS: f64 = 6.0;

/// Evaluates every derived metric for `profile` as of `today`.
///
/// Total for all inputs: division-by-zero cases fall back to 0, and a birth
/// date after `today` yields negative ages and week counts rather than an error.
pub fn compute_metrics(profile: &Profile, today: NaiveDate) -> DerivedMetrics {
    let days_lived = today.signed_duration_since(profile.bio.birth_date).num_days();
    let age_years = days_lived as f64 / DAYS_PER_YEAR;
    let weeks_lived = days_lived / 7;

    let total_weeks_expected =
        i64::from(profile.bio.life_expectancy_years) * i64::from(WEEKS_PER_YEAR);
    let weeks_remaining = total_weeks_expected - weeks_lived;
    let life_percent_elapsed = if total_weeks_expected > 0 {
        weeks_lived as f64 / total_weeks_expected as f64 * 100.0
    } else {
        0.0
    };

    let finance = &profile.finance;
    let monthly_savings = finance.monthly_income - finance.monthly_expenses;

    DerivedMetrics {
        age_years,
        weeks_lived,
        total_weeks_expected,
        weeks_remaining,
        life_percent_elapsed,
        net_worth: net_worth(finance),
        months_of_runway: months_of_runway(finance),
        monthly_savings,
        savings_rate_percent: savings_rate_percent(finance),
        free_hours: profile.time.free_hours(),
    }
}

pub fn net_worth(finance: &FinancialProfile) -> f64 {
    (finance.physical_assets + finance.liquid_savings) - finance.total_debt
}

pub fn months_of_runway(finance: &FinancialProfile) -> f64 {
    if finance.monthly_expenses > 0.0 {
        finance.liquid_savings / finance.monthly_expenses
    } else {
        0.0
    }
}

pub fn savings_rate_percent(finance: &FinancialProfile) -> f64 {
    if finance.monthly_income > 0.0 {
        (finance.monthly_income - finance.monthly_expenses) / finance.monthly_income * 100.0
    } else {
        0.0
    }
}

impl RunwayStatus {
    pub fn classify(months_of_runway: f64) -> Self {
        if months_of_runway < ALERT_RUNWAY_MONTHS {
            RunwayStatus::Alert
        } else if months_of_runway < SHIELDED_RUNWAY_MONTHS {
            RunwayStatus::Stable
        } else {
            RunwayStatus::Shielded
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunwayStatus::Alert => "Alert",
            RunwayStatus::Stable => "Stable",
            RunwayStatus::Shielded => "Shielded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        BiographicalProfile, BiologicalProfile, EducationLevel, TimeAllocationProfile,
    };
    use chrono::Duration;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample_profile() -> Profile {
        Profile {
            bio: BiographicalProfile {
                birth_date: date(1997, 10, 7),
                biological_profile: BiologicalProfile::Male,
                education_level: EducationLevel::Master,
                life_expectancy_years: 72,
            },
            finance: FinancialProfile {
                monthly_income: 40_000.0,
                monthly_expenses: 25_000.0,
                physical_assets: 100_000.0,
                liquid_savings: 50_000.0,
                total_debt: 30_000.0,
            },
            time: TimeAllocationProfile {
                work_hours: 40,
                commute_hours: 10,
                maintenance_hours: 21,
            },
        }
    }

    #[test]
    fn net_worth_subtracts_debt_from_assets() {
        let metrics = compute_metrics(&sample_profile(), date(2024, 1, 1));
        assert_approx(metrics.net_worth, 120_000.0);
    }

    #[test]
    fn net_worth_may_be_negative() {
        let mut profile = sample_profile();
        profile.finance.total_debt = 500_000.0;
        let metrics = compute_metrics(&profile, date(2024, 1, 1));
        assert_approx(metrics.net_worth, -350_000.0);
    }

    #[test]
    fn runway_is_zero_without_expenses() {
        let mut profile = sample_profile();
        profile.finance.monthly_expenses = 0.0;
        profile.finance.liquid_savings = 1_000_000.0;
        let metrics = compute_metrics(&profile, date(2024, 1, 1));
        assert_eq!(metrics.months_of_runway, 0.0);
    }

    #[test]
    fn runway_divides_liquid_savings_by_expenses() {
        let metrics = compute_metrics(&sample_profile(), date(2024, 1, 1));
        assert_approx(metrics.months_of_runway, 2.0);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let mut profile = sample_profile();
        profile.finance.monthly_income = 0.0;
        let metrics = compute_metrics(&profile, date(2024, 1, 1));
        assert_eq!(metrics.savings_rate_percent, 0.0);
        assert_approx(metrics.monthly_savings, -25_000.0);
    }

    #[test]
    fn savings_rate_uses_net_income() {
        let metrics = compute_metrics(&sample_profile(), date(2024, 1, 1));
        assert_approx(metrics.monthly_savings, 15_000.0);
        assert_approx(metrics.savings_rate_percent, 37.5);
    }

    #[test]
    fn age_and_weeks_follow_day_count() {
        let mut profile = sample_profile();
        profile.bio.birth_date = date(2000, 1, 1);
        // 7000 days later.
        let today = date(2000, 1, 1) + Duration::days(7_000);
        let metrics = compute_metrics(&profile, today);

        assert_approx(metrics.age_years, 7_000.0 / 365.25);
        assert_eq!(metrics.weeks_lived, 1_000);
        assert_eq!(metrics.total_weeks_expected, 72 * 52);
        assert_eq!(metrics.weeks_remaining, 72 * 52 - 1_000);
        assert_approx(metrics.life_percent_elapsed, 1_000.0 / 3_744.0 * 100.0);
    }

    #[test]
    fn weeks_lived_truncates_partial_weeks() {
        let mut profile = sample_profile();
        profile.bio.birth_date = date(2020, 1, 1);
        let metrics = compute_metrics(&profile, date(2020, 1, 14));
        assert_eq!(metrics.weeks_lived, 1);
    }

    #[test]
    fn birth_after_today_yields_negative_metrics() {
        let mut profile = sample_profile();
        profile.bio.birth_date = date(2030, 1, 1);
        let metrics = compute_metrics(&profile, date(2029, 12, 1));
        assert!(metrics.age_years < 0.0);
        assert_eq!(metrics.weeks_lived, -4);
        assert!(metrics.weeks_remaining > metrics.total_weeks_expected);
    }

    #[test]
    fn weeks_remaining_goes_negative_past_expectancy() {
        let mut profile = sample_profile();
        profile.bio.birth_date = date(1900, 1, 1);
        profile.bio.life_expectancy_years = 60;
        let metrics = compute_metrics(&profile, date(2024, 1, 1));
        assert!(metrics.weeks_remaining < 0);
        assert!(metrics.life_percent_elapsed > 100.0);
    }

    #[test]
    fn free_hours_are_floored_at_zero() {
        let mut profile = sample_profile();
        assert_eq!(compute_metrics(&profile, date(2024, 1, 1)).free_hours, 41);

        profile.time = TimeAllocationProfile {
            work_hours: 80,
            commute_hours: 30,
            maintenance_hours: 50,
        };
        assert_eq!(compute_metrics(&profile, date(2024, 1, 1)).free_hours, 0);
    }

    #[test]
    fn runway_classifier_boundaries() {
        assert_eq!(RunwayStatus::classify(0.0), RunwayStatus::Alert);
        assert_eq!(RunwayStatus::classify(2.9), RunwayStatus::Alert);
        assert_eq!(RunwayStatus::classify(3.0), RunwayStatus::Stable);
        assert_eq!(RunwayStatus::classify(5.99), RunwayStatus::Stable);
        assert_eq!(RunwayStatus::classify(6.0), RunwayStatus::Shielded);
        assert_eq!(RunwayStatus::classify(240.0), RunwayStatus::Shielded);
        assert_eq!(RunwayStatus::classify(6.0).label(), "Shielded");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_life_percent_is_non_decreasing_over_time(
            birth_offset in 0i64..36_500,
            start_offset in 0i64..36_500,
            step in 0i64..4_000,
            life in 60u32..=100
        ) {
            let mut profile = sample_profile();
            profile.bio.birth_date = date(1920, 1, 1) + Duration::days(birth_offset);
            profile.bio.life_expectancy_years = life;

            let earlier = date(1920, 1, 1) + Duration::days(start_offset);
            let later = earlier + Duration::days(step);
            let a = compute_metrics(&profile, earlier);
            let b = compute_metrics(&profile, later);

            prop_assert!(b.life_percent_elapsed >= a.life_percent_elapsed);
            prop_assert!(b.weeks_lived >= a.weeks_lived);
            prop_assert!(b.weeks_remaining <= a.weeks_remaining);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_compute_metrics_is_deterministic(
            income in 0u32..500_000,
            expenses in 0u32..500_000,
            assets in 0u32..10_000_000,
            savings in 0u32..5_000_000,
            debt in 0u32..5_000_000
        ) {
            let mut profile = sample_profile();
            profile.finance = FinancialProfile {
                monthly_income: income as f64,
                monthly_expenses: expenses as f64,
                physical_assets: assets as f64,
                liquid_savings: savings as f64,
                total_debt: debt as f64,
            };
            let today = date(2024, 6, 30);

            let first = compute_metrics(&profile, today);
            let second = compute_metrics(&profile.clone(), today);
            prop_assert_eq!(first.net_worth.to_bits(), second.net_worth.to_bits());
            prop_assert_eq!(
                first.months_of_runway.to_bits(),
                second.months_of_runway.to_bits()
            );
            prop_assert_eq!(
                first.savings_rate_percent.to_bits(),
                second.savings_rate_percent.to_bits()
            );
            prop_assert_eq!(first, second);
        }
    }
}
