use super::format::{currency, deduction_k, percent, plain_k};
use super::reference::RadarScales;
use super::types::{
    DerivedMetrics, FinancialProfile, Measure, Profile, RadarScores, WEEKS_PER_YEAR, WaterfallStep,
    Waterfall, WeekStatus, WeeksGrid,
};

pub const RADAR_AXES: [&str; 5] = ["Income", "Net Worth", "Free Time", "Education", "Savings %"];

impl WeeksGrid {
    /// Lays out `life_expectancy_years` rows of 52 week cells.
    ///
    /// Cell `(year, week)` has global index `year * 52 + week` with `week` in
    /// `1..=52`; it is `Today` only when that index equals `weeks_lived`, so a
    /// `weeks_lived` outside `1..=years * 52` leaves the grid without a marker.
    pub fn build(life_expectancy_years: u32, weeks_lived: i64) -> Self {
        let weeks = i64::from(WEEKS_PER_YEAR);
        let mut cells = Vec::with_capacity(life_expectancy_years as usize);
        let mut labels = Vec::with_capacity(life_expectancy_years as usize);

        for year in 0..i64::from(life_expectancy_years) {
            let mut row = Vec::with_capacity(WEEKS_PER_YEAR as usize);
            let mut row_labels = Vec::with_capacity(WEEKS_PER_YEAR as usize);
            for week in 1..=weeks {
                let global_week = year * weeks + week;
                let status = if global_week < weeks_lived {
                    WeekStatus::Lived
                } else if global_week == weeks_lived {
                    WeekStatus::Today
                } else {
                    WeekStatus::Future
                };
                row.push(status);
                row_labels.push(format!("Age {year} | Week {week}"));
            }
            cells.push(row);
            labels.push(row_labels);
        }

        Self { cells, labels }
    }

    pub fn years(&self) -> usize {
        self.cells.len()
    }

    /// Zero-based year and one-based week of the current-week marker.
    pub fn today_cell(&self) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(year, row)| {
            row.iter()
                .position(|status| *status == WeekStatus::Today)
                .map(|idx| (year, idx + 1))
        })
    }

    pub fn count(&self, status: WeekStatus) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| **cell == status).count())
            .sum()
    }
}

fn relative(label: &str, value: f64, text: String) -> WaterfallStep {
    WaterfallStep {
        label: label.to_string(),
        value,
        text,
        measure: Measure::Relative,
    }
}

fn total(label: &str, value: f64, text: String) -> WaterfallStep {
    WaterfallStep {
        label: label.to_string(),
        value,
        text,
        measure: Measure::Total,
    }
}

/// Balance-sheet breakdown: assets and savings up, debt down, net worth as total.
pub fn build_stock_waterfall(finance: &FinancialProfile, metrics: &DerivedMetrics) -> Waterfall {
    Waterfall {
        steps: vec![
            relative(
                "Physical Assets",
                finance.physical_assets,
                plain_k(finance.physical_assets, 0),
            ),
            relative(
                "Liquid Savings",
                finance.liquid_savings,
                plain_k(finance.liquid_savings, 0),
            ),
            relative(
                "Debt (-)",
                -finance.total_debt,
                deduction_k(finance.total_debt, 0),
            ),
            total(
                "Net Worth",
                metrics.net_worth,
                plain_k(metrics.net_worth, 0),
            ),
        ],
    }
}

/// Monthly cash flow: income up, expenses down, savings as total.
pub fn build_flow_waterfall(finance: &FinancialProfile, metrics: &DerivedMetrics) -> Waterfall {
    Waterfall {
        steps: vec![
            relative(
                "Net Income",
                finance.monthly_income,
                plain_k(finance.monthly_income, 1),
            ),
            relative(
                "Fixed Expenses (-)",
                -finance.monthly_expenses,
                deduction_k(finance.monthly_expenses, 1),
            ),
            total(
                "Monthly Savings",
                metrics.monthly_savings,
                plain_k(metrics.monthly_savings, 1),
            ),
        ],
    }
}

/// Linear score capped at 100; negative inputs stay negative.
fn capped_score(value: f64, full_scale: f64) -> f64 {
    if full_scale <= 0.0 {
        return 0.0;
    }
    (value / full_scale * 100.0).min(100.0)
}

impl RadarScores {
    pub fn from_metrics(profile: &Profile, metrics: &DerivedMetrics, scales: &RadarScales) -> Self {
        Self {
            income: capped_score(profile.finance.monthly_income, scales.income_full_scale),
            wealth: capped_score(metrics.net_worth, scales.net_worth_full_scale),
            time: capped_score(f64::from(metrics.free_hours), scales.free_hours_full_scale),
            education: scales.education_score(profile.bio.education_level),
            savings: capped_score(metrics.savings_rate_percent, scales.savings_rate_full_scale),
        }
    }
}

/// Hover text for the user's radar trace, in `RADAR_AXES` order.
pub fn radar_hover_text(profile: &Profile, metrics: &DerivedMetrics) -> [String; 5] {
    [
        currency(profile.finance.monthly_income),
        currency(metrics.net_worth),
        format!("{}h/wk (actual)", metrics.free_hours),
        profile.bio.education_level.label().to_string(),
        percent(metrics.savings_rate_percent),
    ]
}
