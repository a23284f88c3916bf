use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_WEEK: u32 = 168;
pub const SLEEP_HOURS_PER_WEEK: u32 = 56;
pub const WEEKS_PER_YEAR: u32 = 52;
pub const DAYS_PER_YEAR: f64 = 365.25;

pub const MIN_LIFE_EXPECTANCY: u32 = 60;
pub const MAX_LIFE_EXPECTANCY: u32 = 100;
pub const MAX_WORK_HOURS: u32 = 80;
pub const MAX_COMMUTE_HOURS: u32 = 30;
pub const MAX_MAINTENANCE_HOURS: u32 = 50;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiologicalProfile {
    Male,
    Female,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    /// Stable key used by the education score table.
    pub fn slug(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high-school",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Doctorate => "doctorate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelor => "Bachelor's",
            EducationLevel::Master => "Master's",
            EducationLevel::Doctorate => "Doctorate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiographicalProfile {
    pub birth_date: NaiveDate,
    pub biological_profile: BiologicalProfile,
    pub education_level: EducationLevel,
    pub life_expectancy_years: u32,
}

/// Monthly flows and balance-sheet stocks, all in the same currency unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub physical_assets: f64,
    pub liquid_savings: f64,
    pub total_debt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAllocationProfile {
    pub work_hours: u32,
    pub commute_hours: u32,
    pub maintenance_hours: u32,
}

impl TimeAllocationProfile {
    pub fn occupied_hours(&self) -> u32 {
        self.work_hours
            .saturating_add(self.commute_hours)
            .saturating_add(self.maintenance_hours)
    }

    /// Waking hours left after work, commute and maintenance, floored at zero.
    pub fn free_hours(&self) -> u32 {
        (HOURS_PER_WEEK - SLEEP_HOURS_PER_WEEK).saturating_sub(self.occupied_hours())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub bio: BiographicalProfile,
    pub finance: FinancialProfile,
    pub time: TimeAllocationProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub age_years: f64,
    pub weeks_lived: i64,
    pub total_weeks_expected: i64,
    pub weeks_remaining: i64,
    pub life_percent_elapsed: f64,
    pub net_worth: f64,
    pub months_of_runway: f64,
    pub monthly_savings: f64,
    pub savings_rate_percent: f64,
    pub free_hours: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunwayStatus {
    Alert,
    Stable,
    Shielded,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Lived,
    Today,
    Future,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Relative,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallStep {
    pub label: String,
    pub value: f64,
    pub text: String,
    pub measure: Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waterfall {
    pub steps: Vec<WaterfallStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeksGrid {
    pub cells: Vec<Vec<WeekStatus>>,
    pub labels: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarScores {
    pub income: f64,
    pub wealth: f64,
    pub time: f64,
    pub education: f64,
    pub savings: f64,
}

impl RadarScores {
    /// Scores in axis order: income, net worth, free time, education, savings.
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.income,
            self.wealth,
            self.time,
            self.education,
            self.savings,
        ]
    }
}
