mod charts;
mod engine;
pub mod format;
mod reference;
mod types;

pub use charts::{RADAR_AXES, build_flow_waterfall, build_stock_waterfall, radar_hover_text};
pub use engine::{compute_metrics, months_of_runway, net_worth, savings_rate_percent};
pub use reference::{Benchmark, LifeExpectancyBaselines, RadarScales, ReferenceTable};
pub use types::{
    BiographicalProfile, BiologicalProfile, DerivedMetrics, EducationLevel, FinancialProfile,
    MAX_COMMUTE_HOURS, MAX_LIFE_EXPECTANCY, MAX_MAINTENANCE_HOURS, MAX_WORK_HOURS,
    MIN_LIFE_EXPECTANCY, Measure, Profile, RadarScores, RunwayStatus, TimeAllocationProfile,
    Waterfall, WaterfallStep, WeekStatus, WeeksGrid,
};
