//! Dashboard assembly: metric cards, the life progress bar and chart figures.
//!
//! Everything here is display-only. Numbers come from `core`; this module
//! decides labels, formatting and tones, using the palette and methodology
//! text supplied in [`PresentationConfig`].

mod figures;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::{currency_k, group_int};
use crate::core::{
    DerivedMetrics, Profile, RadarScores, ReferenceTable, RunwayStatus, WeeksGrid,
    build_flow_waterfall, build_stock_waterfall, compute_metrics, radar_hover_text,
};

pub use figures::{HeatmapFigure, RadarFigure, RadarTrace, WaterfallFigure, heat_value};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub neutral: String,
    pub positive: String,
    pub info: String,
    pub negative: String,
    pub warning: String,
    pub total: String,
    pub benchmark: String,
    pub week_future: String,
    pub week_lived: String,
    pub week_today: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            neutral: "#333333".to_string(),
            positive: "#2E8B57".to_string(),
            info: "#56CCF2".to_string(),
            negative: "#D32F2F".to_string(),
            warning: "#D68910".to_string(),
            total: "#1F618D".to_string(),
            benchmark: "#BDC3C7".to_string(),
            week_future: "#F4F6F7".to_string(),
            week_lived: "#E67E22".to_string(),
            week_today: "#F1C40F".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub title: String,
    pub palette: Palette,
    pub methodology: Vec<String>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: "Life Radar".to_string(),
            palette: Palette::default(),
            methodology: vec![
                "Life expectancy: CONAPO 2024 projections for Mexico (men ~72, women ~78), adjusted for infant survival.".to_string(),
                "Income and net worth: comparisons based on ENIGH (INEGI) deciles and global wealth reports (Credit Suisse).".to_string(),
                "Working time: OECD averages for Mexico (2,255 hours per year, the highest in the organization).".to_string(),
                "Savings efficiency: 20-30% of net income is considered healthy; the estimated national average is below 5%.".to_string(),
                "Runway: strict liquidity, (savings + liquid investments) / monthly expenses. Illiquid assets such as homes or cars are excluded.".to_string(),
            ],
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Info,
    Negative,
    Warning,
}

impl Tone {
    pub fn color(self, palette: &Palette) -> &str {
        match self {
            Tone::Neutral => palette.neutral.as_str(),
            Tone::Positive => palette.positive.as_str(),
            Tone::Info => palette.info.as_str(),
            Tone::Negative => palette.negative.as_str(),
            Tone::Warning => palette.warning.as_str(),
        }
    }
}

impl From<RunwayStatus> for Tone {
    fn from(value: RunwayStatus) -> Self {
        match value {
            RunwayStatus::Alert => Tone::Negative,
            RunwayStatus::Stable => Tone::Warning,
            RunwayStatus::Shielded => Tone::Positive,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub tone: Tone,
    pub color: String,
    pub caption: Option<String>,
}

impl MetricCard {
    fn new(label: &str, value: String, tone: Tone, palette: &Palette) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone,
            color: tone.color(palette).to_string(),
            caption: None,
        }
    }

    fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBar {
    pub percent: f64,
    pub start_label: String,
    pub end_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub as_of: NaiveDate,
    pub life_expectancy_years: u32,
    pub metrics: DerivedMetrics,
    pub runway_status: RunwayStatus,
    pub cards: Vec<MetricCard>,
    pub progress: ProgressBar,
    pub weeks_heatmap: HeatmapFigure,
    pub stock_waterfall: WaterfallFigure,
    pub flow_waterfall: WaterfallFigure,
    pub radar: RadarFigure,
    pub methodology: Vec<String>,
}

pub fn metric_cards(metrics: &DerivedMetrics, palette: &Palette) -> Vec<MetricCard> {
    let net_worth_tone = if metrics.net_worth > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    };
    let runway = RunwayStatus::classify(metrics.months_of_runway);

    vec![
        MetricCard::new(
            "Current Age",
            format!("{:.1} years", metrics.age_years),
            Tone::Neutral,
            palette,
        ),
        MetricCard::new(
            "Life Progress",
            format!("{:.1}%", metrics.life_percent_elapsed),
            Tone::Positive,
            palette,
        ),
        MetricCard::new(
            "Weeks Remaining",
            group_int(metrics.weeks_remaining),
            Tone::Info,
            palette,
        ),
        MetricCard::new(
            "Net Worth",
            currency_k(metrics.net_worth, 0),
            net_worth_tone,
            palette,
        )
        .with_caption("Assets - Debt"),
        MetricCard::new(
            "Runway",
            format!("{:.1} months", metrics.months_of_runway),
            runway.into(),
            palette,
        )
        .with_caption(runway.label()),
    ]
}

pub fn progress_bar(metrics: &DerivedMetrics, life_expectancy_years: u32) -> ProgressBar {
    ProgressBar {
        percent: metrics.life_percent_elapsed,
        start_label: "0 years".to_string(),
        end_label: format!("{life_expectancy_years} years"),
    }
}

/// Runs the whole pipeline for one evaluation: metrics, chart data, display.
pub fn build_dashboard(
    profile: &Profile,
    today: NaiveDate,
    reference: &ReferenceTable,
    presentation: &PresentationConfig,
) -> Dashboard {
    let palette = &presentation.palette;
    let metrics = compute_metrics(profile, today);
    let life_years = profile.bio.life_expectancy_years;

    let grid = WeeksGrid::build(life_years, metrics.weeks_lived);
    let stock = build_stock_waterfall(&profile.finance, &metrics);
    let flow = build_flow_waterfall(&profile.finance, &metrics);
    let scores = RadarScores::from_metrics(profile, &metrics, &reference.radar);
    debug!(
        weeks_lived = metrics.weeks_lived,
        net_worth = metrics.net_worth,
        today_cell = ?grid.today_cell(),
        "dashboard evaluated"
    );

    Dashboard {
        title: presentation.title.clone(),
        as_of: today,
        life_expectancy_years: life_years,
        runway_status: RunwayStatus::classify(metrics.months_of_runway),
        cards: metric_cards(&metrics, palette),
        progress: progress_bar(&metrics, life_years),
        weeks_heatmap: HeatmapFigure::from_grid(&grid, palette),
        stock_waterfall: WaterfallFigure::new("1. Your Wealth (Stock)", "Wealth", &stock, palette),
        flow_waterfall: WaterfallFigure::new(
            "2. Your Growth Engine (Flow)",
            "Flow",
            &flow,
            palette,
        ),
        radar: RadarFigure::new(
            &scores,
            radar_hover_text(profile, &metrics),
            &reference.benchmark,
            palette,
        ),
        methodology: presentation.methodology.clone(),
        metrics,
    }
}
