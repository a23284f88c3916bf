//! Plotly trace descriptions for the dashboard charts.
//!
//! Field names follow Plotly's trace attributes so the page can hand each
//! figure to `Plotly.react` without reshaping.

use serde::Serialize;

use super::Palette;
use crate::core::{Benchmark, Measure, RADAR_AXES, RadarScores, Waterfall, WeekStatus, WeeksGrid};

const HEAT_FUTURE: f64 = 0.1;
const HEAT_LIVED: f64 = 0.6;
const HEAT_TODAY: f64 = 0.9;

pub fn heat_value(status: WeekStatus) -> f64 {
    match status {
        WeekStatus::Lived => HEAT_LIVED,
        WeekStatus::Today => HEAT_TODAY,
        WeekStatus::Future => HEAT_FUTURE,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapFigure {
    pub z: Vec<Vec<f64>>,
    pub x: Vec<u32>,
    pub y: Vec<u32>,
    pub customdata: Vec<Vec<String>>,
    pub colorscale: Vec<(f64, String)>,
    pub today: Option<(usize, usize)>,
}

impl HeatmapFigure {
    pub fn from_grid(grid: &WeeksGrid, palette: &Palette) -> Self {
        let z = grid
            .cells
            .iter()
            .map(|row| row.iter().copied().map(heat_value).collect())
            .collect();
        // Stepped scale: each status value lands inside its own flat band.
        let colorscale = vec![
            (0.0, palette.week_future.clone()),
            (0.2, palette.week_future.clone()),
            (0.2001, palette.week_lived.clone()),
            (0.8, palette.week_lived.clone()),
            (0.8001, palette.week_today.clone()),
            (1.0, palette.week_today.clone()),
        ];

        Self {
            z,
            x: (1..=52).collect(),
            y: (0..grid.years() as u32).collect(),
            customdata: grid.labels.clone(),
            colorscale,
            today: grid.today_cell(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallFigure {
    pub title: String,
    pub name: String,
    pub measure: Vec<Measure>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub increasing_color: String,
    pub decreasing_color: String,
    pub totals_color: String,
}

impl WaterfallFigure {
    pub fn new(title: &str, name: &str, waterfall: &Waterfall, palette: &Palette) -> Self {
        let steps = &waterfall.steps;
        Self {
            title: title.to_string(),
            name: name.to_string(),
            measure: steps.iter().map(|s| s.measure).collect(),
            x: steps.iter().map(|s| s.label.clone()).collect(),
            y: steps.iter().map(|s| s.value).collect(),
            text: steps.iter().map(|s| s.text.clone()).collect(),
            increasing_color: palette.positive.clone(),
            decreasing_color: palette.negative.clone(),
            totals_color: palette.total.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarTrace {
    pub name: String,
    pub r: Vec<f64>,
    pub hovertext: Vec<String>,
    pub line_color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarFigure {
    pub theta: Vec<String>,
    pub radial_range: [f64; 2],
    pub traces: Vec<RadarTrace>,
}

impl RadarFigure {
    /// Benchmark trace first so the user's polygon draws on top.
    pub fn new(
        scores: &RadarScores,
        hover_text: [String; 5],
        benchmark: &Benchmark,
        palette: &Palette,
    ) -> Self {
        Self {
            theta: RADAR_AXES.iter().map(|axis| axis.to_string()).collect(),
            radial_range: [0.0, 100.0],
            traces: vec![
                RadarTrace {
                    name: benchmark.name.clone(),
                    r: benchmark.scores.to_vec(),
                    hovertext: benchmark.hover_text.to_vec(),
                    line_color: palette.benchmark.clone(),
                },
                RadarTrace {
                    name: "You".to_string(),
                    r: scores.to_array().to_vec(),
                    hovertext: hover_text.to_vec(),
                    line_color: palette.positive.clone(),
                },
            ],
        }
    }
}
