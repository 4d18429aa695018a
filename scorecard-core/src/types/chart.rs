//! Chart data derived from a score record
//!
//! Rendering is left to the frontend; these types only carry the series.

use serde::{Deserialize, Serialize};

use super::score::{ScoreRecord, Subject};

/// Title shared by the bar and line views.
pub const PER_SUBJECT_TITLE: &str = "Marks per Subject";
/// Title of the pie view.
pub const DISTRIBUTION_TITLE: &str = "Marks Distribution";

/// One category on a bar or line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub subject: Subject,
    pub value: u8,
}

/// Categorical or sequential series over the four subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

/// One pie slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub subject: Subject,
    pub value: u8,
    /// Fraction of the total in `0.0..=1.0`.
    pub share: f64,
}

/// Proportional view over the four subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// The three views shown for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub bar: SeriesChart,
    pub line: SeriesChart,
    pub pie: PieChart,
}

impl ChartSet {
    /// Build all three views from a record.
    #[must_use]
    pub fn from_record(record: &ScoreRecord) -> Self {
        let points: Vec<ChartPoint> = record
            .scores
            .iter()
            .map(|(subject, value)| ChartPoint { subject, value })
            .collect();

        let total = f64::from(record.scores.total());
        let slices = points
            .iter()
            .map(|p| PieSlice {
                subject: p.subject,
                value: p.value,
                share: if total > 0.0 {
                    f64::from(p.value) / total
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            bar: series(points.clone()),
            line: series(points),
            pie: PieChart {
                title: DISTRIBUTION_TITLE.to_string(),
                slices,
            },
        }
    }
}

fn series(points: Vec<ChartPoint>) -> SeriesChart {
    SeriesChart {
        title: PER_SUBJECT_TITLE.to_string(),
        x_label: "Subject".to_string(),
        y_label: "Marks".to_string(),
        points,
    }
}
