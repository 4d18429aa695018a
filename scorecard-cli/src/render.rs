//! Text rendering of chart data

use scorecard_core::types::{ChartSet, PieChart, SeriesChart, MAX_SCORE};

/// Width of a full (100 mark) bar.
const BAR_WIDTH: usize = 40;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render all three views, separated by blank lines.
pub fn render_charts(charts: &ChartSet) -> String {
    [
        render_bar(&charts.bar),
        render_line(&charts.line),
        render_pie(&charts.pie),
    ]
    .join("\n")
}

/// Horizontal bars scaled against the maximum mark.
pub fn render_bar(chart: &SeriesChart) -> String {
    let mut out = heading(&chart.title);
    out.push_str(&format!("{} / {}\n", chart.x_label, chart.y_label));
    for point in &chart.points {
        let len = scaled(f64::from(point.value) / f64::from(MAX_SCORE), BAR_WIDTH);
        out.push_str(&format!(
            "{:<5} |{:<width$}| {:>3}\n",
            point.subject.label(),
            "█".repeat(len),
            point.value,
            width = BAR_WIDTH
        ));
    }
    out
}

/// A sparkline over the subjects followed by the values in order.
pub fn render_line(chart: &SeriesChart) -> String {
    let mut out = heading(&chart.title);
    let spark: String = chart
        .points
        .iter()
        .map(|p| {
            let level = scaled(f64::from(p.value) / f64::from(MAX_SCORE), SPARK_LEVELS.len() - 1);
            SPARK_LEVELS[level]
        })
        .collect();
    out.push_str(&spark);
    out.push('\n');
    let series: Vec<String> = chart
        .points
        .iter()
        .map(|p| format!("{} {}", p.subject.label(), p.value))
        .collect();
    out.push_str(&series.join(" -> "));
    out.push('\n');
    out
}

/// Percentages of the total, each with a proportional bar.
pub fn render_pie(chart: &PieChart) -> String {
    let mut out = heading(&chart.title);
    for slice in &chart.slices {
        let len = scaled(slice.share, BAR_WIDTH);
        out.push_str(&format!(
            "{:<5} {:>5.1}% {}\n",
            slice.subject.label(),
            slice.share * 100.0,
            "▒".repeat(len)
        ));
    }
    out
}

fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "─".repeat(title.chars().count()))
}

/// Map a fraction in `0.0..=1.0` onto `0..=max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled(fraction: f64, max: usize) -> usize {
    ((fraction.clamp(0.0, 1.0) * max as f64).round() as usize).min(max)
}
