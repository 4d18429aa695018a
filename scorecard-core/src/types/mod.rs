//! Domain types

mod chart;
mod import;
mod score;
mod user;

pub use chart::{
    ChartPoint, ChartSet, PieChart, PieSlice, SeriesChart, DISTRIBUTION_TITLE, PER_SUBJECT_TITLE,
};
pub use import::{ImportFailure, ImportReport, ImportSource};
pub use score::{ScoreRecord, Scores, Subject, MAX_SCORE};
pub use user::{Session, User};
