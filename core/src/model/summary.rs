use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::model::match_record::MatchRecord;
use crate::model::metric::{MatchMetrics, MetricSeries, Percentage};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    pub matches: usize,
    pub date_range: DateRange,
    pub wins: usize,
    pub losses: usize,
    pub win_pct: Percentage,
    pub avg_aces: Option<f64>,
    pub avg_double_faults: Option<f64>,

    // Totals-weighted: sum of numerators over sum of denominators.
    pub first_serve_pct: Percentage,
    pub first_serve_pts_won_pct: Percentage,
    pub second_serve_pts_won_pct: Percentage,
    pub break_points_saved_pct: Percentage,
}

/// Payload of the `summary` mode; this is what lands in `summary.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub summary: SeasonSummary,
    pub match_dates: Vec<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub record: MatchRecord,
    pub metrics: MatchMetrics,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub series: MetricSeries,
    pub path: std::path::PathBuf,
}
