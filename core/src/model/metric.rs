use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// A percentage in [0, 100] with one decimal, or `None` when the
/// denominator was zero.
pub type Percentage = Option<f64>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    FirstServePct,
    FirstServePtsWonPct,
    SecondServePtsWonPct,
    BreakPointsSavedPct,
}

const METRIC_NAMES: &[&str] = &[
    "first_serve_pct",
    "first_serve_pts_won_pct",
    "second_serve_pts_won_pct",
    "break_points_saved_pct",
];

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::FirstServePct,
        Metric::FirstServePtsWonPct,
        Metric::SecondServePtsWonPct,
        Metric::BreakPointsSavedPct,
    ];

    pub fn names() -> &'static [&'static str] {
        METRIC_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::FirstServePct => METRIC_NAMES[0],
            Metric::FirstServePtsWonPct => METRIC_NAMES[1],
            Metric::SecondServePtsWonPct => METRIC_NAMES[2],
            Metric::BreakPointsSavedPct => METRIC_NAMES[3],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::FirstServePct => "1st serve in",
            Metric::FirstServePtsWonPct => "1st serve points won",
            Metric::SecondServePtsWonPct => "2nd serve points won",
            Metric::BreakPointsSavedPct => "Break points saved",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| StatsError::UnknownMetric { name: s.to_string() })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MatchMetrics {
    pub first_serve_pct: Percentage,
    pub first_serve_pts_won_pct: Percentage,
    pub second_serve_pts_won_pct: Percentage,
    pub break_points_saved_pct: Percentage,
}

impl MatchMetrics {
    pub fn get(&self, metric: Metric) -> Percentage {
        match metric {
            Metric::FirstServePct => self.first_serve_pct,
            Metric::FirstServePtsWonPct => self.first_serve_pts_won_pct,
            Metric::SecondServePtsWonPct => self.second_serve_pts_won_pct,
            Metric::BreakPointsSavedPct => self.break_points_saved_pct,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Percentage,
}

/// One metric over time, in chronological order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
}

impl MetricSeries {
    pub fn defined_points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().filter_map(|p| p.value.map(|v| (p.date, v)))
    }
}
