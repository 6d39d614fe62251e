use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tennis_stats_core::{
    MatchReport, Metric, Percentage, PlotReport, Report, SeasonSummary, SummaryReport,
};

/// Console rendering of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Tabled, Debug, PartialEq)]
struct Row {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl Row {
    fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

pub fn fmt_pct(value: Percentage) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "N/A".to_string(),
    }
}

fn fmt_avg(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "N/A".to_string())
}

fn fmt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn summary_rows(summary: &SeasonSummary) -> Vec<Row> {
    let range = &summary.date_range;
    vec![
        Row::new("Matches", summary.matches.to_string()),
        Row::new("Dates", format!("{} to {}", range.start, range.end)),
        Row::new("Wins / Losses", format!("{} / {}", summary.wins, summary.losses)),
        Row::new("Win percentage", fmt_pct(summary.win_pct)),
        Row::new("Average aces", fmt_avg(summary.avg_aces)),
        Row::new("Average double faults", fmt_avg(summary.avg_double_faults)),
        Row::new(Metric::FirstServePct.label(), fmt_pct(summary.first_serve_pct)),
        Row::new(Metric::FirstServePtsWonPct.label(), fmt_pct(summary.first_serve_pts_won_pct)),
        Row::new(Metric::SecondServePtsWonPct.label(), fmt_pct(summary.second_serve_pts_won_pct)),
        Row::new(Metric::BreakPointsSavedPct.label(), fmt_pct(summary.break_points_saved_pct)),
    ]
}

fn match_rows(report: &MatchReport) -> Vec<Row> {
    let record = &report.record;
    let mut rows = vec![
        Row::new("Date", record.date.to_string()),
        Row::new("Opponent", fmt_text(&record.opponent)),
        Row::new("Surface", fmt_text(&record.surface)),
        Row::new("Result", record.result.map(|r| r.as_str()).unwrap_or("-")),
        Row::new("Score", fmt_text(&record.score)),
        Row::new("Aces", record.aces.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())),
        Row::new(
            "Double faults",
            record.double_faults.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for metric in Metric::ALL {
        rows.push(Row::new(metric.label(), fmt_pct(report.metrics.get(metric))));
    }
    rows
}

fn print_rows(title: &str, rows: Vec<Row>) {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("=== {} ===", title);
    println!("{}", table);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(report: &SummaryReport, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_rows("Summary", summary_rows(&report.summary));
            println!("\nWrote: {}", path.display());
        }
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

fn print_match(report: &MatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_rows("Match", match_rows(report)),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

fn print_plot(report: &PlotReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let total = report.series.points.len();
            let plotted = report.series.defined_points().count();
            if plotted < total {
                println!(
                    "{} of {} matches have no {} value and were skipped",
                    total - plotted,
                    total,
                    report.series.metric
                );
            }
            println!("Wrote: {}", report.path.display());
        }
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match report {
        Report::Summary { report, path } => print_summary(report, path, format),
        Report::Match(report) => print_match(report, format),
        Report::Plot(report) => print_plot(report, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tennis_stats_core::{compute_metrics, MatchRecord, MatchResult};

    #[test]
    fn test_fmt_pct_renders_undefined_as_na() {
        assert_eq!(fmt_pct(Some(60.0)), "60.0%");
        assert_eq!(fmt_pct(Some(6.3)), "6.3%");
        assert_eq!(fmt_pct(None), "N/A");
    }

    #[test]
    fn test_match_rows_include_all_metrics() {
        let mut record = MatchRecord::new(NaiveDate::from_ymd_opt(2025, 10, 8).unwrap());
        record.opponent = Some("Smith".to_string());
        record.result = Some(MatchResult::Loss);
        record.first_serve_in = 3;
        record.first_serve_total = 4;
        let report = MatchReport { metrics: compute_metrics(&record), record };

        let rows = match_rows(&report);
        assert_eq!(rows[0], Row::new("Date", "2025-10-08"));
        assert_eq!(rows[1], Row::new("Opponent", "Smith"));
        assert_eq!(rows[2], Row::new("Surface", "-"));
        assert_eq!(rows[3], Row::new("Result", "L"));
        assert!(rows.contains(&Row::new("1st serve in", "75.0%")));
        assert!(rows.contains(&Row::new("Break points saved", "N/A")));
        assert_eq!(rows.len(), 7 + Metric::ALL.len());
    }
}
