use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{Result, StatsError};
use crate::model::match_record::MatchRecord;
use crate::model::metric::{Metric, MetricSeries, SeriesPoint};
use crate::model::summary::{MatchReport, PlotReport, SummaryReport};
use crate::repository::csv_loader::parse_iso_date;
use crate::repository::output::{ChartRenderer, SummaryWriter};
use crate::service::aggregator::aggregate;
use crate::service::metrics::compute_metrics;

pub const DEFAULT_OUTPUT_DIR: &str = "results";
const SUMMARY_FILE_NAME: &str = "summary.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ReportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }

    pub fn chart_path(&self, metric: Metric, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", metric.name(), extension))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRequest {
    Summary,
    Match { date: NaiveDate },
    Plot { metric: Metric },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Summary { report: SummaryReport, path: PathBuf },
    Match(MatchReport),
    Plot(PlotReport),
}

/// Parses a `--date` argument.
pub fn parse_match_date(input: &str) -> Result<NaiveDate> {
    parse_iso_date(input.trim()).ok_or_else(|| StatsError::Date {
        row: None,
        value: input.to_string(),
    })
}

pub struct ReportService<W: SummaryWriter, C: ChartRenderer> {
    config: ReportConfig,
    writer: W,
    renderer: C,
}

impl<W: SummaryWriter, C: ChartRenderer> ReportService<W, C> {
    pub fn new(config: ReportConfig, writer: W, renderer: C) -> Self {
        Self { config, writer, renderer }
    }

    pub fn run(&self, records: &[MatchRecord], request: ReportRequest) -> Result<Report> {
        debug!(?request, records = records.len(), "running report");
        match request {
            ReportRequest::Summary => {
                let (report, path) = self.summary(records)?;
                Ok(Report::Summary { report, path })
            }
            ReportRequest::Match { date } => self.match_report(records, date).map(Report::Match),
            ReportRequest::Plot { metric } => self.plot(records, metric).map(Report::Plot),
        }
    }

    pub fn summary(&self, records: &[MatchRecord]) -> Result<(SummaryReport, PathBuf)> {
        let report = SummaryReport {
            summary: aggregate(records)?,
            match_dates: records.iter().map(|r| r.date).collect(),
        };
        let path = self.config.summary_path();
        self.writer.write_summary(&report, &path)?;
        Ok((report, path))
    }

    /// The date must identify exactly one record; duplicates are an error
    /// rather than an arbitrary pick.
    pub fn match_report(&self, records: &[MatchRecord], date: NaiveDate) -> Result<MatchReport> {
        let hits: Vec<&MatchRecord> = records.iter().filter(|r| r.date == date).collect();
        match hits.as_slice() {
            [record] => Ok(MatchReport {
                record: (*record).clone(),
                metrics: compute_metrics(record),
            }),
            _ => Err(StatsError::NotFound { date, candidates: hits.len() }),
        }
    }

    pub fn plot(&self, records: &[MatchRecord], metric: Metric) -> Result<PlotReport> {
        let series = metric_series(records, metric)?;
        let path = self.config.chart_path(metric, self.renderer.extension());
        self.renderer.render(&series, &path)?;
        info!("Wrote {} chart to {:?}", metric, path);
        Ok(PlotReport { series, path })
    }
}

/// One point per record in chronological order. Undefined values stay in
/// the series as `None` so renderers can leave a gap.
pub fn metric_series(records: &[MatchRecord], metric: Metric) -> Result<MetricSeries> {
    if records.is_empty() {
        return Err(StatsError::EmptyDataset);
    }
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.date,
            value: compute_metrics(r).get(metric),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    Ok(MetricSeries { metric, points })
}
