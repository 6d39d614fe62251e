use std::fs;
use std::path::Path;

use tempfile::Builder;
use tracing::info;

use crate::error::{Result, StatsError};
use crate::model::metric::MetricSeries;
use crate::model::summary::SummaryReport;

pub trait SummaryWriter {
    fn write_summary(&self, report: &SummaryReport, target: &Path) -> Result<()>;
}

pub trait ChartRenderer {
    /// File extension of the produced chart, without the dot.
    fn extension(&self) -> &'static str;
    fn render(&self, series: &MetricSeries, target: &Path) -> Result<()>;
}

/// Writes `target` through a temp file in the same directory, renamed into
/// place once `write` succeeds. The directory is created if absent and an
/// existing file is replaced.
pub fn write_atomic<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;

    // Keep the target's extension; some encoders pick the format from it.
    let suffix = target
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let temp = Builder::new()
        .prefix(".tmp-")
        .suffix(&suffix)
        .tempfile_in(parent)
        .map_err(|e| StatsError::io(parent, e))?;

    write(temp.path())?;

    temp.persist(target)
        .map_err(|e| StatsError::io(target, e.error))?;
    Ok(())
}

#[derive(Clone, Default)]
pub struct JsonSummaryWriter;

impl SummaryWriter for JsonSummaryWriter {
    fn write_summary(&self, report: &SummaryReport, target: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(report)
            .map_err(|e| StatsError::io(target, e.into()))?;
        write_atomic(target, |path| {
            fs::write(path, &content).map_err(|e| StatsError::io(path, e))
        })?;
        info!("Wrote summary to {:?}", target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::summary::{DateRange, SeasonSummary};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn report() -> SummaryReport {
        let date = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        SummaryReport {
            summary: SeasonSummary {
                matches: 1,
                date_range: DateRange { start: date, end: date },
                wins: 1,
                losses: 0,
                win_pct: Some(100.0),
                avg_aces: Some(5.0),
                avg_double_faults: None,
                first_serve_pct: Some(80.0),
                first_serve_pts_won_pct: Some(75.0),
                second_serve_pts_won_pct: Some(50.0),
                break_points_saved_pct: None,
            },
            match_dates: vec![date],
        }
    }

    #[test]
    fn test_json_writer_creates_directory_and_writes_nulls() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("results").join("summary.json");

        JsonSummaryWriter.write_summary(&report(), &target).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["first_serve_pct"], 80.0);
        assert!(value["summary"]["break_points_saved_pct"].is_null());
        assert_eq!(value["summary"]["date_range"]["start"], "2025-10-08");
        assert_eq!(value["match_dates"][0], "2025-10-08");
    }

    #[test]
    fn test_json_writer_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("summary.json");
        fs::write(&target, "stale").unwrap();

        JsonSummaryWriter.write_summary(&report(), &target).unwrap();
        JsonSummaryWriter.write_summary(&report(), &target).unwrap();

        let parsed: SummaryReport =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(parsed, report());

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chart.png");

        let result = write_atomic(&target, |_| {
            Err(StatsError::io("chart.png", std::io::Error::other("encoder failed")))
        });

        assert!(result.is_err());
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_temp_file_keeps_extension() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chart.png");

        write_atomic(&target, |path| {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
            fs::write(path, b"png").map_err(|e| StatsError::io(path, e))
        })
        .unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"png");
    }
}
