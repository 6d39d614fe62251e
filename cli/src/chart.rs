use std::error::Error;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use tennis_stats_core::{write_atomic, ChartRenderer, MetricSeries, StatsError};

const LINE_COLOR: RGBColor = RGBColor(30, 144, 255);

/// Renders a metric series as a PNG line chart. Undefined values break the
/// line instead of being drawn as zero.
pub struct PngChartRenderer {
    width: u32,
    height: u32,
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl PngChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ChartRenderer for PngChartRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, series: &MetricSeries, target: &Path) -> Result<(), StatsError> {
        write_atomic(target, |path| {
            draw_chart(series, path, (self.width, self.height))
                .map_err(|e| StatsError::io(target, std::io::Error::other(format!("plotting error: {}", e))))
        })
    }
}

/// Contiguous runs of defined points, as (days since `origin`, value).
fn segments(series: &MetricSeries, origin: NaiveDate) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in &series.points {
        match point.value {
            Some(v) => current.push(((point.date - origin).num_days() as f64, v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn draw_chart(series: &MetricSeries, path: &Path, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let (origin, last) = match (series.points.first(), series.points.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Err("no points to plot".into()),
    };
    let span = (last - origin).num_days() as f64;
    // Made can exceed attempted in hand-entered data; keep those points visible.
    let y_max = series.defined_points().map(|(_, v)| v).fold(100.0, f64::max);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let metric = series.metric.name();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} over time", metric), ("sans-serif", 28))
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d(-1.0..(span + 1.0), 0.0..y_max)?;

    let date_label = |x: &f64| (origin + Duration::days(x.round() as i64)).format("%Y-%m-%d").to_string();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(metric)
        .x_label_formatter(&date_label)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    for run in segments(series, origin) {
        chart.draw_series(LineSeries::new(run.iter().copied(), &LINE_COLOR))?;
        chart.draw_series(run.into_iter().map(|(x, y)| Circle::new((x, y), 4, LINE_COLOR.filled())))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tennis_stats_core::{Metric, SeriesPoint};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    #[test]
    fn test_segments_split_on_undefined_values() {
        let series = MetricSeries {
            metric: Metric::BreakPointsSavedPct,
            points: vec![
                SeriesPoint { date: day(1), value: Some(50.0) },
                SeriesPoint { date: day(3), value: Some(75.0) },
                SeriesPoint { date: day(4), value: None },
                SeriesPoint { date: day(10), value: Some(0.0) },
                SeriesPoint { date: day(12), value: None },
            ],
        };

        let runs = segments(&series, day(1));
        assert_eq!(runs, vec![vec![(0.0, 50.0), (2.0, 75.0)], vec![(9.0, 0.0)]]);
    }

    #[test]
    fn test_all_undefined_has_no_segments() {
        let series = MetricSeries {
            metric: Metric::FirstServePct,
            points: vec![SeriesPoint { date: day(1), value: None }],
        };
        assert!(segments(&series, day(1)).is_empty());
    }
}
