pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use error::{Result, StatsError};
pub use model::match_record::{MatchRecord, MatchResult};
pub use model::metric::{MatchMetrics, Metric, MetricSeries, Percentage, SeriesPoint};
pub use model::summary::{DateRange, MatchReport, PlotReport, SeasonSummary, SummaryReport};
pub use repository::{load_matches, parse_matches, write_atomic, ChartRenderer, JsonSummaryWriter, SummaryWriter};
pub use service::aggregator::aggregate;
pub use service::metrics::{compute_metrics, percentage};
pub use usecase::report::{parse_match_date, DEFAULT_OUTPUT_DIR, Report, ReportConfig, ReportRequest, ReportService};
