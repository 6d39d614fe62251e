use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::metric::Metric;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("type error at row {row}, column '{column}': {reason} (got '{value}')")]
    Type {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("date error{}: cannot parse '{value}' as YYYY-MM-DD", row_suffix(.row))]
    Date { row: Option<usize>, value: String },

    #[error("dataset contains no matches")]
    EmptyDataset,

    #[error("{}", not_found_message(.date, .candidates))]
    NotFound { date: NaiveDate, candidates: usize },

    #[error("unknown metric '{name}'; valid metrics are: {}", Metric::names().join(", "))]
    UnknownMetric { name: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {}, column 'date'", row),
        None => String::new(),
    }
}

fn not_found_message(date: &NaiveDate, candidates: &usize) -> String {
    if *candidates == 0 {
        format!("no match found for date {}", date)
    } else {
        format!(
            "date {} is ambiguous: {} matches share it",
            date, candidates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        let missing = StatsError::NotFound { date, candidates: 0 };
        assert_eq!(missing.to_string(), "no match found for date 2025-10-08");

        let ambiguous = StatsError::NotFound { date, candidates: 2 };
        assert!(ambiguous.to_string().contains("ambiguous"));
        assert!(ambiguous.to_string().contains("2 matches"));
    }

    #[test]
    fn test_date_error_mentions_row_when_known() {
        let err = StatsError::Date { row: Some(3), value: "yesterday".to_string() };
        assert_eq!(
            err.to_string(),
            "date error at row 3, column 'date': cannot parse 'yesterday' as YYYY-MM-DD"
        );

        let err = StatsError::Date { row: None, value: "2025-13-01".to_string() };
        assert_eq!(err.to_string(), "date error: cannot parse '2025-13-01' as YYYY-MM-DD");
    }
}
