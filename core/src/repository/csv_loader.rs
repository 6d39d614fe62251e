use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{Result, StatsError};
use crate::model::match_record::{MatchRecord, MatchResult};

const DATE_COLUMN: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

const COUNTER_COLUMNS: [&str; 8] = [
    "first_serve_in",
    "first_serve_total",
    "first_serve_points_won",
    "first_serve_points_total",
    "second_serve_points_won",
    "second_serve_points_total",
    "break_points_saved",
    "break_points_faced",
];

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    counters: [usize; 8],
    opponent: Option<usize>,
    surface: Option<usize>,
    result: Option<usize>,
    score: Option<usize>,
    aces: Option<usize>,
    double_faults: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let mut missing = Vec::new();
        let date = find(DATE_COLUMN);
        if date.is_none() {
            missing.push(DATE_COLUMN);
        }
        let mut counters = [0usize; 8];
        for (slot, name) in counters.iter_mut().zip(COUNTER_COLUMNS) {
            match find(name) {
                Some(idx) => *slot = idx,
                None => missing.push(name),
            }
        }

        match date {
            Some(date) if missing.is_empty() => Ok(Columns {
                date,
                counters,
                opponent: find("opponent"),
                surface: find("surface"),
                result: find("result"),
                score: find("score"),
                aces: find("aces"),
                double_faults: find("double_faults"),
            }),
            _ => Err(StatsError::Schema(format!(
                "missing required columns: {}",
                missing.join(", ")
            ))),
        }
    }

    fn parse_row(&self, row: &StringRecord, row_index: usize) -> Result<MatchRecord> {
        let date = parse_date_cell(cell(row, self.date), row_index)?;

        let mut values = [0u32; 8];
        for ((value, idx), name) in values.iter_mut().zip(self.counters).zip(COUNTER_COLUMNS) {
            *value = parse_counter(cell(row, idx), name, row_index)?;
        }
        let [first_serve_in, first_serve_total, first_serve_points_won, first_serve_points_total, second_serve_points_won, second_serve_points_total, break_points_saved, break_points_faced] =
            values;

        let text = |idx: Option<usize>| {
            idx.map(|i| cell(row, i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let result = match text(self.result) {
            Some(raw) => Some(MatchResult::parse(&raw).ok_or_else(|| StatsError::Type {
                row: row_index,
                column: "result".to_string(),
                value: raw.clone(),
                reason: "expected W or L".to_string(),
            })?),
            None => None,
        };

        Ok(MatchRecord {
            date,
            opponent: text(self.opponent),
            surface: text(self.surface),
            result,
            score: text(self.score),
            aces: parse_optional_counter(row, self.aces, "aces", row_index)?,
            double_faults: parse_optional_counter(row, self.double_faults, "double_faults", row_index)?,
            first_serve_in,
            first_serve_total,
            first_serve_points_won,
            first_serve_points_total,
            second_serve_points_won,
            second_serve_points_total,
            break_points_saved,
            break_points_faced,
        })
    }
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

/// Strict `YYYY-MM-DD`: chrono alone also accepts unpadded fields like `2025-1-5`.
pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_date_cell(raw: &str, row_index: usize) -> Result<NaiveDate> {
    parse_iso_date(raw).ok_or_else(|| StatsError::Date {
        row: Some(row_index),
        value: raw.to_string(),
    })
}

fn parse_counter(raw: &str, column: &str, row_index: usize) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| {
        let reason = if raw.is_empty() {
            "missing value"
        } else if raw.parse::<i64>().is_ok_and(|v| v < 0) {
            "counter must not be negative"
        } else {
            "expected a non-negative integer"
        };
        StatsError::Type {
            row: row_index,
            column: column.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        }
    })
}

fn parse_optional_counter(
    row: &StringRecord,
    idx: Option<usize>,
    column: &str,
    row_index: usize,
) -> Result<Option<u32>> {
    match idx.map(|i| cell(row, i)) {
        Some(raw) if !raw.is_empty() => parse_counter(raw, column, row_index).map(Some),
        _ => Ok(None),
    }
}

fn csv_error(err: csv::Error, row_index: Option<usize>) -> StatsError {
    let location = row_index
        .map(|r| format!("row {}: ", r))
        .unwrap_or_default();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => StatsError::io(PathBuf::from("<input>"), source),
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => StatsError::Schema(format!(
            "{}expected {} fields, found {}",
            location, expected_len, len
        )),
        csv::ErrorKind::Utf8 { .. } => {
            StatsError::Schema(format!("{}input is not valid UTF-8", location))
        }
        other => StatsError::Schema(format!("{}malformed CSV: {:?}", location, other)),
    }
}

/// Parses match rows from any CSV source, keeping input order.
///
/// Fails on the first invalid row; errors carry the 1-based data row index
/// and the offending column.
pub fn parse_matches<R: Read>(source: R) -> Result<Vec<MatchRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| csv_error(e, None))?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row_index = i + 1;
        let row = row.map_err(|e| csv_error(e, Some(row_index)))?;
        let record = columns.parse_row(&row, row_index)?;

        for (name, made, attempted) in record.counter_pairs() {
            if made > attempted {
                warn!(row = row_index, counter = name, made, attempted, "made exceeds attempted");
            }
        }
        records.push(record);
    }

    debug!(count = records.len(), "loaded match records");
    Ok(records)
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
    parse_matches(file).map_err(|err| match err {
        StatsError::Io { source, .. } => StatsError::io(path, source),
        other => other,
    })
}
