use tracing::debug;

use crate::error::{Result, StatsError};
use crate::model::match_record::{MatchRecord, MatchResult};
use crate::model::summary::{DateRange, SeasonSummary};
use crate::service::metrics::percentage;

#[derive(Default)]
struct Totals {
    first_serve_in: u64,
    first_serve_total: u64,
    first_serve_points_won: u64,
    first_serve_points_total: u64,
    second_serve_points_won: u64,
    second_serve_points_total: u64,
    break_points_saved: u64,
    break_points_faced: u64,
}

impl Totals {
    fn add(&mut self, r: &MatchRecord) {
        self.first_serve_in += u64::from(r.first_serve_in);
        self.first_serve_total += u64::from(r.first_serve_total);
        self.first_serve_points_won += u64::from(r.first_serve_points_won);
        self.first_serve_points_total += u64::from(r.first_serve_points_total);
        self.second_serve_points_won += u64::from(r.second_serve_points_won);
        self.second_serve_points_total += u64::from(r.second_serve_points_total);
        self.break_points_saved += u64::from(r.break_points_saved);
        self.break_points_faced += u64::from(r.break_points_faced);
    }
}

fn mean(values: impl Iterator<Item = u32>) -> Option<f64> {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + u64::from(v), c + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Season percentages are totals-weighted: every numerator and denominator
/// is summed across matches first, then divided once.
pub fn aggregate(records: &[MatchRecord]) -> Result<SeasonSummary> {
    let first = records.first().ok_or(StatsError::EmptyDataset)?;

    let mut totals = Totals::default();
    let mut range = DateRange { start: first.date, end: first.date };
    let mut wins = 0;
    let mut losses = 0;

    for record in records {
        totals.add(record);
        range.start = range.start.min(record.date);
        range.end = range.end.max(record.date);
        match record.result {
            Some(MatchResult::Win) => wins += 1,
            Some(MatchResult::Loss) => losses += 1,
            None => {}
        }
    }

    debug!(matches = records.len(), wins, losses, "aggregated season totals");

    Ok(SeasonSummary {
        matches: records.len(),
        date_range: range,
        wins,
        losses,
        win_pct: percentage(wins as u64, (wins + losses) as u64),
        avg_aces: mean(records.iter().filter_map(|r| r.aces)),
        avg_double_faults: mean(records.iter().filter_map(|r| r.double_faults)),
        first_serve_pct: percentage(totals.first_serve_in, totals.first_serve_total),
        first_serve_pts_won_pct: percentage(totals.first_serve_points_won, totals.first_serve_points_total),
        second_serve_pts_won_pct: percentage(totals.second_serve_points_won, totals.second_serve_points_total),
        break_points_saved_pct: percentage(totals.break_points_saved, totals.break_points_faced),
    })
}
