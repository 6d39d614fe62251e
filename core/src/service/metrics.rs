use crate::model::match_record::MatchRecord;
use crate::model::metric::{MatchMetrics, Percentage};

/// `100 * numerator / denominator`, rounded half-up to one decimal.
///
/// Works in integer tenths of a percent so halves always round up
/// (1/16 is 6.3, never 6.2). A zero denominator is undefined, not zero.
pub fn percentage(numerator: u64, denominator: u64) -> Percentage {
    if denominator == 0 {
        return None;
    }
    let tenths = (2000 * numerator + denominator) / (2 * denominator);
    Some(tenths as f64 / 10.0)
}

pub fn compute_metrics(record: &MatchRecord) -> MatchMetrics {
    let pct = |made: u32, attempted: u32| percentage(made.into(), attempted.into());

    MatchMetrics {
        first_serve_pct: pct(record.first_serve_in, record.first_serve_total),
        first_serve_pts_won_pct: pct(record.first_serve_points_won, record.first_serve_points_total),
        second_serve_pts_won_pct: pct(record.second_serve_points_won, record.second_serve_points_total),
        break_points_saved_pct: pct(record.break_points_saved, record.break_points_faced),
    }
}
