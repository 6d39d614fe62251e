use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl MatchResult {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "W" => Some(MatchResult::Win),
            "L" => Some(MatchResult::Loss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Loss => "L",
        }
    }
}

/// One row of the input CSV. Counter names follow the column headers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub opponent: Option<String>,
    pub surface: Option<String>,
    pub result: Option<MatchResult>,
    pub score: Option<String>,
    pub aces: Option<u32>,
    pub double_faults: Option<u32>,

    pub first_serve_in: u32,
    pub first_serve_total: u32,
    pub first_serve_points_won: u32,
    pub first_serve_points_total: u32,
    pub second_serve_points_won: u32,
    pub second_serve_points_total: u32,
    pub break_points_saved: u32,
    pub break_points_faced: u32,
}

impl MatchRecord {
    /// A record with all counters zeroed and no descriptive fields.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            opponent: None,
            surface: None,
            result: None,
            score: None,
            aces: None,
            double_faults: None,
            first_serve_in: 0,
            first_serve_total: 0,
            first_serve_points_won: 0,
            first_serve_points_total: 0,
            second_serve_points_won: 0,
            second_serve_points_total: 0,
            break_points_saved: 0,
            break_points_faced: 0,
        }
    }

    /// (numerator, denominator) pairs, in metric order.
    pub fn counter_pairs(&self) -> [(&'static str, u32, u32); 4] {
        [
            ("first_serve", self.first_serve_in, self.first_serve_total),
            ("first_serve_points", self.first_serve_points_won, self.first_serve_points_total),
            ("second_serve_points", self.second_serve_points_won, self.second_serve_points_total),
            ("break_points", self.break_points_saved, self.break_points_faced),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_normalizes_case_and_whitespace() {
        assert_eq!(MatchResult::parse(" w "), Some(MatchResult::Win));
        assert_eq!(MatchResult::parse("L"), Some(MatchResult::Loss));
        assert_eq!(MatchResult::parse("draw"), None);
        assert_eq!(MatchResult::parse(""), None);
    }

    #[test]
    fn test_result_serializes_as_letter() {
        let json = serde_json::to_string(&MatchResult::Win).unwrap();
        assert_eq!(json, "\"W\"");
    }
}
