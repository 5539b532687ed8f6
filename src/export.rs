//! CSV export of the rating leaderboard.

use crate::models::{Entrant, TournamentError};
use serde::Serialize;

#[derive(Serialize)]
struct LeaderboardRow<'a> {
    rank: usize,
    name: &'a str,
    rating: i32,
    peak: i32,
    tier: String,
    waiting: bool,
    tier_titles: usize,
    bracket_titles: usize,
}

/// Write `entrants` (already in leaderboard order) as CSV with a header row.
pub fn leaderboard_csv(entrants: &[Entrant]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (i, e) in entrants.iter().enumerate() {
        writer
            .serialize(LeaderboardRow {
                rank: i + 1,
                name: &e.name,
                rating: e.current_rating,
                peak: e.peak_rating,
                tier: e.tier.map(|t| t.label()).unwrap_or_default(),
                waiting: e.waiting,
                tier_titles: e.tier_titles.len(),
                bracket_titles: e.bracket_titles.len(),
            })
            .map_err(|e| TournamentError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Export(e.to_string()))
}
