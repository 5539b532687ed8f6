//! Archived season records and the standings rows they freeze.

use crate::models::entrant::{EntrantId, Tier};
use crate::models::game::Pairing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked line of a standings table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: usize,
    pub entrant: EntrantId,
    pub name: String,
    pub score: f64,
    pub differential: f64,
    pub wins: u32,
    /// Strength-of-schedule tie-break (Buchholz in Swiss, weighted head-to-head in League).
    pub strength: f64,
}

/// Final standings of one league tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierStandings {
    pub tier: Tier,
    pub label: String,
    pub champion: Option<EntrantId>,
    pub rows: Vec<StandingRow>,
}

/// One knockout round: its pairings in play order, plus a bye for an odd contestant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRound {
    pub number: u32,
    pub pairings: Vec<Pairing>,
    pub bye: Option<EntrantId>,
}

impl KnockoutRound {
    pub fn is_complete(&self) -> bool {
        self.pairings.iter().all(|p| !p.is_pending())
    }
}

/// Round-by-round history and champion of one season-knockout bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRecord {
    pub key: String,
    pub tiers: Vec<Tier>,
    pub rounds: Vec<KnockoutRound>,
    pub champion: EntrantId,
    pub champion_name: String,
}

/// Immutable snapshot of a completed season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season: u32,
    pub archived_at: DateTime<Utc>,
    pub tiers: Vec<TierStandings>,
    pub brackets: Vec<BracketRecord>,
}

impl SeasonRecord {
    pub fn bracket(&self, key: &str) -> Option<&BracketRecord> {
        self.brackets.iter().find(|b| b.key == key)
    }

    pub fn tier(&self, tier: Tier) -> Option<&TierStandings> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}
