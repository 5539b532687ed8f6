//! Entrant, EntrantId and Tier.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an entrant (used in pairings, matches and lookups).
pub type EntrantId = Uuid;

/// Rating every entrant starts from.
pub const INITIAL_RATING: i32 = 1500;

/// Maximum number of non-waiting entrants in one league tier.
pub const TIER_CAPACITY: usize = 4;

/// League tier. Index 0 is the strongest tier; the display label is derived
/// spreadsheet-style (A..Z, AA, AB, ...).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(pub u32);

impl Tier {
    pub const TOP: Tier = Tier(0);

    /// Display label: 0 -> "A", 25 -> "Z", 26 -> "AA".
    pub fn label(self) -> String {
        let mut n = self.0 as u64 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// The tier one step stronger, if any.
    pub fn above(self) -> Option<Tier> {
        self.0.checked_sub(1).map(Tier)
    }

    /// The tier one step weaker.
    pub fn below(self) -> Tier {
        Tier(self.0 + 1)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Tier {
    type Err = TournamentError;

    /// Parse a display label (case-insensitive) back into a tier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TournamentError::UnknownTier(s.to_string()));
        }
        let mut n: u64 = 0;
        for c in label.chars() {
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as u64 + 1;
            n = n
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .filter(|v| *v <= u32::MAX as u64)
                .ok_or_else(|| TournamentError::UnknownTier(s.to_string()))?;
        }
        Ok(Tier((n - 1) as u32))
    }
}

/// Rating before and after one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub before: i32,
    pub after: i32,
}

impl RatingChange {
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

/// An entrant in the ranking pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    pub current_rating: i32,
    /// Highest rating ever reached (never below `current_rating`).
    pub peak_rating: i32,
    /// League tier; `None` until the first league partition (or while waiting).
    pub tier: Option<Tier>,
    /// Admitted mid-cycle: excluded from pairing until the next league reset.
    pub waiting: bool,
    /// Season-knockout bracket keys won.
    pub bracket_titles: BTreeSet<String>,
    /// League tiers won.
    pub tier_titles: BTreeSet<Tier>,
}

impl Entrant {
    /// Create a new entrant at the initial rating, untiered and not waiting.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_rating: INITIAL_RATING,
            peak_rating: INITIAL_RATING,
            tier: None,
            waiting: false,
            bracket_titles: BTreeSet::new(),
            tier_titles: BTreeSet::new(),
        }
    }

    /// Set a new rating, lifting the peak if needed.
    pub fn apply_rating(&mut self, rating: i32) -> RatingChange {
        let change = RatingChange {
            before: self.current_rating,
            after: rating,
        };
        self.current_rating = rating;
        self.peak_rating = self.peak_rating.max(rating);
        change
    }

    /// Eligible for pairing generation.
    pub fn is_active(&self) -> bool {
        !self.waiting
    }
}
