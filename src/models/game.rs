//! Match records, pairings and the outcome of a reported result.

use crate::models::entrant::{EntrantId, RatingChange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match record.
pub type MatchId = Uuid;

/// Result of a match from entrant 1's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Derive the outcome from the two scores.
    pub fn from_scores(score1: f64, score2: f64) -> Self {
        if score1 > score2 {
            Outcome::Win
        } else if score1 < score2 {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    /// Points earned by entrant 1 (1, 0.5 or 0).
    pub fn points(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// The same outcome seen from entrant 2.
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Format a match was played in. Free-standing rated matches carry no tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageTag {
    Opener,
    Swiss,
    League,
    Knockout,
}

/// One played match. Append-only: never mutated once logged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub entrant1: EntrantId,
    pub entrant2: EntrantId,
    pub score1: f64,
    pub score2: f64,
    pub outcome: Outcome,
    pub round: Option<u32>,
    pub stage: Option<StageTag>,
    pub rating1: RatingChange,
    pub rating2: RatingChange,
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn involves(&self, id: EntrantId) -> bool {
        self.entrant1 == id || self.entrant2 == id
    }

    /// Winner of the match, `None` on a draw.
    pub fn winner(&self) -> Option<EntrantId> {
        match self.outcome {
            Outcome::Win => Some(self.entrant1),
            Outcome::Loss => Some(self.entrant2),
            Outcome::Draw => None,
        }
    }
}

/// Result slot of a pairing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingResult {
    #[default]
    Pending,
    Draw,
    Winner(EntrantId),
}

/// Two entrants scheduled to meet in the active round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub entrant1: EntrantId,
    pub entrant2: EntrantId,
    pub result: PairingResult,
}

impl Pairing {
    pub fn new(entrant1: EntrantId, entrant2: EntrantId) -> Self {
        Self {
            entrant1,
            entrant2,
            result: PairingResult::Pending,
        }
    }

    /// Same two entrants, in either order.
    pub fn is_between(&self, a: EntrantId, b: EntrantId) -> bool {
        (self.entrant1 == a && self.entrant2 == b) || (self.entrant1 == b && self.entrant2 == a)
    }

    pub fn involves(&self, id: EntrantId) -> bool {
        self.entrant1 == id || self.entrant2 == id
    }

    pub fn is_pending(&self) -> bool {
        self.result == PairingResult::Pending
    }

    pub fn winner(&self) -> Option<EntrantId> {
        match self.result {
            PairingResult::Winner(id) => Some(id),
            _ => None,
        }
    }
}

/// A transition fired by a reported result or an explicit stage call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Transition {
    SwissRoundStarted { round: u32 },
    LeagueStarted { season: u32 },
    BracketRoundStarted { bracket: String, round: u32 },
    BracketChampion { bracket: String, champion: EntrantId },
    SeasonArchived { season: u32 },
}

/// What a report produced: the logged match plus any transitions it fired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub record: MatchRecord,
    pub transitions: Vec<Transition>,
}
