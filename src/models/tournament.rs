//! Tournament document, Stage, per-format state and TournamentError.

use crate::models::entrant::{EntrantId, Tier};
use crate::models::game::Pairing;
use crate::models::season::{KnockoutRound, SeasonRecord, TierStandings};
use crate::store::{MatchHistory, Roster, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Referenced entrant id does not exist.
    UnknownEntrant(EntrantId),
    /// An entrant with this name already exists (names are unique, case-insensitive).
    DuplicateName(String),
    /// Blank entrant name.
    InvalidName,
    /// Negative or non-finite scores, or an entrant reported against itself.
    InvalidResult,
    /// Pairing not in the active round, or already resolved.
    OutOfSequenceReport,
    /// Operation belongs to a stage that is not currently active.
    StageMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// No league tier with this label.
    UnknownTier(String),
    /// No season-knockout bracket with this key.
    UnknownBracket(String),
    /// A stage transition was requested while pairings are still pending.
    IncompleteRound,
    /// Not enough eligible entrants to pair.
    NotEnoughEntrants { required: usize, available: usize },
    /// State could not be loaded or saved; nothing was applied.
    Persistence(String),
    /// Report could not be rendered.
    Export(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UnknownEntrant(id) => write!(f, "Unknown entrant {}", id),
            TournamentError::DuplicateName(name) => {
                write!(f, "An entrant named '{}' already exists", name)
            }
            TournamentError::InvalidName => write!(f, "Entrant name must not be blank"),
            TournamentError::InvalidResult => write!(f, "Invalid match result"),
            TournamentError::OutOfSequenceReport => {
                write!(f, "Pairing is not pending in the active round")
            }
            TournamentError::StageMismatch { expected, found } => {
                write!(f, "Operation requires stage {} (current stage: {})", expected, found)
            }
            TournamentError::UnknownTier(label) => write!(f, "Unknown tier '{}'", label),
            TournamentError::UnknownBracket(key) => write!(f, "Unknown bracket '{}'", key),
            TournamentError::IncompleteRound => write!(f, "Not all pairings have a result"),
            TournamentError::NotEnoughEntrants {
                required,
                available,
            } => write!(
                f,
                "Need at least {} eligible entrants (have {})",
                required, available
            ),
            TournamentError::Persistence(msg) => write!(f, "Persistence failure: {}", msg),
            TournamentError::Export(msg) => write!(f, "Export failure: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<StoreError> for TournamentError {
    fn from(e: StoreError) -> Self {
        TournamentError::Persistence(e.to_string())
    }
}

/// Current stage of the Swiss -> League -> Knockout cycle.
/// The opener knockout runs beside this and never changes it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    Swiss {
        round: u32,
    },
    League,
    SeasonKnockout,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Swiss { .. } => "swiss",
            Stage::League => "league",
            Stage::SeasonKnockout => "season_knockout",
        }
    }

    pub fn mismatch(self, expected: &'static str) -> TournamentError {
        TournamentError::StageMismatch {
            expected,
            found: self.name(),
        }
    }
}

/// Swiss accumulators for one entrant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwissSheet {
    pub score: f64,
    pub differential: f64,
    pub wins: u32,
    /// Opponents in play order; a rematched opponent appears once per game.
    pub opponents: Vec<EntrantId>,
    pub byes: u32,
}

/// Swiss qualifier state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwissState {
    pub round: u32,
    /// Entrants in seeding order (rating descending at start); final tie-break.
    pub seeding: Vec<EntrantId>,
    pub sheets: BTreeMap<EntrantId, SwissSheet>,
    /// Unordered pairs already played, stored as (min, max).
    pub played: BTreeSet<(EntrantId, EntrantId)>,
    pub pairings: Vec<Pairing>,
    pub bye: Option<EntrantId>,
}

/// A league result from one entrant's side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub opponent: EntrantId,
    pub points: f64,
}

/// League accumulators for one entrant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSheet {
    pub score: f64,
    pub differential: f64,
    pub wins: u32,
    pub results: Vec<HeadToHead>,
}

/// Round-robin of one tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierLeague {
    pub tier: Tier,
    /// Members in seeding order (rating descending at league start).
    pub members: Vec<EntrantId>,
    pub sheets: BTreeMap<EntrantId, LeagueSheet>,
    pub pairings: Vec<Pairing>,
}

impl TierLeague {
    pub fn is_complete(&self) -> bool {
        self.pairings.iter().all(|p| !p.is_pending())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    pub tiers: Vec<TierLeague>,
}

impl LeagueState {
    pub fn tier(&self, tier: Tier) -> Option<&TierLeague> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}

/// One season-knockout bracket; the active round is the last entry of `rounds`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub key: String,
    pub tiers: Vec<Tier>,
    pub rounds: Vec<KnockoutRound>,
    pub champion: Option<EntrantId>,
}

impl Bracket {
    pub fn current_round(&self) -> Option<&KnockoutRound> {
        self.rounds.last()
    }

    /// Contestants still in the bracket: everyone in the active round, or the champion.
    pub fn remaining(&self) -> Vec<EntrantId> {
        if let Some(champion) = self.champion {
            return vec![champion];
        }
        match self.rounds.last() {
            Some(round) => {
                let mut ids: Vec<EntrantId> = Vec::new();
                for p in &round.pairings {
                    for id in [p.entrant1, p.entrant2] {
                        if !ids.contains(&id) {
                            ids.push(id);
                        }
                    }
                }
                ids.extend(round.bye);
                ids
            }
            None => Vec::new(),
        }
    }
}

/// Season knockout state plus the league standings frozen at league finish.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnockoutState {
    pub brackets: Vec<Bracket>,
    pub league_standings: Vec<TierStandings>,
}

impl KnockoutState {
    pub fn bracket(&self, key: &str) -> Option<&Bracket> {
        self.brackets.iter().find(|b| b.key == key)
    }

    pub fn is_complete(&self) -> bool {
        self.brackets.iter().all(|b| b.champion.is_some())
    }
}

/// Stage plus the mutable pairing/score state of every format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub stage: Stage,
    /// Opener knockout: a single flat round, independent of `stage`.
    pub opener: Vec<Pairing>,
    pub swiss: Option<SwissState>,
    pub league: Option<LeagueState>,
    pub knockout: Option<KnockoutState>,
}

/// Version of the persisted state document.
pub const STATE_VERSION: u32 = 1;

/// Full engine state: entrants, match log, tournament state and the season archive.
/// Persisted as one document; only the transition functions in `logic` mutate it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub(crate) version: u32,
    /// Current season number (0 before the first league).
    pub(crate) season: u32,
    pub(crate) roster: Roster,
    pub(crate) matches: MatchHistory,
    pub(crate) state: TournamentState,
    pub(crate) archive: Vec<SeasonRecord>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Empty tournament in the Idle stage.
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            season: 0,
            roster: Roster::default(),
            matches: MatchHistory::default(),
            state: TournamentState::default(),
            archive: Vec::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn matches(&self) -> &MatchHistory {
        &self.matches
    }

    pub fn state(&self) -> &TournamentState {
        &self.state
    }

    pub fn archive(&self) -> &[SeasonRecord] {
        &self.archive
    }
}
