//! Engine: owns one tournament document and its store, and applies every mutation
//! atomically (draft, persist, then swap in).
//!
//! The engine is single-writer: mutating methods take `&mut self`. When shared
//! between threads wrap it in a lock (the web binary uses `RwLock`) so queries
//! never observe a half-applied transition.

use crate::logic;
use crate::logic::StandingsView;
use crate::models::{
    Entrant, EntrantId, MatchOutcome, MatchRecord, Pairing, SeasonRecord, StandingRow, Tier,
    Tournament, TournamentError, Transition, STATE_VERSION,
};
use crate::store::{
    MatchFilter, MatchLog, MatchOrder, MemoryStore, PlayerRepository, StateStore, StoreError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Key the state document is stored under.
pub const STATE_KEY: &str = "tournament";

pub struct Engine {
    store: Box<dyn StateStore>,
    tournament: Tournament,
    rng: StdRng,
}

impl Engine {
    /// Load the stored document (or start empty) from `store`.
    pub fn open(store: Box<dyn StateStore>) -> Result<Self, TournamentError> {
        Self::open_with_rng(store, StdRng::from_entropy())
    }

    /// Same as `open` with a caller-supplied RNG (deterministic draws in tests).
    pub fn open_with_rng(store: Box<dyn StateStore>, rng: StdRng) -> Result<Self, TournamentError> {
        let tournament = match store.load(STATE_KEY)? {
            Some(json) => {
                let tournament: Tournament =
                    serde_json::from_str(&json).map_err(StoreError::from)?;
                if tournament.version() != STATE_VERSION {
                    return Err(StoreError::Version {
                        found: tournament.version(),
                        expected: STATE_VERSION,
                    }
                    .into());
                }
                log::info!(
                    "Loaded tournament: {} entrants, {} matches, stage {}",
                    tournament.roster().len(),
                    tournament.matches().len(),
                    tournament.stage().name()
                );
                tournament
            }
            None => Tournament::new(),
        };
        Ok(Self {
            store,
            tournament,
            rng,
        })
    }

    /// Engine backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            tournament: Tournament::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::in_memory()
        }
    }

    /// Run `op` on a draft copy of the document and RNG; persist the draft and
    /// make both current only if op and save succeed. On any error the engine
    /// (document and RNG position) is left exactly as it was.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut Tournament, &mut StdRng) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        let mut draft = self.tournament.clone();
        let mut rng = self.rng.clone();
        let out = op(&mut draft, &mut rng)?;
        let json = serde_json::to_string(&draft).map_err(StoreError::from)?;
        self.store.save(STATE_KEY, &json)?;
        self.tournament = draft;
        self.rng = rng;
        Ok(out)
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    // Mutations

    pub fn admit(&mut self, name: &str) -> Result<Entrant, TournamentError> {
        self.apply(|t, _| logic::admit_entrant(t, name))
    }

    pub fn report_match(
        &mut self,
        p1: EntrantId,
        p2: EntrantId,
        score1: f64,
        score2: f64,
    ) -> Result<MatchOutcome, TournamentError> {
        self.apply(|t, _| logic::report_match(t, p1, p2, score1, score2))
    }

    pub fn start_opener(&mut self) -> Result<Vec<Pairing>, TournamentError> {
        self.apply(logic::start_opener)
    }

    pub fn report_opener_result(
        &mut self,
        p1: EntrantId,
        p2: EntrantId,
        score1: f64,
        score2: f64,
    ) -> Result<MatchOutcome, TournamentError> {
        self.apply(|t, _| logic::report_opener_result(t, p1, p2, score1, score2))
    }

    pub fn start_swiss(&mut self) -> Result<Vec<Transition>, TournamentError> {
        self.apply(|t, _| logic::start_swiss(t))
    }

    pub fn report_swiss_result(
        &mut self,
        p1: EntrantId,
        p2: EntrantId,
        score1: f64,
        score2: f64,
    ) -> Result<MatchOutcome, TournamentError> {
        self.apply(|t, _| logic::report_swiss_result(t, p1, p2, score1, score2))
    }

    pub fn report_league_result(
        &mut self,
        tier: Tier,
        p1: EntrantId,
        p2: EntrantId,
        score1: f64,
        score2: f64,
    ) -> Result<MatchOutcome, TournamentError> {
        self.apply(|t, _| logic::report_league_result(t, tier, p1, p2, score1, score2))
    }

    pub fn finish_league(&mut self) -> Result<Vec<Transition>, TournamentError> {
        self.apply(logic::finish_league)
    }

    pub fn report_knockout_result(
        &mut self,
        bracket: &str,
        p1: EntrantId,
        p2: EntrantId,
        score1: f64,
        score2: f64,
    ) -> Result<MatchOutcome, TournamentError> {
        self.apply(|t, rng| logic::report_knockout_result(t, bracket, p1, p2, score1, score2, rng))
    }

    // Queries

    pub fn entrant(&self, id: EntrantId) -> Result<Entrant, TournamentError> {
        self.tournament.roster().get(id)
    }

    /// All entrants by current rating, highest first.
    pub fn leaderboard(&self) -> Vec<Entrant> {
        self.tournament
            .roster()
            .by_rating()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn matches(&self, filter: &MatchFilter, order: MatchOrder) -> Vec<MatchRecord> {
        self.tournament.matches().query(filter, order)
    }

    pub fn get_standings(&self, view: StandingsView) -> Result<Vec<StandingRow>, TournamentError> {
        logic::standings(&self.tournament, view)
    }

    pub fn get_season_archive(&self) -> &[SeasonRecord] {
        self.tournament.archive()
    }
}
