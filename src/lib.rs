//! Ranked cycle: Elo ratings plus a Swiss -> tiered league -> season knockout
//! progression engine, with an ad hoc opener knockout on the side.

pub mod config;
pub mod engine;
pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use engine::{Engine, STATE_KEY};
pub use logic::{
    admit_entrant, advance_knockout, finish_league, report_knockout_result, report_league_result,
    report_match, report_opener_result, report_swiss_result, start_opener, start_swiss,
    StandingsView,
};
pub use models::{
    Bracket, Entrant, EntrantId, MatchOutcome, MatchRecord, Outcome, Pairing, PairingResult,
    SeasonRecord, Stage, StageTag, StandingRow, Tier, Tournament, TournamentError, Transition,
};
pub use store::{
    FileStore, MatchFilter, MatchLog, MatchOrder, MemoryStore, PlayerRepository, StateStore,
    StoreError,
};
