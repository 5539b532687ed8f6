//! Collaborator contracts (entrant repository, match log, state store) and their
//! built-in implementations.

mod match_log;
mod roster;
mod state_store;

pub use match_log::{MatchFilter, MatchHistory, MatchOrder};
pub use roster::Roster;
pub use state_store::{FileStore, MemoryStore, StateStore, StoreError};

use crate::models::{Entrant, EntrantId, MatchId, MatchRecord, TournamentError};

/// Lookup and maintenance of entrants.
pub trait PlayerRepository {
    /// Entrant by id; `UnknownEntrant` if absent.
    fn get(&self, id: EntrantId) -> Result<Entrant, TournamentError>;

    /// Entrants matching `predicate`, in admission order.
    fn list(&self, predicate: &dyn Fn(&Entrant) -> bool) -> Vec<Entrant>;

    /// Admit a new entrant; `DuplicateName` if the name is taken (case-insensitive).
    fn create(&mut self, name: &str) -> Result<Entrant, TournamentError>;

    /// Replace the stored entrant with the same id.
    fn update(&mut self, entrant: Entrant) -> Result<(), TournamentError>;
}

/// Append-only log of played matches.
pub trait MatchLog {
    fn append(&mut self, record: MatchRecord) -> MatchId;

    fn query(&self, filter: &MatchFilter, order: MatchOrder) -> Vec<MatchRecord>;
}
