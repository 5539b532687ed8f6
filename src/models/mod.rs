//! Data structures for the ranked cycle: entrants, matches, tournament state, seasons.

mod entrant;
mod game;
mod season;
mod tournament;

pub use entrant::{Entrant, EntrantId, RatingChange, Tier, INITIAL_RATING, TIER_CAPACITY};
pub use game::{
    MatchId, MatchOutcome, MatchRecord, Outcome, Pairing, PairingResult, StageTag, Transition,
};
pub use season::{BracketRecord, KnockoutRound, SeasonRecord, StandingRow, TierStandings};
pub use tournament::{
    Bracket, HeadToHead, KnockoutState, LeagueSheet, LeagueState, Stage, SwissSheet, SwissState,
    TierLeague, Tournament, TournamentError, TournamentState, STATE_VERSION,
};
