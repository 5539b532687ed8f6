//! Tournament business logic: rating, standings, pairing, stage transitions, archival.

mod archive;
mod knockout;
mod league;
mod opener;
mod pairing;
mod promotion;
mod rating;
mod report;
mod setup;
mod standings;
mod swiss;

pub use archive::freeze_season;
pub use knockout::{advance_knockout, report_knockout_result, Advance};
pub use league::{finish_league, report_league_result};
pub use opener::{report_opener_result, start_opener};
pub use pairing::{
    bracket_seeds, knockout_round, opener_pairings, pair_key, round_robin, swiss_pairings,
    BracketSeed, OPENER_FIELD,
};
pub use promotion::{plan_moves, tier_champions, TierMove};
pub use rating::{expected_score, update as update_ratings, K_FACTOR};
pub use report::report_match;
pub use setup::admit_entrant;
pub use standings::{
    rank, rank_swiss, rank_tier, standings, swiss_tallies, tier_tallies, to_rows, StandingsView,
    Tally,
};
pub use swiss::{report_swiss_result, start_swiss, SWISS_ROUNDS};
