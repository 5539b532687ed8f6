//! Standings: score, differential, wins and strength-of-schedule ordering.

use crate::models::{
    EntrantId, StandingRow, SwissState, Tier, TierLeague, Tournament, TournamentError,
};
use crate::store::Roster;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which standings table to read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "view", content = "tier")]
pub enum StandingsView {
    Swiss,
    League(Tier),
}

/// Accumulated totals for one entrant, before names are attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tally {
    pub entrant: EntrantId,
    pub score: f64,
    pub differential: f64,
    pub wins: u32,
    pub strength: f64,
}

fn compare(a: &Tally, b: &Tally) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.differential.total_cmp(&a.differential))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.strength.total_cmp(&a.strength))
}

/// Sort tallies best first. The sort is stable, so entrants equal on all four
/// keys keep the order they were passed in (the stage's seeding order).
pub fn rank(mut tallies: Vec<Tally>) -> Vec<Tally> {
    tallies.sort_by(compare);
    tallies
}

/// Swiss tallies in seeding order. Strength is Buchholz: the sum of opponents'
/// current scores, one term per game played.
pub fn swiss_tallies(swiss: &SwissState) -> Vec<Tally> {
    let score_of = |id: &EntrantId| swiss.sheets.get(id).map_or(0.0, |s| s.score);
    swiss
        .seeding
        .iter()
        .filter_map(|id| {
            let sheet = swiss.sheets.get(id)?;
            Some(Tally {
                entrant: *id,
                score: sheet.score,
                differential: sheet.differential,
                wins: sheet.wins,
                strength: sheet.opponents.iter().map(score_of).sum(),
            })
        })
        .collect()
}

pub fn rank_swiss(swiss: &SwissState) -> Vec<Tally> {
    rank(swiss_tallies(swiss))
}

/// League tallies in seeding order. Strength is the sum over results of the
/// opponent's score times the points earned against them.
pub fn tier_tallies(league: &TierLeague) -> Vec<Tally> {
    let score_of = |id: &EntrantId| league.sheets.get(id).map_or(0.0, |s| s.score);
    league
        .members
        .iter()
        .filter_map(|id| {
            let sheet = league.sheets.get(id)?;
            Some(Tally {
                entrant: *id,
                score: sheet.score,
                differential: sheet.differential,
                wins: sheet.wins,
                strength: sheet
                    .results
                    .iter()
                    .map(|r| score_of(&r.opponent) * r.points)
                    .sum(),
            })
        })
        .collect()
}

pub fn rank_tier(league: &TierLeague) -> Vec<Tally> {
    rank(tier_tallies(league))
}

/// Attach ranks and names for display or archival.
pub fn to_rows(ranked: &[Tally], roster: &Roster) -> Vec<StandingRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, t)| StandingRow {
            rank: i + 1,
            entrant: t.entrant,
            name: roster.name_of(t.entrant),
            score: t.score,
            differential: t.differential,
            wins: t.wins,
            strength: t.strength,
        })
        .collect()
}

/// Current standings for `view`. The Swiss table stays readable after the
/// qualifier ends; league tables until the next league replaces them.
pub fn standings(
    tournament: &Tournament,
    view: StandingsView,
) -> Result<Vec<StandingRow>, TournamentError> {
    let stage = tournament.state.stage;
    match view {
        StandingsView::Swiss => {
            let swiss = tournament
                .state
                .swiss
                .as_ref()
                .ok_or_else(|| stage.mismatch("swiss"))?;
            Ok(to_rows(&rank_swiss(swiss), &tournament.roster))
        }
        StandingsView::League(tier) => {
            let league = tournament
                .state
                .league
                .as_ref()
                .ok_or_else(|| stage.mismatch("league"))?;
            let tier_league = league
                .tier(tier)
                .ok_or_else(|| TournamentError::UnknownTier(tier.label()))?;
            Ok(to_rows(&rank_tier(tier_league), &tournament.roster))
        }
    }
}
