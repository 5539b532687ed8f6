//! Tiered round-robin league and its finish: titles, promotion/relegation, knockout setup.

use crate::logic::knockout::setup_brackets;
use crate::logic::pairing::round_robin;
use crate::logic::promotion::{plan_moves, tier_champions};
use crate::logic::report::{pending_index, record_result, resolution, validate_result};
use crate::logic::standings::{rank_tier, to_rows};
use crate::models::{
    EntrantId, HeadToHead, LeagueSheet, LeagueState, MatchOutcome, Outcome, Stage, StageTag,
    Tier, TierLeague, TierStandings, Tournament, TournamentError, Transition,
};
use rand::Rng;
use std::collections::BTreeMap;

/// Start the next season's league from the roster's current tiers.
/// Members of each tier are seeded by rating (highest first).
pub(crate) fn start_league(tournament: &mut Tournament) -> Transition {
    let mut by_tier: BTreeMap<Tier, Vec<EntrantId>> = BTreeMap::new();
    for entrant in tournament.roster.by_rating() {
        if let Some(tier) = entrant.tier.filter(|_| entrant.is_active()) {
            by_tier.entry(tier).or_default().push(entrant.id);
        }
    }

    let tiers: Vec<TierLeague> = by_tier
        .into_iter()
        .map(|(tier, members)| TierLeague {
            tier,
            sheets: members
                .iter()
                .map(|&id| (id, LeagueSheet::default()))
                .collect(),
            pairings: round_robin(&members),
            members,
        })
        .collect();

    tournament.season += 1;
    log::info!(
        "Season {} league started: {} tiers, {} pairings",
        tournament.season,
        tiers.len(),
        tiers.iter().map(|t| t.pairings.len()).sum::<usize>()
    );
    tournament.state.league = Some(LeagueState { tiers });
    tournament.state.knockout = None;
    tournament.state.stage = Stage::League;
    Transition::LeagueStarted {
        season: tournament.season,
    }
}

fn credit(sheet: &mut LeagueSheet, opponent: EntrantId, outcome: Outcome, differential: f64) {
    sheet.score += outcome.points();
    sheet.differential += differential;
    if outcome == Outcome::Win {
        sheet.wins += 1;
    }
    sheet.results.push(HeadToHead {
        opponent,
        points: outcome.points(),
    });
}

/// Report a league result within `tier`. The league never advances on its own.
pub fn report_league_result(
    tournament: &mut Tournament,
    tier: Tier,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
) -> Result<MatchOutcome, TournamentError> {
    let stage = tournament.state.stage;
    if stage != Stage::League {
        return Err(stage.mismatch("league"));
    }
    validate_result(tournament, p1, p2, score1, score2)?;
    let league = tournament
        .state
        .league
        .as_ref()
        .ok_or_else(|| stage.mismatch("league"))?;
    let tier_idx = league
        .tiers
        .iter()
        .position(|t| t.tier == tier)
        .ok_or_else(|| TournamentError::UnknownTier(tier.label()))?;
    let idx = pending_index(&league.tiers[tier_idx].pairings, p1, p2)?;

    let record = record_result(
        tournament,
        p1,
        p2,
        score1,
        score2,
        Some(StageTag::League),
        None,
    )?;

    let league = tournament
        .state
        .league
        .as_mut()
        .ok_or_else(|| stage.mismatch("league"))?;
    let tier_league = &mut league.tiers[tier_idx];
    let outcome = record.outcome;
    if let Some(sheet) = tier_league.sheets.get_mut(&p1) {
        credit(sheet, p2, outcome, score1 - score2);
    }
    if let Some(sheet) = tier_league.sheets.get_mut(&p2) {
        credit(sheet, p1, outcome.reversed(), score2 - score1);
    }
    tier_league.pairings[idx].result = resolution(p1, p2, outcome);

    Ok(MatchOutcome {
        record,
        transitions: Vec::new(),
    })
}

/// Close the league: award tier titles, promote/relegate across every tier
/// boundary, then draw the season-knockout brackets from the new tiers.
pub fn finish_league<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<Vec<Transition>, TournamentError> {
    let stage = tournament.state.stage;
    if stage != Stage::League {
        return Err(stage.mismatch("league"));
    }
    let league = tournament
        .state
        .league
        .as_ref()
        .ok_or_else(|| stage.mismatch("league"))?;
    if !league.tiers.iter().all(TierLeague::is_complete) {
        return Err(TournamentError::IncompleteRound);
    }

    let mut ranked: Vec<(Tier, Vec<EntrantId>)> = Vec::with_capacity(league.tiers.len());
    let mut standings: Vec<TierStandings> = Vec::with_capacity(league.tiers.len());
    for tier_league in &league.tiers {
        let tallies = rank_tier(tier_league);
        ranked.push((
            tier_league.tier,
            tallies.iter().map(|t| t.entrant).collect(),
        ));
        standings.push(TierStandings {
            tier: tier_league.tier,
            label: tier_league.tier.label(),
            champion: tallies.first().map(|t| t.entrant),
            rows: to_rows(&tallies, &tournament.roster),
        });
    }

    for (tier, champion) in tier_champions(&ranked) {
        let entrant = tournament.roster.entrant_mut(champion)?;
        entrant.tier_titles.insert(tier);
        log::info!("{} wins tier {} in season {}", entrant.name, tier, tournament.season);
    }
    for mv in plan_moves(&ranked) {
        let entrant = tournament.roster.entrant_mut(mv.entrant)?;
        entrant.tier = Some(mv.to);
        log::info!("{} moves from tier {} to tier {}", entrant.name, mv.from, mv.to);
    }

    setup_brackets(tournament, standings, rng)
}
