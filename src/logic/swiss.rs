//! Swiss qualifier: four rounds, then the final ranking is cut into league tiers.

use crate::logic::league::start_league;
use crate::logic::pairing::{pair_key, swiss_pairings};
use crate::logic::report::{pending_index, record_result, resolution, validate_result};
use crate::logic::standings::rank_swiss;
use crate::models::{
    EntrantId, MatchOutcome, Outcome, Stage, StageTag, SwissSheet, SwissState, Tier, Tournament,
    TournamentError, Transition, TIER_CAPACITY,
};
use std::collections::{BTreeMap, BTreeSet};

/// Rounds played per Swiss qualifier.
pub const SWISS_ROUNDS: u32 = 4;

/// Start the Swiss qualifier with every non-waiting entrant (seeded by rating).
pub fn start_swiss(tournament: &mut Tournament) -> Result<Vec<Transition>, TournamentError> {
    if tournament.state.stage != Stage::Idle {
        return Err(tournament.state.stage.mismatch("idle"));
    }
    let seeding: Vec<EntrantId> = tournament
        .roster
        .by_rating()
        .into_iter()
        .filter(|e| e.is_active())
        .map(|e| e.id)
        .collect();
    if seeding.len() < 2 {
        return Err(TournamentError::NotEnoughEntrants {
            required: 2,
            available: seeding.len(),
        });
    }

    let sheets: BTreeMap<EntrantId, SwissSheet> = seeding
        .iter()
        .map(|&id| (id, SwissSheet::default()))
        .collect();
    let mut swiss = SwissState {
        round: 1,
        seeding,
        sheets,
        played: BTreeSet::new(),
        pairings: Vec::new(),
        bye: None,
    };
    draw_round(&mut swiss);
    log::info!(
        "Swiss started with {} entrants ({} pairings in round 1)",
        swiss.seeding.len(),
        swiss.pairings.len()
    );

    tournament.state.swiss = Some(swiss);
    tournament.state.stage = Stage::Swiss { round: 1 };
    Ok(vec![Transition::SwissRoundStarted { round: 1 }])
}

/// Pair the current ranking and credit the bye, if any.
fn draw_round(swiss: &mut SwissState) {
    let ranked: Vec<EntrantId> = rank_swiss(swiss).iter().map(|t| t.entrant).collect();
    let (pairings, bye) = swiss_pairings(&ranked, &swiss.played);
    if let Some(sheet) = bye.and_then(|id| swiss.sheets.get_mut(&id)) {
        sheet.score += 1.0;
        sheet.byes += 1;
    }
    swiss.pairings = pairings;
    swiss.bye = bye;
}

fn credit(sheet: &mut SwissSheet, opponent: EntrantId, outcome: Outcome, differential: f64) {
    sheet.score += outcome.points();
    sheet.differential += differential;
    if outcome == Outcome::Win {
        sheet.wins += 1;
    }
    sheet.opponents.push(opponent);
}

/// Report a Swiss result. Completing the round draws the next one, or after the
/// last round partitions the ranking into tiers and starts the league.
pub fn report_swiss_result(
    tournament: &mut Tournament,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
) -> Result<MatchOutcome, TournamentError> {
    let stage = tournament.state.stage;
    if !matches!(stage, Stage::Swiss { .. }) {
        return Err(stage.mismatch("swiss"));
    }
    validate_result(tournament, p1, p2, score1, score2)?;
    let swiss = tournament
        .state
        .swiss
        .as_ref()
        .ok_or_else(|| stage.mismatch("swiss"))?;
    let idx = pending_index(&swiss.pairings, p1, p2)?;
    let round = swiss.round;

    let record = record_result(
        tournament,
        p1,
        p2,
        score1,
        score2,
        Some(StageTag::Swiss),
        Some(round),
    )?;

    let swiss = tournament
        .state
        .swiss
        .as_mut()
        .ok_or_else(|| stage.mismatch("swiss"))?;
    let outcome = record.outcome;
    if let Some(sheet) = swiss.sheets.get_mut(&p1) {
        credit(sheet, p2, outcome, score1 - score2);
    }
    if let Some(sheet) = swiss.sheets.get_mut(&p2) {
        credit(sheet, p1, outcome.reversed(), score2 - score1);
    }
    swiss.played.insert(pair_key(p1, p2));
    swiss.pairings[idx].result = resolution(p1, p2, outcome);

    let round_complete = swiss.pairings.iter().all(|p| !p.is_pending());
    let transitions = if round_complete {
        complete_round(tournament)?
    } else {
        Vec::new()
    };
    Ok(MatchOutcome {
        record,
        transitions,
    })
}

fn complete_round(tournament: &mut Tournament) -> Result<Vec<Transition>, TournamentError> {
    let stage = tournament.state.stage;
    let swiss = tournament
        .state
        .swiss
        .as_mut()
        .ok_or_else(|| stage.mismatch("swiss"))?;

    if swiss.round < SWISS_ROUNDS {
        swiss.round += 1;
        draw_round(swiss);
        let round = swiss.round;
        log::info!("Swiss round {} drawn ({} pairings)", round, swiss.pairings.len());
        tournament.state.stage = Stage::Swiss { round };
        return Ok(vec![Transition::SwissRoundStarted { round }]);
    }

    let ranked: Vec<EntrantId> = rank_swiss(swiss).iter().map(|t| t.entrant).collect();
    for (i, chunk) in ranked.chunks(TIER_CAPACITY).enumerate() {
        let tier = Tier(i as u32);
        for &id in chunk {
            tournament.roster.entrant_mut(id)?.tier = Some(tier);
        }
    }
    log::info!(
        "Swiss complete: {} entrants partitioned into {} tiers",
        ranked.len(),
        ranked.len().div_ceil(TIER_CAPACITY)
    );
    Ok(vec![start_league(tournament)])
}
