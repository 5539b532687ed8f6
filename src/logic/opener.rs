//! Opener knockout: one flat round among the highest-rated entrants, restartable at any time.

use crate::logic::pairing::opener_pairings;
use crate::logic::report::{pending_index, record_result, resolution, validate_result};
use crate::models::{
    EntrantId, MatchOutcome, Pairing, StageTag, Tournament, TournamentError,
};
use rand::Rng;

/// Draw a fresh opener round, replacing any previous one. Waiting entrants are not drawn.
pub fn start_opener<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<Vec<Pairing>, TournamentError> {
    let eligible: Vec<EntrantId> = tournament
        .roster
        .by_rating()
        .into_iter()
        .filter(|e| e.is_active())
        .map(|e| e.id)
        .collect();
    if eligible.len() < 2 {
        return Err(TournamentError::NotEnoughEntrants {
            required: 2,
            available: eligible.len(),
        });
    }
    let pairings = opener_pairings(&eligible, rng);
    log::info!("Opener drawn: {} pairings", pairings.len());
    tournament.state.opener = pairings.clone();
    Ok(pairings)
}

/// Report a result for a pending opener pairing.
pub fn report_opener_result(
    tournament: &mut Tournament,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
) -> Result<MatchOutcome, TournamentError> {
    validate_result(tournament, p1, p2, score1, score2)?;
    let idx = pending_index(&tournament.state.opener, p1, p2)?;
    let record = record_result(
        tournament,
        p1,
        p2,
        score1,
        score2,
        Some(StageTag::Opener),
        Some(1),
    )?;
    tournament.state.opener[idx].result = resolution(p1, p2, record.outcome);
    Ok(MatchOutcome {
        record,
        transitions: Vec::new(),
    })
}
