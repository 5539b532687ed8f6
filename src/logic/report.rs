//! Result intake shared by every format: validation, rating update and match logging.

use crate::logic::rating;
use crate::models::{
    EntrantId, MatchOutcome, MatchRecord, Outcome, Pairing, PairingResult, StageTag, Tournament,
    TournamentError,
};
use crate::store::{MatchLog, PlayerRepository};
use chrono::Utc;
use uuid::Uuid;

/// Reject malformed scores, self-pairings and unknown entrants before anything is touched.
pub(crate) fn validate_result(
    tournament: &Tournament,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
) -> Result<(), TournamentError> {
    let valid_score = |s: f64| s.is_finite() && s >= 0.0;
    if !valid_score(score1) || !valid_score(score2) || p1 == p2 {
        return Err(TournamentError::InvalidResult);
    }
    tournament.roster.entrant(p1)?;
    tournament.roster.entrant(p2)?;
    Ok(())
}

/// Index of the pending pairing between `p1` and `p2` (either order).
pub(crate) fn pending_index(
    pairings: &[Pairing],
    p1: EntrantId,
    p2: EntrantId,
) -> Result<usize, TournamentError> {
    pairings
        .iter()
        .position(|p| p.is_between(p1, p2) && p.is_pending())
        .ok_or(TournamentError::OutOfSequenceReport)
}

/// Pairing result for a match reported as `p1` vs `p2`.
pub(crate) fn resolution(p1: EntrantId, p2: EntrantId, outcome: Outcome) -> PairingResult {
    match outcome {
        Outcome::Win => PairingResult::Winner(p1),
        Outcome::Loss => PairingResult::Winner(p2),
        Outcome::Draw => PairingResult::Draw,
    }
}

/// Rate both entrants and append the match to the log.
pub(crate) fn record_result(
    tournament: &mut Tournament,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
    stage: Option<StageTag>,
    round: Option<u32>,
) -> Result<MatchRecord, TournamentError> {
    let mut first = tournament.roster.get(p1)?;
    let mut second = tournament.roster.get(p2)?;
    let outcome = Outcome::from_scores(score1, score2);
    let (new1, new2) = rating::update(
        first.current_rating,
        second.current_rating,
        outcome.points(),
    );
    let rating1 = first.apply_rating(new1);
    let rating2 = second.apply_rating(new2);
    log::debug!(
        "{} {}-{} {} ({:?}): {} -> {}, {} -> {}",
        first.name,
        score1,
        score2,
        second.name,
        stage,
        rating1.before,
        rating1.after,
        rating2.before,
        rating2.after
    );
    tournament.roster.update(first)?;
    tournament.roster.update(second)?;

    let record = MatchRecord {
        id: Uuid::new_v4(),
        entrant1: p1,
        entrant2: p2,
        score1,
        score2,
        outcome,
        round,
        stage,
        rating1,
        rating2,
        played_at: Utc::now(),
    };
    tournament.matches.append(record.clone());
    Ok(record)
}

/// Free-standing rated match outside any tournament round.
pub fn report_match(
    tournament: &mut Tournament,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
) -> Result<MatchOutcome, TournamentError> {
    validate_result(tournament, p1, p2, score1, score2)?;
    let record = record_result(tournament, p1, p2, score1, score2, None, None)?;
    Ok(MatchOutcome {
        record,
        transitions: Vec::new(),
    })
}
