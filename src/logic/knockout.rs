//! Season knockout: one bracket per pair of tiers, draws replayed, champions crowned.

use crate::logic::archive::close_season;
use crate::logic::pairing::{bracket_seeds, knockout_round};
use crate::logic::report::{pending_index, record_result, validate_result};
use crate::models::{
    Bracket, EntrantId, KnockoutState, MatchOutcome, Outcome, Pairing, PairingResult, Stage,
    StageTag, Tier, TierStandings, Tournament, TournamentError, Transition,
};
use rand::Rng;
use std::collections::BTreeMap;

/// What `advance_knockout` did to a bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Advance {
    /// Round still has pending pairings (or the bracket is already decided).
    Unchanged,
    /// Winners were redrawn into this round number.
    NextRound(u32),
    /// One contestant left.
    Champion(EntrantId),
}

/// Advance a bracket once every pairing of its current round is decided.
/// Drawn pairings never advance anyone; their rematch carries the result.
pub fn advance_knockout<R: Rng + ?Sized>(bracket: &mut Bracket, rng: &mut R) -> Advance {
    if bracket.champion.is_some() {
        return Advance::Unchanged;
    }
    let Some(round) = bracket.rounds.last() else {
        return Advance::Unchanged;
    };
    if !round.is_complete() {
        return Advance::Unchanged;
    }

    let mut advancing: Vec<EntrantId> = round.pairings.iter().filter_map(Pairing::winner).collect();
    advancing.extend(round.bye);
    match advancing.len() {
        0 => Advance::Unchanged,
        1 => {
            bracket.champion = Some(advancing[0]);
            Advance::Champion(advancing[0])
        }
        _ => {
            let number = round.number + 1;
            bracket.rounds.push(knockout_round(number, &advancing, rng));
            Advance::NextRound(number)
        }
    }
}

fn crown(
    tournament: &mut Tournament,
    key: &str,
    champion: EntrantId,
) -> Result<Transition, TournamentError> {
    let entrant = tournament.roster.entrant_mut(champion)?;
    entrant.bracket_titles.insert(key.to_string());
    log::info!("{} wins bracket {}", entrant.name, key);
    Ok(Transition::BracketChampion {
        bracket: key.to_string(),
        champion,
    })
}

/// Draw the season-knockout brackets from the roster's tiers and enter SeasonKnockout.
/// A bracket with a single contestant is decided on the spot; if every bracket is,
/// the season closes immediately.
pub(crate) fn setup_brackets<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    league_standings: Vec<TierStandings>,
    rng: &mut R,
) -> Result<Vec<Transition>, TournamentError> {
    let mut by_tier: BTreeMap<Tier, Vec<EntrantId>> = BTreeMap::new();
    for entrant in tournament.roster.iter() {
        if let Some(tier) = entrant.tier.filter(|_| entrant.is_active()) {
            by_tier.entry(tier).or_default().push(entrant.id);
        }
    }
    let tiers: Vec<(Tier, Vec<EntrantId>)> = by_tier.into_iter().collect();

    let mut brackets = Vec::new();
    let mut transitions = Vec::new();
    let mut decided = Vec::new();
    for seed in bracket_seeds(&tiers) {
        let mut bracket = Bracket {
            key: seed.key,
            tiers: seed.tiers,
            rounds: Vec::new(),
            champion: None,
        };
        match seed.contestants.as_slice() {
            [] => continue,
            [only] => {
                bracket.champion = Some(*only);
                decided.push((bracket.key.clone(), *only));
            }
            contestants => {
                bracket.rounds.push(knockout_round(1, contestants, rng));
                transitions.push(Transition::BracketRoundStarted {
                    bracket: bracket.key.clone(),
                    round: 1,
                });
            }
        }
        log::info!(
            "Bracket {} drawn with {} contestants",
            bracket.key,
            seed.contestants.len()
        );
        brackets.push(bracket);
    }

    tournament.state.knockout = Some(KnockoutState {
        brackets,
        league_standings,
    });
    tournament.state.stage = Stage::SeasonKnockout;

    for (key, champion) in decided {
        transitions.push(crown(tournament, &key, champion)?);
    }
    if tournament
        .state
        .knockout
        .as_ref()
        .is_some_and(KnockoutState::is_complete)
    {
        transitions.extend(close_season(tournament)?);
    }
    Ok(transitions)
}

/// Report a result in bracket `key`. A draw marks the pairing drawn and appends a
/// pending rematch to the end of the same round.
pub fn report_knockout_result<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    key: &str,
    p1: EntrantId,
    p2: EntrantId,
    score1: f64,
    score2: f64,
    rng: &mut R,
) -> Result<MatchOutcome, TournamentError> {
    let stage = tournament.state.stage;
    if stage != Stage::SeasonKnockout {
        return Err(stage.mismatch("season_knockout"));
    }
    validate_result(tournament, p1, p2, score1, score2)?;
    let knockout = tournament
        .state
        .knockout
        .as_ref()
        .ok_or_else(|| stage.mismatch("season_knockout"))?;
    let bracket_idx = knockout
        .brackets
        .iter()
        .position(|b| b.key == key)
        .ok_or_else(|| TournamentError::UnknownBracket(key.to_string()))?;
    let bracket = &knockout.brackets[bracket_idx];
    let round = bracket
        .rounds
        .last()
        .filter(|_| bracket.champion.is_none())
        .ok_or(TournamentError::OutOfSequenceReport)?;
    let idx = pending_index(&round.pairings, p1, p2)?;
    let number = round.number;

    let record = record_result(
        tournament,
        p1,
        p2,
        score1,
        score2,
        Some(StageTag::Knockout),
        Some(number),
    )?;

    let knockout = tournament
        .state
        .knockout
        .as_mut()
        .ok_or_else(|| stage.mismatch("season_knockout"))?;
    let bracket = &mut knockout.brackets[bracket_idx];
    let round = bracket
        .rounds
        .last_mut()
        .ok_or(TournamentError::OutOfSequenceReport)?;
    match record.outcome {
        Outcome::Draw => {
            let drawn = &mut round.pairings[idx];
            drawn.result = PairingResult::Draw;
            let rematch = Pairing::new(drawn.entrant1, drawn.entrant2);
            round.pairings.push(rematch);
            log::debug!("Bracket {} round {}: draw, rematch queued", key, number);
        }
        Outcome::Win => round.pairings[idx].result = PairingResult::Winner(p1),
        Outcome::Loss => round.pairings[idx].result = PairingResult::Winner(p2),
    }

    let mut transitions = Vec::new();
    match advance_knockout(bracket, rng) {
        Advance::Unchanged => {}
        Advance::NextRound(round) => {
            log::info!("Bracket {} round {} drawn", key, round);
            transitions.push(Transition::BracketRoundStarted {
                bracket: key.to_string(),
                round,
            });
        }
        Advance::Champion(champion) => {
            transitions.push(crown(tournament, key, champion)?);
        }
    }

    if tournament
        .state
        .knockout
        .as_ref()
        .is_some_and(KnockoutState::is_complete)
    {
        transitions.extend(close_season(tournament)?);
    }
    Ok(MatchOutcome {
        record,
        transitions,
    })
}
