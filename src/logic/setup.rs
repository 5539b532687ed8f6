//! Admission of entrants and seating of waiting entrants at a league reset.

use crate::models::{Entrant, EntrantId, Stage, Tier, Tournament, TournamentError, TIER_CAPACITY};
use crate::store::PlayerRepository;

/// Admit a new entrant. While a Swiss/League/Knockout cycle is running the
/// entrant is flagged `waiting` and sits out until the next league reset.
pub fn admit_entrant(tournament: &mut Tournament, name: &str) -> Result<Entrant, TournamentError> {
    let mut entrant = tournament.roster.create(name)?;
    if tournament.state.stage != Stage::Idle {
        entrant.waiting = true;
        tournament.roster.update(entrant.clone())?;
    }
    log::info!(
        "Admitted {} (waiting: {}, stage: {})",
        entrant.name,
        entrant.waiting,
        tournament.state.stage.name()
    );
    Ok(entrant)
}

/// Move waiting entrants (in admission order) into the lowest tier, opening a
/// new tier whenever the lowest one is full. Returns the seated ids.
pub(crate) fn seat_waiting_entrants(
    tournament: &mut Tournament,
) -> Result<Vec<EntrantId>, TournamentError> {
    let waiting: Vec<EntrantId> = tournament
        .roster
        .list(&|e: &Entrant| e.waiting)
        .iter()
        .map(|e| e.id)
        .collect();
    if waiting.is_empty() {
        return Ok(waiting);
    }

    let mut lowest = tournament
        .roster
        .iter()
        .filter(|e| e.is_active())
        .filter_map(|e| e.tier)
        .max();
    let mut filled = lowest.map_or(0, |tier| {
        tournament
            .roster
            .iter()
            .filter(|e| e.is_active() && e.tier == Some(tier))
            .count()
    });

    for &id in &waiting {
        let tier = match lowest {
            Some(tier) if filled < TIER_CAPACITY => tier,
            Some(tier) => {
                filled = 0;
                tier.below()
            }
            None => Tier::TOP,
        };
        lowest = Some(tier);
        filled += 1;

        let entrant = tournament.roster.entrant_mut(id)?;
        entrant.waiting = false;
        entrant.tier = Some(tier);
        log::info!("Seated {} in tier {}", entrant.name, tier);
    }
    Ok(waiting)
}
