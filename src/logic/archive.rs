//! Season archival and the league reset that follows it.

use crate::logic::league::start_league;
use crate::logic::setup::seat_waiting_entrants;
use crate::models::{
    BracketRecord, KnockoutState, SeasonRecord, Tournament, TournamentError, Transition,
};
use crate::store::Roster;
use chrono::Utc;

/// Freeze a finished season. Fails with `IncompleteRound` if any bracket lacks a champion.
pub fn freeze_season(
    season: u32,
    knockout: &KnockoutState,
    roster: &Roster,
) -> Result<SeasonRecord, TournamentError> {
    let brackets = knockout
        .brackets
        .iter()
        .map(|b| {
            let champion = b.champion.ok_or(TournamentError::IncompleteRound)?;
            Ok(BracketRecord {
                key: b.key.clone(),
                tiers: b.tiers.clone(),
                rounds: b.rounds.clone(),
                champion,
                champion_name: roster.name_of(champion),
            })
        })
        .collect::<Result<Vec<_>, TournamentError>>()?;

    Ok(SeasonRecord {
        season,
        archived_at: Utc::now(),
        tiers: knockout.league_standings.clone(),
        brackets,
    })
}

/// Archive the current season, seat waiting entrants and start the next league.
pub(crate) fn close_season(tournament: &mut Tournament) -> Result<Vec<Transition>, TournamentError> {
    let stage = tournament.state.stage;
    let knockout = tournament
        .state
        .knockout
        .as_ref()
        .ok_or_else(|| stage.mismatch("season_knockout"))?;
    let record = freeze_season(tournament.season, knockout, &tournament.roster)?;
    let season = record.season;
    tournament.archive.push(record);
    tournament.state.knockout = None;
    log::info!("Season {} archived", season);

    let seated = seat_waiting_entrants(tournament)?;
    if !seated.is_empty() {
        log::info!("{} waiting entrants joined for season {}", seated.len(), season + 1);
    }
    Ok(vec![
        Transition::SeasonArchived { season },
        start_league(tournament),
    ])
}
