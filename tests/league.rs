//! Tiered league: result intake, finish, titles and promotion/relegation.

mod common;

use common::{engine_with, play_league, play_swiss};
use ranked_cycle::{Stage, StandingsView, Tier, TournamentError, Transition};

fn tier_members(engine: &ranked_cycle::Engine, tier: Tier) -> Vec<ranked_cycle::EntrantId> {
    engine
        .tournament()
        .state()
        .league
        .as_ref()
        .unwrap()
        .tier(tier)
        .unwrap()
        .members
        .clone()
}

#[test]
fn league_never_advances_on_its_own() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    play_league(&mut engine);
    assert_eq!(engine.tournament().stage(), Stage::League);
}

#[test]
fn finish_with_pending_pairings_fails() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    assert_eq!(
        engine.finish_league().unwrap_err(),
        TournamentError::IncompleteRound
    );
    assert_eq!(engine.tournament().stage(), Stage::League);
}

#[test]
fn finish_outside_league_is_a_stage_mismatch() {
    let (mut engine, _) = engine_with(4);
    assert!(matches!(
        engine.finish_league(),
        Err(TournamentError::StageMismatch {
            expected: "league",
            found: "idle"
        })
    ));
}

#[test]
fn results_must_name_the_right_tier() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    let a = tier_members(&engine, Tier(0));

    assert_eq!(
        engine
            .report_league_result(Tier(1), a[0], a[1], 1.0, 0.0)
            .unwrap_err(),
        TournamentError::OutOfSequenceReport
    );
    assert_eq!(
        engine
            .report_league_result(Tier(9), a[0], a[1], 1.0, 0.0)
            .unwrap_err(),
        TournamentError::UnknownTier("J".to_string())
    );

    let outcome = engine
        .report_league_result(Tier(0), a[1], a[0], 0.0, 2.0)
        .unwrap();
    assert!(outcome.transitions.is_empty());
    assert_eq!(
        engine
            .report_league_result(Tier(0), a[0], a[1], 1.0, 0.0)
            .unwrap_err(),
        TournamentError::OutOfSequenceReport
    );
}

#[test]
fn tier_standings_use_points_then_seeding() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    let a = tier_members(&engine, Tier(0));
    play_league(&mut engine);

    let rows = engine.get_standings(StandingsView::League(Tier(0))).unwrap();
    let order: Vec<_> = rows.iter().map(|r| r.entrant).collect();
    assert_eq!(order, a);
    assert_eq!(rows[0].score, 3.0);
    assert_eq!(rows[0].wins, 3);
    assert_eq!(rows[3].score, 0.0);
    assert_eq!(
        engine
            .get_standings(StandingsView::League(Tier(4)))
            .unwrap_err(),
        TournamentError::UnknownTier("E".to_string())
    );
}

#[test]
fn finish_awards_titles_swaps_boundary_and_draws_brackets() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    let a = tier_members(&engine, Tier(0));
    let b = tier_members(&engine, Tier(1));
    play_league(&mut engine);

    let transitions = engine.finish_league().unwrap();
    assert_eq!(
        transitions,
        vec![Transition::BracketRoundStarted {
            bracket: "AB".to_string(),
            round: 1
        }]
    );
    assert_eq!(engine.tournament().stage(), Stage::SeasonKnockout);

    assert!(engine.entrant(a[0]).unwrap().tier_titles.contains(&Tier(0)));
    assert!(engine.entrant(b[0]).unwrap().tier_titles.contains(&Tier(1)));
    assert!(engine.entrant(a[1]).unwrap().tier_titles.is_empty());

    assert_eq!(engine.entrant(a[3]).unwrap().tier, Some(Tier(1)));
    assert_eq!(engine.entrant(b[0]).unwrap().tier, Some(Tier(0)));
    assert_eq!(engine.entrant(a[2]).unwrap().tier, Some(Tier(0)));
    assert_eq!(engine.entrant(b[3]).unwrap().tier, Some(Tier(1)));

    let knockout = engine.tournament().state().knockout.as_ref().unwrap();
    assert_eq!(knockout.brackets.len(), 1);
    assert_eq!(knockout.league_standings.len(), 2);
    assert_eq!(knockout.league_standings[0].champion, Some(a[0]));
    let round = knockout.bracket("AB").unwrap().current_round().unwrap();
    assert_eq!(round.pairings.len(), 4);
    assert_eq!(round.bye, None);
}

#[test]
fn equal_records_split_by_head_to_head_strength() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    let m = tier_members(&engine, Tier(0));
    // (winner, loser): m0 and m1 both finish 2-1 with +1, but m1's wins came
    // against the stronger pair.
    for (winner, loser) in [(1, 0), (0, 2), (0, 3), (1, 3), (2, 1), (3, 2)] {
        engine
            .report_league_result(Tier(0), m[winner], m[loser], 1.0, 0.0)
            .unwrap();
    }

    let rows = engine.get_standings(StandingsView::League(Tier(0))).unwrap();
    let order: Vec<_> = rows.iter().map(|r| r.entrant).collect();
    assert_eq!(order, vec![m[1], m[0], m[2], m[3]]);
    for row in &rows[..2] {
        assert_eq!((row.score, row.differential, row.wins), (2.0, 1.0, 2));
    }
    assert_eq!(rows[0].strength, 3.0);
    assert_eq!(rows[1].strength, 2.0);
    assert_eq!(rows[2].strength, 2.0);
    assert_eq!(rows[3].strength, 1.0);
}

#[test]
fn equal_score_and_differential_split_by_wins() {
    let (mut engine, _) = engine_with(8);
    play_swiss(&mut engine);
    let m = tier_members(&engine, Tier(1));
    // m0: two 0-0 draws and a loss; m1: one win and two losses.
    let results = [
        (0, 2, 0.0, 0.0),
        (0, 3, 0.0, 0.0),
        (1, 0, 1.0, 0.0),
        (2, 1, 1.0, 0.0),
        (3, 1, 1.0, 0.0),
        (2, 3, 1.0, 0.0),
    ];
    for (p1, p2, s1, s2) in results {
        engine
            .report_league_result(Tier(1), m[p1], m[p2], s1, s2)
            .unwrap();
    }

    let rows = engine.get_standings(StandingsView::League(Tier(1))).unwrap();
    let order: Vec<_> = rows.iter().map(|r| r.entrant).collect();
    assert_eq!(order, vec![m[2], m[3], m[1], m[0]]);
    assert_eq!((rows[2].score, rows[2].differential, rows[2].wins), (1.0, -1.0, 1));
    assert_eq!((rows[3].score, rows[3].differential, rows[3].wins), (1.0, -1.0, 0));
}
