//! Swiss qualifier: start, round completion, rematch avoidance, byes and the league cut.

mod common;

use common::{engine_with, play_swiss, play_swiss_round, swiss_pairings};
use ranked_cycle::logic::{pair_key, rank_swiss};
use ranked_cycle::models::{SwissSheet, SwissState};
use ranked_cycle::{EntrantId, Stage, StandingsView, Tier, TournamentError, Transition};
use std::collections::BTreeSet;
use uuid::Uuid;

#[test]
fn start_requires_two_entrants() {
    let (mut engine, _) = engine_with(1);
    assert_eq!(
        engine.start_swiss().unwrap_err(),
        TournamentError::NotEnoughEntrants {
            required: 2,
            available: 1
        }
    );
    assert_eq!(engine.tournament().stage(), Stage::Idle);
}

#[test]
fn start_twice_is_a_stage_mismatch() {
    let (mut engine, _) = engine_with(4);
    assert_eq!(
        engine.start_swiss().unwrap(),
        vec![Transition::SwissRoundStarted { round: 1 }]
    );
    assert_eq!(engine.tournament().stage(), Stage::Swiss { round: 1 });
    assert!(matches!(
        engine.start_swiss(),
        Err(TournamentError::StageMismatch {
            expected: "idle",
            found: "swiss"
        })
    ));
}

#[test]
fn round_advances_only_when_every_pairing_is_reported() {
    let (mut engine, _) = engine_with(4);
    engine.start_swiss().unwrap();
    let pairings = swiss_pairings(&engine);
    assert_eq!(pairings.len(), 2);

    let first = engine
        .report_swiss_result(pairings[0].entrant1, pairings[0].entrant2, 2.0, 1.0)
        .unwrap();
    assert!(first.transitions.is_empty());
    assert_eq!(engine.tournament().stage(), Stage::Swiss { round: 1 });

    // Reported in reverse order; still the same pairing.
    let second = engine
        .report_swiss_result(pairings[1].entrant2, pairings[1].entrant1, 0.0, 3.0)
        .unwrap();
    assert_eq!(
        second.transitions,
        vec![Transition::SwissRoundStarted { round: 2 }]
    );
    assert_eq!(engine.tournament().stage(), Stage::Swiss { round: 2 });
}

#[test]
fn out_of_sequence_reports_are_rejected() {
    let (mut engine, _) = engine_with(4);
    engine.start_swiss().unwrap();
    let pairings = swiss_pairings(&engine);
    let p = pairings[0];
    engine
        .report_swiss_result(p.entrant1, p.entrant2, 1.0, 0.0)
        .unwrap();
    assert_eq!(
        engine
            .report_swiss_result(p.entrant1, p.entrant2, 1.0, 0.0)
            .unwrap_err(),
        TournamentError::OutOfSequenceReport
    );
    // Entrants from different pairings.
    assert_eq!(
        engine
            .report_swiss_result(p.entrant1, pairings[1].entrant1, 1.0, 0.0)
            .unwrap_err(),
        TournamentError::OutOfSequenceReport
    );
    assert_eq!(engine.tournament().matches().len(), 1);
}

#[test]
fn league_results_are_rejected_during_swiss() {
    let (mut engine, ids) = engine_with(4);
    engine.start_swiss().unwrap();
    assert!(matches!(
        engine.report_league_result(Tier::TOP, ids[0], ids[1], 1.0, 0.0),
        Err(TournamentError::StageMismatch {
            expected: "league",
            ..
        })
    ));
}

#[test]
fn first_three_rounds_of_four_avoid_rematches() {
    let (mut engine, _) = engine_with(4);
    engine.start_swiss().unwrap();
    let mut seen = BTreeSet::new();
    for _ in 0..3 {
        for p in swiss_pairings(&engine) {
            assert!(seen.insert(pair_key(p.entrant1, p.entrant2)));
        }
        play_swiss_round(&mut engine);
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn odd_field_gets_a_bye_worth_a_win() {
    let (mut engine, _) = engine_with(3);
    engine.start_swiss().unwrap();
    let swiss = engine.tournament().state().swiss.clone().unwrap();
    assert_eq!(swiss.pairings.len(), 1);
    let bye = swiss.bye.unwrap();
    let sheet = &swiss.sheets[&bye];
    assert_eq!(sheet.score, 1.0);
    assert_eq!(sheet.byes, 1);
    assert!(sheet.opponents.is_empty());
}

#[test]
fn standings_rank_by_score_then_seeding() {
    let (mut engine, _) = engine_with(4);
    engine.start_swiss().unwrap();
    play_swiss_round(&mut engine);
    let rows = engine.get_standings(StandingsView::Swiss).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert_eq!(rows[0].score, 1.0);
    assert_eq!(rows[1].score, 1.0);
    assert_eq!(rows[2].score, 0.0);
    assert_eq!(rows[0].name, "P0");
    assert_eq!(rows[1].name, "P2");
}

#[test]
fn four_rounds_cut_tiers_and_start_the_league() {
    let (mut engine, ids) = engine_with(9);
    let transitions = play_swiss(&mut engine);
    assert_eq!(
        transitions,
        vec![
            Transition::SwissRoundStarted { round: 2 },
            Transition::SwissRoundStarted { round: 3 },
            Transition::SwissRoundStarted { round: 4 },
            Transition::LeagueStarted { season: 1 },
        ]
    );
    assert_eq!(engine.tournament().stage(), Stage::League);
    assert_eq!(engine.tournament().season(), 1);

    let ranked: Vec<_> = engine
        .get_standings(StandingsView::Swiss)
        .unwrap()
        .into_iter()
        .map(|r| r.entrant)
        .collect();
    for (i, id) in ranked.iter().enumerate() {
        assert_eq!(engine.entrant(*id).unwrap().tier, Some(Tier((i / 4) as u32)));
    }
    let sizes: Vec<_> = engine
        .tournament()
        .state()
        .league
        .as_ref()
        .unwrap()
        .tiers
        .iter()
        .map(|t| (t.tier.label(), t.members.len(), t.pairings.len()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("A".to_string(), 4, 6),
            ("B".to_string(), 4, 6),
            ("C".to_string(), 1, 0)
        ]
    );
    assert!(ids.iter().all(|id| engine.entrant(*id).unwrap().tier.is_some()));
}

#[test]
fn equal_scores_split_by_differential() {
    let (mut engine, _) = engine_with(4);
    engine.start_swiss().unwrap();
    let pairings = swiss_pairings(&engine);
    engine
        .report_swiss_result(pairings[0].entrant1, pairings[0].entrant2, 1.0, 0.0)
        .unwrap();
    engine
        .report_swiss_result(pairings[1].entrant1, pairings[1].entrant2, 5.0, 0.0)
        .unwrap();

    let rows = engine.get_standings(StandingsView::Swiss).unwrap();
    let table: Vec<_> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.score, r.differential))
        .collect();
    assert_eq!(
        table,
        vec![
            ("P2", 1.0, 5.0),
            ("P0", 1.0, 1.0),
            ("P1", 0.0, -1.0),
            ("P3", 0.0, -5.0)
        ]
    );
}

#[test]
fn equal_records_split_by_buchholz() {
    let [a, b, c, d]: [EntrantId; 4] = std::array::from_fn(|_| Uuid::new_v4());
    let sheet = |score: f64, differential: f64, wins: u32, opponents: Vec<EntrantId>| SwissSheet {
        score,
        differential,
        wins,
        opponents,
        byes: 0,
    };
    let swiss = SwissState {
        round: 2,
        seeding: vec![a, b, c, d],
        sheets: [
            (a, sheet(1.0, 0.0, 1, vec![d, d])),
            (b, sheet(1.0, 0.0, 1, vec![c, d])),
            (c, sheet(2.0, 2.0, 2, vec![b, a])),
            (d, sheet(0.0, -2.0, 0, vec![a, b])),
        ]
        .into_iter()
        .collect(),
        ..SwissState::default()
    };

    let ranked = rank_swiss(&swiss);
    let order: Vec<_> = ranked.iter().map(|t| t.entrant).collect();
    // a is seeded above b, but b met the stronger field.
    assert_eq!(order, vec![c, b, a, d]);
    assert_eq!(ranked[1].strength, 2.0);
    assert_eq!(ranked[2].strength, 0.0);
}
