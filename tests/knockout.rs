//! Season knockout: draws, round advancement, champions and error cases.

mod common;

use common::{bracket_round, engine_with, play_bracket, play_league, play_swiss};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ranked_cycle::logic::{advance_knockout, knockout_round, Advance};
use ranked_cycle::{
    Bracket, Engine, PairingResult, Stage, TournamentError, Transition,
};
use uuid::Uuid;

fn engine_in_knockout(n: usize) -> Engine {
    let (mut engine, _) = engine_with(n);
    play_swiss(&mut engine);
    play_league(&mut engine);
    engine.finish_league().unwrap();
    engine
}

#[test]
fn draw_queues_a_rematch_at_the_end_of_the_round() {
    let mut engine = engine_in_knockout(8);
    let before = bracket_round(&engine, "AB");
    let p = before[0];

    let outcome = engine
        .report_knockout_result("AB", p.entrant1, p.entrant2, 1.0, 1.0)
        .unwrap();
    assert!(outcome.transitions.is_empty());

    let after = bracket_round(&engine, "AB");
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].result, PairingResult::Draw);
    let rematch = after.last().unwrap();
    assert!(rematch.is_between(p.entrant1, p.entrant2));
    assert!(rematch.is_pending());
}

#[test]
fn round_waits_for_the_rematch() {
    let mut engine = engine_in_knockout(8);
    let round = bracket_round(&engine, "AB");
    let drawn = round[0];
    engine
        .report_knockout_result("AB", drawn.entrant1, drawn.entrant2, 0.0, 0.0)
        .unwrap();
    for p in &round[1..] {
        let outcome = engine
            .report_knockout_result("AB", p.entrant1, p.entrant2, 1.0, 0.0)
            .unwrap();
        assert!(outcome.transitions.is_empty());
    }
    let outcome = engine
        .report_knockout_result("AB", drawn.entrant2, drawn.entrant1, 1.0, 0.0)
        .unwrap();
    assert_eq!(
        outcome.transitions,
        vec![Transition::BracketRoundStarted {
            bracket: "AB".to_string(),
            round: 2
        }]
    );
    let next = bracket_round(&engine, "AB");
    assert_eq!(next.len(), 2);
    assert!(next.iter().any(|p| p.involves(drawn.entrant2)));
    assert!(next.iter().all(|p| !p.involves(drawn.entrant1)));
}

#[test]
fn eight_contestants_finish_in_three_rounds() {
    let mut engine = engine_in_knockout(8);
    let (rounds, transitions) = play_bracket(&mut engine, "AB");
    assert_eq!(rounds, 3);
    let champion = transitions
        .iter()
        .find_map(|t| match t {
            Transition::BracketChampion { champion, .. } => Some(*champion),
            _ => None,
        })
        .unwrap();
    assert!(engine
        .entrant(champion)
        .unwrap()
        .bracket_titles
        .contains("AB"));
    // Only bracket, so the season closes and the next league starts.
    assert!(transitions.contains(&Transition::SeasonArchived { season: 1 }));
    assert!(transitions.contains(&Transition::LeagueStarted { season: 2 }));
    assert_eq!(engine.tournament().stage(), Stage::League);
}

#[test]
fn unknown_bracket_and_wrong_stage() {
    let mut engine = engine_in_knockout(8);
    let p = bracket_round(&engine, "AB")[0];
    assert_eq!(
        engine
            .report_knockout_result("CD", p.entrant1, p.entrant2, 1.0, 0.0)
            .unwrap_err(),
        TournamentError::UnknownBracket("CD".to_string())
    );

    let (mut idle, ids) = engine_with(2);
    assert!(matches!(
        idle.report_knockout_result("AB", ids[0], ids[1], 1.0, 0.0),
        Err(TournamentError::StageMismatch {
            expected: "season_knockout",
            found: "idle"
        })
    ));
}

#[test]
fn advance_is_a_no_op_while_pending() {
    let mut rng = StdRng::seed_from_u64(5);
    let contestants: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
    let mut bracket = Bracket {
        key: "A".to_string(),
        tiers: Vec::new(),
        rounds: vec![knockout_round(1, &contestants, &mut rng)],
        champion: None,
    };
    assert_eq!(advance_knockout(&mut bracket, &mut rng), Advance::Unchanged);

    let first = bracket.rounds[0].pairings[0];
    bracket.rounds[0].pairings[0].result = PairingResult::Winner(first.entrant1);
    assert_eq!(advance_knockout(&mut bracket, &mut rng), Advance::Unchanged);

    let second = bracket.rounds[0].pairings[1];
    bracket.rounds[0].pairings[1].result = PairingResult::Winner(second.entrant2);
    assert_eq!(advance_knockout(&mut bracket, &mut rng), Advance::NextRound(2));
    assert_eq!(bracket.rounds.len(), 2);
    assert_eq!(bracket.remaining().len(), 2);

    let last = bracket.rounds[1].pairings[0];
    bracket.rounds[1].pairings[0].result = PairingResult::Winner(last.entrant1);
    assert_eq!(
        advance_knockout(&mut bracket, &mut rng),
        Advance::Champion(last.entrant1)
    );
    assert_eq!(bracket.remaining(), vec![last.entrant1]);
}

#[test]
fn several_draws_queue_rematches_in_report_order() {
    let mut engine = engine_in_knockout(8);
    let round = bracket_round(&engine, "AB");
    assert_eq!(round.len(), 4);

    for i in [1, 0] {
        let outcome = engine
            .report_knockout_result("AB", round[i].entrant1, round[i].entrant2, 2.0, 2.0)
            .unwrap();
        assert!(outcome.transitions.is_empty());
    }
    let after = bracket_round(&engine, "AB");
    assert_eq!(after.len(), 6);
    assert!(after[4].is_between(round[1].entrant1, round[1].entrant2));
    assert!(after[5].is_between(round[0].entrant1, round[0].entrant2));

    // The first rematch is drawn again.
    engine
        .report_knockout_result("AB", after[4].entrant1, after[4].entrant2, 0.0, 0.0)
        .unwrap();
    let after = bracket_round(&engine, "AB");
    assert_eq!(after.len(), 7);
    assert_eq!(after[4].result, PairingResult::Draw);
    assert!(after[6].is_between(round[1].entrant1, round[1].entrant2));

    let remaining = [after[2], after[3], after[5], after[6]];
    for (i, p) in remaining.iter().enumerate() {
        let outcome = engine
            .report_knockout_result("AB", p.entrant1, p.entrant2, 1.0, 0.0)
            .unwrap();
        if i + 1 < remaining.len() {
            assert!(outcome.transitions.is_empty());
        } else {
            assert_eq!(
                outcome.transitions,
                vec![Transition::BracketRoundStarted {
                    bracket: "AB".to_string(),
                    round: 2
                }]
            );
        }
    }
    assert_eq!(bracket_round(&engine, "AB").len(), 2);
}
