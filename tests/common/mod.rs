//! Shared helpers: a seeded engine with named entrants and "first-listed wins" play loops.

#![allow(dead_code)]

use ranked_cycle::{Engine, EntrantId, Pairing, Tier, Transition};

pub fn engine_with(n: usize) -> (Engine, Vec<EntrantId>) {
    let mut engine = Engine::with_seed(7);
    let ids = (0..n)
        .map(|i| engine.admit(&format!("P{i}")).unwrap().id)
        .collect();
    (engine, ids)
}

pub fn pending(pairings: &[Pairing]) -> Vec<Pairing> {
    pairings.iter().filter(|p| p.is_pending()).copied().collect()
}

pub fn swiss_pairings(engine: &Engine) -> Vec<Pairing> {
    engine.tournament().state().swiss.as_ref().unwrap().pairings.clone()
}

/// Report every pending pairing of the current Swiss round as a 1-0 win for entrant1.
pub fn play_swiss_round(engine: &mut Engine) -> Vec<Transition> {
    let mut transitions = Vec::new();
    for p in pending(&swiss_pairings(engine)) {
        let outcome = engine
            .report_swiss_result(p.entrant1, p.entrant2, 1.0, 0.0)
            .unwrap();
        transitions.extend(outcome.transitions);
    }
    transitions
}

pub fn play_swiss(engine: &mut Engine) -> Vec<Transition> {
    engine.start_swiss().unwrap();
    let mut transitions = Vec::new();
    for _ in 0..4 {
        transitions.extend(play_swiss_round(engine));
    }
    transitions
}

pub fn league_tiers(engine: &Engine) -> Vec<Tier> {
    engine
        .tournament()
        .state()
        .league
        .as_ref()
        .unwrap()
        .tiers
        .iter()
        .map(|t| t.tier)
        .collect()
}

/// Report every pending league pairing in every tier as a 1-0 win for entrant1.
pub fn play_league(engine: &mut Engine) {
    let tiers: Vec<(Tier, Vec<Pairing>)> = engine
        .tournament()
        .state()
        .league
        .as_ref()
        .unwrap()
        .tiers
        .iter()
        .map(|t| (t.tier, pending(&t.pairings)))
        .collect();
    for (tier, pairings) in tiers {
        for p in pairings {
            let outcome = engine
                .report_league_result(tier, p.entrant1, p.entrant2, 1.0, 0.0)
                .unwrap();
            assert!(outcome.transitions.is_empty());
        }
    }
}

pub fn bracket_round(engine: &Engine, key: &str) -> Vec<Pairing> {
    let knockout = engine.tournament().state().knockout.as_ref().unwrap();
    let bracket = knockout.bracket(key).unwrap();
    bracket.current_round().unwrap().pairings.clone()
}

/// Play bracket `key` to its champion; returns the number of rounds played and
/// every transition fired.
pub fn play_bracket(engine: &mut Engine, key: &str) -> (u32, Vec<Transition>) {
    let mut rounds = 0;
    let mut transitions = Vec::new();
    loop {
        rounds += 1;
        for p in pending(&bracket_round(engine, key)) {
            let outcome = engine
                .report_knockout_result(key, p.entrant1, p.entrant2, 1.0, 0.0)
                .unwrap();
            transitions.extend(outcome.transitions);
        }
        let done = transitions
            .iter()
            .any(|t| matches!(t, Transition::BracketChampion { bracket, .. } if bracket == key));
        if done {
            return (rounds, transitions);
        }
    }
}
