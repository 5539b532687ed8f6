//! Elo rating update.

/// K-factor for every rated match.
pub const K_FACTOR: f64 = 32.0;

/// Expected score of a player rated `rating` against `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10_f64.powf((opponent - rating) as f64 / 400.0))
}

/// New ratings for A and B after a match where A scored `score_a`
/// (1 = win, 0.5 = draw, 0 = loss).
///
/// Each new rating is `old + delta` truncated toward zero. The delta itself is
/// never truncated first, so 1600 beating 1400 gives 1607/1392 (not 1607/1393)
/// and the two sides do not always cancel exactly.
pub fn update(rating_a: i32, rating_b: i32, score_a: f64) -> (i32, i32) {
    let expected_a = expected_score(rating_a, rating_b);
    let expected_b = 1.0 - expected_a;
    let score_b = 1.0 - score_a;
    let new_a = rating_a as f64 + K_FACTOR * (score_a - expected_a);
    let new_b = rating_b as f64 + K_FACTOR * (score_b - expected_b);
    (new_a.trunc() as i32, new_b.trunc() as i32)
}
