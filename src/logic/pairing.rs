//! Pairing generation for the opener, Swiss rounds, league round-robins and
//! season-knockout brackets.

use crate::models::{EntrantId, KnockoutRound, Pairing, Tier};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Number of entrants drawn into the opener knockout.
pub const OPENER_FIELD: usize = 8;

/// Unordered pair key, stored as (min, max).
pub fn pair_key(a: EntrantId, b: EntrantId) -> (EntrantId, EntrantId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Shuffle and pair adjacent entrants. An odd trailing entrant is returned unpaired.
fn shuffle_and_pair<R: Rng + ?Sized>(
    entrants: &[EntrantId],
    rng: &mut R,
) -> (Vec<Pairing>, Option<EntrantId>) {
    let mut shuffled = entrants.to_vec();
    shuffled.shuffle(rng);
    let pairings = shuffled
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0], pair[1]))
        .collect();
    let leftover = if shuffled.len() % 2 == 1 {
        shuffled.last().copied()
    } else {
        None
    };
    (pairings, leftover)
}

/// Opener: the first `OPENER_FIELD` entrants of `by_rating` (highest rated first),
/// randomly permuted and paired adjacent.
pub fn opener_pairings<R: Rng + ?Sized>(by_rating: &[EntrantId], rng: &mut R) -> Vec<Pairing> {
    let field = &by_rating[..by_rating.len().min(OPENER_FIELD)];
    shuffle_and_pair(field, rng).0
}

/// Swiss round over `ranked` (best first). Each top unpaired entrant takes the
/// first lower-ranked unpaired entrant it has not played; if every candidate is a
/// rematch it takes the next one anyway. A single leftover gets the bye.
pub fn swiss_pairings(
    ranked: &[EntrantId],
    played: &BTreeSet<(EntrantId, EntrantId)>,
) -> (Vec<Pairing>, Option<EntrantId>) {
    let mut unpaired: Vec<EntrantId> = ranked.to_vec();
    let mut pairings = Vec::with_capacity(unpaired.len() / 2);
    while unpaired.len() >= 2 {
        let top = unpaired.remove(0);
        let idx = unpaired
            .iter()
            .position(|&other| !played.contains(&pair_key(top, other)))
            .unwrap_or(0);
        let opponent = unpaired.remove(idx);
        pairings.push(Pairing::new(top, opponent));
    }
    (pairings, unpaired.pop())
}

/// Single round-robin: every unordered pair of `members` exactly once.
pub fn round_robin(members: &[EntrantId]) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            pairings.push(Pairing::new(a, b));
        }
    }
    pairings
}

/// A season-knockout bracket before its first round is drawn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketSeed {
    pub key: String,
    pub tiers: Vec<Tier>,
    pub contestants: Vec<EntrantId>,
}

/// Group tiers two at a time in tier order (A+B, C+D, ...); a trailing tier
/// stands alone. The key concatenates the tier labels.
pub fn bracket_seeds(tiers: &[(Tier, Vec<EntrantId>)]) -> Vec<BracketSeed> {
    tiers
        .chunks(2)
        .map(|group| BracketSeed {
            key: group.iter().map(|(tier, _)| tier.label()).collect(),
            tiers: group.iter().map(|(tier, _)| *tier).collect(),
            contestants: group
                .iter()
                .flat_map(|(_, members)| members.iter().copied())
                .collect(),
        })
        .collect()
}

/// Draw knockout round `number` among `contestants`: shuffled, paired adjacent,
/// an odd one out advances on a bye.
pub fn knockout_round<R: Rng + ?Sized>(
    number: u32,
    contestants: &[EntrantId],
    rng: &mut R,
) -> KnockoutRound {
    let (pairings, bye) = shuffle_and_pair(contestants, rng);
    KnockoutRound {
        number,
        pairings,
        bye,
    }
}
