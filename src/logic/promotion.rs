//! Promotion and relegation between league tiers.

use crate::models::{EntrantId, Tier};

/// One entrant changing tier at league finish.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TierMove {
    pub entrant: EntrantId,
    pub from: Tier,
    pub to: Tier,
}

/// Plan moves from ranked tiers (strongest tier first, each ranked best first).
///
/// The top of every tier but the highest goes up one; the bottom of every tier
/// but the lowest goes down one. A lone member who is both top and bottom is
/// only promoted.
pub fn plan_moves(ranked: &[(Tier, Vec<EntrantId>)]) -> Vec<TierMove> {
    let last = ranked.len().saturating_sub(1);
    let mut moves = Vec::new();
    for (i, (tier, members)) in ranked.iter().enumerate() {
        let (Some(&top), Some(&bottom)) = (members.first(), members.last()) else {
            continue;
        };
        let promoted = match tier.above() {
            Some(up) if i > 0 => {
                moves.push(TierMove {
                    entrant: top,
                    from: *tier,
                    to: up,
                });
                Some(top)
            }
            _ => None,
        };
        if i < last && promoted != Some(bottom) {
            moves.push(TierMove {
                entrant: bottom,
                from: *tier,
                to: tier.below(),
            });
        }
    }
    moves
}

/// Tier champions: the top-ranked entrant of each non-empty tier.
pub fn tier_champions(ranked: &[(Tier, Vec<EntrantId>)]) -> Vec<(Tier, EntrantId)> {
    ranked
        .iter()
        .filter_map(|(tier, members)| members.first().map(|&top| (*tier, top)))
        .collect()
}
