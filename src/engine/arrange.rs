//! Closing-arrangement search: can a 13-card hand be reordered into the
//! 3/3/3/4 meld shape so that it closes? Candidate melds are enumerated as
//! bitmasks over hand positions and the small exact-cover instance is
//! solved directly.

use crate::engine::card::{Card, Rank};
use crate::engine::hand::CLOSED_HAND_SIZE;
use crate::engine::meld;

/// A bitmask over hand positions. 13 cards fit comfortably in a u16.
pub type HandMask = u16;

const FULL_HAND: HandMask = (1 << CLOSED_HAND_SIZE as u32) - 1;

#[derive(Debug, Clone, Copy)]
struct MeldCandidate {
    mask: HandMask,
    /// Passes the joker-free run validator; at least one chosen group must.
    pure_run: bool,
}

/// Finds an order for `cards` (exactly 13) under which the hand closes:
/// three valid 3-card groups followed by a valid 4-card group, at least one
/// group being a pure run. Returns the reordered cards, or `None` if no
/// such arrangement exists.
pub fn closing_arrangement(cards: &[Card], joker: Option<Rank>) -> Option<Vec<Card>> {
    if cards.len() != CLOSED_HAND_SIZE {
        return None;
    }

    let mut triples = Vec::new();
    let mut quads = Vec::new();
    for mask in 1..=FULL_HAND {
        let size = mask.count_ones();
        if size != 3 && size != 4 {
            continue;
        }
        let group = select(cards, mask);
        let pure_run = meld::is_valid_run(&group);
        if !pure_run
            && !meld::is_valid_book(&group, joker)
            && !meld::is_valid_joker_run(&group, joker)
        {
            continue;
        }
        let candidate = MeldCandidate { mask, pure_run };
        if size == 3 {
            triples.push(candidate);
        } else {
            quads.push(candidate);
        }
    }

    for quad in &quads {
        if let Some([a, b, c]) = cover_triples(quad, &triples) {
            let mut ordered = Vec::with_capacity(CLOSED_HAND_SIZE);
            for group in [a, b, c, *quad] {
                ordered.extend(select(cards, group.mask));
            }
            return Some(ordered);
        }
    }
    None
}

fn select(cards: &[Card], mask: HandMask) -> Vec<Card> {
    cards
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << *i as u32) != 0)
        .map(|(_, c)| *c)
        .collect()
}

/// Picks three pairwise-disjoint triples that cover everything the quad
/// left over, keeping at least one pure run somewhere among the four
/// groups. Masks are disjoint and total 13 bits, so disjointness alone
/// implies full cover.
fn cover_triples(quad: &MeldCandidate, triples: &[MeldCandidate]) -> Option<[MeldCandidate; 3]> {
    let rest = FULL_HAND & !quad.mask;
    for (i, a) in triples.iter().enumerate() {
        if a.mask & !rest != 0 {
            continue;
        }
        for (j, b) in triples.iter().enumerate().skip(i + 1) {
            if b.mask & !rest != 0 || a.mask & b.mask != 0 {
                continue;
            }
            for c in triples.iter().skip(j + 1) {
                if c.mask & !rest != 0 || (a.mask | b.mask) & c.mask != 0 {
                    continue;
                }
                if !(quad.pure_run || a.pure_run || b.pure_run || c.pure_run) {
                    continue;
                }
                return Some([*a, *b, *c]);
            }
        }
    }
    None
}
