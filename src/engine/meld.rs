//! Meld validation: books (same rank, any suits), runs (consecutive ranks,
//! one suit) and joker-augmented runs. A meld is a transient group of 3 or 4
//! cards; every validator here is a pure function of the group and the
//! game's designated joker rank.

use crate::engine::card::{Card, Rank};

/// How the Ace is valued when ordering a run. It sits below the Two (value 1)
/// or above the King (value 14); runs are checked under both readings, so no
/// shared state decides which one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AceRole {
    Low,
    High,
}

pub fn rank_value(rank: Rank, ace: AceRole) -> u8 {
    match (rank, ace) {
        (Rank::Ace, AceRole::High) => 14,
        _ => rank as u8,
    }
}

/// Melds are 3 or 4 cards; anything else is rejected at the boundary.
fn meld_sized(cards: &[Card]) -> bool {
    (3..=4).contains(&cards.len())
}

/// In-place canonical ordering of a meld: ascending by rank value, with the
/// Ace re-read as high when it leads a court-card group (so Q-K-A sorts as a
/// top-end run rather than A-Q-K). With `relocate_jokers`, joker cards are
/// moved to the end after sorting, preserving relative order.
pub fn canonicalize(cards: &mut [Card], joker: Option<Rank>, relocate_jokers: bool) {
    sort_by_value(cards, AceRole::Low);
    if relocate_jokers {
        push_jokers_to_end(cards, joker);
    }
    if ace_wraps_high(cards) {
        sort_by_value(cards, AceRole::High);
        if relocate_jokers {
            push_jokers_to_end(cards, joker);
        }
    }
}

fn sort_by_value(cards: &mut [Card], ace: AceRole) {
    // Stable, so equal ranks keep their given order.
    cards.sort_by_key(|c| rank_value(c.rank, ace));
}

/// Ordering heuristic: an Ace in front of a Jack, Queen or King is read as
/// the top of the sequence. Validation never depends on this; it only picks
/// the display order.
fn ace_wraps_high(cards: &[Card]) -> bool {
    cards.len() >= 2
        && cards[0].rank == Rank::Ace
        && matches!(cards[1].rank, Rank::Jack | Rank::Queen | Rank::King)
}

fn push_jokers_to_end(cards: &mut [Card], joker: Option<Rank>) {
    let mut ordered: Vec<Card> = cards.iter().copied().filter(|c| !c.is_joker(joker)).collect();
    ordered.extend(cards.iter().copied().filter(|c| c.is_joker(joker)));
    cards.copy_from_slice(&ordered);
}

/// A book holds 3-4 cards of one rank; suits are never checked. Joker cards
/// are free and cannot contradict the rank. A group of nothing but jokers is
/// vacuously a book.
pub fn is_valid_book(cards: &[Card], joker: Option<Rank>) -> bool {
    if !meld_sized(cards) {
        return false;
    }
    let mut anchor: Option<Rank> = None;
    for card in cards {
        if card.is_joker(joker) {
            continue;
        }
        match anchor {
            Some(rank) if rank != card.rank => return false,
            _ => anchor = Some(card.rank),
        }
    }
    true
}

/// A pure run: 3-4 cards of one suit with consecutive rank values, Ace
/// counting as either end. Deliberately joker-blind: cards are judged by
/// their raw ranks, so a naturally consecutive group still counts as the
/// mandatory joker-free run even if one member happens to carry the joker
/// rank.
pub fn is_valid_run(cards: &[Card]) -> bool {
    if !meld_sized(cards) {
        return false;
    }
    if cards.iter().any(|c| c.suit != cards[0].suit) {
        return false;
    }
    let ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
    consecutive(&ranks, AceRole::Low)
        || (ranks.contains(&Rank::Ace) && consecutive(&ranks, AceRole::High))
}

fn consecutive(ranks: &[Rank], ace: AceRole) -> bool {
    let mut values: Vec<u8> = ranks.iter().map(|&r| rank_value(r, ace)).collect();
    values.sort_unstable();
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

/// A run where joker cards stand in for missing ranks. Non-joker cards must
/// share a suit and have pairwise-distinct ranks; the group is valid when
/// the jokers can cover every internal gap of the sorted values (under
/// either Ace reading). Jokers left over after gap-filling extend the run's
/// ends and are always fine. All-joker groups are vacuously valid.
pub fn is_valid_joker_run(cards: &[Card], joker: Option<Rank>) -> bool {
    if !meld_sized(cards) {
        return false;
    }
    let standard: Vec<Card> = cards.iter().copied().filter(|c| !c.is_joker(joker)).collect();
    let jokers = cards.len() - standard.len();
    let Some(first) = standard.first() else {
        return true;
    };
    if standard.iter().any(|c| c.suit != first.suit) {
        return false;
    }
    let ranks: Vec<Rank> = standard.iter().map(|c| c.rank).collect();
    gaps_coverable(&ranks, jokers, AceRole::Low)
        || (ranks.contains(&Rank::Ace) && gaps_coverable(&ranks, jokers, AceRole::High))
}

fn gaps_coverable(ranks: &[Rank], jokers: usize, ace: AceRole) -> bool {
    let mut values: Vec<u8> = ranks.iter().map(|&r| rank_value(r, ace)).collect();
    values.sort_unstable();
    let mut gaps = 0usize;
    for w in values.windows(2) {
        match w[1] - w[0] {
            // The same rank cannot appear twice in one run.
            0 => return false,
            d => gaps += (d - 1) as usize,
        }
    }
    gaps <= jokers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::card::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_valid_run_consecutive_same_suit() {
        let cards = vec![
            card(Rank::Four, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
        ];
        assert!(is_valid_run(&cards));
    }

    #[test]
    fn test_invalid_run_gap_in_ranks() {
        let cards = vec![
            card(Rank::Four, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
        ];
        assert!(!is_valid_run(&cards));
    }

    #[test]
    fn test_invalid_run_mixed_suits() {
        let cards = vec![
            card(Rank::Four, Suit::Hearts),
            card(Rank::Five, Suit::Spades),
            card(Rank::Six, Suit::Hearts),
        ];
        assert!(!is_valid_run(&cards));
    }

    #[test]
    fn test_run_rejects_bad_group_sizes() {
        let two = vec![card(Rank::Four, Suit::Hearts), card(Rank::Five, Suit::Hearts)];
        assert!(!is_valid_run(&two));
        assert!(!is_valid_run(&[]));
        let five: Vec<Card> = [Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]
            .iter()
            .map(|&r| card(r, Suit::Clubs))
            .collect();
        assert!(!is_valid_run(&five));
    }

    #[test]
    fn test_ace_low_run() {
        let cards = vec![
            card(Rank::Ace, Suit::Spades),
            card(Rank::Two, Suit::Spades),
            card(Rank::Three, Suit::Spades),
        ];
        assert!(is_valid_run(&cards));
    }

    #[test]
    fn test_ace_high_run() {
        let cards = vec![
            card(Rank::Queen, Suit::Spades),
            card(Rank::King, Suit::Spades),
            card(Rank::Ace, Suit::Spades),
        ];
        assert!(is_valid_run(&cards));
    }

    #[test]
    fn test_ace_high_four_card_run() {
        let cards = vec![
            card(Rank::Jack, Suit::Diamonds),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Queen, Suit::Diamonds),
            card(Rank::King, Suit::Diamonds),
        ];
        assert!(is_valid_run(&cards));
    }

    #[test]
    fn test_ace_cannot_bridge_both_ends() {
        // K-A-2 wraps around the corner and is no run under either reading.
        let cards = vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Two, Suit::Clubs),
        ];
        assert!(!is_valid_run(&cards));
    }

    #[test]
    fn test_run_is_idempotent_and_non_mutating() {
        let cards = vec![
            card(Rank::Six, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
        ];
        let before = cards.clone();
        assert!(is_valid_run(&cards));
        assert!(is_valid_run(&cards));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_valid_book_distinct_suits() {
        let cards = vec![
            card(Rank::Five, Suit::Spades),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Five, Suit::Clubs),
        ];
        assert!(is_valid_book(&cards, None));
    }

    #[test]
    fn test_book_rank_mismatch_fails() {
        let cards = vec![
            card(Rank::Five, Suit::Spades),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Five, Suit::Clubs),
        ];
        assert!(!is_valid_book(&cards, None));
    }

    #[test]
    fn test_book_skips_jokers() {
        // Joker rank is Ace: the A♠ is free and cannot contradict the sixes.
        let cards = vec![
            card(Rank::Ace, Suit::Spades),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Six, Suit::Hearts),
        ];
        assert!(is_valid_book(&cards, Some(Rank::Ace)));
        assert!(!is_valid_book(&cards, None));
    }

    #[test]
    fn test_all_joker_book_is_vacuously_valid() {
        let cards = vec![
            card(Rank::Jack, Suit::Clubs),
            card(Rank::Jack, Suit::Hearts),
            card(Rank::Jack, Suit::Spades),
        ];
        assert!(is_valid_book(&cards, Some(Rank::Jack)));
    }

    #[test]
    fn test_joker_run_fills_gap() {
        // Joker rank is Four: 4♦ stands in for the missing 5♦.
        let cards = vec![
            card(Rank::Four, Suit::Diamonds),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Seven, Suit::Diamonds),
        ];
        assert!(is_valid_joker_run(&cards, Some(Rank::Four)));
        assert!(!is_valid_run(&cards));
    }

    #[test]
    fn test_joker_run_two_jokers_two_gaps() {
        // Joker rank is Seven: one seven covers the 2♦ gap, the other extends the run.
        let cards = vec![
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Seven, Suit::Spades),
        ];
        assert!(is_valid_joker_run(&cards, Some(Rank::Seven)));
    }

    #[test]
    fn test_joker_run_too_few_jokers() {
        let cards = vec![
            card(Rank::Two, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
        ];
        assert!(!is_valid_joker_run(&cards, Some(Rank::Nine)));
    }

    #[test]
    fn test_joker_run_suit_mismatch() {
        let cards = vec![
            card(Rank::Four, Suit::Diamonds),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert!(!is_valid_joker_run(&cards, Some(Rank::Nine)));
    }

    #[test]
    fn test_joker_run_duplicate_rank_fails() {
        let cards = vec![
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert!(!is_valid_joker_run(&cards, Some(Rank::Nine)));
    }

    #[test]
    fn test_joker_run_trailing_joker_extends_run() {
        let cards = vec![
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert!(is_valid_joker_run(&cards, Some(Rank::Nine)));
    }

    #[test]
    fn test_joker_run_ace_high_with_gap() {
        // Joker covers the King in Q-_-A.
        let cards = vec![
            card(Rank::Queen, Suit::Spades),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ];
        assert!(is_valid_joker_run(&cards, Some(Rank::Two)));
    }

    #[test]
    fn test_all_joker_group_is_vacuous_run() {
        let cards = vec![
            card(Rank::Jack, Suit::Clubs),
            card(Rank::Jack, Suit::Hearts),
            card(Rank::Jack, Suit::Spades),
        ];
        assert!(is_valid_joker_run(&cards, Some(Rank::Jack)));
    }

    #[test]
    fn test_canonicalize_sorts_ascending() {
        let mut cards = vec![
            card(Rank::Six, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
        ];
        canonicalize(&mut cards, None, false);
        let ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Four, Rank::Five, Rank::Six]);
    }

    #[test]
    fn test_canonicalize_ace_joins_court_cards() {
        let mut cards = vec![
            card(Rank::King, Suit::Diamonds),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Queen, Suit::Diamonds),
            card(Rank::Jack, Suit::Diamonds),
        ];
        canonicalize(&mut cards, None, false);
        let ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]);
    }

    #[test]
    fn test_canonicalize_relocates_jokers() {
        let mut cards = vec![
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Seven, Suit::Diamonds),
        ];
        canonicalize(&mut cards, Some(Rank::Two), true);
        let ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Six, Rank::Seven, Rank::Nine, Rank::Two]);
    }
}
