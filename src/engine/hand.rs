//! A player's hand: an ordered card sequence addressed by two-character
//! codes, positionally split into four melds. Every mutating operation
//! either succeeds or rejects its input and leaves the hand unchanged.

use crate::engine::card::{Card, Rank};
use crate::engine::meld;
use serde::{Deserialize, Serialize};

/// The fixed meld shape: three groups of 3 and one group of 4, the group of
/// 4 always last. Meld membership is positional: players express it purely
/// by rearranging card order.
pub const MELD_SHAPE: [usize; 4] = [3, 3, 3, 4];

/// Hand size at which the closing condition is defined.
pub const CLOSED_HAND_SIZE: usize = 13;

/// One extra card is held between drawing and the mandatory discard.
pub const MAX_HAND_SIZE: usize = 14;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Adds a dealt or drawn card to the end of the hand.
    pub fn deal(&mut self, card: Card) -> Result<(), &'static str> {
        if self.cards.len() >= MAX_HAND_SIZE {
            return Err("Hand cannot hold more than 14 cards");
        }
        self.cards.push(card);
        Ok(())
    }

    /// Index of the first card matching a typed code like "4H".
    pub fn position_of(&self, code: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.matches_code(code))
    }

    /// Removes the card matching `code` and returns it.
    pub fn drop_card(&mut self, code: &str) -> Result<Card, &'static str> {
        let idx = self.position_of(code).ok_or("That card is not in your hand")?;
        Ok(self.cards.remove(idx))
    }

    /// Repositions a card: before the anchor card if one is given, otherwise
    /// to the end of the hand. This is how a player assembles melds, since
    /// meld membership is purely positional.
    pub fn move_card(&mut self, what: &str, before: Option<&str>) -> Result<(), &'static str> {
        let from = self.position_of(what).ok_or("That card is not in your hand")?;
        match before {
            Some(anchor_code) => {
                // Resolve the anchor first so a bad destination leaves the hand untouched.
                let to = self
                    .position_of(anchor_code)
                    .ok_or("The destination card is not in your hand")?;
                let card = self.cards.remove(from);
                let to = if from < to { to - 1 } else { to };
                self.cards.insert(to, card);
            }
            None => {
                let card = self.cards.remove(from);
                self.cards.push(card);
            }
        }
        Ok(())
    }

    /// Sorts the whole hand into canonical ascending order. A display
    /// convenience; it destroys any meld arrangement the player had made.
    pub fn sort(&mut self) {
        meld::canonicalize(&mut self.cards, None, false);
    }

    /// Replaces the hand's order with `order`, which must contain exactly
    /// the same cards. Used to apply a computed meld arrangement.
    pub fn rearrange(&mut self, order: Vec<Card>) -> Result<(), &'static str> {
        let mut have = self.cards.clone();
        let mut want = order.clone();
        have.sort_by_key(|c| (c.rank, c.suit as u8));
        want.sort_by_key(|c| (c.rank, c.suit as u8));
        if have != want {
            return Err("Rearrangement must use exactly the cards in the hand");
        }
        self.cards = order;
        Ok(())
    }

    /// The four positional meld groups. With 14 cards the last group
    /// temporarily holds 5; closure is only defined at 13.
    pub fn groups(&self) -> Vec<&[Card]> {
        let mut groups = Vec::with_capacity(MELD_SHAPE.len());
        let mut start = 0;
        for (i, &size) in MELD_SHAPE.iter().enumerate() {
            let end = if i == MELD_SHAPE.len() - 1 {
                self.cards.len().max(start)
            } else {
                (start + size).min(self.cards.len())
            };
            groups.push(&self.cards[start.min(self.cards.len())..end]);
            start = end;
        }
        groups
    }

    /// The closing condition: exactly 13 cards, at least one group is a
    /// pure (joker-free) run, and every group is a run, a book, or a
    /// joker-augmented run.
    pub fn satisfies_closure(&self, joker: Option<Rank>) -> bool {
        if self.cards.len() != CLOSED_HAND_SIZE {
            return false;
        }
        let groups = self.groups();
        if !groups.iter().any(|g| meld::is_valid_run(g)) {
            return false;
        }
        groups.iter().all(|g| {
            meld::is_valid_run(g)
                || meld::is_valid_book(g, joker)
                || meld::is_valid_joker_run(g, joker)
        })
    }
}
