use crate::engine::card::{Card, Rank, Suit};
use rand::RngExt;
use rand::rng;
use rand::seq::SliceRandom;

pub const CARDS_PER_PACK: usize = 52;

pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a deck of `packs` standard 52-card packs. There are no
    /// printed joker cards: jokers are designated by rank at game start.
    pub fn new(packs: usize) -> Self {
        let mut cards = Vec::with_capacity(packs * CARDS_PER_PACK);

        for _ in 0..packs {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }

        Self { cards }
    }

    pub fn shuffle(&mut self) {
        let mut rng = rng();
        self.cards.shuffle(&mut rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Picks the game's joker at random. The drawn card is removed from
    /// circulation (it is shown on the table, never played); every card
    /// sharing its rank plays as a joker for the rest of the game.
    pub fn designate_joker(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let mut rng = rng();
        let idx = rng.random_range(0..self.cards.len());
        Some(self.cards.remove(idx))
    }
}
