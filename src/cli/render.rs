use crate::engine::card::{Card, Rank, Suit};
use crate::engine::game::GameState;
use crate::engine::hand::Hand;
use colored::Colorize;

/// A card as shown at the prompt: red suits in red, joker cards marked
/// with a trailing `-J` and shown in yellow.
pub fn card_label(card: &Card, joker: Option<Rank>) -> String {
    if card.is_joker(joker) {
        return format!("{card}-J").yellow().to_string();
    }
    match card.suit {
        Suit::Hearts | Suit::Diamonds => card.to_string().red().to_string(),
        Suit::Clubs | Suit::Spades => card.to_string(),
    }
}

/// The hand on one line, meld groups separated by `|` so the player can see
/// the 3/3/3/4 split they are arranging into.
pub fn hand_line(hand: &Hand, joker: Option<Rank>) -> String {
    hand.groups()
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|c| card_label(c, joker))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

pub fn table_line(game: &GameState) -> String {
    let pile = match game.pile_top() {
        Some(card) => card_label(card, game.joker_rank),
        None => "empty".to_string(),
    };
    let joker = match game.joker_card {
        Some(card) => format!("{card} (all {}s are wild)", card.rank),
        None => "none".to_string(),
    };
    format!(
        "Top of pile: {pile}   Joker: {joker}   Deck: {} cards",
        game.deck.remaining()
    )
}

pub const RULES: &str = "\
------------------ Rules --------------------
- Rummy is a card game based on making melds.
- From a hand of 13 cards, 4 melds must be created (3 melds of 3, 1 meld of 4).
- The meld of 4 must always be at the end.
- A valid meld is either a run or a book.
- One meld must be a run WITHOUT using a joker.
- A run is a sequence of consecutive ranks, all of the same suit.
    For example: 4 of Hearts, 5 of Hearts, 6 of Hearts.
- A book is a meld of cards of the same rank.
    For example: 3 of Diamonds, 3 of Spades, 3 of Clubs.
- The joker rank is picked at random from the deck at the start of the game.
- Joker cards are marked '-J' and can stand in for any card in a meld.
- Each turn: pick from the pile or take from the deck, then drop one card
  so you never keep more than 13.
- Melds are positional: use Move to arrange your cards into the four groups.
- When all four melds are ready, choose Close and drop the excess card.
- The card with rank 10 is written as T (e.g. TH is the 10 of Hearts).
---------------------------------------------";
