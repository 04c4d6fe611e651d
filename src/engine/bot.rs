//! A computer player. Greedy but legal: draw the pile card when it helps,
//! close the moment some discard leaves a closable 13, otherwise throw away
//! the least connected card.

use crate::engine::arrange;
use crate::engine::card::{Card, Rank};
use crate::engine::game::GameState;
use crate::engine::hand::MAX_HAND_SIZE;
use crate::engine::meld::{AceRole, rank_value};
use log::debug;
use rand::prelude::IndexedRandom;
use rand::rng;

/// Explicit state machine for the bot's turn, instead of branching on hand
/// length at every decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotTurnPhase {
    /// 13 cards: must draw from the deck or pick from the pile.
    NeedDraw,
    /// 14 cards: must close or discard to end the turn.
    MustDiscard,
}

pub fn detect_phase(hand_len: usize) -> BotTurnPhase {
    if hand_len >= MAX_HAND_SIZE {
        BotTurnPhase::MustDiscard
    } else {
        BotTurnPhase::NeedDraw
    }
}

/// Plays one full turn for the current player. The caller is responsible
/// for only invoking this on bot seats.
pub fn play_bot_turn(game: &mut GameState) -> Result<(), &'static str> {
    let joker = game.joker_rank;
    let name = game.current_player().name.clone();

    if detect_phase(game.current_player().hand.len()) == BotTurnPhase::NeedDraw {
        let take_pile = match game.pile_top() {
            Some(top) => {
                top.is_joker(joker) || synergy(game.current_player().hand.cards(), top, joker) >= 2
            }
            None => false,
        };
        if take_pile {
            game.pick_from_pile()?;
        } else if game.take_from_deck().is_err() {
            // Deck ran dry; the pile is the only source left.
            game.pick_from_pile()?;
        }
    }

    if let Some((order, excess)) = closing_plan(game.current_player().hand.cards(), joker) {
        debug!("{name} found a closing arrangement");
        game.current_player_mut().hand.rearrange(order)?;
        if game.try_close(&excess.code())? {
            return Ok(());
        }
    }

    let discard = pick_discard(game.current_player().hand.cards(), joker);
    debug!("{name} discards {discard}");
    game.discard(&discard.code())
}

/// Looks for a discard that leaves the remaining 13 cards closable. Returns
/// the full 14-card order (excess card first, then the arranged melds) and
/// the excess. The excess leads the order so that dropping it by code
/// removes that copy and not a same-coded card sitting inside a meld.
fn closing_plan(cards: &[Card], joker: Option<Rank>) -> Option<(Vec<Card>, Card)> {
    if cards.len() != MAX_HAND_SIZE {
        return None;
    }
    for i in 0..cards.len() {
        let mut rest = cards.to_vec();
        let excess = rest.remove(i);
        if let Some(mut order) = arrange::closing_arrangement(&rest, joker) {
            order.insert(0, excess);
            return Some((order, excess));
        }
    }
    None
}

/// How connected a card is to the rest of the hand: shared rank scores as
/// book potential, near ranks in the same suit as run potential. Jokers are
/// pinned high so they are never thrown away.
fn synergy(hand: &[Card], card: &Card, joker: Option<Rank>) -> i32 {
    if card.is_joker(joker) {
        return 100;
    }
    let value = rank_value(card.rank, AceRole::Low);
    hand.iter()
        .filter(|other| !std::ptr::eq(*other, card))
        .map(|other| {
            if other.is_joker(joker) {
                1
            } else if other.rank == card.rank {
                2
            } else if other.suit == card.suit {
                match rank_value(other.rank, AceRole::Low).abs_diff(value) {
                    1 => 2,
                    2 => 1,
                    _ => 0,
                }
            } else {
                0
            }
        })
        .sum()
}

fn pick_discard(cards: &[Card], joker: Option<Rank>) -> Card {
    let scores: Vec<i32> = cards.iter().map(|c| synergy(cards, c, joker)).collect();
    let worst = scores.iter().copied().min().unwrap_or(0);
    let losers: Vec<Card> = cards
        .iter()
        .zip(&scores)
        .filter(|&(_, &s)| s == worst)
        .map(|(c, _)| *c)
        .collect();
    let mut rng = rng();
    *losers.choose(&mut rng).unwrap_or(&cards[0])
}
