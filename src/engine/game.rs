use crate::engine::card::{Card, Rank};
use crate::engine::deck::Deck;
use crate::engine::hand::{CLOSED_HAND_SIZE, Hand, MAX_HAND_SIZE};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One record per observable game action, in order. Drained by the caller
/// (the CLI appends them to an optional transcript file).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum GameEvent {
    GameStarted {
        players: Vec<String>,
        packs: usize,
        joker: Option<Card>,
    },
    CardTaken {
        player: String,
    },
    CardPicked {
        player: String,
        card: Card,
    },
    CardDropped {
        player: String,
        card: Card,
    },
    CloseRejected {
        player: String,
    },
    GameWon {
        player: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hand: Hand,
    pub is_bot: bool,
}

pub struct GameState {
    pub players: Vec<PlayerState>,
    pub deck: Deck,
    pub pile: Vec<Card>,
    /// Rank every joker card carries this game, if a joker was designated.
    pub joker_rank: Option<Rank>,
    /// The physically drawn joker card, shown on the table and never played.
    pub joker_card: Option<Card>,
    pub packs: usize,
    pub current_turn: usize,
    pub winner: Option<usize>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(humans: Vec<String>, bots: Vec<String>, packs: usize) -> Self {
        let players = humans
            .into_iter()
            .map(|name| (name, false))
            .chain(bots.into_iter().map(|name| (name, true)))
            .map(|(name, is_bot)| PlayerState {
                name,
                hand: Hand::new(),
                is_bot,
            })
            .collect();

        Self {
            players,
            deck: Deck::new(packs),
            pile: Vec::new(),
            joker_rank: None,
            joker_card: None,
            packs,
            current_turn: 0,
            winner: None,
            events: Vec::new(),
        }
    }

    /// Shuffles, optionally designates the joker rank, deals 13 cards to
    /// each player round-robin and seeds the pile with one face-up card.
    /// Fails when the deck cannot cover the deal.
    pub fn start(&mut self, with_joker: bool) -> Result<(), &'static str> {
        if self.packs == 0 {
            return Err("At least one pack is required");
        }
        let needed = CLOSED_HAND_SIZE * self.players.len() + 1 + usize::from(with_joker);
        if needed > self.deck.remaining() {
            return Err("Not enough cards in the deck for that many players");
        }

        self.deck.shuffle();

        if with_joker
            && let Some(card) = self.deck.designate_joker()
        {
            info!("joker rank designated: {}", card.rank);
            self.joker_rank = Some(card.rank);
            self.joker_card = Some(card);
        }

        for _ in 0..CLOSED_HAND_SIZE {
            for player in &mut self.players {
                if let Some(card) = self.deck.draw() {
                    // Cannot overflow: the hand starts empty and gets 13 cards.
                    let _ = player.hand.deal(card);
                }
            }
        }

        if let Some(card) = self.deck.draw() {
            self.pile.push(card);
        }

        self.events.push(GameEvent::GameStarted {
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            packs: self.packs,
            joker: self.joker_card,
        });
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current_turn]
    }

    pub fn current_player_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.current_turn]
    }

    pub fn pile_top(&self) -> Option<&Card> {
        self.pile.last()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Takes the face-down top card of the deck into the current hand.
    pub fn take_from_deck(&mut self) -> Result<Card, &'static str> {
        self.guard_can_draw()?;
        let card = self.deck.draw().ok_or("The deck is empty")?;
        let idx = self.current_turn;
        self.players[idx].hand.deal(card)?;
        debug!("{} took a card from the deck", self.players[idx].name);
        self.events.push(GameEvent::CardTaken {
            player: self.players[idx].name.clone(),
        });
        Ok(card)
    }

    /// Picks the face-up top card of the pile into the current hand.
    pub fn pick_from_pile(&mut self) -> Result<Card, &'static str> {
        self.guard_can_draw()?;
        if self.pile.is_empty() {
            return Err("The pile is empty");
        }
        let card = self.pile.pop().ok_or("The pile is empty")?;
        let idx = self.current_turn;
        self.players[idx].hand.deal(card)?;
        debug!("{} picked {} from the pile", self.players[idx].name, card);
        self.events.push(GameEvent::CardPicked {
            player: self.players[idx].name.clone(),
            card,
        });
        Ok(card)
    }

    fn guard_can_draw(&self) -> Result<(), &'static str> {
        if self.is_over() {
            return Err("The game is over");
        }
        if self.current_player().hand.len() >= MAX_HAND_SIZE {
            return Err("You already hold 14 cards; drop one first");
        }
        Ok(())
    }

    /// Drops a card onto the pile and ends the turn. Requires the full
    /// 14-card hand so the player always returns to 13.
    pub fn discard(&mut self, code: &str) -> Result<(), &'static str> {
        if self.is_over() {
            return Err("The game is over");
        }
        let idx = self.current_turn;
        if self.players[idx].hand.len() != MAX_HAND_SIZE {
            return Err("You must hold 14 cards to drop one");
        }
        let card = self.players[idx].hand.drop_card(code)?;
        self.pile.push(card);
        debug!("{} dropped {}", self.players[idx].name, card);
        self.events.push(GameEvent::CardDropped {
            player: self.players[idx].name.clone(),
            card,
        });
        self.advance_turn();
        Ok(())
    }

    /// Attempts to close: drops `code`, then evaluates the closing
    /// condition on the remaining 13 cards. On success the game ends with
    /// the current player as winner; on failure the dropped card comes
    /// back off the pile and the turn continues.
    pub fn try_close(&mut self, code: &str) -> Result<bool, &'static str> {
        if self.is_over() {
            return Err("The game is over");
        }
        let idx = self.current_turn;
        if self.players[idx].hand.len() != MAX_HAND_SIZE {
            return Err("You must hold 14 cards to close");
        }
        let joker = self.joker_rank;
        let card = self.players[idx].hand.drop_card(code)?;
        self.pile.push(card);

        if self.players[idx].hand.satisfies_closure(joker) {
            info!("{} closed the game", self.players[idx].name);
            self.winner = Some(idx);
            self.events.push(GameEvent::CardDropped {
                player: self.players[idx].name.clone(),
                card,
            });
            self.events.push(GameEvent::GameWon {
                player: self.players[idx].name.clone(),
            });
            Ok(true)
        } else {
            // False alarm: the dropped card returns to the hand.
            let returned = self.pile.pop().expect("card was just pushed");
            let _ = self.players[idx].hand.deal(returned);
            debug!("{} failed to close", self.players[idx].name);
            self.events.push(GameEvent::CloseRejected {
                player: self.players[idx].name.clone(),
            });
            Ok(false)
        }
    }

    fn advance_turn(&mut self) {
        self.current_turn = (self.current_turn + 1) % self.players.len();
    }
}
