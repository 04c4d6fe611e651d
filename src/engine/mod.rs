pub mod arrange;
pub mod bot;
pub mod card;
pub mod deck;
pub mod game;
pub mod hand;
pub mod meld;
