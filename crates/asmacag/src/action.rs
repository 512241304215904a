use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;
use turnplay_core::Action;

/// Playing a card from hand, on a board card for number cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AsmacagAction {
    played: Card,
    board: Option<Card>,
}

impl AsmacagAction {
    /// Play a hand card on a board card
    pub const fn on_board(played: Card, board: Card) -> Self {
        Self {
            played,
            board: Some(board),
        }
    }

    /// Play a hand card on nothing (special cards)
    pub const fn alone(played: Card) -> Self {
        Self { played, board: None }
    }

    pub const fn played(&self) -> Card {
        self.played
    }

    pub const fn board(&self) -> Option<Card> {
        self.board
    }
}

impl Action for AsmacagAction {}

impl fmt::Display for AsmacagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.board {
            Some(board) => write!(f, "[{}] on [{}]", self.played, board),
            None => write!(f, "[{}] on nothing", self.played),
        }
    }
}
