use crate::card::Card;
use serde::{Deserialize, Serialize};
use turnplay_core::{Result, TurnPlayError};

/// Parameters of an ASMACAG game.
///
/// Parameters are shared between a game state and every observation
/// derived from it and must not change once a game has started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmacagParameters {
    pub cards_in_hand: usize,
    pub cards_on_board: usize,
    pub action_points_per_turn: usize,
    pub min_number: u8,
    pub max_number: u8,
    /// Copies of the lowest and the highest number card
    pub limit_number_copies: usize,
    /// Copies of every other number card
    pub normal_number_copies: usize,
    pub mult2_cards: usize,
    pub div2_cards: usize,
}

impl Default for AsmacagParameters {
    fn default() -> Self {
        Self {
            cards_in_hand: 9,
            cards_on_board: 20,
            action_points_per_turn: 3,
            min_number: 1,
            max_number: 6,
            limit_number_copies: 5,
            normal_number_copies: 8,
            mult2_cards: 6,
            div2_cards: 6,
        }
    }
}

impl AsmacagParameters {
    /// Checks that a game can be dealt with these parameters.
    ///
    /// Both hands and the board must be fillable even if every card dealt
    /// to the hands is a number card.
    pub fn validate(&self) -> Result<()> {
        if self.action_points_per_turn == 0 {
            return Err(TurnPlayError::InvalidParameters(
                "action_points_per_turn must be at least 1".to_string(),
            ));
        }
        if self.action_points_per_turn > 31 {
            return Err(TurnPlayError::InvalidParameters(format!(
                "action_points_per_turn must be at most 31, got {}",
                self.action_points_per_turn
            )));
        }
        if self.cards_in_hand == 0 || self.cards_on_board == 0 {
            return Err(TurnPlayError::InvalidParameters(
                "hands and board need at least one card".to_string(),
            ));
        }
        if self.min_number > self.max_number {
            return Err(TurnPlayError::InvalidParameters(format!(
                "min_number {} exceeds max_number {}",
                self.min_number, self.max_number
            )));
        }

        let needed = 2 * self.cards_in_hand + self.cards_on_board;
        if self.number_cards() < needed {
            return Err(TurnPlayError::InvalidParameters(format!(
                "{} number cards cannot fill two hands of {} and a board of {}",
                self.number_cards(),
                self.cards_in_hand,
                self.cards_on_board
            )));
        }

        Ok(())
    }

    /// Number of number cards in a full deck
    pub fn number_cards(&self) -> usize {
        (self.min_number..=self.max_number)
            .map(|n| self.copies_of(n))
            .sum()
    }

    /// Total number of cards in a full deck
    pub fn deck_size(&self) -> usize {
        self.number_cards() + self.mult2_cards + self.div2_cards
    }

    /// The score given for an invalid action.
    ///
    /// It is the worst score a turn of valid actions could reach: every
    /// special card doubling the factor before the lowest card is played
    /// on the highest.
    pub fn min_score(&self) -> f64 {
        let exponent = self.action_points_per_turn.saturating_sub(1) as i32;
        2f64.powi(exponent) * (f64::from(self.min_number) - f64::from(self.max_number))
    }

    /// A full, unshuffled deck
    pub fn deck(&self) -> Vec<Card> {
        let mut deck = Vec::with_capacity(self.deck_size());
        for n in self.min_number..=self.max_number {
            deck.extend(std::iter::repeat(Card::Number(n)).take(self.copies_of(n)));
        }
        deck.extend(std::iter::repeat(Card::Mult2).take(self.mult2_cards));
        deck.extend(std::iter::repeat(Card::Div2).take(self.div2_cards));
        deck
    }

    fn copies_of(&self, number: u8) -> usize {
        if number == self.min_number || number == self.max_number {
            self.limit_number_copies
        } else {
            self.normal_number_copies
        }
    }
}
