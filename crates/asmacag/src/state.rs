use crate::{card::Card, observation::AsmacagObservation, parameters::AsmacagParameters};
use rand::{seq::SliceRandom, Rng};
use std::sync::Arc;
use turnplay_core::Result;

/// The full ASMACAG game state, with both hands known.
///
/// The driver steps the state through [`GameState::table_mut`] and hands
/// players the randomised view returned by [`GameState::observation`].
#[derive(Clone, Debug)]
pub struct GameState {
    table: AsmacagObservation,
}

impl GameState {
    /// Create a game and deal it.
    pub fn new<R: Rng + ?Sized>(parameters: AsmacagParameters, rng: &mut R) -> Result<Self> {
        parameters.validate()?;
        let mut state = Self {
            table: AsmacagObservation::empty(Arc::new(parameters)),
        };
        state.reset(rng);
        Ok(state)
    }

    /// Shuffle a full deck and deal a new game.
    ///
    /// Hands are dealt alternately. The board only takes number cards:
    /// special cards drawn while dealing it go back into the deck, which
    /// is then shuffled again.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let parameters = Arc::clone(&self.table.parameters);
        let mut table = AsmacagObservation::empty(Arc::clone(&parameters));

        let mut deck = parameters.deck();
        deck.shuffle(rng);

        for _ in 0..parameters.cards_in_hand {
            for hand in table.hands.iter_mut() {
                if let Some(card) = deck.pop() {
                    hand.push(card);
                }
            }
        }

        let mut specials = Vec::new();
        while table.board.len() < parameters.cards_on_board {
            match deck.pop() {
                Some(card @ Card::Number(_)) => table.board.push(card),
                Some(card) => specials.push(card),
                None => break,
            }
        }
        deck.extend(specials);
        deck.shuffle(rng);

        table.main_deck = deck;
        self.table = table;
    }

    /// A view for the player to move, with the opponent's hand resampled.
    pub fn observation<R: Rng + ?Sized>(&self, rng: &mut R) -> AsmacagObservation {
        let mut observation = self.table.clone();
        observation.randomise(rng);
        observation
    }

    /// The true table
    pub fn table(&self) -> &AsmacagObservation {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut AsmacagObservation {
        &mut self.table
    }

    pub fn parameters(&self) -> &AsmacagParameters {
        &self.table.parameters
    }

    /// The player with the higher score, or None on a draw.
    pub fn leader(&self) -> Option<usize> {
        let [first, second] = self.table.scores;
        if first > second {
            Some(0)
        } else if second > first {
            Some(1)
        } else {
            None
        }
    }
}
