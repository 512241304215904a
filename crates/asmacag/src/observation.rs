use crate::{
    action::AsmacagAction,
    card::{Card, Pile},
    parameters::AsmacagParameters,
};
use rand::{seq::SliceRandom, Rng};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use turnplay_core::{Observation, Result, TurnPlayError};

/// The ASMACAG table as seen by one player.
///
/// The game state itself is kept in this form too, with both hands
/// known. Observations handed to a player have the opponent's hand
/// resampled from the unseen cards, see [`AsmacagObservation::randomise`].
#[derive(Clone, Debug, PartialEq)]
pub struct AsmacagObservation {
    pub(crate) parameters: Arc<AsmacagParameters>,
    pub(crate) current_player: usize,
    pub(crate) hands: [Vec<Card>; 2],
    pub(crate) board: Vec<Card>,
    pub(crate) main_deck: Vec<Card>,
    pub(crate) discard_deck: Vec<Card>,
    pub(crate) scores: [f64; 2],
    pub(crate) factor: f64,
    pub(crate) action_points_left: usize,
}

impl AsmacagObservation {
    /// An empty table: no cards dealt, no score, player 0 to move.
    pub(crate) fn empty(parameters: Arc<AsmacagParameters>) -> Self {
        let action_points_left = parameters.action_points_per_turn;
        Self {
            parameters,
            current_player: 0,
            hands: [Vec::new(), Vec::new()],
            board: Vec::new(),
            main_deck: Vec::new(),
            discard_deck: Vec::new(),
            scores: [0.0; 2],
            factor: 1.0,
            action_points_left,
        }
    }

    pub fn parameters(&self) -> &AsmacagParameters {
        &self.parameters
    }

    /// The hand of `player`.
    pub fn hand(&self, player: usize) -> Result<&[Card]> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or(TurnPlayError::InvalidPlayer(player))
    }

    /// The hand of the player to move
    pub fn current_hand(&self) -> &[Card] {
        &self.hands[self.current_player]
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn main_deck(&self) -> &[Card] {
        &self.main_deck
    }

    pub fn discard_deck(&self) -> &[Card] {
        &self.discard_deck
    }

    /// Scores of player 0 and player 1
    pub fn scores(&self) -> [f64; 2] {
        self.scores
    }

    /// Multiplier applied to the next number card played
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn action_points_left(&self) -> usize {
        self.action_points_left
    }

    /// Every card on the table, in no particular order.
    pub fn all_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.hands[0]
            .iter()
            .chain(&self.hands[1])
            .chain(&self.board)
            .chain(&self.main_deck)
            .chain(&self.discard_deck)
            .copied()
    }

    /// Resamples the opponent's hand.
    ///
    /// The opponent's cards are shuffled back into the main deck and the
    /// same number of cards is drawn again. The player to move keeps their
    /// own hand, and the board, discards and scores are untouched.
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let opponent = 1 - self.current_player;
        let hidden = std::mem::take(&mut self.hands[opponent]);
        let count = hidden.len();

        self.main_deck.extend(hidden);
        self.main_deck.shuffle(rng);

        let split = self.main_deck.len() - count;
        self.hands[opponent] = self.main_deck.split_off(split);
    }
}

impl Observation for AsmacagObservation {
    type Action = AsmacagAction;

    /// One action per distinct hand card, and per distinct board card for
    /// number cards, in card order.
    fn actions(&self) -> Vec<AsmacagAction> {
        let hand: BTreeSet<Card> = self.current_hand().iter().copied().collect();
        let board: BTreeSet<Card> = self.board.iter().copied().filter(|c| c.is_number()).collect();

        let mut actions = Vec::new();
        for card in hand {
            if card.is_number() {
                actions.extend(board.iter().map(|&target| AsmacagAction::on_board(card, target)));
            } else {
                actions.push(AsmacagAction::alone(card));
            }
        }
        actions
    }

    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<AsmacagAction> {
        let card = *self.current_hand().choose(rng)?;
        if card.is_number() {
            let target = *self.board.choose(rng)?;
            Some(AsmacagAction::on_board(card, target))
        } else {
            Some(AsmacagAction::alone(card))
        }
    }

    fn is_action_valid(&self, action: &AsmacagAction) -> bool {
        if !self.current_hand().contains(&action.played()) {
            return false;
        }
        if action.played().is_number() {
            action
                .board()
                .is_some_and(|target| target.is_number() && self.board.contains(&target))
        } else {
            true
        }
    }

    fn action_points_per_turn(&self) -> usize {
        self.parameters.action_points_per_turn
    }

    fn current_player(&self) -> usize {
        self.current_player
    }
}

impl fmt::Display for AsmacagObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TURN: {}", self.current_player)?;
        writeln!(f, "BOARD: {}", Pile(&self.board))?;
        for player in 0..2 {
            writeln!(f, "HAND P{}: {}", player, Pile(&self.hands[player]))?;
            writeln!(f, "SCORE P{}: {}", player, self.scores[player])?;
        }
        writeln!(f, "FACTOR: {}", self.factor)?;
        write!(f, "ACTION POINTS LEFT: {}", self.action_points_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table(hand: Vec<Card>, board: Vec<Card>) -> AsmacagObservation {
        let mut observation = AsmacagObservation::empty(Arc::new(AsmacagParameters::default()));
        observation.hands[0] = hand;
        observation.hands[1] = vec![Card::Number(6), Card::Div2];
        observation.board = board;
        observation.main_deck = vec![Card::Number(1), Card::Number(2), Card::Mult2];
        observation
    }

    #[test]
    fn test_actions_deduplicate_cards() {
        let observation = table(
            vec![Card::Number(3), Card::Mult2, Card::Number(3)],
            vec![Card::Number(5), Card::Number(2), Card::Number(5)],
        );

        let actions = observation.actions();

        assert_eq!(
            actions,
            vec![
                AsmacagAction::on_board(Card::Number(3), Card::Number(2)),
                AsmacagAction::on_board(Card::Number(3), Card::Number(5)),
                AsmacagAction::alone(Card::Mult2),
            ]
        );
        assert!(actions.iter().all(|a| observation.is_action_valid(a)));
    }

    #[test]
    fn test_is_action_valid() {
        let observation = table(vec![Card::Number(3), Card::Div2], vec![Card::Number(5)]);

        assert!(observation.is_action_valid(&AsmacagAction::alone(Card::Div2)));
        assert!(!observation.is_action_valid(&AsmacagAction::alone(Card::Mult2)));
        assert!(!observation.is_action_valid(&AsmacagAction::alone(Card::Number(3))));
        assert!(!observation.is_action_valid(&AsmacagAction::on_board(Card::Number(3), Card::Number(4))));
        assert!(!observation.is_action_valid(&AsmacagAction::on_board(Card::Number(6), Card::Number(5))));
    }

    #[test]
    fn test_random_action_is_valid() {
        let observation = table(vec![Card::Number(3), Card::Div2, Card::Number(1)], vec![Card::Number(5)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let action = observation.random_action(&mut rng).unwrap();
            assert!(observation.is_action_valid(&action));
        }
    }

    #[test]
    fn test_random_action_empty_hand() {
        let observation = table(vec![], vec![Card::Number(5)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(observation.random_action(&mut rng), None);
        assert!(observation.actions().is_empty());
    }

    #[test]
    fn test_randomise_keeps_visible_cards() {
        let observation = table(vec![Card::Number(3), Card::Div2], vec![Card::Number(5)]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut randomised = observation.clone();
        randomised.randomise(&mut rng);

        assert_eq!(randomised.hands[0], observation.hands[0]);
        assert_eq!(randomised.board, observation.board);
        assert_eq!(randomised.hands[1].len(), 2);

        let mut hidden_before: Vec<Card> = observation.hands[1].iter().chain(&observation.main_deck).copied().collect();
        let mut hidden_after: Vec<Card> = randomised.hands[1].iter().chain(&randomised.main_deck).copied().collect();
        hidden_before.sort();
        hidden_after.sort();
        assert_eq!(hidden_before, hidden_after);
    }

    #[test]
    fn test_hand_rejects_bad_player() {
        let observation = table(vec![Card::Number(3)], vec![]);
        assert_eq!(observation.hand(0).unwrap(), &[Card::Number(3)]);
        assert_eq!(observation.hand(2), Err(TurnPlayError::InvalidPlayer(2)));
    }
}
