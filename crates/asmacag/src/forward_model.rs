use crate::{action::AsmacagAction, card::{take, Card}, observation::AsmacagObservation};
use turnplay_core::ForwardModel;

/// The ASMACAG rules.
///
/// Every step costs one action point, whether the action was valid or not.
/// An invalid action discards a card from the player's hand and gives them
/// [`AsmacagParameters::min_score`](crate::AsmacagParameters::min_score).
#[derive(Clone, Copy, Debug, Default)]
pub struct AsmacagForwardModel;

impl AsmacagForwardModel {
    fn penalise(observation: &mut AsmacagObservation) {
        let player = observation.current_player;
        observation.scores[player] += observation.parameters.min_score();
    }

    /// Discard the first card of the current hand, if any
    fn discard_first(observation: &mut AsmacagObservation) {
        let player = observation.current_player;
        if !observation.hands[player].is_empty() {
            let card = observation.hands[player].remove(0);
            observation.discard_deck.push(card);
        }
    }
}

impl ForwardModel for AsmacagForwardModel {
    type Observation = AsmacagObservation;

    fn step(&self, observation: &mut AsmacagObservation, action: &AsmacagAction) -> bool {
        let player = observation.current_player;
        observation.action_points_left = observation.action_points_left.saturating_sub(1);

        let played = action.played();
        if !take(&mut observation.hands[player], played) {
            Self::discard_first(observation);
            Self::penalise(observation);
            return false;
        }
        observation.discard_deck.push(played);

        match played {
            Card::Number(number) => {
                let target = action
                    .board()
                    .filter(|target| target.is_number() && take(&mut observation.board, *target));
                let Some(Card::Number(board_number)) = target else {
                    Self::penalise(observation);
                    return false;
                };

                let score = (f64::from(number) - f64::from(board_number)) * observation.factor;
                observation.scores[player] += score;
                observation.factor = 1.0;
                observation.discard_deck.push(Card::Number(board_number));
            }
            Card::Mult2 => observation.factor *= 2.0,
            Card::Div2 => observation.factor /= 2.0,
        }

        true
    }

    fn is_terminal(&self, observation: &AsmacagObservation) -> bool {
        (observation.hands[0].is_empty() && observation.hands[1].is_empty()) || observation.board.is_empty()
    }

    fn is_turn_finished(&self, observation: &AsmacagObservation) -> bool {
        observation.action_points_left == 0 || observation.current_hand().is_empty()
    }

    fn on_turn_ended(&self, observation: &mut AsmacagObservation) {
        if self.is_turn_finished(observation) {
            observation.current_player = 1 - observation.current_player;
            observation.action_points_left = observation.parameters.action_points_per_turn;
        }
    }
}
