use crate::observation::AsmacagObservation;
use turnplay_core::Heuristic;

/// Score of the player to move minus the opponent's score.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreDifference;

impl Heuristic<AsmacagObservation> for ScoreDifference {
    fn evaluate(&self, observation: &AsmacagObservation) -> f64 {
        let player = observation.current_player;
        observation.scores[player] - observation.scores[1 - player]
    }
}
