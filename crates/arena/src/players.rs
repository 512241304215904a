//! The players the arena can seat, built by name from the command line.

use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use turnplay_asmacag::{AsmacagForwardModel, AsmacagObservation, ScoreDifference};
use turnplay_core::Player;
use turnplay_mcts::{
    config::exploration_for_budget, AlwaysFirstPlayer, BridgeBurningMcts, GreedyActionPlayer, GreedyTurnPlayer, Mcts,
    MctsConfig, RandomPlayer, RolloutMode,
};

/// A player seated at an ASMACAG table.
pub type BoxedPlayer = Box<dyn Player<AsmacagForwardModel>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    /// One random legal action per action point
    Random,
    /// Always the first enumerated action
    First,
    /// Best single action by heuristic, one action point at a time
    GreedyAction,
    /// Best whole turn found by depth-first enumeration
    GreedyTurn,
    /// Tree search over the whole turn with turn-bounded rollouts
    Mcts,
    /// Tree search over the whole turn with rollouts to the end of the game
    MctsFull,
    /// Tree search committing one action per slice of the budget
    BridgeBurning,
}

impl PlayerKind {
    /// Build a fresh player.
    ///
    /// Tree search players pick their exploration constant from `budget`.
    pub fn build(self, budget: Duration, seed: u64) -> BoxedPlayer {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        match self {
            PlayerKind::Random => Box::new(RandomPlayer::<AsmacagObservation, _>::new(rng)),
            PlayerKind::First => Box::new(AlwaysFirstPlayer::<AsmacagObservation>::new()),
            PlayerKind::GreedyAction => Box::new(GreedyActionPlayer::<AsmacagObservation, _>::new(ScoreDifference)),
            PlayerKind::GreedyTurn => Box::new(GreedyTurnPlayer::<AsmacagObservation, _>::new(ScoreDifference)),
            PlayerKind::Mcts => Box::new(Mcts::<AsmacagObservation, _, _>::new(
                MctsConfig::for_budget(budget),
                ScoreDifference,
                rng,
            )),
            PlayerKind::MctsFull => Box::new(Mcts::<AsmacagObservation, _, _>::new(
                MctsConfig::for_budget(budget).with_rollout(RolloutMode::Full),
                ScoreDifference,
                rng,
            )),
            PlayerKind::BridgeBurning => Box::new(BridgeBurningMcts::<AsmacagObservation, _, _>::new(
                MctsConfig::bridge_burning().with_exploration(exploration_for_budget(budget)),
                ScoreDifference,
                rng,
            )),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}
