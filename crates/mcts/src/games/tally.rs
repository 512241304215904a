//! Tally: a scoring race with fixed action values.
//!
//! Each action adds a fixed value to the score of the player to move.
//! Players alternate turns of `action_points_per_turn` actions, and the
//! game ends after a fixed number of turns. The best turn is always to
//! repeat the most valuable action, which makes Tally ideal for checking
//! that a search extracts the right turn:
//! - Rewards are deterministic
//! - Every action is always legal
//! - With zero turns the game is terminal from the start

use rand::Rng;
use std::fmt;
use std::sync::Arc;
use turnplay_core::{Action, ForwardModel, Heuristic, Observation};

/// Tally action: index into the value table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TallyAction(pub usize);

impl Action for TallyAction {}

impl fmt::Display for TallyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, PartialEq)]
struct Rules {
    values: Vec<f64>,
    action_points_per_turn: usize,
    turns: usize,
}

/// Tally game state as seen by either player (nothing is hidden).
#[derive(Clone, Debug, PartialEq)]
pub struct TallyState {
    rules: Arc<Rules>,
    scores: [f64; 2],
    current: usize,
    points_left: usize,
    turns_played: usize,
}

impl TallyState {
    /// Score of the given player.
    pub fn score(&self, player: usize) -> f64 {
        self.scores[player]
    }

    /// Number of completed turns.
    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    /// Action points the player to move has left this turn.
    pub fn points_left(&self) -> usize {
        self.points_left
    }
}

impl Observation for TallyState {
    type Action = TallyAction;

    fn actions(&self) -> Vec<TallyAction> {
        (0..self.rules.values.len()).map(TallyAction).collect()
    }

    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TallyAction> {
        let count = self.rules.values.len();
        if count == 0 {
            None
        } else {
            Some(TallyAction(rng.gen_range(0..count)))
        }
    }

    fn is_action_valid(&self, action: &TallyAction) -> bool {
        action.0 < self.rules.values.len()
    }

    fn action_points_per_turn(&self) -> usize {
        self.rules.action_points_per_turn
    }

    fn current_player(&self) -> usize {
        self.current
    }
}

/// Tally rules and forward model.
#[derive(Clone, Debug)]
pub struct Tally {
    rules: Arc<Rules>,
}

impl Tally {
    /// Create a game where action `i` is worth `values[i]`.
    pub fn new(values: Vec<f64>, action_points_per_turn: usize, turns: usize) -> Self {
        Self {
            rules: Arc::new(Rules {
                values,
                action_points_per_turn,
                turns,
            }),
        }
    }

    /// Create a game with `num_actions` actions all worth 1.0.
    pub fn uniform(num_actions: usize, action_points_per_turn: usize, turns: usize) -> Self {
        Self::new(vec![1.0; num_actions], action_points_per_turn, turns)
    }

    /// The starting position: no points, player 0 to move.
    pub fn initial_observation(&self) -> TallyState {
        TallyState {
            rules: Arc::clone(&self.rules),
            scores: [0.0; 2],
            current: 0,
            points_left: self.rules.action_points_per_turn,
            turns_played: 0,
        }
    }

    /// Value of an action, if it exists.
    pub fn value(&self, action: TallyAction) -> Option<f64> {
        self.rules.values.get(action.0).copied()
    }
}

impl ForwardModel for Tally {
    type Observation = TallyState;

    fn step(&self, observation: &mut TallyState, action: &TallyAction) -> bool {
        if observation.points_left == 0 {
            return false;
        }
        observation.points_left -= 1;
        match observation.rules.values.get(action.0) {
            Some(value) => {
                observation.scores[observation.current] += value;
                true
            }
            None => false,
        }
    }

    fn is_terminal(&self, observation: &TallyState) -> bool {
        observation.turns_played >= observation.rules.turns
    }

    fn is_turn_finished(&self, observation: &TallyState) -> bool {
        observation.points_left == 0
    }

    fn on_turn_ended(&self, observation: &mut TallyState) {
        if self.is_turn_finished(observation) {
            observation.current = 1 - observation.current;
            observation.points_left = observation.rules.action_points_per_turn;
            observation.turns_played += 1;
        }
    }
}

/// Score difference for the player to move.
#[derive(Clone, Copy, Debug, Default)]
pub struct TallyScore;

impl Heuristic<TallyState> for TallyScore {
    fn evaluate(&self, observation: &TallyState) -> f64 {
        let me = observation.current;
        observation.scores[me] - observation.scores[1 - me]
    }
}
