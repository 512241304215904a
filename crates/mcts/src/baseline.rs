//! Baseline players without a search tree.
//!
//! These are reference opponents for the tree search players. They share
//! the [`Player`] contract and plan by stepping copies of the observation.

use crate::budget::TimeBudget;
use rand::Rng;
use std::time::Duration;
use turnplay_core::{ActionOf, ForwardModel, Heuristic, Observation, Player, Turn};

/// True if no further action can be taken this turn.
fn turn_over<F: ForwardModel>(forward_model: &F, observation: &F::Observation) -> bool {
    forward_model.is_terminal(observation) || forward_model.is_turn_finished(observation)
}

/// Plays a random legal action at every action point.
pub struct RandomPlayer<O: Observation, R: Rng> {
    rng: R,
    turn: Turn<O::Action>,
    forward_model_calls: u64,
}

impl<O: Observation, R: Rng> RandomPlayer<O, R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            turn: Turn::default(),
            forward_model_calls: 0,
        }
    }
}

impl<F, R> Player<F> for RandomPlayer<F::Observation, R>
where
    F: ForwardModel,
    R: Rng,
{
    fn think(&mut self, observation: &F::Observation, forward_model: &F, _budget: Duration) {
        self.turn.reset(observation.action_points_per_turn());
        let mut current = observation.clone();

        while !self.turn.is_complete() && !turn_over(forward_model, &current) {
            let Some(action) = current.random_action(&mut self.rng) else {
                break;
            };
            forward_model.step(&mut current, &action);
            self.forward_model_calls += 1;
            if self.turn.push(action).is_err() {
                break;
            }
        }
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        self.turn.get(index).cloned()
    }

    fn name(&self) -> String {
        "Random".to_string()
    }

    fn forward_model_calls(&self) -> u64 {
        self.forward_model_calls
    }
}

/// Always plays the first enumerated action.
pub struct AlwaysFirstPlayer<O: Observation> {
    turn: Turn<O::Action>,
    forward_model_calls: u64,
}

impl<O: Observation> AlwaysFirstPlayer<O> {
    pub fn new() -> Self {
        Self {
            turn: Turn::default(),
            forward_model_calls: 0,
        }
    }
}

impl<O: Observation> Default for AlwaysFirstPlayer<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ForwardModel> Player<F> for AlwaysFirstPlayer<F::Observation> {
    fn think(&mut self, observation: &F::Observation, forward_model: &F, _budget: Duration) {
        self.turn.reset(observation.action_points_per_turn());
        let mut current = observation.clone();

        while !self.turn.is_complete() && !turn_over(forward_model, &current) {
            let Some(action) = current.actions().into_iter().next() else {
                break;
            };
            forward_model.step(&mut current, &action);
            self.forward_model_calls += 1;
            if self.turn.push(action).is_err() {
                break;
            }
        }
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        self.turn.get(index).cloned()
    }

    fn name(&self) -> String {
        "AlwaysFirst".to_string()
    }

    fn forward_model_calls(&self) -> u64 {
        self.forward_model_calls
    }
}

/// Picks, one action point at a time, the action whose successor scores best.
pub struct GreedyActionPlayer<O: Observation, H> {
    heuristic: H,
    turn: Turn<O::Action>,
    forward_model_calls: u64,
}

impl<O: Observation, H: Heuristic<O>> GreedyActionPlayer<O, H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            turn: Turn::default(),
            forward_model_calls: 0,
        }
    }
}

impl<F, H> Player<F> for GreedyActionPlayer<F::Observation, H>
where
    F: ForwardModel,
    H: Heuristic<F::Observation>,
{
    fn think(&mut self, observation: &F::Observation, forward_model: &F, _budget: Duration) {
        self.turn.reset(observation.action_points_per_turn());
        let mut current = observation.clone();

        while !self.turn.is_complete() && !turn_over(forward_model, &current) {
            let mut best: Option<(ActionOf<F>, F::Observation)> = None;
            let mut best_score = f64::NEG_INFINITY;

            for action in current.actions() {
                let mut next = current.clone();
                forward_model.step(&mut next, &action);
                self.forward_model_calls += 1;
                let score = self.heuristic.evaluate(&next);
                if best.is_none() || score > best_score {
                    best_score = score;
                    best = Some((action, next));
                }
            }

            let Some((action, next)) = best else {
                break;
            };
            if self.turn.push(action).is_err() {
                break;
            }
            current = next;
        }
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        self.turn.get(index).cloned()
    }

    fn name(&self) -> String {
        "GreedyAction".to_string()
    }

    fn forward_model_calls(&self) -> u64 {
        self.forward_model_calls
    }
}

/// Enumerates whole turns depth first and keeps the best-scoring one found
/// before the budget runs out.
pub struct GreedyTurnPlayer<O: Observation, H> {
    heuristic: H,
    safety_margin: Duration,
    turn: Turn<O::Action>,
    best_reward: f64,
    forward_model_calls: u64,
}

impl<O: Observation, H: Heuristic<O>> GreedyTurnPlayer<O, H> {
    pub fn new(heuristic: H) -> Self {
        Self::with_safety_margin(heuristic, Duration::from_millis(20))
    }

    pub fn with_safety_margin(heuristic: H, safety_margin: Duration) -> Self {
        Self {
            heuristic,
            safety_margin,
            turn: Turn::default(),
            best_reward: f64::NEG_INFINITY,
            forward_model_calls: 0,
        }
    }

    /// Heuristic value of the turn found by the last search.
    pub fn best_reward(&self) -> f64 {
        self.best_reward
    }

    fn explore<F>(
        &mut self,
        observation: &O,
        forward_model: &F,
        path: &mut Vec<O::Action>,
        clock: &TimeBudget,
    ) where
        F: ForwardModel<Observation = O>,
    {
        if !clock.has_time_left() {
            return;
        }

        let actions = observation.actions();
        if path.len() >= self.turn.capacity() || turn_over(forward_model, observation) || actions.is_empty() {
            let reward = self.heuristic.evaluate(observation);
            if reward > self.best_reward {
                self.best_reward = reward;
                let mut turn = Turn::with_action_points(self.turn.capacity());
                for action in path.iter() {
                    if turn.push(action.clone()).is_err() {
                        break;
                    }
                }
                self.turn = turn;
            }
            return;
        }

        for action in actions {
            let mut next = observation.clone();
            forward_model.step(&mut next, &action);
            self.forward_model_calls += 1;
            path.push(action);
            self.explore(&next, forward_model, path, clock);
            path.pop();
        }
    }
}

impl<F, H> Player<F> for GreedyTurnPlayer<F::Observation, H>
where
    F: ForwardModel,
    H: Heuristic<F::Observation>,
{
    fn think(&mut self, observation: &F::Observation, forward_model: &F, budget: Duration) {
        let clock = TimeBudget::start(budget, self.safety_margin);
        self.turn.reset(observation.action_points_per_turn());
        self.best_reward = f64::NEG_INFINITY;

        let mut path = Vec::with_capacity(self.turn.capacity());
        self.explore(observation, forward_model, &mut path, &clock);
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        self.turn.get(index).cloned()
    }

    fn name(&self) -> String {
        "GreedyTurn".to_string()
    }

    fn forward_model_calls(&self) -> u64 {
        self.forward_model_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Tally, TallyAction, TallyScore, TallyState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn planned<F: ForwardModel, P: Player<F>>(player: &P, count: usize) -> Vec<Option<ActionOf<F>>> {
        (0..count).map(|i| player.action(i)).collect()
    }

    #[test]
    fn test_random_player_fills_turn() {
        let game = Tally::uniform(5, 3, 2);
        let mut player: RandomPlayer<TallyState, _> = RandomPlayer::new(ChaCha8Rng::seed_from_u64(9));

        player.think(&game.initial_observation(), &game, Duration::ZERO);

        let actions = planned::<Tally, _>(&player, 4);
        assert!(actions[..3].iter().all(|a| a.is_some_and(|a| a.0 < 5)));
        assert_eq!(actions[3], None);
        assert_eq!(Player::<Tally>::forward_model_calls(&player), 3);
    }

    #[test]
    fn test_random_player_stops_at_terminal() {
        let game = Tally::uniform(5, 3, 0);
        let mut player: RandomPlayer<TallyState, _> = RandomPlayer::new(ChaCha8Rng::seed_from_u64(9));

        player.think(&game.initial_observation(), &game, Duration::ZERO);

        assert_eq!(Player::<Tally>::action(&player, 0), None);
    }

    #[test]
    fn test_always_first() {
        let game = Tally::new(vec![0.1, 0.4], 2, 1);
        let mut player: AlwaysFirstPlayer<TallyState> = AlwaysFirstPlayer::new();

        player.think(&game.initial_observation(), &game, Duration::ZERO);

        assert_eq!(
            planned::<Tally, _>(&player, 3),
            vec![Some(TallyAction(0)), Some(TallyAction(0)), None]
        );
    }

    #[test]
    fn test_greedy_action_picks_best_successor() {
        let game = Tally::new(vec![0.1, 0.4, 0.2, 0.3], 2, 1);
        let mut player: GreedyActionPlayer<TallyState, _> = GreedyActionPlayer::new(TallyScore);

        player.think(&game.initial_observation(), &game, Duration::ZERO);

        assert_eq!(
            planned::<Tally, _>(&player, 2),
            vec![Some(TallyAction(1)), Some(TallyAction(1))]
        );
        assert_eq!(Player::<Tally>::forward_model_calls(&player), 8);
    }

    #[test]
    fn test_greedy_turn_enumerates_whole_turns() {
        let game = Tally::new(vec![0.1, 0.4, 0.2, 0.3], 2, 1);
        let mut player: GreedyTurnPlayer<TallyState, _> = GreedyTurnPlayer::new(TallyScore);

        player.think(&game.initial_observation(), &game, Duration::from_millis(200));

        assert_eq!(
            planned::<Tally, _>(&player, 3),
            vec![Some(TallyAction(1)), Some(TallyAction(1)), None]
        );
        assert!((player.best_reward() - 0.8).abs() < 1e-12);
        assert_eq!(Player::<Tally>::forward_model_calls(&player), 4 + 16);
    }

    #[test]
    fn test_greedy_turn_without_time_plans_nothing() {
        let game = Tally::new(vec![0.1, 0.4], 2, 1);
        let mut player: GreedyTurnPlayer<TallyState, _> = GreedyTurnPlayer::new(TallyScore);

        player.think(&game.initial_observation(), &game, Duration::ZERO);

        assert_eq!(Player::<Tally>::action(&player, 0), None);
    }
}
