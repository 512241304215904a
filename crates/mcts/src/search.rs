//! Budgeted Monte Carlo Tree Search over a whole turn.
//!
//! The search grows one tree from the turn's starting observation for the
//! whole budget, then reads the turn off the tree by following the best
//! average child once per action point.

use crate::{
    budget::{SearchStats, TimeBudget},
    config::{MctsConfig, RolloutMode},
    tree::Tree,
};
use rand::Rng;
use std::time::Duration;
use turnplay_core::{ActionOf, ForwardModel, Heuristic, Observation, Player, Turn};

/// Run a single simulation from the current root:
/// select -> expand -> simulate -> backpropagate.
///
/// Returns the number of forward-model steps taken, or None if the root
/// has no children to select from.
pub(crate) fn simulate<F, H, R>(
    tree: &mut Tree<F::Observation>,
    forward_model: &F,
    heuristic: &H,
    rng: &mut R,
    config: &MctsConfig,
) -> Option<u64>
where
    F: ForwardModel,
    H: Heuristic<F::Observation> + ?Sized,
    R: Rng + ?Sized,
{
    let mut calls = 0;

    // SELECT: descend by UCB while the selected child is expanded
    let mut current = tree.root();
    let mut leaf = loop {
        let child = tree.select_child_by_ucb(current, config.exploration_constant, rng)?;
        if tree.get(child).has_children() {
            current = child;
        } else {
            break child;
        }
    };

    // EXPAND: a leaf seen before gets its children, then we try one of them
    if !tree.get(leaf).is_unvisited() && !tree.is_node_terminal(leaf, forward_model) {
        calls += tree.extend(leaf, forward_model) as u64;
        if let Some(child) = tree.random_child(leaf, rng) {
            leaf = child;
        }
    }

    // SIMULATE
    let rollout = match config.rollout {
        RolloutMode::Turn => tree.rollout(leaf, forward_model, heuristic, rng),
        RolloutMode::Full => {
            tree.full_rollout(leaf, forward_model, heuristic, rng, config.max_rollout_turns)
        }
    };
    calls += rollout.steps;

    // BACKPROPAGATE
    tree.backpropagate(leaf, rollout.reward);

    Some(calls)
}

/// Monte Carlo Tree Search player that searches the whole turn at once.
///
/// Generic over:
/// - `O`: The observation type of the game being played
/// - `H`: The heuristic evaluating rollout end states
/// - `R`: The random number generator
pub struct Mcts<O: Observation, H, R: Rng> {
    config: MctsConfig,
    heuristic: H,
    rng: R,
    turn: Turn<O::Action>,
    stats: SearchStats,
    forward_model_calls: u64,
}

impl<O, H, R> Mcts<O, H, R>
where
    O: Observation,
    H: Heuristic<O>,
    R: Rng,
{
    /// Create a new tree search player.
    pub fn new(config: MctsConfig, heuristic: H, rng: R) -> Self {
        Self {
            config,
            heuristic,
            rng,
            turn: Turn::default(),
            stats: SearchStats::default(),
            forward_model_calls: 0,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The turn planned by the last search.
    pub fn turn(&self) -> &Turn<O::Action> {
        &self.turn
    }

    /// Statistics of the last search.
    pub fn last_search(&self) -> &SearchStats {
        &self.stats
    }

    /// Search from `observation` for at most `budget` and plan the turn.
    pub fn search<F>(&mut self, observation: &O, forward_model: &F, budget: Duration) -> &Turn<O::Action>
    where
        F: ForwardModel<Observation = O>,
    {
        let clock = TimeBudget::start(budget, self.config.safety_margin);
        let action_points = observation.action_points_per_turn();
        self.turn.reset(action_points);

        // The root is always expanded before the loop starts
        let mut tree = Tree::new(observation.clone());
        let root = tree.root();
        let mut calls = tree.extend(root, forward_model) as u64;
        let mut iterations = 0;

        while clock.has_time_left() {
            match simulate(&mut tree, forward_model, &self.heuristic, &mut self.rng, &self.config) {
                Some(steps) => {
                    calls += steps;
                    iterations += 1;
                }
                None => break,
            }
        }

        // Extract the turn by following the best average child. This walk
        // only reads the tree; every simulation above started at the root.
        let mut current = root;
        for _ in 0..action_points {
            let Some(best) = tree.select_child_by_average(current) else {
                break;
            };
            let Some(action) = tree.get(best).action() else {
                break;
            };
            if self.turn.push(action.clone()).is_err() {
                break;
            }
            current = best;
        }

        self.stats = SearchStats {
            iterations,
            forward_model_calls: calls,
            nodes: tree.len(),
            elapsed: clock.elapsed(),
        };
        self.forward_model_calls += calls;

        log::debug!(
            "{}: {} iterations, {} forward model calls, {} nodes in {:?}, turn of {}/{} actions",
            self.label(),
            self.stats.iterations,
            self.stats.forward_model_calls,
            self.stats.nodes,
            self.stats.elapsed,
            self.turn.len(),
            action_points
        );

        &self.turn
    }

    fn label(&self) -> String {
        let name = match self.config.rollout {
            RolloutMode::Turn => "MCTS",
            RolloutMode::Full => "MCTS-full",
        };
        format!("{}[{}]", name, self.config.exploration_constant)
    }
}

impl<F, H, R> Player<F> for Mcts<F::Observation, H, R>
where
    F: ForwardModel,
    H: Heuristic<F::Observation>,
    R: Rng,
{
    fn think(&mut self, observation: &F::Observation, forward_model: &F, budget: Duration) {
        self.search(observation, forward_model, budget);
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        self.turn.get(index).cloned()
    }

    fn name(&self) -> String {
        self.label()
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

    fn create_mcts(config: MctsConfig, seed: u64) -> Mcts<TallyState, TallyScore, ChaCha8Rng> {
        Mcts::new(config, TallyScore, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_simulate_grows_tree() {
        let game = Tally::uniform(3, 2, 1);
        let mut tree = Tree::new(game.initial_observation());
        tree.extend(tree.root(), &game);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = MctsConfig::default();

        // Three passes visit each root child once, the fourth expands one
        for _ in 0..4 {
            assert!(simulate(&mut tree, &game, &TallyScore, &mut rng, &config).is_some());
        }

        assert_eq!(tree.get(tree.root()).stats().visits(), 4);
        assert_eq!(tree.len(), 1 + 3 + 3);
    }

    #[test]
    fn test_simulate_without_children() {
        let game = Tally::uniform(0, 2, 1);
        let mut tree = Tree::new(game.initial_observation());
        tree.extend(tree.root(), &game);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(simulate(&mut tree, &game, &TallyScore, &mut rng, &MctsConfig::default()), None);
    }

    #[test]
    fn test_mcts_finds_best_turn() {
        let game = Tally::new(vec![0.1, 0.4, 0.2, 0.3], 2, 1);
        let mut mcts = create_mcts(MctsConfig::default(), 42);

        let turn = mcts.search(&game.initial_observation(), &game, Duration::from_millis(400));

        assert_eq!(turn.as_slice(), &[TallyAction(1), TallyAction(1)]);
        assert!(mcts.last_search().iterations > 0);
    }

    #[test]
    fn test_zero_budget_falls_back_to_first_action() {
        let game = Tally::new(vec![0.1, 0.4, 0.2, 0.3], 2, 1);
        let mut mcts = create_mcts(MctsConfig::default(), 42);

        mcts.think(&game.initial_observation(), &game, Duration::ZERO);

        assert_eq!(mcts.last_search().iterations, 0);
        assert_eq!(Player::<Tally>::action(&mcts, 0), Some(TallyAction(0)));
        assert_eq!(Player::<Tally>::action(&mcts, 1), None);
    }

    #[test]
    fn test_player_name() {
        let mcts = create_mcts(MctsConfig::full_rollout().with_exploration(2.8), 0);
        assert_eq!(Player::<Tally>::name(&mcts), "MCTS-full[2.8]");
    }
}
