//! Bridge-burning Monte Carlo Tree Search.
//!
//! The budget is split evenly across the turn's action points. After each
//! slice the player commits to the root's best child and makes it the new
//! root, keeping the statistics already gathered below it. A committed
//! action is never reconsidered by later slices.

use crate::{
    budget::{SearchStats, TimeBudget},
    config::{MctsConfig, RolloutMode},
    search::simulate,
    tree::Tree,
};
use rand::Rng;
use std::time::{Duration, Instant};
use turnplay_core::{ActionOf, ForwardModel, Heuristic, Observation, Player, Turn};

/// Tree search player that commits one action per budget slice.
pub struct BridgeBurningMcts<O: Observation, H, R: Rng> {
    config: MctsConfig,
    heuristic: H,
    rng: R,
    turn: Turn<O::Action>,
    stats: SearchStats,
    forward_model_calls: u64,
    #[cfg(test)]
    commits: Vec<Commit>,
    #[cfg(test)]
    last_tree: Option<Tree<O>>,
}

/// Root statistics recorded at the moment an action is committed.
#[cfg(test)]
#[derive(Clone, Debug)]
struct Commit {
    root: crate::NodeId,
    chosen: crate::NodeId,
    root_visits: u32,
    chosen_visits: u32,
    siblings: Vec<(crate::NodeId, u32)>,
}

#[cfg(test)]
impl Commit {
    fn snapshot<O: Observation>(tree: &Tree<O>, chosen: crate::NodeId) -> Self {
        let root = tree.root();
        Self {
            root,
            chosen,
            root_visits: tree.get(root).stats().visits(),
            chosen_visits: tree.get(chosen).stats().visits(),
            siblings: tree
                .children(root)
                .iter()
                .filter(|&&id| id != chosen)
                .map(|&id| (id, tree.get(id).stats().visits()))
                .collect(),
        }
    }
}

impl<O, H, R> BridgeBurningMcts<O, H, R>
where
    O: Observation,
    H: Heuristic<O>,
    R: Rng,
{
    /// Create a new bridge-burning player.
    ///
    /// The rollout mode of `config` is overridden with [`RolloutMode::Full`].
    pub fn new(config: MctsConfig, heuristic: H, rng: R) -> Self {
        Self {
            config: MctsConfig {
                rollout: RolloutMode::Full,
                ..config
            },
            heuristic,
            rng,
            turn: Turn::default(),
            stats: SearchStats::default(),
            forward_model_calls: 0,
            #[cfg(test)]
            commits: Vec::new(),
            #[cfg(test)]
            last_tree: None,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The turn committed by the last search.
    pub fn turn(&self) -> &Turn<O::Action> {
        &self.turn
    }

    /// Statistics of the last search.
    pub fn last_search(&self) -> &SearchStats {
        &self.stats
    }

    /// Search from `observation`, committing one action per slice of `budget`.
    pub fn search<F>(&mut self, observation: &O, forward_model: &F, budget: Duration) -> &Turn<O::Action>
    where
        F: ForwardModel<Observation = O>,
    {
        let started = Instant::now();
        let action_points = observation.action_points_per_turn();
        self.turn.reset(action_points);
        #[cfg(test)]
        self.commits.clear();

        let mut tree = Tree::new(observation.clone());
        let root = tree.root();
        let mut calls = tree.extend(root, forward_model) as u64;
        let mut iterations = 0;
        let slice = TimeBudget::slice(budget, action_points);

        for point in 0..action_points {
            let clock = TimeBudget::start(slice, self.config.safety_margin);
            while clock.has_time_left() {
                match simulate(&mut tree, forward_model, &self.heuristic, &mut self.rng, &self.config) {
                    Some(steps) => {
                        calls += steps;
                        iterations += 1;
                    }
                    None => break,
                }
            }

            let Some(best) = tree.select_child_by_average(tree.root()) else {
                break;
            };
            let Some(action) = tree.get(best).action() else {
                break;
            };
            if self.turn.push(action.clone()).is_err() {
                break;
            }

            log::trace!(
                "action point {}: committed {:?} (average {:.4} over {} visits)",
                point,
                action,
                tree.get(best).stats().average_reward(),
                tree.get(best).stats().visits()
            );

            #[cfg(test)]
            self.commits.push(Commit::snapshot(&tree, best));

            // Burn the bridge: the chosen child becomes the root for good
            tree.reroot(best);
            if point + 1 < action_points && !tree.get(best).has_children() {
                calls += tree.extend(best, forward_model) as u64;
            }
        }

        self.stats = SearchStats {
            iterations,
            forward_model_calls: calls,
            nodes: tree.len(),
            elapsed: started.elapsed(),
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

        #[cfg(test)]
        {
            self.last_tree = Some(tree);
        }

        &self.turn
    }

    fn label(&self) -> String {
        format!("BridgeBurningMCTS[{}]", self.config.exploration_constant)
    }
}

impl<F, H, R> Player<F> for BridgeBurningMcts<F::Observation, H, R>
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
