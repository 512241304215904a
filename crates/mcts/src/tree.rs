//! Arena-allocated search tree.
//!
//! Using a Vec<Node> with indices gives every node a cheap, non-owning
//! parent link for backpropagation, and dropping the tree tears down
//! every node at once.

use crate::node::{Node, NodeId};
use rand::Rng;
use turnplay_core::{ForwardModel, Heuristic, Observation};

/// Scale of the random perturbation added to UCB scores to break ties.
const TIE_BREAK_EPSILON: f64 = 1e-6;

/// Consecutive turns without a step after which a full rollout gives up.
const MAX_IDLE_TURNS: usize = 64;

/// Outcome of a random playout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rollout {
    /// Heuristic value at the end of the playout, from the perspective of
    /// the player to move at the node the playout started from.
    pub reward: f64,

    /// Number of forward-model steps taken.
    pub steps: u64,
}

/// Arena-allocated search tree.
///
/// Nodes are stored in a contiguous vector and referenced by [`NodeId`].
/// The root starts at [`NodeId::ROOT`] and moves with [`Tree::reroot`].
#[derive(Debug)]
pub struct Tree<O: Observation> {
    nodes: Vec<Node<O>>,
    root: NodeId,
}

impl<O: Observation> Tree<O> {
    /// Create a tree holding a single unexpanded root.
    pub fn new(observation: O) -> Self {
        Self {
            nodes: vec![Node::root(observation)],
            root: NodeId::ROOT,
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<O> {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node<O> {
        &mut self.nodes[id.0]
    }

    /// The current root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever allocated, including any detached by re-rooting.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node ID in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Children of a node in enumeration order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Number of edges between `id` and the current root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut node = self.get(id).parent;
        while let Some(parent) = node {
            depth += 1;
            node = self.get(parent).parent;
        }
        depth
    }

    /// A node is node-terminal if the game is over or the turn is finished.
    pub fn is_node_terminal<F>(&self, id: NodeId, forward_model: &F) -> bool
    where
        F: ForwardModel<Observation = O>,
    {
        let observation = &self.get(id).observation;
        forward_model.is_terminal(observation) || forward_model.is_turn_finished(observation)
    }

    /// Expand a node with one child per legal action.
    ///
    /// Each child's observation is a clone of the node's observation with
    /// the child's action stepped once. Returns the number of children
    /// created, which is also the number of forward-model steps taken.
    /// A node that already has children is left untouched and 0 is returned.
    pub fn extend<F>(&mut self, id: NodeId, forward_model: &F) -> usize
    where
        F: ForwardModel<Observation = O>,
    {
        debug_assert!(!self.get(id).has_children(), "node {:?} extended twice", id);
        if self.get(id).has_children() {
            return 0;
        }

        let actions = self.get(id).observation.actions();
        let mut children = Vec::with_capacity(actions.len());

        for action in actions {
            let mut observation = self.get(id).observation.clone();
            forward_model.step(&mut observation, &action);
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(Node::child(observation, action, id));
            children.push(child_id);
        }

        let count = children.len();
        self.get_mut(id).children = children;
        count
    }

    /// Play random actions until the current turn is finished or the game
    /// ends, then evaluate.
    pub fn rollout<F, H, R>(&self, id: NodeId, forward_model: &F, heuristic: &H, rng: &mut R) -> Rollout
    where
        F: ForwardModel<Observation = O>,
        H: Heuristic<O> + ?Sized,
        R: Rng + ?Sized,
    {
        let start = &self.get(id).observation;
        let perspective = start.current_player();
        let mut observation = start.clone();
        let steps = play_out_turn(&mut observation, forward_model, rng);

        Rollout {
            reward: evaluate_for(perspective, &observation, heuristic),
            steps,
        }
    }

    /// Play random actions across turn boundaries until the game ends,
    /// then evaluate.
    ///
    /// Turns with nothing to play (a player who must pass) are skipped by
    /// calling `on_turn_ended` again. `max_turns` bounds the number of turn
    /// boundaries crossed. The playout also stops early if no random action
    /// is available mid-turn, or after a long run of consecutive turns
    /// without a single step.
    pub fn full_rollout<F, H, R>(
        &self,
        id: NodeId,
        forward_model: &F,
        heuristic: &H,
        rng: &mut R,
        max_turns: Option<usize>,
    ) -> Rollout
    where
        F: ForwardModel<Observation = O>,
        H: Heuristic<O> + ?Sized,
        R: Rng + ?Sized,
    {
        let start = &self.get(id).observation;
        let perspective = start.current_player();
        let mut observation = start.clone();
        let mut steps = 0;
        let mut turns = 0;
        let mut idle_turns = 0;

        loop {
            let turn_steps = play_out_turn(&mut observation, forward_model, rng);
            steps += turn_steps;

            if forward_model.is_terminal(&observation)
                || !forward_model.is_turn_finished(&observation)
                || max_turns.is_some_and(|max| turns >= max)
            {
                break;
            }

            if turn_steps == 0 {
                idle_turns += 1;
                if idle_turns > MAX_IDLE_TURNS {
                    break;
                }
            } else {
                idle_turns = 0;
            }

            forward_model.on_turn_ended(&mut observation);
            turns += 1;
        }

        Rollout {
            reward: evaluate_for(perspective, &observation, heuristic),
            steps,
        }
    }

    /// Select a child by the UCB1 rule.
    ///
    /// UCB(child) = average + c * sqrt(ln(N_parent) / N_child)
    ///
    /// Unvisited children score `f64::MAX` so they are always tried first.
    /// Every score gets a small strictly positive random perturbation so
    /// exact ties are broken at random instead of by enumeration order.
    /// Returns None if the node has no children.
    pub fn select_child_by_ucb<R>(&self, id: NodeId, exploration: f64, rng: &mut R) -> Option<NodeId>
    where
        R: Rng + ?Sized,
    {
        let node = self.get(id);
        let ln_parent_visits = (node.stats.visits() as f64).ln();

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_noise = 0.0;

        for &child_id in &node.children {
            let stats = &self.get(child_id).stats;
            let score = if stats.visits() == 0 {
                f64::MAX
            } else {
                stats.average_reward() + exploration * (ln_parent_visits / stats.visits() as f64).sqrt()
            };

            // (0, 1]
            let noise = 1.0 - rng.gen::<f64>();
            let score = score + noise * TIE_BREAK_EPSILON;

            if best.is_none() || score > best_score || (score == best_score && noise > best_noise) {
                best = Some(child_id);
                best_score = score;
                best_noise = noise;
            }
        }

        best
    }

    /// Select the child with the highest average reward.
    ///
    /// Ties go to the earliest enumerated child. Unvisited children average
    /// negative infinity, so any visited child beats them, and if no child
    /// has been visited the first child is returned.
    pub fn select_child_by_average(&self, id: NodeId) -> Option<NodeId> {
        let mut children = self.get(id).children.iter().copied();
        let first = children.next()?;
        let mut best = first;
        let mut best_average = self.get(first).stats.average_reward();

        for child_id in children {
            let average = self.get(child_id).stats.average_reward();
            if average > best_average {
                best = child_id;
                best_average = average;
            }
        }

        Some(best)
    }

    /// Pick a child uniformly at random.
    pub fn random_child<R>(&self, id: NodeId, rng: &mut R) -> Option<NodeId>
    where
        R: Rng + ?Sized,
    {
        let children = &self.get(id).children;
        if children.is_empty() {
            None
        } else {
            Some(children[rng.gen_range(0..children.len())])
        }
    }

    /// Add one visit with `reward` to `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut node = Some(id);
        while let Some(node_id) = node {
            let current = self.get_mut(node_id);
            current.stats.visit(reward);
            node = current.parent;
        }
    }

    /// Make `id` the root, detaching it from its parent.
    ///
    /// The subtree under `id` keeps its statistics. Later backpropagation
    /// stops at the new root, and the rest of the old tree can no longer
    /// be reached from it.
    pub fn reroot(&mut self, id: NodeId) {
        self.get_mut(id).parent = None;
        self.root = id;
    }
}

/// Apply random actions until the game ends or the turn is finished.
///
/// Returns the number of steps taken.
fn play_out_turn<F, R>(observation: &mut F::Observation, forward_model: &F, rng: &mut R) -> u64
where
    F: ForwardModel,
    R: Rng + ?Sized,
{
    let mut steps = 0;
    while !forward_model.is_terminal(observation) && !forward_model.is_turn_finished(observation) {
        let Some(action) = observation.random_action(rng) else {
            break;
        };
        forward_model.step(observation, &action);
        steps += 1;
    }
    steps
}

/// Evaluate `observation` for `player`, negating when the other player is to move.
fn evaluate_for<O, H>(player: usize, observation: &O, heuristic: &H) -> f64
where
    O: Observation,
    H: Heuristic<O> + ?Sized,
{
    let value = heuristic.evaluate(observation);
    if observation.current_player() == player {
        value
    } else {
        -value
    }
}
