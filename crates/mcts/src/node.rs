//! Search tree node types.
//!
//! Nodes live in an arena and reference each other by index, so the
//! parent back-link used for backpropagation never owns anything.

use turnplay_core::Observation;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in a [`Tree`](crate::Tree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The first node of every tree is the initial root.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Visit statistics for a single node.
///
/// Invariant: `visits == 0` implies `total_reward == 0.0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    visits: u32,
    total_reward: f64,
}

impl NodeStats {
    /// Number of rollouts that were backpropagated through this node.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Sum of every reward backpropagated through this node.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Mean reward, or negative infinity if the node has never been visited.
    pub fn average_reward(&self) -> f64 {
        if self.visits == 0 {
            f64::NEG_INFINITY
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// Record one visit with the given reward.
    pub fn visit(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }
}

/// A node in the search tree.
///
/// Each node owns a snapshot of the observation reached by applying
/// `action` to the parent's observation. The snapshot never changes.
#[derive(Clone, Debug)]
pub struct Node<O: Observation> {
    pub(crate) observation: O,
    pub(crate) action: Option<O::Action>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) stats: NodeStats,
}

impl<O: Observation> Node<O> {
    /// Create a root node wrapping `observation`.
    pub fn root(observation: O) -> Self {
        Self {
            observation,
            action: None,
            parent: None,
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }

    /// Create a child node reached from `parent` by playing `action`.
    pub fn child(observation: O, action: O::Action, parent: NodeId) -> Self {
        Self {
            observation,
            action: Some(action),
            parent: Some(parent),
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }

    /// The observation snapshot held by this node.
    pub fn observation(&self) -> &O {
        &self.observation
    }

    /// Action that produced this node (None for the root).
    pub fn action(&self) -> Option<&O::Action> {
        self.action.as_ref()
    }

    /// Parent node, or None for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in the order their actions were enumerated.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has been expanded.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn is_unvisited(&self) -> bool {
        self.stats.visits == 0
    }
}
