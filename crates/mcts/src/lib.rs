//! Monte Carlo Tree Search players for multi-action turns.
//!
//! This crate provides time-budgeted tree search players that plan a whole
//! turn (one action per action point) for any game implementing the
//! `turnplay_core` collaborator traits.
//!
//! # Features
//!
//! - **Generic**: Works with any `ForwardModel` / `Observation` / `Heuristic`
//! - **UCB1 Selection**: Unvisited children first, random tie-breaking
//! - **Rollout Modes**: Random playouts to the end of the turn or of the game
//! - **Bridge Burning**: Commit one action per budget slice and re-root
//! - **Seeded Randomness**: Every random choice comes from the player's `Rng`
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use turnplay_core::Player;
//! use turnplay_mcts::{games::{Tally, TallyAction, TallyScore}, Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = Tally::new(vec![0.1, 0.4, 0.2, 0.3], 2, 1);
//! let observation = game.initial_observation();
//!
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(MctsConfig::default(), TallyScore, rng);
//!
//! mcts.think(&observation, &game, Duration::from_millis(300));
//! for i in 0..2 {
//!     let action: Option<TallyAction> = Player::<Tally>::action(&mcts, i);
//!     println!("Action {}: {:?}", i, action);
//! }
//! println!("Iterations: {}", mcts.last_search().iterations);
//! ```

pub mod baseline;
pub mod bridge;
pub mod budget;
pub mod config;
pub mod games;
mod node;
pub mod search;
mod tree;

pub use baseline::{AlwaysFirstPlayer, GreedyActionPlayer, GreedyTurnPlayer, RandomPlayer};
pub use bridge::BridgeBurningMcts;
pub use budget::{SearchStats, TimeBudget};
pub use config::{MctsConfig, RolloutMode};
pub use node::{Node, NodeId, NodeStats};
pub use search::Mcts;
pub use tree::{Rollout, Tree};
