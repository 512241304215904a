//! Turnplay ASMACAG - A Simple Multi-Action Card Game
//!
//! Two players hold a hand of cards and share a board of number cards.
//! Each turn a player spends several action points playing cards:
//!
//! - A number card played on a board number card scores the difference,
//!   times the current factor, and both cards are discarded
//! - A `x2` or `/2` card doubles or halves the factor for the next number card
//! - An invalid action discards a card and scores the worst possible result
//!
//! The game ends when both hands or the board are empty, and the higher
//! score wins. The opponent's hand is hidden: observations handed to a
//! player resample it from the unseen cards.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use turnplay_asmacag::{AsmacagForwardModel, AsmacagParameters, GameState};
//! use turnplay_core::{ForwardModel, Observation};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let mut state = GameState::new(AsmacagParameters::default(), &mut rng).unwrap();
//! let model = AsmacagForwardModel;
//!
//! let observation = state.observation(&mut rng);
//! let action = observation.actions()[0];
//! assert!(model.step(state.table_mut(), &action));
//! ```

mod action;
mod card;
mod forward_model;
mod heuristic;
mod observation;
mod parameters;
mod state;

pub use action::AsmacagAction;
pub use card::Card;
pub use forward_model::AsmacagForwardModel;
pub use heuristic::ScoreDifference;
pub use observation::AsmacagObservation;
pub use parameters::AsmacagParameters;
pub use state::GameState;
