//! Turnplay Core - Contracts between games and turn-planning players
//!
//! This crate defines the collaborator interfaces a game must provide so
//! that players can plan multi-action turns for it, and the interface the
//! players expose back to a game driver.
//!
//! # Types
//!
//! - [`Observation`] - Clonable player view of the game with legal actions
//! - [`ForwardModel`] - Rules engine stepping observations forward
//! - [`Heuristic`] - Scalar evaluation of an observation
//! - [`Player`] - `think` once per turn, then read actions by index
//! - [`Turn`] - The actions planned for one turn

mod error;
mod game;
mod player;
mod types;

pub use error::{Result, TurnPlayError};
pub use game::{Action, ForwardModel, Heuristic, Observation};
pub use player::{ActionOf, Player};
pub use types::Turn;
