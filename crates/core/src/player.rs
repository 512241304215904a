use crate::game::{ForwardModel, Observation};
use std::time::Duration;

/// Shorthand for the action type of a forward model's observations.
pub type ActionOf<F> = <<F as ForwardModel>::Observation as Observation>::Action;

/// A decision maker that plans one whole turn at a time.
///
/// The driver calls [`think`](Player::think) once per turn and then
/// [`action`](Player::action) for each action point in order. A `None`
/// from `action` means the player has nothing planned for that slot and
/// the driver should substitute a fallback (usually a random legal action).
///
/// The trait is object safe so drivers can mix player implementations.
pub trait Player<F: ForwardModel> {
    /// Plans the turn for `observation`, returning before `budget` elapses.
    fn think(&mut self, observation: &F::Observation, forward_model: &F, budget: Duration);

    /// Returns the planned action for action point `index`.
    fn action(&self, index: usize) -> Option<ActionOf<F>>;

    /// Short display name, used in logs and reports.
    fn name(&self) -> String;

    /// Cumulative number of forward-model steps taken while thinking.
    fn forward_model_calls(&self) -> u64 {
        0
    }
}

impl<F: ForwardModel, P: Player<F> + ?Sized> Player<F> for Box<P> {
    fn think(&mut self, observation: &F::Observation, forward_model: &F, budget: Duration) {
        (**self).think(observation, forward_model, budget)
    }

    fn action(&self, index: usize) -> Option<ActionOf<F>> {
        (**self).action(index)
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn forward_model_calls(&self) -> u64 {
        (**self).forward_model_calls()
    }
}
