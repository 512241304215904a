use rand::Rng;
use std::fmt::Debug;

/// A single game action.
///
/// Actions are opaque to the players: they are enumerated by an
/// [`Observation`], handed back to the driver and applied by a
/// [`ForwardModel`].
pub trait Action: Clone + Debug {
    /// Overwrites `other` with the contents of this action, reusing its storage.
    fn copy_into(&self, other: &mut Self) {
        other.clone_from(self);
    }
}

/// A player's view of the game state.
///
/// Observations are cheap enough to clone once per tree node. Hidden
/// information is expected to have been sampled already when the
/// observation was handed to a player.
pub trait Observation: Clone {
    /// The action type enumerated by this observation.
    type Action: Action;

    /// Returns every action that is currently legal.
    ///
    /// Order does not matter for correctness, but it decides ties between
    /// otherwise equal actions in degenerate searches.
    fn actions(&self) -> Vec<Self::Action>;

    /// Returns a uniformly chosen legal action, or `None` if there is none.
    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self::Action>;

    /// Returns true if the action can currently be played.
    fn is_action_valid(&self, action: &Self::Action) -> bool;

    /// Number of actions one player commits per turn.
    fn action_points_per_turn(&self) -> usize;

    /// Index (0 or 1) of the player to move.
    fn current_player(&self) -> usize;

    /// Overwrites `other` with this observation, reusing its storage.
    fn copy_into(&self, other: &mut Self) {
        other.clone_from(self);
    }
}

/// The rules engine: advances observations by actions and turn boundaries.
pub trait ForwardModel {
    /// The observation type this model advances.
    type Observation: Observation;

    /// Applies `action` to `observation` in place.
    ///
    /// Returns false if the action could not legally be applied. The model
    /// may still have changed the observation (e.g. to apply a penalty).
    fn step(
        &self,
        observation: &mut Self::Observation,
        action: &<Self::Observation as Observation>::Action,
    ) -> bool;

    /// Returns true if the game is over.
    fn is_terminal(&self, observation: &Self::Observation) -> bool;

    /// Returns true if the player to move has no action points left.
    fn is_turn_finished(&self, observation: &Self::Observation) -> bool;

    /// Passes control to the other player if the current turn is finished.
    fn on_turn_ended(&self, observation: &mut Self::Observation);
}

/// Static evaluation of an observation.
///
/// Larger is better for the player to move in the evaluated observation.
/// Only relative values matter; the scale is unconstrained.
pub trait Heuristic<O> {
    fn evaluate(&self, observation: &O) -> f64;
}

impl<O, H: Heuristic<O> + ?Sized> Heuristic<O> for &H {
    fn evaluate(&self, observation: &O) -> f64 {
        (**self).evaluate(observation)
    }
}
