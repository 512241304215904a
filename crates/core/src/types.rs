//! Turn container shared by every player.
//!
//! A [`Turn`] is the ordered list of actions a player commits for one
//! turn. It never holds more actions than the turn has action points.

use crate::{Result, TurnPlayError};

/// An ordered sequence of actions, one per action point.
///
/// Invariant: `len() <= capacity()`.
///
/// # Example
/// ```
/// use turnplay_core::Turn;
///
/// let mut turn = Turn::with_action_points(2);
/// turn.push('a').unwrap();
/// turn.push('b').unwrap();
/// assert!(turn.is_complete());
/// assert!(turn.push('c').is_err());
/// assert_eq!(turn.get(1), Some(&'b'));
/// assert_eq!(turn.get(2), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Turn<A> {
    actions: Vec<A>,
    action_points: usize,
}

impl<A> Turn<A> {
    /// Create an empty turn with room for `action_points` actions.
    pub fn with_action_points(action_points: usize) -> Self {
        Self {
            actions: Vec::with_capacity(action_points),
            action_points,
        }
    }

    /// Empty the turn and resize it for a new number of action points.
    pub fn reset(&mut self, action_points: usize) {
        self.actions.clear();
        self.action_points = action_points;
    }

    /// Append the action for the next action point.
    ///
    /// # Errors
    /// Returns `TurnPlayError::IllegalAction` if every action point is
    /// already filled.
    pub fn push(&mut self, action: A) -> Result<()> {
        if self.is_complete() {
            return Err(TurnPlayError::IllegalAction(format!(
                "turn already holds {} actions",
                self.action_points
            )));
        }
        self.actions.push(action);
        Ok(())
    }

    /// Get the action planned for action point `index`.
    pub fn get(&self, index: usize) -> Option<&A> {
        self.actions.get(index)
    }

    /// Number of planned actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if no action is planned.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of action points this turn was sized for.
    pub fn capacity(&self) -> usize {
        self.action_points
    }

    /// True once every action point has an action.
    pub fn is_complete(&self) -> bool {
        self.actions.len() >= self.action_points
    }

    /// Iterate over the planned actions in order.
    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.actions.iter()
    }

    /// Get a reference to the underlying slice.
    pub fn as_slice(&self) -> &[A] {
        &self.actions
    }
}

impl<A> Default for Turn<A> {
    fn default() -> Self {
        Self::with_action_points(0)
    }
}

impl<A> IntoIterator for Turn<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}
