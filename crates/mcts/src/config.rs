//! Tree search configuration parameters.
//!
//! These parameters control how the search spends its time budget and how
//! it estimates the value of a leaf.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How far into the future a leaf's random playout runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolloutMode {
    /// Play randomly until the current turn is finished.
    Turn,

    /// Play randomly across turn boundaries until the game is over.
    /// Longer horizon, noisier estimate.
    Full,
}

/// Tree search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// UCB1 exploration constant `c`.
    /// Higher values spread visits more evenly across siblings.
    pub exploration_constant: f64,

    /// Playout used to evaluate leaves.
    /// The bridge-burning player always uses [`RolloutMode::Full`].
    pub rollout: RolloutMode,

    /// Time held back from the budget so the result can be extracted
    /// before the driver's deadline.
    pub safety_margin: Duration,

    /// Maximum number of turn boundaries a full rollout may cross.
    /// `None` plays until the game is over.
    pub max_rollout_turns: Option<usize>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.4,
            rollout: RolloutMode::Turn,
            safety_margin: Duration::from_millis(120),
            max_rollout_turns: None,
        }
    }
}

impl MctsConfig {
    /// Default configuration with full-game rollouts.
    pub fn full_rollout() -> Self {
        Self {
            rollout: RolloutMode::Full,
            ..Default::default()
        }
    }

    /// Configuration for the bridge-burning player.
    ///
    /// The safety margin applies to each action point's budget slice, so it
    /// is smaller than the default.
    pub fn bridge_burning() -> Self {
        Self {
            rollout: RolloutMode::Full,
            safety_margin: Duration::from_millis(50),
            ..Default::default()
        }
    }

    /// Default configuration tuned for a thinking budget.
    ///
    /// Short budgets (up to one second) use c = 1.4, longer ones c = 2.8.
    pub fn for_budget(budget: Duration) -> Self {
        Self::default().with_exploration(exploration_for_budget(budget))
    }

    /// Replace the exploration constant.
    pub fn with_exploration(self, exploration_constant: f64) -> Self {
        Self {
            exploration_constant,
            ..self
        }
    }

    /// Replace the rollout mode.
    pub fn with_rollout(self, rollout: RolloutMode) -> Self {
        Self { rollout, ..self }
    }

    /// Bound full rollouts to `turns` turn boundaries.
    pub fn with_max_rollout_turns(self, turns: usize) -> Self {
        Self {
            max_rollout_turns: Some(turns),
            ..self
        }
    }
}

/// Exploration constant tuned for a thinking budget.
pub fn exploration_for_budget(budget: Duration) -> f64 {
    if budget <= Duration::from_secs(1) {
        1.4
    } else {
        2.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration_constant - 1.4).abs() < 1e-12);
        assert_eq!(config.rollout, RolloutMode::Turn);
        assert_eq!(config.safety_margin, Duration::from_millis(120));
        assert_eq!(config.max_rollout_turns, None);
    }

    #[test]
    fn test_full_rollout() {
        let config = MctsConfig::full_rollout();
        assert_eq!(config.rollout, RolloutMode::Full);
        // Other values should be default
        assert_eq!(config.safety_margin, Duration::from_millis(120));
    }

    #[test]
    fn test_bridge_burning() {
        let config = MctsConfig::bridge_burning();
        assert_eq!(config.rollout, RolloutMode::Full);
        assert_eq!(config.safety_margin, Duration::from_millis(50));
    }

    #[test]
    fn test_for_budget() {
        assert_eq!(MctsConfig::for_budget(Duration::from_millis(500)).exploration_constant, 1.4);
        assert_eq!(MctsConfig::for_budget(Duration::from_secs(1)).exploration_constant, 1.4);
        assert_eq!(MctsConfig::for_budget(Duration::from_secs(3)).exploration_constant, 2.8);
        assert_eq!(MctsConfig::for_budget(Duration::from_secs(5)).exploration_constant, 2.8);
    }

    #[test]
    fn test_builders() {
        let config = MctsConfig::default()
            .with_exploration(8.0)
            .with_rollout(RolloutMode::Full)
            .with_max_rollout_turns(4);
        assert_eq!(config.exploration_constant, 8.0);
        assert_eq!(config.rollout, RolloutMode::Full);
        assert_eq!(config.max_rollout_turns, Some(4));
    }
}
