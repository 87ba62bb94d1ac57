//! SimplifyConfig - what to simplify and when to run.

use crate::error::{Result, SimplifyError};
use crate::threshold::PersistenceThreshold;
use crate::tree::AugmentedTree;
use crate::types::Direction;

/// Which simplifier consumes the augmented tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimplifyMode {
  /// Prune eligible leaves from the tree itself.
  #[default]
  Destructive,
  /// Replay inactive persistence pairs; the tree is left intact.
  PersistenceSet,
}

/// When a simplifier runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
  /// On first request for the output.
  #[default]
  Lazy,
  /// At construction.
  Immediate,
}

/// Configuration for one simplification.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifyConfig {
  /// Sweep direction. `Ascending` flattens minima, `Descending` maxima.
  pub direction: Direction,

  pub mode: SimplifyMode,

  pub run_mode: RunMode,

  /// Features with persistence strictly below this are noise.
  pub persistence_threshold: f32,

  /// Read `persistence_threshold` as a fraction of the tree's max
  /// persistence (in `[0, 1]`).
  pub relative: bool,
}

impl SimplifyConfig {
  /// Reject thresholds that cannot order persistence values.
  pub fn validate(&self) -> Result<()> {
    let t = self.persistence_threshold;
    if !t.is_finite() || t < 0.0 {
      return Err(SimplifyError::InvalidConfig(format!(
        "persistence_threshold must be finite and non-negative, got {t}"
      )));
    }
    if self.relative && t > 1.0 {
      return Err(SimplifyError::InvalidConfig(format!(
        "relative persistence_threshold must be at most 1, got {t}"
      )));
    }
    Ok(())
  }

  /// Resolve the noise cutoff for `tree`.
  pub fn threshold(&self, tree: &AugmentedTree) -> PersistenceThreshold {
    if self.relative {
      PersistenceThreshold::fraction_of_max(tree, self.persistence_threshold)
    } else {
      PersistenceThreshold::new(self.persistence_threshold)
    }
  }
}

impl Default for SimplifyConfig {
  fn default() -> Self {
    Self {
      direction: Direction::Ascending,
      mode: SimplifyMode::Destructive,
      run_mode: RunMode::Lazy,
      persistence_threshold: 0.0,
      relative: false,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
