//! Persistence threshold: the stock "noise" predicate.
//!
//! A leaf whose persistence falls below the threshold is noise. The
//! destructive simplifier prunes noise leaves; the persistence-set simplifier
//! flattens every inactive (noise) pair.

use crate::persistence::ActivePairs;
use crate::simplify::PruningPolicy;
use crate::tree::{AugmentedTree, NodeId};

/// Noise cutoff on partner persistence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersistenceThreshold {
  threshold: f32,
}

impl PersistenceThreshold {
  pub fn new(threshold: f32) -> Self {
    Self { threshold }
  }

  /// `fraction * max_persistence(tree)`
  pub fn fraction_of_max(tree: &AugmentedTree, fraction: f32) -> Self {
    Self::new(tree.max_persistence() * fraction)
  }

  pub fn value(&self) -> f32 {
    self.threshold
  }

  #[inline]
  pub fn is_noise(&self, persistence: f32) -> bool {
    persistence < self.threshold
  }

  /// Persistence set with every pair at or above the threshold active.
  pub fn active_flags<'t>(&self, tree: &'t AugmentedTree) -> ActivePairs<'t> {
    ActivePairs::with_predicate(tree, |pair| !self.is_noise(pair.persistence()))
  }
}

impl PruningPolicy for PersistenceThreshold {
  fn is_pruning(&self, tree: &AugmentedTree, id: NodeId) -> bool {
    tree.node(id).kind().is_leaf() && tree.persistence(id).is_some_and(|p| self.is_noise(p))
  }
}
