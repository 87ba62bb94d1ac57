//! Simplifiers: flatten low-persistence features of a field.
//!
//! Both simplifiers own an independent copy of the input field and clamp it
//! over the basin of each removed feature:
//!
//! - [`DestructiveSimplifier`] consumes an [`AugmentedTree`], pruning
//!   eligible leaves (lowest parent-relative persistence first) and collapsing
//!   saddles left with one child.
//! - [`PersistenceSimplifier`] replays a fixed [`PersistenceSet`] and never
//!   touches the tree.
//!
//! Each runs once, either at construction or on first use
//! (see [`RunMode`](crate::RunMode)).
//!
//! [`PersistenceSet`]: crate::PersistenceSet

mod destructive;
mod engine;
mod flood;
mod paired;

pub use destructive::DestructiveSimplifier;
pub use engine::{CompletionHandler, RunState, SimplifyStats};
pub use flood::{basin, flatten_basin, FloodStats};
pub use paired::PersistenceSimplifier;

use crate::tree::{AugmentedTree, NodeId};

/// External "pruning-eligible" predicate over tree nodes.
pub trait PruningPolicy {
  fn is_pruning(&self, tree: &AugmentedTree, id: NodeId) -> bool;
}

impl<F> PruningPolicy for F
where
  F: Fn(&AugmentedTree, NodeId) -> bool,
{
  fn is_pruning(&self, tree: &AugmentedTree, id: NodeId) -> bool {
    self(tree, id)
  }
}
