//! Persistence sets: paired tree nodes with an externally maintained flag.
//!
//! A persistence set is an immutable, indexable view of `(node, partner)`
//! pairs. Each entry carries a boolean ("active") that the core reads but
//! never computes; see [`PersistenceThreshold`](crate::PersistenceThreshold)
//! for a ready-made predicate.

use crate::error::{Result, SimplifyError};
use crate::tree::{AugmentedTree, NodeId};
use crate::types::NodeType;

/// One node paired with its persistence partner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersistencePair {
  pub node: NodeId,
  /// Component id of the node.
  pub position: usize,
  pub kind: NodeType,
  pub value: f32,
  /// Component id of the partner.
  pub partner_position: usize,
  pub partner_kind: NodeType,
  /// `min(value, partner value)`
  pub birth: f32,
  /// `max(value, partner value)`
  pub death: f32,
}

impl PersistencePair {
  /// `death - birth`
  #[inline]
  pub fn persistence(&self) -> f32 {
    self.death - self.birth
  }
}

/// Indexable collection of persistence pairs.
pub trait PersistenceSet {
  /// Number of entries.
  fn len(&self) -> usize;

  /// Entry `index`, if it has a partner.
  fn pair(&self, index: usize) -> Option<PersistencePair>;

  /// External "active" flag of entry `index`.
  fn is_active(&self, index: usize) -> bool;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Persistence set over the nodes of an [`AugmentedTree`], one flag per node.
#[derive(Clone, Debug)]
pub struct ActivePairs<'t> {
  tree: &'t AugmentedTree,
  active: Vec<bool>,
}

impl<'t> ActivePairs<'t> {
  /// Pair every node of `tree` with the given flags (indexed by node id).
  pub fn new(tree: &'t AugmentedTree, active: Vec<bool>) -> Result<Self> {
    if active.len() != tree.size() {
      return Err(SimplifyError::FlagCountMismatch {
        flags: active.len(),
        nodes: tree.size(),
      });
    }
    Ok(Self { tree, active })
  }

  /// Flag each pair with `predicate`. Unpaired nodes are inactive.
  pub fn with_predicate(tree: &'t AugmentedTree, predicate: impl Fn(&PersistencePair) -> bool) -> Self {
    let active = (0..tree.size())
      .map(|i| pair_of(tree, NodeId::new(i)).is_some_and(|p| predicate(&p)))
      .collect();
    Self { tree, active }
  }

  /// Every pair active: nothing is simplified.
  pub fn all_active(tree: &'t AugmentedTree) -> Self {
    Self {
      tree,
      active: vec![true; tree.size()],
    }
  }

  pub fn set_active(&mut self, index: usize, active: bool) {
    self.active[index] = active;
  }

  pub fn tree(&self) -> &'t AugmentedTree {
    self.tree
  }

  /// Number of inactive entries.
  pub fn inactive_count(&self) -> usize {
    self.active.iter().filter(|a| !**a).count()
  }
}

impl PersistenceSet for ActivePairs<'_> {
  fn len(&self) -> usize {
    self.active.len()
  }

  fn pair(&self, index: usize) -> Option<PersistencePair> {
    pair_of(self.tree, NodeId::new(index))
  }

  fn is_active(&self, index: usize) -> bool {
    self.active[index]
  }
}

fn pair_of(tree: &AugmentedTree, id: NodeId) -> Option<PersistencePair> {
  let node = tree.node_at(id.index())?;
  let partner = tree.node(node.partner()?);
  Some(PersistencePair {
    node: id,
    position: node.position(),
    kind: node.kind(),
    value: node.value(),
    partner_position: partner.position(),
    partner_kind: partner.kind(),
    birth: node.value().min(partner.value()),
    death: node.value().max(partner.value()),
  })
}
