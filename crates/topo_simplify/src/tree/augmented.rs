//! Augmented join tree: reduction, classification and persistence.
//!
//! # Reduction
//!
//! Starting at the raw root, walk down while the current node has exactly
//! one child, summing volume and hypervolume. The walk stops at a leaf or a
//! branch; the reduced node takes that node's position and value. Branches
//! are rebuilt from their reduced children, each child adding its own
//! accumulated totals into the new node. Every node of the result ("head")
//! has zero or at least two children.
//!
//! ```text
//!    raw                reduced
//!    (r)
//!     │
//!    (s)  ──────►        (s)        vol(s) = vol(r) + vol(s) + Σ children
//!   ╱   ╲               ╱   ╲
//! (a)   (b)           (a)   (b')    vol(b') = vol(b) + vol(c)
//!        │
//!       (c)
//! ```
//!
//! # Pairing
//!
//! Elder rule: at each branch the child subtree holding the oldest leaf
//! (first in sweep order) survives; the oldest leaf of every other child is
//! paired with the branch. The branch pairs with the most persistent of the
//! leaves that die there. The overall oldest leaf pairs with the head.
//!
//! # Global extreme
//!
//! One traversal finds the minimum- and maximum-valued nodes. If the sweep
//! order ranks the minimum before the maximum, the maximum is the global
//! extreme; otherwise the minimum is.

use tracing::{debug, info};

use super::arena::{Children, NodeId, Tree, TreeNode};
use super::join::JoinTree;
use crate::mesh::Mesh;
use crate::types::Direction;

/// Reduced, classified and persistence-paired merge tree.
#[derive(Clone, Debug)]
pub struct AugmentedTree {
  tree: Tree,
  direction: Direction,
  global_extreme: Option<NodeId>,
  max_persistence: f32,
  max_volume: usize,
  max_hypervolume: f64,
}

impl AugmentedTree {
  /// Sweep `mesh` and augment the result.
  pub fn build<M: Mesh + ?Sized>(mesh: &M, direction: Direction) -> Self {
    Self::from_join_tree(&JoinTree::build(mesh, direction))
  }

  pub fn from_join_tree(join: &JoinTree) -> Self {
    Self::from_raw(join.tree(), join.direction())
  }

  /// Augment an arbitrary raw tree swept in `direction`.
  ///
  /// The raw tree must be acyclic; the result is undefined otherwise and
  /// only [`check_tree`](Self::check_tree) can tell.
  #[tracing::instrument(skip_all, name = "augmented_tree::build")]
  pub fn from_raw(raw: &Tree, direction: Direction) -> Self {
    info!("Building tree...");

    let mut tree = Tree::with_capacity(raw.len());
    if let Some(root) = raw.root() {
      let head = reduce(raw, root, &mut tree);
      tree.set_root(Some(head));
    }

    let mut this = Self {
      tree,
      direction,
      global_extreme: None,
      max_persistence: 0.0,
      max_volume: 0,
      max_hypervolume: 0.0,
    };

    if let Some(head) = this.tree.root() {
      this.classify();
      this.pair(head);
      this.find_global_extreme(head);
      this.find_max_volume(head);
    }

    info!(
      raw_nodes = raw.len(),
      nodes = this.tree.len(),
      max_persistence = this.max_persistence,
      "Building tree complete"
    );
    this
  }

  // ===========================================================================
  // Construction passes
  // ===========================================================================

  fn classify(&mut self) {
    let leaf = self.direction.leaf_type();
    let saddle = self.direction.saddle_type();
    for index in 0..self.tree.len() {
      let id = NodeId::new(index);
      let kind = if self.tree.node(id).child_count() == 0 {
        leaf
      } else {
        saddle
      };
      self.tree.set_kind(id, kind);
    }
  }

  fn pair(&mut self, head: NodeId) {
    let direction = self.direction;
    let n = self.tree.len();
    let mut elder: Vec<NodeId> = (0..n).map(NodeId::new).collect();

    // Children always sit after their parent in the arena.
    for index in (0..n).rev() {
      let id = NodeId::new(index);
      let children: Children = self.tree.node(id).children().into();
      let Some(survivor) = children
        .iter()
        .map(|c| elder[c.index()])
        .min_by_key(|&leaf| sweep_key(direction, self.tree.node(leaf)))
      else {
        continue;
      };

      let saddle_value = self.tree.node(id).value();
      let mut strongest: Option<(NodeId, f32)> = None;
      for child in children {
        let leaf = elder[child.index()];
        if leaf == survivor {
          continue;
        }
        self.tree.set_partner(leaf, id);
        let persistence = (self.tree.node(leaf).value() - saddle_value).abs();
        if strongest.map_or(true, |(_, best)| persistence > best) {
          strongest = Some((leaf, persistence));
        }
      }
      if let Some((leaf, _)) = strongest {
        self.tree.set_partner(id, leaf);
      }
      elder[index] = survivor;
    }

    // A lone head pairs with itself.
    let oldest = elder[head.index()];
    self.tree.set_partner(oldest, head);
  }

  fn find_global_extreme(&mut self, head: NodeId) {
    let mut min: Option<NodeId> = None;
    let mut max: Option<NodeId> = None;
    let mut stack = vec![head];
    while let Some(id) = stack.pop() {
      let value = self.tree.node(id).value();
      if min.map_or(true, |m| value < self.tree.node(m).value()) {
        min = Some(id);
      }
      if max.map_or(true, |m| value > self.tree.node(m).value()) {
        max = Some(id);
      }
      stack.extend_from_slice(self.tree.node(id).children());
    }

    let (Some(min), Some(max)) = (min, max) else {
      return;
    };
    let min_node = self.tree.node(min);
    let max_node = self.tree.node(max);
    self.max_persistence = (max_node.value() - min_node.value()).abs();

    let min_first = sweep_key(self.direction, min_node) < sweep_key(self.direction, max_node);
    self.global_extreme = Some(if min_first { max } else { min });
    debug!(?min, ?max, min_first, "global extreme selected");
  }

  fn find_max_volume(&mut self, head: NodeId) {
    let head_node = self.tree.node(head);
    let baseline = head_node.value() as f64 * head_node.volume() as f64;
    for &child in head_node.children() {
      let child = self.tree.node(child);
      self.max_volume = self.max_volume.max(child.volume());
      self.max_hypervolume = self
        .max_hypervolume
        .max((child.hypervolume() - baseline).abs());
    }
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  /// Number of nodes (including any detached by a destructive pass).
  pub fn size(&self) -> usize {
    self.tree.len()
  }

  #[inline]
  pub fn node(&self, id: NodeId) -> &TreeNode {
    self.tree.node(id)
  }

  /// Node by arena index.
  pub fn node_at(&self, index: usize) -> Option<&TreeNode> {
    self.tree.get(NodeId::new(index))
  }

  pub fn tree(&self) -> &Tree {
    &self.tree
  }

  pub(crate) fn tree_mut(&mut self) -> &mut Tree {
    &mut self.tree
  }

  /// Root of the reduced tree.
  pub fn head(&self) -> Option<NodeId> {
    self.tree.root()
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  pub fn global_extreme(&self) -> Option<NodeId> {
    self.global_extreme
  }

  pub fn global_extreme_value(&self) -> Option<f32> {
    self.global_extreme.map(|id| self.tree.node(id).value())
  }

  /// `|max value - min value|` over the reduced tree.
  pub fn max_persistence(&self) -> f32 {
    self.max_persistence
  }

  /// Largest volume among the head's children.
  pub fn max_volume(&self) -> usize {
    self.max_volume
  }

  /// Largest `|hypervolume(child) - value(head) * volume(head)|` among the
  /// head's children.
  pub fn max_hypervolume(&self) -> f64 {
    self.max_hypervolume
  }

  /// Partner persistence of `id`.
  pub fn persistence(&self, id: NodeId) -> Option<f32> {
    self.tree.persistence(id)
  }

  /// Node ids classified as leaves.
  pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
    self
      .tree
      .ids()
      .filter(|&id| self.tree.node(id).kind().is_leaf())
  }

  /// Verify parent back-references below the head.
  pub fn check_tree(&self) -> bool {
    self.tree.check_tree()
  }
}

/// Sweep order rank of a node: value by direction, then position.
fn sweep_key(direction: Direction, node: &TreeNode) -> crate::order::SortKey {
  direction.sort_key(node.value(), node.position())
}

/// Follow single-child links from `start`, summing volumes.
fn walk_chain(raw: &Tree, start: NodeId) -> (NodeId, usize, f64) {
  let mut current = start;
  let mut volume = raw.node(current).volume();
  let mut hypervolume = raw.node(current).hypervolume();
  while raw.node(current).child_count() == 1 {
    current = raw.node(current).children()[0];
    volume += raw.node(current).volume();
    hypervolume += raw.node(current).hypervolume();
  }
  (current, volume, hypervolume)
}

/// Copy the chain-free shape of `raw` below `root` into `out`.
fn reduce(raw: &Tree, root: NodeId, out: &mut Tree) -> NodeId {
  let push = |out: &mut Tree, start: NodeId| {
    let (stop, volume, hypervolume) = walk_chain(raw, start);
    let node = raw.node(stop);
    (out.push(node.position(), node.value(), volume, hypervolume), stop)
  };

  let (head, stop) = push(out, root);
  let mut pending = vec![(stop, head)];
  while let Some((branch, parent)) = pending.pop() {
    for &child in raw.node(branch).children() {
      let (id, stop) = push(out, child);
      out.attach(id, parent);
      pending.push((stop, id));
    }
  }

  // Fold child totals upward; children were pushed after their parents.
  for index in (0..out.len()).rev() {
    let node = out.node(NodeId::new(index));
    if let Some(parent) = node.parent() {
      let (volume, hypervolume) = (node.volume(), node.hypervolume());
      out.add_volume(parent, volume, hypervolume);
    }
  }

  head
}

#[cfg(test)]
#[path = "augmented_test.rs"]
mod augmented_test;
