//! Arena storage for merge tree nodes.

use smallvec::SmallVec;

use crate::types::NodeType;

/// Index of a node in its [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
  /// Wrap a raw arena index.
  #[inline]
  pub fn new(index: usize) -> Self {
    Self(index)
  }

  /// Raw arena index.
  #[inline]
  pub fn index(self) -> usize {
    self.0
  }
}

/// Child list; saddles are usually binary.
pub type Children = SmallVec<[NodeId; 2]>;

/// A merge tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
  position: usize,
  value: f32,
  volume: usize,
  hypervolume: f64,
  kind: NodeType,
  parent: Option<NodeId>,
  children: Children,
  partner: Option<NodeId>,
  /// Pruned leaves kept under this node after a chain collapse.
  absorbed: SmallVec<[NodeId; 1]>,
}

impl TreeNode {
  fn new(position: usize, value: f32, volume: usize, hypervolume: f64) -> Self {
    Self {
      position,
      value,
      volume,
      hypervolume,
      kind: NodeType::Unknown,
      parent: None,
      children: Children::new(),
      partner: None,
      absorbed: SmallVec::new(),
    }
  }

  /// Component id this node stands for.
  #[inline]
  pub fn position(&self) -> usize {
    self.position
  }

  #[inline]
  pub fn value(&self) -> f32 {
    self.value
  }

  /// Cumulative count of absorbed samples.
  #[inline]
  pub fn volume(&self) -> usize {
    self.volume
  }

  /// Cumulative integrated scalar contribution.
  #[inline]
  pub fn hypervolume(&self) -> f64 {
    self.hypervolume
  }

  #[inline]
  pub fn kind(&self) -> NodeType {
    self.kind
  }

  #[inline]
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  #[inline]
  pub fn has_parent(&self) -> bool {
    self.parent.is_some()
  }

  #[inline]
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  #[inline]
  pub fn child_count(&self) -> usize {
    self.children.len()
  }

  /// Persistence partner.
  #[inline]
  pub fn partner(&self) -> Option<NodeId> {
    self.partner
  }

  /// Leaves pruned below this node and retained for volume bookkeeping.
  pub fn absorbed(&self) -> &[NodeId] {
    &self.absorbed
  }
}

/// Arena of [`TreeNode`]s with a single root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
  nodes: Vec<TreeNode>,
  root: Option<NodeId>,
}

impl Tree {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      nodes: Vec::with_capacity(capacity),
      root: None,
    }
  }

  /// Number of nodes ever added (detached nodes are still counted).
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn root(&self) -> Option<NodeId> {
    self.root
  }

  pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
    self.root = root;
  }

  /// Node by id. Panics if `id` is not from this tree.
  #[inline]
  pub fn node(&self, id: NodeId) -> &TreeNode {
    &self.nodes[id.0]
  }

  pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
    self.nodes.get(id.0)
  }

  /// All node ids in arena order.
  pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
    (0..self.nodes.len()).map(NodeId)
  }

  /// Append an unattached node.
  pub(crate) fn push(&mut self, position: usize, value: f32, volume: usize, hypervolume: f64) -> NodeId {
    let id = NodeId(self.nodes.len());
    self
      .nodes
      .push(TreeNode::new(position, value, volume, hypervolume));
    id
  }

  /// Make `child` the last child of `parent`.
  pub(crate) fn attach(&mut self, child: NodeId, parent: NodeId) {
    self.nodes[child.0].parent = Some(parent);
    self.nodes[parent.0].children.push(child);
  }

  /// Clear `child`'s parent and remove it from that parent's children.
  ///
  /// Returns the former parent.
  pub(crate) fn detach(&mut self, child: NodeId) -> Option<NodeId> {
    let parent = self.nodes[child.0].parent.take()?;
    self.nodes[parent.0].children.retain(|c| *c != child);
    Some(parent)
  }

  /// Put `new` into `old`'s slot in `parent`'s child list.
  pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
    if let Some(slot) = self.nodes[parent.0].children.iter_mut().find(|c| **c == old) {
      *slot = new;
    }
    self.nodes[new.0].parent = Some(parent);
    if self.nodes[old.0].parent == Some(parent) {
      self.nodes[old.0].parent = None;
    }
  }

  pub(crate) fn absorb(&mut self, keeper: NodeId, leaf: NodeId) {
    self.nodes[keeper.0].absorbed.push(leaf);
  }

  pub(crate) fn add_volume(&mut self, id: NodeId, volume: usize, hypervolume: f64) {
    let node = &mut self.nodes[id.0];
    node.volume += volume;
    node.hypervolume += hypervolume;
  }

  pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeType) {
    self.nodes[id.0].kind = kind;
  }

  pub(crate) fn set_partner(&mut self, id: NodeId, partner: NodeId) {
    self.nodes[id.0].partner = Some(partner);
  }

  /// `|value(id) - value(partner(id))|`, if paired.
  pub fn persistence(&self, id: NodeId) -> Option<f32> {
    let node = self.node(id);
    node
      .partner
      .map(|p| (node.value - self.node(p).value).abs())
  }

  /// `|value(id) - value(parent(id))|`, if attached.
  pub fn parent_persistence(&self, id: NodeId) -> Option<f32> {
    let node = self.node(id);
    node
      .parent
      .map(|p| (node.value - self.node(p).value).abs())
  }

  /// Verify every reachable child's parent back-reference.
  ///
  /// Reports only; never repairs. Meant for tests and debugging.
  pub fn check_tree(&self) -> bool {
    match self.root {
      Some(root) => self.check_subtree(root),
      None => true,
    }
  }

  /// [`check_tree`](Self::check_tree) starting at `from`.
  pub fn check_subtree(&self, from: NodeId) -> bool {
    let mut stack = vec![from];
    let mut seen = 0usize;
    while let Some(id) = stack.pop() {
      seen += 1;
      if seen > self.nodes.len() {
        // A cycle revisits nodes forever.
        return false;
      }
      for &child in self.node(id).children() {
        if self.get(child).and_then(TreeNode::parent) != Some(id) {
          return false;
        }
        stack.push(child);
      }
    }
    true
  }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
