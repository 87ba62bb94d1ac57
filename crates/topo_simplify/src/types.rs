//! Core data types shared by the tree builders and simplifiers.

use smallvec::SmallVec;

/// Adjacency list of a sample or component.
///
/// Inline capacity covers 8-connected grids without allocating.
pub type Neighbors = SmallVec<[usize; 8]>;

/// Topological role of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
  /// Local minimum (leaf of a join tree).
  LeafMin,

  /// Local maximum (leaf of a split tree).
  LeafMax,

  /// Saddle where basins of minima merge.
  Merge,

  /// Saddle where basins of maxima split.
  Split,

  /// Not yet classified (raw sweep output).
  Unknown,
}

impl NodeType {
  /// True for `LeafMin` and `LeafMax`.
  #[inline]
  pub fn is_leaf(self) -> bool {
    matches!(self, NodeType::LeafMin | NodeType::LeafMax)
  }

  /// True for `Merge` and `Split`.
  #[inline]
  pub fn is_saddle(self) -> bool {
    matches!(self, NodeType::Merge | NodeType::Split)
  }
}

impl Default for NodeType {
  fn default() -> Self {
    NodeType::Unknown
  }
}

/// Sweep direction.
///
/// `Ascending` visits low values first and builds a join tree whose leaves
/// are minima. `Descending` builds the mirror split tree of maxima.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
  #[default]
  Ascending,
  Descending,
}

impl Direction {
  /// Type assigned to leaves of a tree swept in this direction.
  #[inline]
  pub fn leaf_type(self) -> NodeType {
    match self {
      Direction::Ascending => NodeType::LeafMin,
      Direction::Descending => NodeType::LeafMax,
    }
  }

  /// Type assigned to branch nodes of a tree swept in this direction.
  #[inline]
  pub fn saddle_type(self) -> NodeType {
    match self {
      Direction::Ascending => NodeType::Merge,
      Direction::Descending => NodeType::Split,
    }
  }

  /// Direction a basin is flooded from a leaf of the given type.
  ///
  /// Minima flood upward through ascending values, maxima downward.
  #[inline]
  pub fn for_leaf(kind: NodeType) -> Option<Self> {
    match kind {
      NodeType::LeafMin => Some(Direction::Ascending),
      NodeType::LeafMax => Some(Direction::Descending),
      _ => None,
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
