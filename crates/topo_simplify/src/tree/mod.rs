//! Merge trees over a component mesh.
//!
//! Nodes live in an arena and address each other by [`NodeId`]. Parent and
//! partner are plain indices; the child list is owned by the parent entry.
//! Detaching or re-parenting a node is index reassignment.
//!
//! # Module Structure
//!
//! - [`arena`]: `Tree` / `TreeNode` storage, attach/detach, validation
//! - [`union_find`]: disjoint sets used by the sweep
//! - [`join`]: `JoinTree` - value-ordered sweep producing the raw tree
//! - [`augmented`]: `AugmentedTree` - chain reduction, classification,
//!   persistence pairing, global extreme and max volume

pub mod arena;
pub mod augmented;
pub mod join;
pub mod union_find;

// Re-exports
pub use arena::{NodeId, Tree, TreeNode};
pub use augmented::AugmentedTree;
pub use join::JoinTree;
pub use union_find::UnionFind;
