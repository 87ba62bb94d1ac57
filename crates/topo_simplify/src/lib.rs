//! topo_simplify - persistence-based simplification of sampled scalar fields
//!
//! This crate removes low-significance topological features ("noise") from
//! scalar fields such as data-cube slices. A join (merge) tree is swept over
//! the field, reduced and augmented with persistence and volume, and then
//! consumed by one of two simplifiers that flatten each noisy feature's basin
//! up (or down) to the saddle where it merges away.
//!
//! # Features
//!
//! - **Join / split trees**: one sweep parameterized by [`Direction`]
//! - **Augmented tree**: chain reduction, node classification, elder-rule
//!   persistence pairing, global extreme and max volume
//! - **Destructive simplifier**: prunes eligible leaves lowest persistence
//!   first, collapsing degenerate saddles as it goes
//! - **Persistence-set simplifier**: replays an immutable pairing without
//!   touching the tree
//! - **Data cubes**: slice/subset extraction and spectral moment maps
//!
//! # Example
//!
//! ```
//! use topo_simplify::{
//!   AugmentedTree, ComponentMesh, DestructiveSimplifier, Direction, Field, PersistenceThreshold,
//! };
//!
//! // Two maxima (5, 6) on a ring, both separated by zero-valued samples.
//! let field = Field::ring(vec![0.0, 5.0, 0.0, 6.0, 0.0]);
//! let mesh = ComponentMesh::from_field(&field);
//! let tree = AugmentedTree::build(&mesh, Direction::Descending);
//!
//! let mut simplifier =
//!   DestructiveSimplifier::new(&field, &mesh, tree, PersistenceThreshold::new(10.0)).unwrap();
//! assert_eq!(simplifier.simplified().as_slice(), &[0.0; 5]);
//! ```

pub mod config;
pub mod cube;
pub mod error;
pub mod field;
pub mod mesh;
pub mod metrics;
pub mod order;
pub mod persistence;
pub mod pipeline;
pub mod simplify;
pub mod threshold;
pub mod tree;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used items
pub use config::{RunMode, SimplifyConfig, SimplifyMode};
pub use cube::DataCube;
pub use error::{Result, SimplifyError};
pub use field::{DerivedField, Field, GridField2D, ScalarField};
pub use mesh::{Component, ComponentMesh, Mesh};
pub use order::{SortKey, ValueOrder};
pub use persistence::{ActivePairs, PersistencePair, PersistenceSet};
pub use pipeline::{simplify_cube, simplify_field, simplify_slices, SimplifyOutput};
pub use simplify::{
  CompletionHandler, DestructiveSimplifier, PersistenceSimplifier, PruningPolicy, RunState,
  SimplifyStats,
};
pub use threshold::PersistenceThreshold;
pub use tree::{AugmentedTree, JoinTree, NodeId, Tree, TreeNode};
pub use types::{Direction, Neighbors, NodeType};
