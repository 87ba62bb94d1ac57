//! Construction-boundary errors.
//!
//! The tree builders and simplifiers do no validation on their hot paths.
//! These errors are only produced where inputs are assembled: fields, meshes,
//! cubes, flag vectors and configuration.

use thiserror::Error;

/// Errors raised while assembling simplification inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimplifyError {
  /// A field, cube or mesh with no samples.
  #[error("field has no samples")]
  EmptyField,

  /// Sample count does not match the declared shape.
  #[error("expected {expected} samples for shape {shape:?}, got {actual}")]
  ShapeMismatch {
    shape: Vec<usize>,
    expected: usize,
    actual: usize,
  },

  /// Declared dimensions whose sample count does not fit in `usize`.
  #[error("shape {shape:?} is too large")]
  ShapeOverflow { shape: Vec<usize> },

  /// An adjacency or position index outside the addressed range.
  #[error("index {index} out of range for {len} elements")]
  IndexOutOfRange { index: usize, len: usize },

  /// Mesh component positions do not fit the field they describe.
  #[error("mesh addresses {mesh} samples but the field has {field}")]
  MeshFieldMismatch { mesh: usize, field: usize },

  /// Active/pruning flags do not cover every tree node.
  #[error("{flags} flags supplied for a tree of {nodes} nodes")]
  FlagCountMismatch { flags: usize, nodes: usize },

  /// Configuration rejected by [`SimplifyConfig::validate`](crate::SimplifyConfig::validate).
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, SimplifyError>;
