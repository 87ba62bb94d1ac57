//! Scalar fields: the read-only input and the derived (simplified) output.
//!
//! A field is an indexed sequence of samples over `[0, N)` where every index
//! has a neighbor list in the same index space. Adjacency is expected to be
//! symmetric.

use crate::error::{Result, SimplifyError};
use crate::types::Neighbors;

/// Read-only sampled scalar field.
pub trait ScalarField {
  /// Number of samples.
  fn size(&self) -> usize;

  /// Sample value at `index`.
  fn value(&self, index: usize) -> f32;

  /// Indices adjacent to `index`.
  fn neighbors(&self, index: usize) -> Neighbors;
}

// =============================================================================
// Field - explicit adjacency
// =============================================================================

/// Field with explicitly stored adjacency (arbitrary graphs, rings, paths).
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
  values: Vec<f32>,
  adjacency: Vec<Neighbors>,
}

impl Field {
  /// Build a field from values and an undirected edge list.
  ///
  /// Each edge is inserted in both directions; duplicate edges are ignored.
  pub fn from_edges(values: Vec<f32>, edges: &[(usize, usize)]) -> Result<Self> {
    let len = values.len();
    let mut adjacency = vec![Neighbors::new(); len];
    for &(a, b) in edges {
      for index in [a, b] {
        if index >= len {
          return Err(SimplifyError::IndexOutOfRange { index, len });
        }
      }
      if a == b || adjacency[a].contains(&b) {
        continue;
      }
      adjacency[a].push(b);
      adjacency[b].push(a);
    }
    Ok(Self { values, adjacency })
  }

  /// Open 1-D path: `i` is adjacent to `i - 1` and `i + 1`.
  pub fn path(values: Vec<f32>) -> Self {
    let len = values.len();
    let adjacency = (0..len)
      .map(|i| {
        let mut n = Neighbors::new();
        if i > 0 {
          n.push(i - 1);
        }
        if i + 1 < len {
          n.push(i + 1);
        }
        n
      })
      .collect();
    Self { values, adjacency }
  }

  /// Closed 1-D ring: the last sample is adjacent to the first.
  pub fn ring(values: Vec<f32>) -> Self {
    let mut field = Self::path(values);
    let len = field.values.len();
    if len > 2 {
      field.adjacency[0].push(len - 1);
      field.adjacency[len - 1].push(0);
    }
    field
  }

  /// All sample values.
  pub fn values(&self) -> &[f32] {
    &self.values
  }
}

impl ScalarField for Field {
  fn size(&self) -> usize {
    self.values.len()
  }

  fn value(&self, index: usize) -> f32 {
    self.values[index]
  }

  fn neighbors(&self, index: usize) -> Neighbors {
    self.adjacency[index].clone()
  }
}

// =============================================================================
// GridField2D - 4-connected image
// =============================================================================

/// Row-major 2-D grid with 4-connected adjacency.
///
/// ```text
/// index = y * width + x
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridField2D {
  width: usize,
  height: usize,
  values: Vec<f32>,
}

impl GridField2D {
  /// Wrap row-major `values` as a `width` x `height` grid.
  pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
    let expected = width
      .checked_mul(height)
      .ok_or_else(|| SimplifyError::ShapeOverflow {
        shape: vec![width, height],
      })?;
    if values.len() != expected {
      return Err(SimplifyError::ShapeMismatch {
        shape: vec![width, height],
        expected,
        actual: values.len(),
      });
    }
    Ok(Self {
      width,
      height,
      values,
    })
  }

  /// Grid filled by evaluating `f(x, y)`.
  pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> Self {
    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
      for x in 0..width {
        values.push(f(x, y));
      }
    }
    Self {
      width,
      height,
      values,
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  /// Linear index of `(x, y)`.
  #[inline]
  pub fn index(&self, x: usize, y: usize) -> usize {
    y * self.width + x
  }

  /// Coordinates of a linear index.
  #[inline]
  pub fn coords(&self, index: usize) -> (usize, usize) {
    (index % self.width, index / self.width)
  }

  #[inline]
  pub fn value_at(&self, x: usize, y: usize) -> f32 {
    self.values[self.index(x, y)]
  }

  pub fn values(&self) -> &[f32] {
    &self.values
  }
}

impl ScalarField for GridField2D {
  fn size(&self) -> usize {
    self.values.len()
  }

  fn value(&self, index: usize) -> f32 {
    self.values[index]
  }

  fn neighbors(&self, index: usize) -> Neighbors {
    let (x, y) = self.coords(index);
    let mut n = Neighbors::new();
    if x > 0 {
      n.push(index - 1);
    }
    if x + 1 < self.width {
      n.push(index + 1);
    }
    if y > 0 {
      n.push(index - self.width);
    }
    if y + 1 < self.height {
      n.push(index + self.width);
    }
    n
  }
}

// =============================================================================
// DerivedField - simplifier output
// =============================================================================

/// Independently owned field produced by a simplifier.
///
/// Same index space and size as the source field. Read-only to consumers;
/// only the simplifiers clamp values in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedField {
  values: Vec<f32>,
}

impl DerivedField {
  /// Copy every sample of `field`.
  pub fn copy_of<F: ScalarField + ?Sized>(field: &F) -> Self {
    Self {
      values: (0..field.size()).map(|i| field.value(i)).collect(),
    }
  }

  pub fn size(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  #[inline]
  pub fn value(&self, index: usize) -> f32 {
    self.values[index]
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.values
  }

  pub fn into_vec(self) -> Vec<f32> {
    self.values
  }

  /// `value = max(value, level)`
  #[inline]
  pub(crate) fn raise_to(&mut self, index: usize, level: f32) {
    let v = &mut self.values[index];
    *v = v.max(level);
  }

  /// `value = min(value, level)`
  #[inline]
  pub(crate) fn lower_to(&mut self, index: usize, level: f32) {
    let v = &mut self.values[index];
    *v = v.min(level);
  }
}

impl From<Vec<f32>> for DerivedField {
  fn from(values: Vec<f32>) -> Self {
    Self { values }
  }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
