//! Mesh of connected components over a field.
//!
//! Components partition field positions. Each carries a representative
//! value, its member positions and the ids of adjacent components. The tree
//! builders and flood fills work on component ids; clamping writes through
//! to member positions.

use smallvec::SmallVec;

use crate::error::{Result, SimplifyError};
use crate::field::ScalarField;
use crate::types::Neighbors;

/// One partition cell of field positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
  /// Representative scalar value.
  pub value: f32,
  /// Field positions belonging to this component.
  pub positions: SmallVec<[usize; 4]>,
  /// Adjacent component ids.
  pub neighbors: Neighbors,
}

impl Component {
  /// Single-sample component.
  pub fn sample(position: usize, value: f32, neighbors: Neighbors) -> Self {
    let mut positions = SmallVec::new();
    positions.push(position);
    Self {
      value,
      positions,
      neighbors,
    }
  }

  /// Number of field samples absorbed by this component.
  #[inline]
  pub fn volume(&self) -> usize {
    self.positions.len()
  }

  /// Integrated scalar contribution: `value * volume`.
  #[inline]
  pub fn hypervolume(&self) -> f64 {
    self.value as f64 * self.positions.len() as f64
  }
}

/// Read-only component lookup.
pub trait Mesh {
  /// Number of components.
  fn len(&self) -> usize;

  /// Component with id `id`.
  fn component(&self, id: usize) -> &Component;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Vector-backed mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentMesh {
  components: Vec<Component>,
}

impl ComponentMesh {
  /// One component per sample, adjacency copied from the field.
  pub fn from_field<F: ScalarField + ?Sized>(field: &F) -> Self {
    let components = (0..field.size())
      .map(|i| Component::sample(i, field.value(i), field.neighbors(i)))
      .collect();
    Self { components }
  }

  /// Use externally partitioned components.
  ///
  /// Neighbor ids must address components of this mesh.
  pub fn from_components(components: Vec<Component>) -> Result<Self> {
    let len = components.len();
    for component in &components {
      if let Some(&index) = component.neighbors.iter().find(|&&n| n >= len) {
        return Err(SimplifyError::IndexOutOfRange { index, len });
      }
    }
    Ok(Self { components })
  }

  pub fn iter(&self) -> impl Iterator<Item = &Component> {
    self.components.iter()
  }

  /// One past the largest field position referenced by any component.
  pub fn position_extent(&self) -> usize {
    extent_of(self)
  }
}

impl Mesh for ComponentMesh {
  fn len(&self) -> usize {
    self.components.len()
  }

  fn component(&self, id: usize) -> &Component {
    &self.components[id]
  }
}

/// Check that every component position addresses a sample of `field`.
///
/// On failure the error carries the mesh's full position extent.
pub fn check_fits<M: Mesh + ?Sized, F: ScalarField + ?Sized>(mesh: &M, field: &F) -> Result<()> {
  let size = field.size();
  let extent = extent_of(mesh);
  if extent > size {
    return Err(SimplifyError::MeshFieldMismatch {
      mesh: extent,
      field: size,
    });
  }
  Ok(())
}

fn extent_of<M: Mesh + ?Sized>(mesh: &M) -> usize {
  (0..mesh.len())
    .flat_map(|id| mesh.component(id).positions.iter().copied())
    .max()
    .map_or(0, |p| p + 1)
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
