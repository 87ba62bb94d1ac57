//! One-call simplification of fields and data-cube slices.
//!
//! ```text
//!   field ──► mesh ──► augmented tree ──► threshold ──► simplifier ──► output
//! ```

use std::ops::Range;

use tracing::{info, info_span};

use crate::config::{SimplifyConfig, SimplifyMode};
use crate::cube::DataCube;
use crate::error::Result;
use crate::field::{DerivedField, ScalarField};
use crate::mesh::ComponentMesh;
use crate::simplify::{DestructiveSimplifier, PersistenceSimplifier, SimplifyStats};
use crate::tree::AugmentedTree;

/// Result of [`simplify_field`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifyOutput {
  pub field: DerivedField,
  pub stats: SimplifyStats,
  /// Max persistence of the tree before simplification.
  pub max_persistence: f32,
  /// Value of the global extreme, if the field was non-empty.
  pub global_extreme: Option<f32>,
}

/// Simplify `field` with a one-component-per-sample mesh.
#[tracing::instrument(skip_all, name = "pipeline::simplify_field")]
pub fn simplify_field<F: ScalarField + ?Sized>(field: &F, config: &SimplifyConfig) -> Result<SimplifyOutput> {
  config.validate()?;

  let mesh = ComponentMesh::from_field(field);
  let tree = AugmentedTree::build(&mesh, config.direction);
  let threshold = config.threshold(&tree);
  let max_persistence = tree.max_persistence();
  let global_extreme = tree.global_extreme_value();

  let (field, stats) = match config.mode {
    SimplifyMode::Destructive => {
      let mut simplifier = DestructiveSimplifier::new(field, &mesh, tree, threshold)?.with_run_mode(config.run_mode);
      simplifier.run();
      let stats = *simplifier.stats();
      (simplifier.into_simplified(), stats)
    }
    SimplifyMode::PersistenceSet => {
      let set = threshold.active_flags(&tree);
      let mut simplifier = PersistenceSimplifier::new(field, &mesh, set)?.with_run_mode(config.run_mode);
      simplifier.run();
      let stats = *simplifier.stats();
      (simplifier.into_simplified(), stats)
    }
  };

  Ok(SimplifyOutput {
    field,
    stats,
    max_persistence,
    global_extreme,
  })
}

/// Simplify each `z` plane of `cube` in `zs`, in order.
pub fn simplify_slices(cube: &DataCube, zs: Range<usize>, config: &SimplifyConfig) -> Result<Vec<SimplifyOutput>> {
  let mut out = Vec::with_capacity(zs.len());
  for z in zs {
    let _span = info_span!("slice", z).entered();
    let plane = cube.slice(z)?;
    out.push(simplify_field(&plane, config)?);
  }
  info!(slices = out.len(), "slices simplified");
  Ok(out)
}

/// Simplify every plane of `cube` and reassemble the result.
pub fn simplify_cube(cube: &DataCube, config: &SimplifyConfig) -> Result<(DataCube, Vec<SimplifyStats>)> {
  let outputs = simplify_slices(cube, 0..cube.depth(), config)?;
  let mut values = Vec::with_capacity(cube.values().len());
  let mut stats = Vec::with_capacity(outputs.len());
  for output in outputs {
    values.extend(output.field.into_vec());
    stats.push(output.stats);
  }
  let cube = DataCube::new(cube.width(), cube.height(), cube.depth(), values)?;
  Ok((cube, stats))
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
