//! Persistence-set simplifier: replays fixed pairs without touching a tree.
//!
//! Inactive leaves are flattened in ascending persistence (ties by index),
//! each flooding its basin toward its partner's component. Only pairs that
//! describe a feature dying at a saddle qualify:
//!
//! | leaf      | partner | level  |
//! |-----------|---------|--------|
//! | `LeafMin` | `Merge` | death  |
//! | `LeafMax` | `Split` | birth  |
//!
//! Everything else, including a partner at the leaf's own position, is
//! skipped.

use ordered_float::OrderedFloat;
use tracing::{debug, info};
use web_time::Instant;

use super::engine::{CompletionHandler, RunLatch, RunState, SimplifyStats};
use super::flood::flatten_basin;
use crate::config::RunMode;
use crate::error::{Result, SimplifyError};
use crate::field::{DerivedField, ScalarField};
use crate::mesh::{check_fits, Mesh};
use crate::persistence::{PersistencePair, PersistenceSet};
use crate::types::NodeType;

/// Flattens every inactive, saddle-paired leaf of a persistence set.
pub struct PersistenceSimplifier<'a, S: PersistenceSet, M: Mesh + ?Sized> {
  set: S,
  mesh: &'a M,
  output: DerivedField,
  latch: RunLatch,
  stats: SimplifyStats,
  on_complete: Option<CompletionHandler<'a, Self>>,
}

impl<'a, S: PersistenceSet, M: Mesh + ?Sized> PersistenceSimplifier<'a, S, M> {
  pub fn new<F: ScalarField + ?Sized>(field: &F, mesh: &'a M, set: S) -> Result<Self> {
    if field.size() == 0 {
      return Err(SimplifyError::EmptyField);
    }
    check_fits(mesh, field)?;

    Ok(Self {
      set,
      mesh,
      output: DerivedField::copy_of(field),
      latch: RunLatch::default(),
      stats: SimplifyStats::default(),
      on_complete: None,
    })
  }

  /// Call `handler` once when a run completes.
  pub fn with_completion(mut self, handler: impl FnOnce(&Self) + 'a) -> Self {
    self.on_complete = Some(Box::new(handler));
    self
  }

  /// Apply `mode`; `Immediate` runs now.
  pub fn with_run_mode(mut self, mode: RunMode) -> Self {
    if mode == RunMode::Immediate {
      self.run();
    }
    self
  }

  /// Run the simplification. Returns false if it already ran.
  pub fn run(&mut self) -> bool {
    if !self.latch.begin() {
      return false;
    }

    let start = Instant::now();
    self.simplify();
    self.stats.run_time_us = start.elapsed().as_micros() as u64;
    self.latch.finish();

    info!(
      flattened = self.stats.leaves_pruned,
      skipped = self.stats.pairs_skipped,
      run_time_us = self.stats.run_time_us,
      "Building simplification complete"
    );

    if let Some(handler) = self.on_complete.take() {
      handler(self);
    }
    true
  }

  /// The simplified field, running first if needed.
  pub fn simplified(&mut self) -> &DerivedField {
    self.run();
    &self.output
  }

  pub fn into_simplified(mut self) -> DerivedField {
    self.run();
    self.output
  }

  /// Current working field, without running.
  pub fn output(&self) -> &DerivedField {
    &self.output
  }

  pub fn state(&self) -> RunState {
    self.latch.state()
  }

  pub fn stats(&self) -> &SimplifyStats {
    &self.stats
  }

  pub fn set(&self) -> &S {
    &self.set
  }

  #[tracing::instrument(skip_all, name = "persistence::simplify")]
  fn simplify(&mut self) {
    info!("Building simplification...");

    let mut pending: Vec<PersistencePair> = (0..self.set.len())
      .filter(|&i| !self.set.is_active(i))
      .filter_map(|i| self.set.pair(i))
      .filter(|pair| pair.kind.is_leaf())
      .collect();
    pending.sort_by_key(|pair| (OrderedFloat(pair.persistence()), pair.node));
    debug!(pairs = pending.len(), "collected inactive leaves");

    for pair in pending {
      let Some(level) = clamp_level(&pair) else {
        self.stats.pairs_skipped += 1;
        continue;
      };

      let flood = flatten_basin(
        self.mesh,
        &mut self.output,
        pair.position,
        pair.partner_position,
        pair.kind,
        level,
      );
      debug!(
        leaf = pair.position,
        partner = pair.partner_position,
        level,
        components = flood.components,
        "flattened pair"
      );
      self.stats.add_flood(flood);
      self.stats.leaves_pruned += 1;
    }
  }
}

/// Clamp level for a qualifying pair.
fn clamp_level(pair: &PersistencePair) -> Option<f32> {
  if pair.position == pair.partner_position {
    return None;
  }
  match (pair.kind, pair.partner_kind) {
    (NodeType::LeafMin, NodeType::Merge) => Some(pair.death),
    (NodeType::LeafMax, NodeType::Split) => Some(pair.birth),
    _ => None,
  }
}

#[cfg(test)]
#[path = "paired_test.rs"]
mod paired_test;
