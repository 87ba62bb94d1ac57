//! Destructive simplifier: prunes leaves from the augmented tree.
//!
//! Eligible leaves are seeded into a queue keyed by their current
//! parent-relative persistence `|value(n) - value(parent(n))|`, smallest
//! first, ties by node id. Each pop:
//!
//! 1. detaches the leaf `n` from its parent `p`,
//! 2. floods `n`'s basin up to `p`, clamping to `value(p)`,
//! 3. collapses `p` if it is left with a single child `s` under a parent
//!    `g`: `s` takes `p`'s slot in `g`, and `n` is kept under `g` for volume
//!    bookkeeping. A queued `s` is re-keyed against `g`.
//!
//! ```text
//!        g                g
//!        │              ╱  ┊
//!        p      ──►    s   n (absorbed)
//!       ╱ ╲
//!      n   s
//! ```

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use tracing::{debug, info, info_span};
use web_time::Instant;

use super::engine::{CompletionHandler, RunLatch, RunState, SimplifyStats};
use super::flood::flatten_basin;
use super::PruningPolicy;
use crate::config::RunMode;
use crate::error::{Result, SimplifyError};
use crate::field::{DerivedField, ScalarField};
use crate::mesh::{check_fits, Mesh};
use crate::tree::{AugmentedTree, NodeId};

/// Prunes policy-eligible leaves and flattens their basins.
pub struct DestructiveSimplifier<'a, M: Mesh + ?Sized, P: PruningPolicy> {
  mesh: &'a M,
  tree: AugmentedTree,
  policy: P,
  output: DerivedField,
  latch: RunLatch,
  stats: SimplifyStats,
  on_complete: Option<CompletionHandler<'a, Self>>,
}

impl<'a, M: Mesh + ?Sized, P: PruningPolicy> DestructiveSimplifier<'a, M, P> {
  /// Take ownership of `tree` and copy `field` as the working output.
  ///
  /// Nothing runs until [`run`](Self::run) or [`simplified`](Self::simplified)
  /// unless [`RunMode::Immediate`] is requested.
  pub fn new<F: ScalarField + ?Sized>(field: &F, mesh: &'a M, tree: AugmentedTree, policy: P) -> Result<Self> {
    if field.size() == 0 {
      return Err(SimplifyError::EmptyField);
    }
    check_fits(mesh, field)?;

    Ok(Self {
      mesh,
      tree,
      policy,
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
      pruned = self.stats.leaves_pruned,
      clamped = self.stats.positions_clamped,
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

  /// Run if needed and hand back the simplified field.
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

  /// The tree as pruned so far.
  pub fn tree(&self) -> &AugmentedTree {
    &self.tree
  }

  #[tracing::instrument(skip_all, name = "destructive::simplify")]
  fn simplify(&mut self) {
    info!("Building simplification...");

    let mut queue = CandidateQueue::new(self.tree.size());
    {
      let _span = info_span!("seed_candidates").entered();
      for id in self.tree.leaves().collect::<Vec<_>>() {
        if !self.policy.is_pruning(&self.tree, id) {
          continue;
        }
        if let Some(key) = self.tree.tree().parent_persistence(id) {
          queue.insert(id, key);
        }
      }
    }
    debug!(candidates = queue.len(), "seeded prune queue");

    while let Some(n) = queue.pop() {
      let Some(p) = self.tree.tree_mut().detach(n) else {
        continue;
      };

      let (leaf, parent) = (self.tree.node(n), self.tree.node(p));
      let flood = flatten_basin(
        self.mesh,
        &mut self.output,
        leaf.position(),
        parent.position(),
        leaf.kind(),
        parent.value(),
      );
      debug!(
        leaf = leaf.position(),
        saddle = parent.position(),
        level = parent.value(),
        components = flood.components,
        "pruned leaf"
      );
      self.stats.add_flood(flood);
      self.stats.leaves_pruned += 1;

      self.collapse(n, p, &mut queue);
    }
  }

  /// Splice `p` out when it is left with one child.
  fn collapse(&mut self, n: NodeId, p: NodeId, queue: &mut CandidateQueue) {
    let node = self.tree.node(p);
    let (Some(g), [s]) = (node.parent(), node.children()) else {
      return;
    };
    let s = *s;

    let tree = self.tree.tree_mut();
    tree.detach(s);
    tree.replace_child(g, p, s);
    tree.absorb(g, n);

    if queue.contains(s) {
      if let Some(key) = tree.parent_persistence(s) {
        queue.insert(s, key);
      }
    }
  }
}

/// Ordered set of `(key, node)` with per-node key lookup for re-keying.
struct CandidateQueue {
  order: BTreeSet<(OrderedFloat<f32>, NodeId)>,
  keys: Vec<Option<OrderedFloat<f32>>>,
}

impl CandidateQueue {
  fn new(nodes: usize) -> Self {
    Self {
      order: BTreeSet::new(),
      keys: vec![None; nodes],
    }
  }

  /// Insert `id`, replacing any existing key.
  fn insert(&mut self, id: NodeId, key: f32) {
    let key = OrderedFloat(key);
    if let Some(old) = self.keys[id.index()].replace(key) {
      self.order.remove(&(old, id));
    }
    self.order.insert((key, id));
  }

  fn contains(&self, id: NodeId) -> bool {
    self.keys[id.index()].is_some()
  }

  fn pop(&mut self) -> Option<NodeId> {
    let (_, id) = self.order.pop_first()?;
    self.keys[id.index()] = None;
    Some(id)
  }

  fn len(&self) -> usize {
    self.order.len()
  }
}

#[cfg(test)]
#[path = "destructive_test.rs"]
mod destructive_test;
