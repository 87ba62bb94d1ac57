//! Run statistics across many simplifications (e.g. every slice of a cube).
//!
//! Feature-gated and runtime-toggled; with the `metrics` feature off every
//! `record` call is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use topo_simplify::metrics::{SimplifyMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! metrics.record(simplifier.stats());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::simplify::SimplifyStats;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Compile-time feature and runtime toggle both on.
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity history, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Totals and timing history over recorded runs.
#[derive(Debug, Clone, Default)]
pub struct SimplifyMetrics {
  /// Runs recorded.
  pub runs: u64,
  pub leaves_pruned: u64,
  pub pairs_skipped: u64,
  pub components_flooded: u64,
  pub positions_clamped: u64,
  /// Run times in microseconds.
  pub run_timings: RollingWindow<u64>,
}

impl SimplifyMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add one run's counters.
  pub fn record(&mut self, stats: &SimplifyStats) {
    if !is_enabled() {
      return;
    }
    self.runs += 1;
    self.leaves_pruned += stats.leaves_pruned as u64;
    self.pairs_skipped += stats.pairs_skipped as u64;
    self.components_flooded += stats.components_flooded as u64;
    self.positions_clamped += stats.positions_clamped as u64;
    self.run_timings.push(stats.run_time_us);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rolling_window_evicts_oldest() {
    let mut w = RollingWindow::new(3);
    for v in [1u64, 2, 3, 4] {
      w.push(v);
    }
    assert_eq!(w.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(w.last(), Some(&4));
    assert_eq!(w.average(), 3.0);
    assert_eq!(w.min_max(), Some((2, 4)));
  }

  #[test]
  fn empty_window_has_no_extent() {
    let w = RollingWindow::<u64>::default();
    assert!(w.is_empty());
    assert_eq!(w.average(), 0.0);
    assert_eq!(w.min_max(), None);
  }

  #[cfg(feature = "metrics")]
  #[test]
  fn record_accumulates_when_enabled() {
    let mut metrics = SimplifyMetrics::new();
    let stats = SimplifyStats {
      leaves_pruned: 2,
      components_flooded: 5,
      positions_clamped: 3,
      run_time_us: 10,
      ..Default::default()
    };
    metrics.record(&stats);
    metrics.record(&stats);
    assert_eq!(metrics.runs, 2);
    assert_eq!(metrics.leaves_pruned, 4);
    assert_eq!(metrics.run_timings.len(), 2);
  }

  #[cfg(not(feature = "metrics"))]
  #[test]
  fn record_is_inert_without_feature() {
    let mut metrics = SimplifyMetrics::new();
    metrics.record(&SimplifyStats::default());
    assert_eq!(metrics.runs, 0);
    assert!(metrics.run_timings.is_empty());
  }
}
