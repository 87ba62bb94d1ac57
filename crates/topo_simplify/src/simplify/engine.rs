//! Run-once state shared by the simplifiers.

use super::flood::FloodStats;

/// Lifecycle of a simplifier run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
  #[default]
  Unbuilt,
  Running,
  Done,
}

/// Called once with the finished simplifier.
pub type CompletionHandler<'a, S> = Box<dyn FnOnce(&S) + 'a>;

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplifyStats {
  /// Features flattened (leaves pruned or pairs replayed).
  pub leaves_pruned: usize,
  /// Inactive pairs that did not qualify for flattening.
  pub pairs_skipped: usize,
  /// Components visited by flood fills.
  pub components_flooded: usize,
  /// Field positions whose value changed.
  pub positions_clamped: usize,
  /// Wall time of the run in microseconds.
  pub run_time_us: u64,
}

impl SimplifyStats {
  pub(crate) fn add_flood(&mut self, flood: FloodStats) {
    self.components_flooded += flood.components;
    self.positions_clamped += flood.positions;
  }
}

/// Guards a single run: `Unbuilt -> Running -> Done`.
#[derive(Debug, Default)]
pub(crate) struct RunLatch {
  state: RunState,
}

impl RunLatch {
  pub fn state(&self) -> RunState {
    self.state
  }

  /// Enter `Running`. False if a run already started.
  pub fn begin(&mut self) -> bool {
    if self.state != RunState::Unbuilt {
      return false;
    }
    self.state = RunState::Running;
    true
  }

  pub fn finish(&mut self) {
    debug_assert_eq!(self.state, RunState::Running);
    self.state = RunState::Done;
  }
}
