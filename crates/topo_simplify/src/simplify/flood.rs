//! Basin flood fill.
//!
//! Starting at a leaf's component, components are popped in flood order
//! (ascending value from a minimum, descending from a maximum) until the
//! target component is popped. The target is included. Every popped
//! component belongs to the basin and has its positions clamped to the
//! target level.
//!
//! ```text
//!   value
//!     8 |         t            LeafMin from s, target t:
//!     5 |   .  x     .         every x popped before t is raised to 8
//!     1 | s                    (t itself already sits at 8)
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::field::DerivedField;
use crate::mesh::Mesh;
use crate::types::{Direction, NodeType};

/// Outcome of one flood.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloodStats {
  /// Components popped, target included.
  pub components: usize,
  /// Positions whose value changed.
  pub positions: usize,
  /// False if the queue drained before the target was popped.
  pub reached: bool,
}

/// Clamp the basin of the `kind` leaf at component `start` up to (and
/// including) component `target`.
///
/// `LeafMin` raises values to `level`, `LeafMax` lowers them. Any other
/// kind is a no-op.
pub fn flatten_basin<M: Mesh + ?Sized>(
  mesh: &M,
  field: &mut DerivedField,
  start: usize,
  target: usize,
  kind: NodeType,
  level: f32,
) -> FloodStats {
  let Some(direction) = Direction::for_leaf(kind) else {
    return FloodStats::default();
  };

  let mut stats = FloodStats::default();
  let reached = visit_basin(mesh, start, target, direction, |c| {
    stats.components += 1;
    for &pos in &mesh.component(c).positions {
      let before = field.value(pos);
      match direction {
        Direction::Ascending => field.raise_to(pos, level),
        Direction::Descending => field.lower_to(pos, level),
      }
      if field.value(pos) != before {
        stats.positions += 1;
      }
    }
  });
  stats.reached = reached;
  stats
}

/// Components of the basin in flood order, without clamping.
pub fn basin<M: Mesh + ?Sized>(mesh: &M, start: usize, target: usize, kind: NodeType) -> Vec<usize> {
  let mut out = Vec::new();
  if let Some(direction) = Direction::for_leaf(kind) {
    visit_basin(mesh, start, target, direction, |c| out.push(c));
  }
  out
}

/// Returns true once `target` is popped.
fn visit_basin<M: Mesh + ?Sized>(
  mesh: &M,
  start: usize,
  target: usize,
  direction: Direction,
  mut visit: impl FnMut(usize),
) -> bool {
  let key = |c: usize| Reverse(direction.sort_key(mesh.component(c).value, c));

  let mut heap = BinaryHeap::new();
  let mut queued = HashSet::new();
  heap.push(key(start));
  queued.insert(start);

  while let Some(Reverse((_, c))) = heap.pop() {
    visit(c);
    if c == target {
      return true;
    }
    for &nb in &mesh.component(c).neighbors {
      if queued.insert(nb) {
        heap.push(key(nb));
      }
    }
  }
  false
}

#[cfg(test)]
#[path = "flood_test.rs"]
mod flood_test;
