//! Value ordering used by every sweep and flood in the crate.
//!
//! One ordering replaces the family of ascending/descending comparators over
//! component value, current field value and original field value: a key
//! extractor maps an index to a value, and a [`Direction`] decides which end
//! comes first. Ties are always broken by ascending index so that sweeps are
//! deterministic.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::types::Direction;

/// Totally ordered sort key: oriented value, then index.
pub type SortKey = (OrderedFloat<f32>, usize);

impl Direction {
  /// Sort key for `value` at `index` under this direction.
  ///
  /// Descending negates the value so that a plain ascending sort (or a
  /// min-heap) visits the largest values first. Negation is exact for `f32`.
  #[inline]
  pub fn sort_key(self, value: f32, index: usize) -> SortKey {
    let oriented = match self {
      Direction::Ascending => value,
      Direction::Descending => -value,
    };
    (OrderedFloat(oriented), index)
  }

  /// Compare two `(value, index)` pairs under this direction.
  #[inline]
  pub fn compare(self, a: (f32, usize), b: (f32, usize)) -> Ordering {
    self.sort_key(a.0, a.1).cmp(&self.sort_key(b.0, b.1))
  }
}

/// Ordering over indices built from a key extractor and a direction.
#[derive(Clone, Copy, Debug)]
pub struct ValueOrder<K> {
  key: K,
  direction: Direction,
}

impl<K> ValueOrder<K>
where
  K: Fn(usize) -> f32,
{
  /// Create an ordering that reads values through `key`.
  pub fn new(key: K, direction: Direction) -> Self {
    Self { key, direction }
  }

  /// Direction this ordering sorts in.
  pub fn direction(&self) -> Direction {
    self.direction
  }

  /// Value of `index` as seen by this ordering.
  #[inline]
  pub fn value(&self, index: usize) -> f32 {
    (self.key)(index)
  }

  /// Sort key of `index`.
  #[inline]
  pub fn sort_key(&self, index: usize) -> SortKey {
    self.direction.sort_key(self.value(index), index)
  }

  /// Compare two indices.
  #[inline]
  pub fn compare(&self, a: usize, b: usize) -> Ordering {
    self.sort_key(a).cmp(&self.sort_key(b))
  }

  /// Sort indices in place, first-visited first.
  pub fn sort(&self, indices: &mut [usize]) {
    indices.sort_by_cached_key(|&i| self.sort_key(i));
  }
}

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;
