//! Disjoint sets over component ids.
//!
//! Path halving in `find`, union by rank with the lower id winning ties so
//! that representatives do not depend on union order.

/// Union-find with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
  parent: Vec<usize>,
  rank: Vec<u8>,
}

impl UnionFind {
  /// `n` singleton sets.
  pub fn new(n: usize) -> Self {
    Self {
      parent: (0..n).collect(),
      rank: vec![0u8; n],
    }
  }

  /// Representative of the set containing `x`.
  pub fn find(&mut self, mut x: usize) -> usize {
    while self.parent[x] != x {
      let grandparent = self.parent[self.parent[x]];
      self.parent[x] = grandparent;
      x = grandparent;
    }
    x
  }

  /// Merge the sets containing `a` and `b`. Returns the new representative.
  pub fn union(&mut self, a: usize, b: usize) -> usize {
    let ra = self.find(a);
    let rb = self.find(b);
    if ra == rb {
      return ra;
    }

    use std::cmp::Ordering;
    match self.rank[ra].cmp(&self.rank[rb]) {
      Ordering::Less => {
        self.parent[ra] = rb;
        rb
      }
      Ordering::Greater => {
        self.parent[rb] = ra;
        ra
      }
      Ordering::Equal => {
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child] = root;
        self.rank[root] += 1;
        root
      }
    }
  }

  pub fn len(&self) -> usize {
    self.parent.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parent.is_empty()
  }
}
