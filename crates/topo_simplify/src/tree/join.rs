//! Join tree construction by value-ordered sweep.
//!
//! Components are visited in sweep order. A visited component with no
//! visited neighbors opens a new leaf. One visited neighbor set makes the new
//! node a chain link above that set's current top. Two or more sets meet at a
//! saddle: the new node adopts every set's top as a child.
//!
//! ```text
//!  sweep ──►  leaf      chain      saddle
//!             (o)        (o)        (o)
//!                         │        ╱   ╲
//!                        top     top   top
//! ```
//!
//! The last visited component becomes the root: the global extreme under the
//! sweep order. Sweeping `Descending` produces the mirror split tree.

use smallvec::SmallVec;
use tracing::{debug, info_span};

use super::arena::{NodeId, Tree};
use super::union_find::UnionFind;
use crate::mesh::Mesh;
use crate::order::ValueOrder;
use crate::types::Direction;

/// Raw merge tree, one node per component, chains included.
#[derive(Clone, Debug)]
pub struct JoinTree {
  tree: Tree,
  direction: Direction,
}

impl JoinTree {
  /// Sweep `mesh` in `direction`.
  ///
  /// The mesh must be connected; a disconnected mesh leaves several roots and
  /// only the last one is reachable.
  #[tracing::instrument(skip_all, name = "join_tree::build")]
  pub fn build<M: Mesh + ?Sized>(mesh: &M, direction: Direction) -> Self {
    let n = mesh.len();
    let order = ValueOrder::new(|c| mesh.component(c).value, direction);

    let mut sweep: Vec<usize> = (0..n).collect();
    {
      let _span = info_span!("sort_components").entered();
      order.sort(&mut sweep);
    }

    let mut tree = Tree::with_capacity(n);
    let mut sets = UnionFind::new(n);
    let mut top: Vec<Option<NodeId>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut saddles = 0usize;

    for &c in &sweep {
      let component = mesh.component(c);
      let node = tree.push(
        c,
        component.value,
        component.volume(),
        component.hypervolume(),
      );

      let mut roots: SmallVec<[usize; 8]> = component
        .neighbors
        .iter()
        .filter(|&&nb| visited[nb])
        .map(|&nb| sets.find(nb))
        .collect();
      roots.sort_unstable();
      roots.dedup();

      // Children in the order their sets last grew.
      let mut children: SmallVec<[NodeId; 8]> = roots.iter().filter_map(|&r| top[r]).collect();
      children.sort_unstable();
      if children.len() >= 2 {
        saddles += 1;
      }
      for &child in &children {
        tree.attach(child, node);
      }

      visited[c] = true;
      let mut rep = sets.find(c);
      for &r in &roots {
        rep = sets.union(rep, r);
      }
      top[rep] = Some(node);
    }

    tree.set_root(n.checked_sub(1).map(NodeId::new));
    debug!(nodes = tree.len(), saddles, ?direction, "join tree swept");

    Self { tree, direction }
  }

  pub fn tree(&self) -> &Tree {
    &self.tree
  }

  pub fn root(&self) -> Option<NodeId> {
    self.tree.root()
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }
}

#[cfg(test)]
#[path = "join_test.rs"]
mod join_test;
