use smallvec::smallvec;

use super::*;
use crate::field::{Field, GridField2D, ScalarField};
use crate::mesh::{Component, ComponentMesh};
use crate::test_utils::{mesh_of, ring_field, three_minima_field};
use crate::tree::AugmentedTree;

#[test]
fn test_min_flood_raises_to_level_and_stops_at_target() {
  let field = three_minima_field();
  let mesh = mesh_of(&field);
  let mut out = DerivedField::copy_of(&field);

  // Sample 2 (value 1) floods up to the saddle at sample 1 (value 5).
  let stats = flatten_basin(&mesh, &mut out, 2, 1, NodeType::LeafMin, 5.0);
  assert_eq!(out.as_slice(), &[0.0, 5.0, 5.0, 8.0, 3.0]);
  assert_eq!(
    stats,
    FloodStats {
      components: 2,
      positions: 1,
      reached: true,
    }
  );
}

#[test]
fn test_max_flood_lowers_to_level() {
  let field = ring_field();
  let mesh = mesh_of(&field);
  let mut out = DerivedField::copy_of(&field);

  let stats = flatten_basin(&mesh, &mut out, 3, 2, NodeType::LeafMax, 0.0);
  assert_eq!(out.as_slice(), &[0.0, 5.0, 0.0, 0.0, 0.0]);
  assert!(stats.reached);
  assert_eq!(basin(&mesh, 3, 2, NodeType::LeafMax), vec![3, 2]);
}

#[test]
fn test_flood_order_follows_values_then_index() {
  let field = ring_field();
  let mesh = mesh_of(&field);
  // From the 5-peak: both neighbors are 0; the lower index pops first.
  assert_eq!(basin(&mesh, 1, 2, NodeType::LeafMax), vec![1, 0, 2]);
  // From sample 0 upward: 4 (0) before 1 (5).
  assert_eq!(basin(&mesh, 0, 1, NodeType::LeafMin), vec![0, 4, 1]);
}

#[test]
fn test_saddle_kind_is_a_no_op() {
  let field = ring_field();
  let mesh = mesh_of(&field);
  let mut out = DerivedField::copy_of(&field);
  let stats = flatten_basin(&mesh, &mut out, 0, 1, NodeType::Merge, 9.0);
  assert_eq!(stats, FloodStats::default());
  assert_eq!(out.as_slice(), field.values());
  assert!(basin(&mesh, 0, 1, NodeType::Split).is_empty());
}

#[test]
fn test_unreachable_target_drains_queue() {
  let field = Field::from_edges(vec![0.0, 1.0, 2.0], &[(0, 1)]).unwrap();
  let mesh = mesh_of(&field);
  let mut out = DerivedField::copy_of(&field);
  let stats = flatten_basin(&mesh, &mut out, 0, 2, NodeType::LeafMin, 4.0);
  assert!(!stats.reached);
  assert_eq!(stats.components, 2);
  assert_eq!(out.as_slice(), &[4.0, 4.0, 2.0]);
}

#[test]
fn test_clamp_writes_every_member_position() {
  // Component 0 covers samples 0 and 2; component 1 covers sample 1.
  let mesh = ComponentMesh::from_components(vec![
    Component {
      value: 1.0,
      positions: smallvec![0, 2],
      neighbors: smallvec![1],
    },
    Component::sample(1, 3.0, smallvec![0]),
  ])
  .unwrap();
  let mut out = DerivedField::from(vec![1.0, 3.0, 2.0]);

  let stats = flatten_basin(&mesh, &mut out, 0, 1, NodeType::LeafMin, 3.0);
  assert_eq!(out.as_slice(), &[3.0, 3.0, 3.0]);
  assert_eq!(stats.positions, 2);
}

// =============================================================================
// Exhaustive basin containment
// =============================================================================

fn for_each_permutation(values: &mut [f32], k: usize, f: &mut impl FnMut(&[f32])) {
  if k == values.len() {
    f(values);
    return;
  }
  for i in k..values.len() {
    values.swap(k, i);
    for_each_permutation(values, k + 1, f);
    values.swap(k, i);
  }
}

/// Components connected to `start` through sweep keys below `parent`'s.
fn sublevel_basin<F: ScalarField>(field: &F, start: usize, parent: usize, direction: Direction) -> Vec<usize> {
  let key = |i: usize| direction.sort_key(field.value(i), i);
  let limit = key(parent);
  let mut seen = vec![false; field.size()];
  let mut stack = vec![start];
  seen[start] = true;
  let mut out = vec![parent];
  while let Some(c) = stack.pop() {
    out.push(c);
    for nb in field.neighbors(c) {
      if !seen[nb] && key(nb) < limit {
        seen[nb] = true;
        stack.push(nb);
      }
    }
  }
  out.sort_unstable();
  out
}

/// The flood from every leaf to its parent covers exactly the leaf's
/// sublevel component plus the parent, in both sweep directions.
fn assert_basins_contained<F: ScalarField>(field: &F) -> usize {
  let mesh = ComponentMesh::from_field(field);
  let mut checked = 0;
  for direction in [Direction::Ascending, Direction::Descending] {
    let tree = AugmentedTree::build(&mesh, direction);
    for leaf in tree.leaves() {
      let node = tree.node(leaf);
      let Some(parent) = node.parent() else {
        continue;
      };
      let parent = tree.node(parent).position();

      let mut visited = basin(&mesh, node.position(), parent, node.kind());
      assert_eq!(visited.first(), Some(&node.position()));
      assert_eq!(visited.last(), Some(&parent));

      visited.sort_unstable();
      assert_eq!(
        visited,
        sublevel_basin(field, node.position(), parent, direction)
      );
      checked += 1;
    }
  }
  checked
}

#[test]
fn test_basin_containment_grid_permutations() {
  let mut values: Vec<f32> = (0..6).map(|v| v as f32).collect();
  let mut checked = 0;
  for_each_permutation(&mut values, 0, &mut |perm| {
    let grid = GridField2D::new(3, 2, perm.to_vec()).unwrap();
    checked += assert_basins_contained(&grid);
  });
  assert!(checked > 0);
}

#[test]
fn test_basin_containment_path_with_ties() {
  // Every assignment of {0, 1, 2} to a 6-sample path.
  let mut checked = 0;
  for code in 0..3usize.pow(6) {
    let values = (0..6).map(|i| ((code / 3usize.pow(i)) % 3) as f32).collect();
    checked += assert_basins_contained(&Field::path(values));
  }
  assert!(checked > 0);
}
