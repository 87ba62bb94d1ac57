use super::*;

#[test]
fn test_path_adjacency() {
  let field = Field::path(vec![1.0, 2.0, 3.0]);
  assert_eq!(field.size(), 3);
  assert_eq!(field.neighbors(0).as_slice(), &[1]);
  assert_eq!(field.neighbors(1).as_slice(), &[0, 2]);
  assert_eq!(field.neighbors(2).as_slice(), &[1]);
}

#[test]
fn test_ring_closes_the_loop() {
  let field = Field::ring(vec![0.0, 5.0, 0.0, 6.0, 0.0]);
  assert_eq!(field.neighbors(0).as_slice(), &[1, 4]);
  assert_eq!(field.neighbors(4).as_slice(), &[3, 0]);
}

/// Edges are symmetric and duplicates collapse.
#[test]
fn test_from_edges_is_symmetric() {
  let field = Field::from_edges(vec![0.0; 3], &[(0, 1), (1, 0), (1, 2)]).unwrap();
  assert_eq!(field.neighbors(0).as_slice(), &[1]);
  assert_eq!(field.neighbors(1).as_slice(), &[0, 2]);
  assert_eq!(field.neighbors(2).as_slice(), &[1]);
}

#[test]
fn test_from_edges_rejects_out_of_range() {
  let err = Field::from_edges(vec![0.0; 2], &[(0, 5)]).unwrap_err();
  assert_eq!(err, SimplifyError::IndexOutOfRange { index: 5, len: 2 });
}

#[test]
fn test_grid_shape_is_checked() {
  let err = GridField2D::new(3, 2, vec![0.0; 5]).unwrap_err();
  assert!(matches!(
    err,
    SimplifyError::ShapeMismatch {
      expected: 6,
      actual: 5,
      ..
    }
  ));
}

#[test]
fn test_grid_rejects_overflowing_shape() {
  let err = GridField2D::new(usize::MAX, 2, vec![0.0]).unwrap_err();
  assert_eq!(
    err,
    SimplifyError::ShapeOverflow {
      shape: vec![usize::MAX, 2],
    }
  );
}

/// Corners have 2 neighbors, edges 3, interior 4.
#[test]
fn test_grid_four_connectivity() {
  let grid = GridField2D::from_fn(3, 3, |x, y| (x + y) as f32);
  assert_eq!(grid.neighbors(grid.index(0, 0)).len(), 2);
  assert_eq!(grid.neighbors(grid.index(1, 0)).len(), 3);
  assert_eq!(grid.neighbors(grid.index(1, 1)).len(), 4);

  let center = grid.index(1, 1);
  let mut n = grid.neighbors(center).to_vec();
  n.sort_unstable();
  assert_eq!(n, vec![1, 3, 5, 7]);
}

#[test]
fn test_grid_index_round_trip() {
  let grid = GridField2D::from_fn(4, 3, |x, y| (y * 10 + x) as f32);
  assert_eq!(grid.coords(grid.index(3, 2)), (3, 2));
  assert_eq!(grid.value_at(3, 2), 23.0);
}

#[test]
fn test_derived_field_is_an_independent_copy() {
  let field = Field::path(vec![1.0, 4.0, 2.0]);
  let mut derived = DerivedField::copy_of(&field);

  derived.raise_to(0, 3.0);
  derived.lower_to(1, 3.0);
  derived.raise_to(2, 1.0);

  assert_eq!(derived.as_slice(), &[3.0, 3.0, 2.0]);
  assert_eq!(field.values(), &[1.0, 4.0, 2.0], "source must not change");
}
