use smallvec::smallvec;

use super::*;
use crate::field::{Field, GridField2D};

#[test]
fn test_from_field_one_component_per_sample() {
  let field = Field::ring(vec![0.0, 5.0, 0.0, 6.0, 0.0]);
  let mesh = ComponentMesh::from_field(&field);

  assert_eq!(mesh.len(), 5);
  for id in 0..5 {
    let c = mesh.component(id);
    assert_eq!(c.positions.as_slice(), &[id]);
    assert_eq!(c.value, field.value(id));
    assert_eq!(c.neighbors, field.neighbors(id));
  }
}

#[test]
fn test_component_volume_and_hypervolume() {
  let c = Component {
    value: 2.5,
    positions: smallvec![0, 1, 2, 3],
    neighbors: Neighbors::new(),
  };
  assert_eq!(c.volume(), 4);
  assert_eq!(c.hypervolume(), 10.0);
}

#[test]
fn test_from_components_rejects_dangling_neighbor() {
  let components = vec![
    Component::sample(0, 1.0, smallvec![1]),
    Component::sample(1, 2.0, smallvec![7]),
  ];
  let err = ComponentMesh::from_components(components).unwrap_err();
  assert_eq!(err, SimplifyError::IndexOutOfRange { index: 7, len: 2 });
}

#[test]
fn test_check_fits_detects_short_field() {
  let grid = GridField2D::from_fn(2, 2, |x, y| (x + y) as f32);
  let mesh = ComponentMesh::from_field(&grid);
  assert!(check_fits(&mesh, &grid).is_ok());
  assert_eq!(mesh.position_extent(), 4);

  let short = Field::path(vec![0.0, 1.0]);
  assert_eq!(
    check_fits(&mesh, &short).unwrap_err(),
    SimplifyError::MeshFieldMismatch { mesh: 4, field: 2 }
  );
}

/// The reported extent is the largest position, not the first out of range.
#[test]
fn test_check_fits_reports_full_extent() {
  let components = vec![
    Component::sample(4, 1.0, smallvec![1]),
    Component::sample(9, 2.0, smallvec![0]),
  ];
  let mesh = ComponentMesh::from_components(components).unwrap();
  let field = Field::path(vec![0.0, 1.0, 2.0]);
  assert_eq!(
    check_fits(&mesh, &field).unwrap_err(),
    SimplifyError::MeshFieldMismatch { mesh: 10, field: 3 }
  );
  assert_eq!(mesh.position_extent(), 10);
}
