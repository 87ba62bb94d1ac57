//! Test fixtures shared across modules.
//!
//! Small hand-checkable fields with known join/split tree shapes.

use crate::field::{Field, GridField2D};
use crate::mesh::ComponentMesh;

/// Values `[0, 1, 2, 5, 9]` wired as the path `1 - 9 - 2 - 0 - 5`.
///
/// Both 0 and 9 are cut vertices, so the value-0 and value-9 samples survive
/// chain reduction in both sweep directions.
///
/// ```text
///   index:  1    4    2    0    3
///   value:  1 -- 9 -- 2 -- 0 -- 5
/// ```
pub fn extremes_field() -> Field {
  Field::from_edges(
    vec![0.0, 1.0, 2.0, 5.0, 9.0],
    &[(1, 4), (4, 2), (2, 0), (0, 3)],
  )
  .unwrap()
}

/// Ring `[0, 5, 0, 6, 0]`: two maxima (5, 6) separated by zero-valued
/// samples, three minima at value 0.
pub fn ring_field() -> Field {
  Field::ring(vec![0.0, 5.0, 0.0, 6.0, 0.0])
}

/// Path `[0, 5, 1, 8, 3]`: minima at 0, 2, 4; saddles at 1 (5) and 3 (8).
///
/// ```text
///   join tree (ascending, reduced):
///
///            (3: 8)
///           ╱      ╲
///      (4: 3)     (1: 5)
///                ╱      ╲
///            (0: 0)    (2: 1)
/// ```
pub fn three_minima_field() -> Field {
  Field::path(vec![0.0, 5.0, 1.0, 8.0, 3.0])
}

/// 5x4 grid of values `(7x + 13y) mod 11`: many shallow extrema of both kinds.
pub fn bumpy_grid() -> GridField2D {
  GridField2D::from_fn(5, 4, |x, y| ((x * 7 + y * 13) % 11) as f32)
}

/// One component per sample.
pub fn mesh_of(field: &Field) -> ComponentMesh {
  ComponentMesh::from_field(field)
}
