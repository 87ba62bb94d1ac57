//! Simplification benchmarks.
//!
//! Synthetic 2-D fields at increasing resolution:
//! - **noisy**: high-frequency value noise (many shallow extrema)
//! - **smooth**: low-frequency noise (few deep basins)
//!
//! Stages are timed in isolation (tree build) and end to end (both
//! simplifiers through `simplify_field`).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use topo_simplify::{
  simplify_field, AugmentedTree, ComponentMesh, DataCube, Direction, GridField2D, SimplifyConfig, SimplifyMode,
};

// =============================================================================
// Synthetic fields
// =============================================================================

fn noise_field(size: usize, frequency: f64, seed: u32) -> GridField2D {
  GridField2D::from_fn(size, size, |x, y| {
    hash_noise_2d(x as f64 * frequency, y as f64 * frequency, seed) as f32
  })
}

/// Bilinear value noise in [-1, 1].
fn hash_noise_2d(x: f64, y: f64, seed: u32) -> f64 {
  let ix = x.floor() as i32;
  let iy = y.floor() as i32;
  let ux = smoothstep(x - x.floor());
  let uy = smoothstep(y - y.floor());

  let c00 = hash_to_float(hash_2d(ix, iy, seed));
  let c10 = hash_to_float(hash_2d(ix + 1, iy, seed));
  let c01 = hash_to_float(hash_2d(ix, iy + 1, seed));
  let c11 = hash_to_float(hash_2d(ix + 1, iy + 1, seed));

  lerp(lerp(c00, c10, ux), lerp(c01, c11, ux), uy)
}

#[inline]
fn smoothstep(t: f64) -> f64 {
  t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

#[inline]
fn hash_2d(x: i32, y: i32, seed: u32) -> u32 {
  let mut h = seed;
  h ^= x as u32;
  h = h.wrapping_mul(0x85ebca6b);
  h ^= y as u32;
  h = h.wrapping_mul(0xc2b2ae35);
  h ^= h >> 15;
  h
}

#[inline]
fn hash_to_float(h: u32) -> f64 {
  (h as f64 / u32::MAX as f64) * 2.0 - 1.0
}

fn scenarios(size: usize) -> [(&'static str, GridField2D); 2] {
  [
    ("noisy", noise_field(size, 0.5, 12345)),
    ("smooth", noise_field(size, 0.05, 12345)),
  ]
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_tree_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("isolated/tree_build");

  for size in [32usize, 128] {
    for (name, field) in scenarios(size) {
      let mesh = ComponentMesh::from_field(&field);
      group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| black_box(AugmentedTree::build(&mesh, Direction::Ascending)))
      });
    }
  }

  group.finish();
}

fn bench_simplify_field(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/simplify_field");

  for size in [32usize, 128] {
    for (name, field) in scenarios(size) {
      for mode in [SimplifyMode::Destructive, SimplifyMode::PersistenceSet] {
        let config = SimplifyConfig {
          mode,
          persistence_threshold: 0.25,
          relative: true,
          ..Default::default()
        };
        group.bench_with_input(
          BenchmarkId::new(format!("{name}/{mode:?}"), size),
          &size,
          |b, _| b.iter(|| black_box(simplify_field(&field, &config).ok())),
        );
      }
    }
  }

  group.finish();
}

fn bench_cube_slices(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/cube");
  let cube = DataCube::from_fn(64, 64, 16, |x, y, z| {
    hash_noise_2d(x as f64 * 0.2, y as f64 * 0.2, 1000 + z as u32) as f32
  });
  let config = SimplifyConfig {
    persistence_threshold: 0.1,
    ..Default::default()
  };

  group.bench_function("simplify_cube/64x64x16", |b| {
    b.iter(|| black_box(topo_simplify::simplify_cube(&cube, &config).ok()))
  });

  group.finish();
}

criterion_group!(isolated, bench_tree_build);
criterion_group!(pipeline, bench_simplify_field, bench_cube_slices);
criterion_main!(isolated, pipeline);
