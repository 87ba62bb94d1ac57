//! DataCube - a 3-D sample volume with slice, subset and moment helpers.
//!
//! Samples are stored x-fastest: `index = x + y * width + z * width * height`.
//! `z` is the spectral (channel) axis.

use std::ops::Range;

use crate::error::{Result, SimplifyError};
use crate::field::GridField2D;

/// Dense `width x height x depth` volume of `f32` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct DataCube {
  width: usize,
  height: usize,
  depth: usize,
  values: Vec<f32>,
}

impl DataCube {
  pub fn new(width: usize, height: usize, depth: usize, values: Vec<f32>) -> Result<Self> {
    let expected = width
      .checked_mul(height)
      .and_then(|plane| plane.checked_mul(depth))
      .ok_or_else(|| SimplifyError::ShapeOverflow {
        shape: vec![width, height, depth],
      })?;
    if expected == 0 {
      return Err(SimplifyError::EmptyField);
    }
    if values.len() != expected {
      return Err(SimplifyError::ShapeMismatch {
        shape: vec![width, height, depth],
        expected,
        actual: values.len(),
      });
    }
    Ok(Self {
      width,
      height,
      depth,
      values,
    })
  }

  /// Evaluate `f(x, y, z)` at every sample.
  pub fn from_fn(width: usize, height: usize, depth: usize, f: impl Fn(usize, usize, usize) -> f32) -> Self {
    let mut values = Vec::with_capacity(width * height * depth);
    for z in 0..depth {
      for y in 0..height {
        for x in 0..width {
          values.push(f(x, y, z));
        }
      }
    }
    Self {
      width,
      height,
      depth,
      values,
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  #[inline]
  pub fn value(&self, x: usize, y: usize, z: usize) -> f32 {
    self.values[x + self.width * (y + self.height * z)]
  }

  pub fn values(&self) -> &[f32] {
    &self.values
  }

  /// The `z` plane as a 4-connected 2-D field.
  pub fn slice(&self, z: usize) -> Result<GridField2D> {
    if z >= self.depth {
      return Err(SimplifyError::IndexOutOfRange {
        index: z,
        len: self.depth,
      });
    }
    let plane = self.width * self.height;
    let start = z * plane;
    GridField2D::new(self.width, self.height, self.values[start..start + plane].to_vec())
  }

  /// Rectangular sub-region over every channel.
  pub fn subset(&self, xs: Range<usize>, ys: Range<usize>) -> Result<DataCube> {
    check_range(&xs, self.width)?;
    check_range(&ys, self.height)?;
    let mut values = Vec::with_capacity(xs.len() * ys.len() * self.depth);
    for z in 0..self.depth {
      for y in ys.clone() {
        for x in xs.clone() {
          values.push(self.value(x, y, z));
        }
      }
    }
    DataCube::new(xs.len(), ys.len(), self.depth, values)
  }

  /// Zeroth moment: `M0(x, y) = Σ_z |A(x, y, z)|`.
  ///
  /// Non-finite samples contribute nothing.
  pub fn moment0(&self) -> GridField2D {
    GridField2D::from_fn(self.width, self.height, |x, y| {
      (0..self.depth).map(|z| self.magnitude(x, y, z)).sum()
    })
  }

  /// First moment (intensity-weighted channel):
  /// `M1(x, y) = Σ_z z |A| / Σ_z |A|`, zero where the column is empty.
  pub fn moment1(&self) -> GridField2D {
    GridField2D::from_fn(self.width, self.height, |x, y| {
      let (weighted, total) = (0..self.depth).fold((0.0f64, 0.0f64), |(w, t), z| {
        let a = self.magnitude(x, y, z) as f64;
        (w + z as f64 * a, t + a)
      });
      if total > 0.0 {
        (weighted / total) as f32
      } else {
        0.0
      }
    })
  }

  #[inline]
  fn magnitude(&self, x: usize, y: usize, z: usize) -> f32 {
    let v = self.value(x, y, z);
    if v.is_finite() {
      v.abs()
    } else {
      0.0
    }
  }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
  if range.is_empty() {
    return Err(SimplifyError::EmptyField);
  }
  if range.end > len {
    return Err(SimplifyError::IndexOutOfRange {
      index: range.end - 1,
      len,
    });
  }
  Ok(())
}

#[cfg(test)]
#[path = "cube_test.rs"]
mod cube_test;
