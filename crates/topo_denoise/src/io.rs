//! JSON field files.
//!
//! A field file holds a `width x height x depth` cube stored x-fastest.
//! A single 2-D field is a cube with `depth = 1`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use topo_simplify::{DataCube, GridField2D};

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldFile {
	pub width: usize,
	pub height: usize,
	#[serde(default = "default_depth")]
	pub depth: usize,
	pub values: Vec<f32>,
}

fn default_depth() -> usize {
	1
}

impl FieldFile {
	pub fn into_cube(self) -> Result<DataCube> {
		let (w, h, d) = (self.width, self.height, self.depth);
		DataCube::new(w, h, d, self.values).with_context(|| format!("Invalid {w}x{h}x{d} field"))
	}

	pub fn from_cube(cube: &DataCube) -> Self {
		Self {
			width: cube.width(),
			height: cube.height(),
			depth: cube.depth(),
			values: cube.values().to_vec(),
		}
	}

	pub fn from_grid(grid: &GridField2D) -> Self {
		Self {
			width: grid.width(),
			height: grid.height(),
			depth: 1,
			values: grid.values().to_vec(),
		}
	}
}

pub fn read_cube(path: &Path) -> Result<DataCube> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read field file: {}", path.display()))?;
	let file: FieldFile = serde_json::from_str(&content)
		.with_context(|| format!("Failed to parse field file: {}", path.display()))?;
	file.into_cube()
}

pub fn write_field(path: &Path, file: &FieldFile) -> Result<()> {
	let json = serde_json::to_string(file).context("Failed to serialize field")?;
	std::fs::write(path, json).with_context(|| format!("Failed to write: {}", path.display()))
}
