//! Job description parsing for field denoising.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ops::Range;
use std::path::Path;

use topo_simplify::{Direction, RunMode, SimplifyConfig, SimplifyMode};

/// Root job configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Which extrema to flatten.
	#[serde(default)]
	pub features: Features,
	/// Simplifier to run.
	#[serde(default)]
	pub mode: Mode,
	/// Persistence cutoff; features below it are removed.
	pub threshold: f32,
	/// Interpret `threshold` as a fraction of each slice's max persistence.
	#[serde(default)]
	pub relative: bool,
	/// Channel range `[first, end)` to process (default: all).
	pub slices: Option<[usize; 2]>,
	/// Spatial sub-region to cut out before processing.
	pub region: Option<RegionConfig>,
	/// Also write moment-0/moment-1 maps of the simplified cube.
	#[serde(default)]
	pub moments: bool,
}

/// Extrema to flatten.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Features {
	/// Fill minima (join tree).
	#[default]
	Minima,
	/// Cut maxima (split tree).
	Maxima,
}

/// Simplifier selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
	#[default]
	Destructive,
	PersistenceSet,
}

/// Half-open `[start, end)` ranges in x and y.
#[derive(Debug, Deserialize)]
pub struct RegionConfig {
	pub x: [usize; 2],
	pub y: [usize; 2],
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		config
			.simplify_config()
			.validate()
			.context("Invalid threshold")?;
		if let Some([first, end]) = config.slices {
			if first >= end {
				anyhow::bail!("slices must be a non-empty range, got [{first}, {end})");
			}
		}
		if let Some(region) = &config.region {
			if region.x[0] >= region.x[1] || region.y[0] >= region.y[1] {
				anyhow::bail!(
					"region must be non-empty, got x={:?} y={:?}",
					region.x,
					region.y
				);
			}
		}

		Ok(config)
	}

	/// Library settings for this job.
	pub fn simplify_config(&self) -> SimplifyConfig {
		SimplifyConfig {
			direction: match self.features {
				Features::Minima => Direction::Ascending,
				Features::Maxima => Direction::Descending,
			},
			mode: match self.mode {
				Mode::Destructive => SimplifyMode::Destructive,
				Mode::PersistenceSet => SimplifyMode::PersistenceSet,
			},
			run_mode: RunMode::Immediate,
			persistence_threshold: self.threshold,
			relative: self.relative,
		}
	}

	/// Channels to process for a cube of `depth` channels.
	pub fn slice_range(&self, depth: usize) -> Result<Range<usize>> {
		match self.slices {
			None => Ok(0..depth),
			Some([first, end]) if end <= depth => Ok(first..end),
			Some([_, end]) => anyhow::bail!("slices end {end} exceeds cube depth {depth}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minimal_job_uses_defaults() {
		let config = Config::parse("threshold = 2.5").unwrap();
		assert_eq!(config.features, Features::Minima);
		assert_eq!(config.mode, Mode::Destructive);
		assert!(!config.moments);

		let settings = config.simplify_config();
		assert_eq!(settings.direction, Direction::Ascending);
		assert_eq!(settings.persistence_threshold, 2.5);
		assert_eq!(config.slice_range(7).unwrap(), 0..7);
	}

	#[test]
	fn full_job_parses() {
		let config = Config::parse(
			r#"
			features = "maxima"
			mode = "persistence_set"
			threshold = 0.2
			relative = true
			slices = [2, 5]
			moments = true

			[region]
			x = [0, 16]
			y = [4, 8]
			"#,
		)
		.unwrap();

		let settings = config.simplify_config();
		assert_eq!(settings.direction, Direction::Descending);
		assert_eq!(settings.mode, SimplifyMode::PersistenceSet);
		assert!(settings.relative);
		assert_eq!(config.slice_range(8).unwrap(), 2..5);
		assert!(config.slice_range(4).is_err());
		assert_eq!(config.region.as_ref().map(|r| r.y), Some([4, 8]));
	}

	#[test]
	fn rejects_bad_values() {
		assert!(Config::parse("threshold = -1.0").is_err());
		assert!(Config::parse("threshold = 2.0\nrelative = true").is_err());
		assert!(Config::parse("threshold = 1.0\nslices = [3, 3]").is_err());
		assert!(Config::parse("threshold = 1.0\n[region]\nx = [2, 1]\ny = [0, 1]").is_err());
		assert!(Config::parse("features = \"saddles\"\nthreshold = 1.0").is_err());
	}
}
