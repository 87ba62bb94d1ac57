//! Persistence-based field denoiser.
//!
//! Reads a JSON field (or data cube), flattens every extremum whose
//! persistence falls below the job threshold, and writes the result.
//!
//! Per-slice mode (`slices` in the job) writes one plane per processed
//! channel; otherwise the whole cube is simplified and reassembled.

mod config;
mod io;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use config::Config;
use io::FieldFile;
use topo_simplify::metrics::SimplifyMetrics;
use topo_simplify::{simplify_cube, simplify_slices, DataCube, SimplifyOutput};

/// Topological denoiser for scalar fields.
#[derive(Parser, Debug)]
#[command(name = "topo_denoise")]
#[command(about = "Removes low-persistence extrema from JSON scalar fields")]
struct Args {
	/// Path to job TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Input field JSON.
	#[arg(short, long)]
	input: PathBuf,

	/// Output field JSON.
	#[arg(short, long)]
	output: PathBuf,

	/// Logging level (off, trace, debug, info, warn, error).
	#[arg(long, default_value = "info")]
	log_level: LevelFilter,
}

fn main() -> Result<()> {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.with_max_level(args.log_level)
		.with_target(false)
		.with_thread_ids(false)
		.init();

	println!("Loading job from: {}", args.config.display());
	let config = Config::load(&args.config)?;
	let settings = config.simplify_config();

	let mut cube = io::read_cube(&args.input)?;
	if let Some(region) = &config.region {
		cube = cube
			.subset(region.x[0]..region.x[1], region.y[0]..region.y[1])
			.context("Region does not fit the input")?;
	}
	info!(
		width = cube.width(),
		height = cube.height(),
		depth = cube.depth(),
		"field loaded"
	);

	let mut metrics = SimplifyMetrics::new();
	let simplified = if config.slices.is_some() {
		let zs = config.slice_range(cube.depth())?;
		let first = zs.start;
		let outputs = simplify_slices(&cube, zs, &settings)?;
		for (i, output) in outputs.iter().enumerate() {
			print_summary(first + i, output);
			metrics.record(&output.stats);
		}
		let depth = outputs.len();
		let values = outputs.into_iter().flat_map(|o| o.field.into_vec()).collect();
		DataCube::new(cube.width(), cube.height(), depth, values)?
	} else {
		let (out, stats) = simplify_cube(&cube, &settings)?;
		for s in &stats {
			metrics.record(s);
		}
		out
	};
	print_totals(&metrics);

	io::write_field(&args.output, &FieldFile::from_cube(&simplified))?;
	println!("Wrote {}", args.output.display());

	if config.moments {
		write_moments(&args.output, &simplified)?;
	}

	println!("Done!");
	Ok(())
}

fn print_summary(z: usize, output: &SimplifyOutput) {
	let extreme = output
		.global_extreme
		.map(|v| format!("{v}"))
		.unwrap_or_else(|| "-".into());
	println!(
		"  slice {z}: {} features removed, {} samples clamped (max persistence {}, extreme {extreme})",
		output.stats.leaves_pruned, output.stats.positions_clamped, output.max_persistence
	);
}

fn print_totals(metrics: &SimplifyMetrics) {
	println!(
		"Simplified {} slices: {} features removed, {} pairs skipped, {} samples clamped",
		metrics.runs, metrics.leaves_pruned, metrics.pairs_skipped, metrics.positions_clamped
	);
	if let Some((min, max)) = metrics.run_timings.min_max() {
		println!(
			"Run time per slice: avg {:.0}us, min {min}us, max {max}us",
			metrics.run_timings.average()
		);
	}
}

/// Write `<stem>.moment0.json` and `<stem>.moment1.json` next to `output`.
fn write_moments(output: &Path, cube: &DataCube) -> Result<()> {
	let stem = output
		.file_stem()
		.and_then(|s| s.to_str())
		.unwrap_or("field");
	let dir = output.parent().unwrap_or(Path::new("."));

	for (name, map) in [("moment0", cube.moment0()), ("moment1", cube.moment1())] {
		let path = dir.join(format!("{stem}.{name}.json"));
		io::write_field(&path, &FieldFile::from_grid(&map))?;
		println!("Wrote {}", path.display());
	}
	Ok(())
}
