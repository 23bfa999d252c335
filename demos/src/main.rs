// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render the default Apollonian gasket to a grayscale PGM image.
//!
//! Set `RUST_LOG=debug` for per-pass subdivision summaries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use apollonian_gasket::{Gasket, SeedSpec, Subdivision};
use clap::Parser;
use kurbo::Point;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render an Apollonian gasket to a binary PGM file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Width and height of the square image, in pixels.
    #[arg(long, default_value_t = 1024)]
    size: usize,
    /// Generations grown below every top-level region before the ceiling pass.
    #[arg(long, default_value_t = 8)]
    depth: u32,
    /// Keep splitting until circles have at least this curvature.
    #[arg(long, default_value_t = 10_000.0)]
    max_curvature: f64,
    /// Half-width of the rendered square, centered on the origin.
    #[arg(long, default_value_t = 1.05)]
    extent: f64,
    /// Destination file.
    #[arg(long, short, default_value = "apollonian.pgm")]
    output: PathBuf,
}

/// Map a pixel to the plane, with the row axis flipped so `y` points up.
fn sample(args: &Args, col: usize, row: usize) -> Point {
    let scale = 2.0 * args.extent / args.size as f64;
    Point::new(
        scale * col as f64 - args.extent,
        scale * (args.size - row) as f64 - args.extent,
    )
}

fn render(gasket: &Gasket, args: &Args) -> Vec<u8> {
    let mut pixels = vec![0_u8; args.size * args.size];
    pixels
        .par_chunks_mut(args.size.max(1))
        .enumerate()
        .for_each(|(row, line)| {
            for (col, px) in line.iter_mut().enumerate() {
                *px = gasket.shade(sample(args, col, row));
            }
        });
    pixels
}

fn write_pgm(args: &Args, pixels: &[u8]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(&args.output)?);
    write!(out, "P5\n{} {}\n255\n", args.size, args.size)?;
    out.write_all(pixels)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!(depth = args.depth, max_curvature = args.max_curvature, "generating");
    let mut gasket = Gasket::new(SeedSpec::default())?;
    let by_depth = gasket.par_subdivide(Subdivision::Depth(args.depth))?;
    let by_ceiling = gasket.par_subdivide(Subdivision::CurvatureCeiling(args.max_curvature))?;
    info!(
        circles = gasket.circle_count(),
        skipped = by_depth.skipped + by_ceiling.skipped,
        "generated"
    );

    info!(size = args.size, output = %args.output.display(), "rendering");
    let pixels = render(&gasket, &args);
    write_pgm(&args, &pixels)?;
    info!("done");
    Ok(())
}
