//! Terrain generator binary — generates a height field and prints a summary.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --seed <SEED>          Random seed (default: 12345)
//!   --tesselation <N>      Recursion depth, side = 2^N + 1 (default: 6)
//!   --smooth <PASSES>      3x3 smoothing convolution passes (default: 0)
//!   --boxes <N>            Histogram bucket count (default: 20)
//!
//! Prints a JSON summary (side, seed, height histogram) to stdout so the
//! output can be piped into diagnostics tooling.

use std::time::Instant;

use serde_json::json;

use heightfield::terrain::{HeightGrid, TerrainParams};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let seed = parse_u64_arg(&args, "--seed").unwrap_or(12345);
    let tesselation = parse_u32_arg(&args, "--tesselation").unwrap_or(6);
    let smooth = parse_u32_arg(&args, "--smooth").unwrap_or(0);
    let boxes = parse_usize_arg(&args, "--boxes").unwrap_or(20);

    let params = TerrainParams { seed, tesselation };
    let mut grid = HeightGrid::from_params(&params);

    let start = Instant::now();
    if let Err(err) = grid.generate() {
        log::error!("generation failed: {err}");
        std::process::exit(1);
    }
    log::info!(
        "generated {}x{} grid in {:.1?}",
        grid.side(),
        grid.side(),
        start.elapsed()
    );

    let kernel = vec![vec![1.0; 3]; 3];
    for pass in 0..smooth {
        if let Err(err) = grid.apply_convolution(&kernel) {
            log::error!("smoothing pass {pass} failed: {err}");
            std::process::exit(1);
        }
    }

    let summary = json!({
        "seed": seed,
        "tesselation": tesselation,
        "side": grid.side(),
        "cells": grid.dump().len(),
        "smooth_passes": smooth,
        "histogram": grid.statistics(boxes),
    });
    println!("{summary}");
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    parse_str_arg(args, flag)?.parse().ok()
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    parse_str_arg(args, flag)?.parse().ok()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    parse_str_arg(args, flag)?.parse().ok()
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
