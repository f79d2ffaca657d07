//! Distance report for every selected logical.

use anyhow::{Context, Result};
use stab_common::SolverConfig;
use stab_core::gf2::format_bits;
use stab_core::{MicroLpSolver, find_distances};
use stab_io::load_matrix;
use std::time::Instant;
use tracing::debug;

pub fn run_distance(
    stab_path: &str,
    logical_path: &str,
    which: &[usize],
    config: &SolverConfig,
) -> Result<()> {
    println!("Loading stabilizers from {}...", stab_path);
    let stabilizers = load_matrix(stab_path)?;
    let logicals = load_matrix(logical_path)?;

    let selected: Vec<usize> = if which.is_empty() {
        (0..logicals.num_rows()).collect()
    } else {
        which.to_vec()
    };

    let start = Instant::now();
    let distances = find_distances(&MicroLpSolver, &stabilizers, &logicals, &selected, config)
        .context("Distance search failed")?;

    println!("logical,bit_distance,word_distance");
    for d in &distances {
        debug!(
            logical = d.logical,
            bit = %format_bits(&d.bit_representative),
            word = %format_bits(&d.word_representative),
            "minimum-weight representatives"
        );
        println!("{},{},{}", d.logical, d.bit_distance, d.word_distance);
    }
    println!("Time: {:.4} s", start.elapsed().as_secs_f64());

    Ok(())
}
