use anyhow::{Context, Result};
use stab_core::gf2::BinaryMatrix;
use std::fs;
use std::path::Path;

use crate::parser::parse_matrix;

/// Loads a binary matrix from a text file.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<BinaryMatrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open matrix file {}", path.display()))?;
    parse_matrix(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
