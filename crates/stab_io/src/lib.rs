//! I/O utilities for loading stabilizer code data files.
//!
//! Stabilizer, logical, and inverse-syndrome matrices are stored as plain
//! numeric text: one row per line, entries separated by tabs or spaces.
//! These utilities read such files and convert them into the packed
//! binary matrices the decoder works with.

/// File loading utilities for matrix text files.
///
/// Opens files, attaches the path to any failure, and hands the contents
/// to the parser.
pub mod loader;

/// Parser for whitespace-separated 0/1 matrix text.
///
/// Accepts integer or floating-point spellings of 0 and 1, skips blank
/// lines and `#` comments, and rejects ragged rows.
pub mod parser;

pub use loader::load_matrix;
pub use parser::parse_matrix;
