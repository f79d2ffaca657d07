//! Parser for binary matrix text.
//!
//! Each non-empty line that does not start with `#` is one matrix row. Entries
//! are numbers separated by tabs or spaces; numeric exports often write them
//! as floats (`1.000000e+00`), so any number that is exactly 0 or 1 is
//! accepted.

use anyhow::{Result, anyhow, bail};
use nom::IResult;
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::number::complete::double;
use nom::sequence::delimited;
use stab_core::gf2::{BinaryMatrix, BitVector};

fn number_row(input: &str) -> IResult<&str, Vec<f64>> {
    all_consuming(delimited(space0, separated_list1(space1, double), space0))(input)
}

fn to_bit(value: f64) -> Option<bool> {
    if value == 0.0 {
        Some(false)
    } else if value == 1.0 {
        Some(true)
    } else {
        None
    }
}

/// Parses a single row of 0/1 entries.
///
/// # Arguments
///
/// * `line` - Row text without its line terminator
///
/// # Returns
///
/// The row as a bit vector, or an error naming the offending entry.
pub fn parse_row(line: &str) -> Result<BitVector> {
    let (_, values) =
        number_row(line.trim_end_matches('\r')).map_err(|e| anyhow!("malformed row: {e}"))?;
    values
        .iter()
        .enumerate()
        .map(|(col, &v)| to_bit(v).ok_or_else(|| anyhow!("entry {col} is {v}, expected 0 or 1")))
        .collect()
}

/// Parses a whole matrix, one row per line.
///
/// Blank lines and lines starting with `#` are skipped. A file holding a
/// single row yields a one-row matrix.
///
/// # Arguments
///
/// * `text` - File contents
///
/// # Returns
///
/// The parsed matrix, or an error naming the first bad line. Empty input
/// and rows of differing length are errors.
pub fn parse_matrix(text: &str) -> Result<BinaryMatrix> {
    let mut rows: Vec<BitVector> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = parse_row(trimmed).map_err(|e| e.context(format!("line {}", idx + 1)))?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                bail!(
                    "line {}: row has {} entries, previous rows have {}",
                    idx + 1,
                    row.len(),
                    first.len()
                );
            }
        }
        rows.push(row);
    }

    let Some(width) = rows.first().map(|r| r.len()) else {
        bail!("matrix text contains no rows");
    };
    Ok(BinaryMatrix::new(width, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stab_core::gf2::bits;

    #[test]
    fn parses_tab_separated_integers() {
        let m = parse_matrix("1\t0\t1\n0\t1\t1\n").unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.row(0).unwrap(), bits(&[1, 0, 1]).as_bitslice());
        assert_eq!(m.row(1).unwrap(), bits(&[0, 1, 1]).as_bitslice());
    }

    #[test]
    fn accepts_float_spellings_and_mixed_whitespace() {
        let m = parse_matrix("1.000000000000000000e+00 0.0\t1\r\n  0 1.0 0  \n").unwrap();
        assert_eq!(m.row(0).unwrap(), bits(&[1, 0, 1]).as_bitslice());
        assert_eq!(m.row(1).unwrap(), bits(&[0, 1, 0]).as_bitslice());
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let m = parse_matrix("# steane x part\n\n1 0 1\n\n# end\n").unwrap();
        assert_eq!(m.num_rows(), 1);
    }

    #[test]
    fn rejects_non_binary_entries() {
        let err = parse_matrix("1 0\n2 0\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(parse_matrix("1 0.5\n").is_err());
        assert!(parse_matrix("1 x\n").is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_matrix("1 0 1\n1 0\n").unwrap_err();
        assert!(err.to_string().contains("previous rows have 3"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_matrix("").is_err());
        assert!(parse_matrix("# only a comment\n").is_err());
    }
}
