//! Syndrome extraction.
//!
//! Stabilizer rows of combined (non-CSS) codes are written in the opposite
//! X/Z half ordering from error vectors, so the error's halves are swapped
//! before the product. This function is the only place that convention is
//! applied; every other module routes through it.

use crate::QecError;
use crate::gf2::{BinaryMatrix, BitVector, Bits, matvec_mod2, swap_halves};

/// Computes the syndrome of `error` against the stabilizer generators.
///
/// # Arguments
///
/// * `error` - Binary error vector, X half first for combined codes
/// * `stabilizers` - Stabilizer generator matrix
/// * `combined` - True when the code uses the combined X/Z representation
///
/// # Returns
///
/// One bit per stabilizer row, or a dimension error if widths differ.
pub fn syndrome(
    error: &Bits,
    stabilizers: &BinaryMatrix,
    combined: bool,
) -> Result<BitVector, QecError> {
    if combined {
        matvec_mod2(stabilizers, &swap_halves(error)?)
    } else {
        matvec_mod2(stabilizers, error)
    }
}
