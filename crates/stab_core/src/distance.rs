//! Bit- and word-distance search.
//!
//! The bit distance of a logical is the minimum weight of the coset
//! `logical + rowspan(stabilizers)`. The word distance widens the coset with
//! every other logical row. Widening the generator set can only lower the
//! minimum, so `word_distance <= bit_distance` for every logical; a result
//! breaking that ordering is reported as an invariant violation.

use crate::QecError;
use crate::decoder::{DecodeOptions, decode};
use crate::gf2::{BinaryMatrix, BitVector};
use crate::solver::IpSolver;
use stab_common::SolverConfig;
use tracing::info;

/// Distances found for one logical operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalDistance {
    /// Row of the logical matrix.
    pub logical: usize,

    /// Minimum weight over the stabilizer coset.
    pub bit_distance: usize,

    /// Minimum weight over the stabilizer-plus-other-logicals coset.
    pub word_distance: usize,

    /// Representative achieving the bit distance.
    pub bit_representative: BitVector,

    /// Representative achieving the word distance.
    pub word_representative: BitVector,
}

/// Computes bit and word distance for the selected logicals.
///
/// Always uses the linear objective. A code with a single logical needs one
/// decode per logical since there is nothing to widen the coset with.
///
/// # Arguments
///
/// * `solver` - Backend used for every decode
/// * `stabilizers` - Stabilizer generator matrix
/// * `logicals` - Logical operator matrix, same width as the stabilizers
/// * `which` - Logical rows to analyse, in output order
/// * `config` - Solver configuration for each decode
///
/// # Returns
///
/// One entry per selected logical. Timeouts from any decode are returned
/// as-is so the caller can decide whether a best-effort distance is enough.
pub fn find_distances<S: IpSolver + ?Sized>(
    solver: &S,
    stabilizers: &BinaryMatrix,
    logicals: &BinaryMatrix,
    which: &[usize],
    config: &SolverConfig,
) -> Result<Vec<LogicalDistance>, QecError> {
    if logicals.width() != stabilizers.width() {
        return Err(QecError::Dimension(format!(
            "logical width {} does not match stabilizer width {}",
            logicals.width(),
            stabilizers.width()
        )));
    }

    let options = DecodeOptions::linear();
    let mut results = Vec::with_capacity(which.len());

    for &idx in which {
        let target = logicals.row(idx).ok_or_else(|| {
            QecError::Dimension(format!(
                "logical {idx} out of range for {} logicals",
                logicals.num_rows()
            ))
        })?;

        let bit = decode(solver, stabilizers, target, &options, config)?;
        let word = if logicals.num_rows() == 1 {
            bit.clone()
        } else {
            let augmented = stabilizers.stacked(&logicals.without_row(idx)?)?;
            decode(solver, &augmented, target, &options, config)?
        };

        let entry = LogicalDistance {
            logical: idx,
            bit_distance: bit.weight(),
            word_distance: word.weight(),
            bit_representative: bit.correction,
            word_representative: word.correction,
        };
        if entry.word_distance > entry.bit_distance {
            return Err(QecError::InvariantViolation(format!(
                "logical {idx}: word distance {} exceeds bit distance {}",
                entry.word_distance, entry.bit_distance
            )));
        }

        info!(
            logical = idx,
            bit = entry.bit_distance,
            word = entry.word_distance,
            "distance found"
        );
        results.push(entry);
    }

    Ok(results)
}
