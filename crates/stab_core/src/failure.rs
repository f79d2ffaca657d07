//! Failure check for decoded corrections.
//!
//! The net error (error plus correction) must have a trivial syndrome. If it
//! does not, the decoder returned something outside the syndrome class of
//! the error, which is a logic error upstream and not a decoding failure, so
//! the check fails with `InvariantViolation` instead of producing an
//! outcome. Otherwise the net error is a logical operator or a stabilizer,
//! and its inner product with each tested logical tells whether the logical
//! state was flipped.

use crate::QecError;
use crate::gf2::{BinaryMatrix, Bits, add_mod2, dot_mod2, format_bits, swap_halves};
use crate::syndrome::syndrome;
use tracing::error;

/// Outcome of the failure check for one tested logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalOutcome {
    /// Row of the logical matrix that was tested.
    pub logical: usize,

    /// True when the residual anticommutes with this logical.
    pub failed: bool,
}

/// Validates a correction and reports a per-logical outcome.
///
/// # Arguments
///
/// * `error` - Error that was applied
/// * `correction` - Correction proposed by the decoder
/// * `stabilizers` - Stabilizer generator matrix
/// * `logicals` - Logical operator matrix
/// * `combined` - True for combined X/Z representations
/// * `tested_logicals` - Rows of `logicals` to test, in output order
///
/// # Returns
///
/// One outcome per tested logical, `InvariantViolation` if the net syndrome
/// is not trivial, or `Dimension` for mismatched widths or indices.
pub fn check_failure(
    error: &Bits,
    correction: &Bits,
    stabilizers: &BinaryMatrix,
    logicals: &BinaryMatrix,
    combined: bool,
    tested_logicals: &[usize],
) -> Result<Vec<LogicalOutcome>, QecError> {
    if logicals.width() != stabilizers.width() {
        return Err(QecError::Dimension(format!(
            "logical width {} does not match stabilizer width {}",
            logicals.width(),
            stabilizers.width()
        )));
    }
    if let Some(&bad) = tested_logicals.iter().find(|&&l| l >= logicals.num_rows()) {
        return Err(QecError::Dimension(format!(
            "tested logical {bad} out of range for {} logicals",
            logicals.num_rows()
        )));
    }

    let net = add_mod2(error, correction)?;
    let net_syndrome = syndrome(&net, stabilizers, combined)?;
    if net_syndrome.any() {
        error!(
            net = %format_bits(&net),
            syndrome = %format_bits(&net_syndrome),
            "net error has a non-trivial syndrome"
        );
        return Err(QecError::InvariantViolation(format!(
            "net error {} has syndrome {}",
            format_bits(&net),
            format_bits(&net_syndrome)
        )));
    }

    let net = if combined { swap_halves(&net)? } else { net };
    tested_logicals
        .iter()
        .map(|&logical| -> Result<LogicalOutcome, QecError> {
            let row = logicals
                .row(logical)
                .ok_or_else(|| QecError::Dimension(format!("missing logical {logical}")))?;
            Ok(LogicalOutcome {
                logical,
                failed: dot_mod2(&net, row)?,
            })
        })
        .collect()
}
