//! Random Pauli error sampling.
//!
//! Errors are drawn without replacement: a weight-w error touches exactly w
//! distinct positions (or, for the depolarizing model, w distinct qubits).
//! The random source is supplied by the caller so Monte-Carlo drivers can
//! seed each trial independently.

use crate::QecError;
use crate::gf2::{self, BinaryMatrix, BitVector};
use crate::syndrome::syndrome;
use rand::Rng;
use rand::seq::index;
use stab_common::{CodeConfig, ErrorModel};

fn ensure_even(n_bits: usize, model: ErrorModel) -> Result<usize, QecError> {
    if n_bits % 2 == 0 {
        Ok(n_bits / 2)
    } else {
        Err(QecError::Dimension(format!(
            "{model} errors need an even number of bits, got {n_bits}"
        )))
    }
}

fn ensure_available(requested: usize, available: usize) -> Result<(), QecError> {
    if requested > available {
        Err(QecError::SampleSize {
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

/// Draws a random binary error vector.
///
/// The eligible positions depend on the model: all bits for independent X/Z,
/// the first half for X-only, the second half for Z-only. The depolarizing
/// model picks `weight` distinct qubits and applies X, Y or Z to each with
/// equal probability, where X sets the first-half bit, Z the second-half
/// bit, and Y both.
///
/// # Arguments
///
/// * `n_bits` - Length of the error vector
/// * `weight` - Number of distinct positions or qubits to flip
/// * `model` - Noise model deciding the eligible positions
/// * `rng` - Random source
///
/// # Returns
///
/// The error vector, or `SampleSize` if `weight` exceeds the eligible
/// positions, or `Dimension` if a half-based model gets an odd length.
pub fn sample_error<R: Rng + ?Sized>(
    n_bits: usize,
    weight: usize,
    model: ErrorModel,
    rng: &mut R,
) -> Result<BitVector, QecError> {
    let mut error = gf2::zeros(n_bits);

    match model {
        ErrorModel::IndependentXz => {
            ensure_available(weight, n_bits)?;
            for pos in index::sample(rng, n_bits, weight) {
                error.set(pos, true);
            }
        }
        ErrorModel::XOnly => {
            let half = ensure_even(n_bits, model)?;
            ensure_available(weight, half)?;
            for pos in index::sample(rng, half, weight) {
                error.set(pos, true);
            }
        }
        ErrorModel::ZOnly => {
            let half = ensure_even(n_bits, model)?;
            ensure_available(weight, half)?;
            for pos in index::sample(rng, half, weight) {
                error.set(half + pos, true);
            }
        }
        ErrorModel::Depolarizing => {
            let n_qubits = ensure_even(n_bits, model)?;
            ensure_available(weight, n_qubits)?;
            for qubit in index::sample(rng, n_qubits, weight) {
                match rng.gen_range(0..3u8) {
                    0 => error.set(qubit, true),
                    1 => {
                        error.set(qubit, true);
                        error.set(qubit + n_qubits, true);
                    }
                    _ => error.set(qubit + n_qubits, true),
                }
            }
        }
    }

    Ok(error)
}

/// Draws an error for a code and returns it with its syndrome.
///
/// CSS codes always sample with the independent X/Z model, whatever the
/// configured error model says.
///
/// # Arguments
///
/// * `weight` - Number of distinct positions or qubits to flip
/// * `stabilizers` - Stabilizer generator matrix of the code
/// * `code` - Representation and noise model of the code
/// * `rng` - Random source
///
/// # Returns
///
/// `(syndrome, error)` for one random draw.
pub fn sample_syndrome<R: Rng + ?Sized>(
    weight: usize,
    stabilizers: &BinaryMatrix,
    code: &CodeConfig,
    rng: &mut R,
) -> Result<(BitVector, BitVector), QecError> {
    let error = sample_error(
        stabilizers.width(),
        weight,
        code.effective_error_model(),
        rng,
    )?;
    let syn = syndrome(&error, stabilizers, code.is_combined())?;
    Ok((syn, error))
}
