//! Core decoding and distance algorithms for stabilizer codes.
//!
//! This crate turns minimum-weight questions about stabilizer codes into
//! binary integer programs: GF(2) vector arithmetic, random Pauli error
//! sampling, syndrome extraction, the coset decoder that searches for a
//! minimum-weight representative of a GF(2) coset, the failure check that
//! validates a correction against the logical operators, and the distance
//! finder built on top of the decoder. Each call is independent and
//! constructs a fresh integer program, so calls can be issued from many
//! threads without sharing solver state.

/// Minimum-weight coset decoder formulated as an integer program.
///
/// Encodes mod-2 reduction with integer carry variables, selects the
/// objective (Hamming or depolarizing weight) and the optional axis
/// restriction, hands the program to a solver backend, and validates the
/// returned assignment before producing a correction.
pub mod decoder;

/// Bit- and word-distance search over logical cosets.
///
/// Drives the coset decoder with each logical operator as target, once
/// against the stabilizers alone and once against the stabilizers
/// augmented with the remaining logicals.
pub mod distance;

/// Validation of corrections against the logical operators.
///
/// Confirms that error plus correction has a trivial syndrome and reports,
/// per tested logical, whether the residual anticommutes with it.
pub mod failure;

/// Vector and matrix arithmetic over GF(2).
///
/// Provides packed binary vectors, a row-major binary matrix type, and the
/// matrix-vector product, vector sum, inner product, and X/Z half-swap
/// operations every other module is built from.
pub mod gf2;

/// Solver-agnostic description of an integer program.
///
/// Variables, linear constraints, and a linear objective, plus the
/// assignment and diagnostics a backend returns for them.
pub mod model;

/// Monte-Carlo recovery trials built from the core components.
///
/// Composes sampling, syndrome extraction, pure-error decoding over the
/// stacked stabilizer and logical matrix, and the failure check into one
/// trial.
pub mod recovery;

/// Random Pauli error sampling for the supported noise models.
pub mod sampler;

/// Integer-program solver backends.
///
/// Defines the narrow interface the decoder talks to and a pure-Rust
/// backend built on `good_lp` with the `microlp` solver.
pub mod solver;

/// Syndrome extraction with the X/Z convention applied in one place.
pub mod syndrome;

use thiserror::Error;

/// Error types returned by decoding, sampling, and distance operations.
///
/// Every variant except `SolverTimeout` is fatal for the call that produced
/// it. Invariant violations in particular indicate a convention mistake
/// upstream and must terminate the enclosing run rather than be counted as
/// a decoding failure.
#[derive(Debug, Error)]
pub enum QecError {
    /// Operand widths or lengths do not match.
    ///
    /// Raised before any solver call when a vector, matrix row, or index
    /// does not fit the shape the operation requires.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// The requested error weight exceeds the eligible positions.
    ///
    /// Sampling is without replacement, so the weight must not exceed the
    /// number of bits (or qubits) the noise model may touch.
    #[error("cannot draw {requested} distinct positions from {available}")]
    SampleSize { requested: usize, available: usize },

    /// No assignment satisfies the integer program.
    ///
    /// Also raised when the solver's assignment fails the post-solve coset
    /// check, since that means the returned vector is not a member of the
    /// requested coset.
    #[error("integer program is infeasible: {0}")]
    ModelInfeasible(String),

    /// The time limit was reached before optimality was proven.
    ///
    /// Carries the incumbent when the search found one, so the caller can
    /// accept it as a best-effort correction. `None` means the limit hit
    /// before any feasible point; retry with a larger limit.
    #[error("solver time limit reached before optimality was proven")]
    SolverTimeout {
        outcome: Option<Box<decoder::DecodeOutcome>>,
    },

    /// A correction failed the trivial net-syndrome check.
    ///
    /// Signals that the decoding or syndrome convention was applied
    /// incorrectly somewhere upstream.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The backend failed for a reason other than infeasibility.
    #[error("solver backend failure: {0}")]
    Solver(String),
}

impl QecError {
    /// Returns false only for errors a caller may recover from.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, QecError::SolverTimeout { .. })
    }
}

pub use decoder::{DecodeOptions, DecodeOutcome, ObjectiveModel, decode};
pub use distance::{LogicalDistance, find_distances};
pub use failure::{LogicalOutcome, check_failure};
pub use gf2::{BinaryMatrix, BitVector};
pub use solver::{IpSolver, MicroLpSolver};
pub use syndrome::syndrome;
