//! Monte-Carlo recovery trials.
//!
//! A trial draws a random error, measures its syndrome, turns the syndrome
//! into a pure error with the inverse-syndrome map, decodes the pure error
//! against the stacked stabilizer and logical matrix, and checks the
//! correction against the tested logicals.

use crate::QecError;
use crate::decoder::{DecodeOptions, DecodeOutcome, decode};
use crate::failure::{LogicalOutcome, check_failure};
use crate::gf2::{BinaryMatrix, BitVector, Bits, format_bits, matvec_mod2};
use crate::model::Diagnostics;
use crate::sampler::sample_syndrome;
use crate::solver::IpSolver;
use crate::syndrome::syndrome;
use rand::Rng;
use stab_common::{CodeConfig, SolverConfig};
use tracing::warn;

/// Result of one Monte-Carlo trial.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub error: BitVector,
    pub correction: BitVector,

    /// One entry per tested logical, in the configured order.
    pub outcomes: Vec<LogicalOutcome>,

    pub diagnostics: Diagnostics,

    /// The solver hit its time limit and the correction is best-effort.
    pub timed_out: bool,
}

impl TrialOutcome {
    /// True if any tested logical was flipped.
    pub fn any_failed(&self) -> bool {
        self.outcomes.iter().any(|o| o.failed)
    }
}

/// Matrices and configuration shared by every trial of a run.
#[derive(Debug, Clone)]
pub struct RecoveryProblem {
    stabilizers: BinaryMatrix,
    logicals: BinaryMatrix,
    inverse_syndrome: BinaryMatrix,
    code: CodeConfig,
    tested_logicals: Vec<usize>,
    stacked: BinaryMatrix,
    options: DecodeOptions,
}

impl RecoveryProblem {
    /// Validates shapes and prepares the stacked decoding matrix.
    ///
    /// # Arguments
    ///
    /// * `stabilizers` - Stabilizer generators, n bits wide
    /// * `logicals` - Logical operators, n bits wide
    /// * `inverse_syndrome` - n rows, one column per stabilizer
    /// * `code` - Representation, error model, and decoding model
    /// * `tested_logicals` - Logical rows checked after each decode
    pub fn new(
        stabilizers: BinaryMatrix,
        logicals: BinaryMatrix,
        inverse_syndrome: BinaryMatrix,
        code: CodeConfig,
        tested_logicals: Vec<usize>,
    ) -> Result<Self, QecError> {
        let n = stabilizers.width();
        if inverse_syndrome.num_rows() != n || inverse_syndrome.width() != stabilizers.num_rows() {
            return Err(QecError::Dimension(format!(
                "inverse syndrome map is {}x{}, expected {n}x{}",
                inverse_syndrome.num_rows(),
                inverse_syndrome.width(),
                stabilizers.num_rows()
            )));
        }
        if let Some(&bad) = tested_logicals.iter().find(|&&l| l >= logicals.num_rows()) {
            return Err(QecError::Dimension(format!(
                "tested logical {bad} out of range for {} logicals",
                logicals.num_rows()
            )));
        }
        let stacked = stabilizers.stacked(&logicals)?;
        let options = DecodeOptions::for_code(&code);
        Ok(Self {
            stabilizers,
            logicals,
            inverse_syndrome,
            code,
            tested_logicals,
            stacked,
            options,
        })
    }

    pub fn stabilizers(&self) -> &BinaryMatrix {
        &self.stabilizers
    }

    pub fn logicals(&self) -> &BinaryMatrix {
        &self.logicals
    }

    pub fn tested_logicals(&self) -> &[usize] {
        &self.tested_logicals
    }

    /// Applies the inverse-syndrome map and checks the result reproduces the syndrome.
    pub fn pure_error(&self, syn: &Bits) -> Result<BitVector, QecError> {
        let pure = matvec_mod2(&self.inverse_syndrome, syn)?;
        let check = syndrome(&pure, &self.stabilizers, self.code.is_combined())?;
        if check.as_bitslice() != syn {
            return Err(QecError::InvariantViolation(format!(
                "pure error {} has syndrome {}, expected {}",
                format_bits(&pure),
                format_bits(&check),
                format_bits(syn)
            )));
        }
        Ok(pure)
    }

    /// Decodes a syndrome into a minimum-weight correction.
    ///
    /// The pure error is the coset target and the stacked stabilizer and
    /// logical rows are the generator, so the search covers every error
    /// consistent with the syndrome.
    pub fn decode_syndrome<S: IpSolver + ?Sized>(
        &self,
        solver: &S,
        syn: &Bits,
        config: &SolverConfig,
    ) -> Result<DecodeOutcome, QecError> {
        let pure = self.pure_error(syn)?;
        decode(solver, &self.stacked, &pure, &self.options, config)
    }

    /// Runs one trial at the given error weight.
    ///
    /// A decode that hits the time limit with an incumbent is accepted as
    /// best-effort and flagged in the outcome. A timeout without one, like
    /// every other error, is returned to the caller.
    pub fn run_trial<S: IpSolver + ?Sized, R: Rng + ?Sized>(
        &self,
        weight: usize,
        solver: &S,
        config: &SolverConfig,
        rng: &mut R,
    ) -> Result<TrialOutcome, QecError> {
        let (syn, error) = sample_syndrome(weight, &self.stabilizers, &self.code, rng)?;

        let (decoded, timed_out) = match self.decode_syndrome(solver, &syn, config) {
            Ok(out) => (out, false),
            Err(QecError::SolverTimeout {
                outcome: Some(outcome),
            }) => {
                warn!(weight, "accepting best-effort correction after time limit");
                (*outcome, true)
            }
            Err(e) => return Err(e),
        };

        let outcomes = check_failure(
            &error,
            &decoded.correction,
            &self.stabilizers,
            &self.logicals,
            self.code.is_combined(),
            &self.tested_logicals,
        )?;

        Ok(TrialOutcome {
            error,
            correction: decoded.correction,
            outcomes,
            diagnostics: decoded.diagnostics,
            timed_out,
        })
    }
}
