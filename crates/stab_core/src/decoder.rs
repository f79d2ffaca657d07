//! Minimum-weight coset decoder.
//!
//! Given a generator matrix `G` (m rows, n columns) and a target vector `t`,
//! the decoder searches for the lowest-weight vector of the coset
//! `t + rowspan(G)` by solving an integer program:
//!
//! ```text
//!   select[j]   binary     row j of G is added to the target
//!   raw[i]      integer    raw[i] = t[i] + sum_j G[j][i] * select[j]
//!   carry[i]    integer    raw[i] = 2 * carry[i] + residual[i]
//!   residual[i] binary     bit i of the result
//! ```
//!
//! The carry absorbs the even part of each column sum, so `residual` is the
//! mod-2 reduction and the coset membership is a hard constraint rather than
//! an after-the-fact check. The objective is either the plain Hamming weight
//! of `residual` or the depolarizing weight, which counts a qubit whose X
//! and Z bits are both set once. The depolarizing product term is linearised
//! with one auxiliary binary per qubit (`both[q] <= zx`, `both[q] <= zz`,
//! `both[q] >= zx + zz - 1`), minimizing `zx + zz - both[q]`.

use crate::QecError;
use crate::gf2::{BinaryMatrix, BitVector, Bits};
use crate::model::{Diagnostics, IntegerProgram, LinExpr, SolveStatus, VarId};
use crate::solver::IpSolver;
use stab_common::{CodeConfig, DecodingModel, SolverConfig};
use tracing::debug;

/// Slack allowed when re-checking a backend assignment against the program.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Objective minimized by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveModel {
    /// Hamming weight of the result.
    Linear,

    /// Number of qubits acted on, with X and Z on one qubit counted once.
    Depolarizing,
}

/// Half of a combined X/Z vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// First half, X components.
    X,

    /// Second half, Z components.
    Z,
}

/// Shape of the integer program: objective and optional axis restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub objective: ObjectiveModel,

    /// Half of the result forced to zero, if any.
    pub forbidden_half: Option<Half>,
}

impl DecodeOptions {
    /// Plain Hamming weight with no restriction.
    pub fn linear() -> Self {
        Self {
            objective: ObjectiveModel::Linear,
            forbidden_half: None,
        }
    }

    /// Options implied by a code's representation and decoding model.
    ///
    /// CSS codes always use the linear objective. Combined codes restrict
    /// X-only decoding to the X half, Z-only decoding to the Z half, and
    /// switch to the depolarizing objective for the depolarizing model.
    pub fn for_code(code: &CodeConfig) -> Self {
        if code.css {
            return Self::linear();
        }
        match code.decoding_model {
            DecodingModel::IndependentXz => Self::linear(),
            DecodingModel::XOnly => Self {
                objective: ObjectiveModel::Linear,
                forbidden_half: Some(Half::Z),
            },
            DecodingModel::ZOnly => Self {
                objective: ObjectiveModel::Linear,
                forbidden_half: Some(Half::X),
            },
            DecodingModel::Depolarizing => Self {
                objective: ObjectiveModel::Depolarizing,
                forbidden_half: None,
            },
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::linear()
    }
}

/// Result of one decode call.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Minimum-weight member of the coset.
    pub correction: BitVector,

    /// Generator rows combined into the target, one bit per row.
    pub selection: BitVector,

    /// Solver statistics, passed through unchanged.
    pub diagnostics: Diagnostics,
}

impl DecodeOutcome {
    /// Hamming weight of the correction.
    pub fn weight(&self) -> usize {
        self.correction.count_ones()
    }
}

/// Integer program for one coset search together with its variable handles.
#[derive(Debug, Clone)]
pub struct CosetProgram {
    pub program: IntegerProgram,

    /// One binary per generator row.
    pub select: Vec<VarId>,

    /// One binary per bit of the result.
    pub residual: Vec<VarId>,
}

fn half_of(n_bits: usize, what: &str) -> Result<usize, QecError> {
    if n_bits % 2 == 0 {
        Ok(n_bits / 2)
    } else {
        Err(QecError::Dimension(format!(
            "{what} needs an even number of bits, got {n_bits}"
        )))
    }
}

/// Builds the integer program for `target + rowspan(generator)`.
///
/// # Arguments
///
/// * `generator` - Rows that may be added to the target
/// * `target` - Coset representative, same width as the generator
/// * `options` - Objective and optional axis restriction
///
/// # Returns
///
/// The program and its variable handles, or a dimension error if widths
/// differ or a half-based option is used with an odd width.
pub fn build_program(
    generator: &BinaryMatrix,
    target: &Bits,
    options: &DecodeOptions,
) -> Result<CosetProgram, QecError> {
    let n = generator.width();
    if target.len() != n {
        return Err(QecError::Dimension(format!(
            "target has {} bits, generator rows have {n}",
            target.len()
        )));
    }

    let mut program = IntegerProgram::new();
    let select: Vec<VarId> = (0..generator.num_rows())
        .map(|j| program.add_binary(format!("select[{j}]")))
        .collect();

    let mut residual = Vec::with_capacity(n);
    for i in 0..n {
        let t = u8::from(target[i]);
        let max_raw = (usize::from(t) + generator.column_weight(i)) as f64;
        let raw_i = program.add_integer(format!("raw[{i}]"), 0.0, max_raw);
        let carry_i = program.add_integer(format!("carry[{i}]"), 0.0, (max_raw / 2.0).floor());
        let residual_i = program.add_binary(format!("residual[{i}]"));

        // raw[i] - sum_j G[j][i] * select[j] = t[i]
        let mut column = LinExpr::new().plus(1.0, raw_i);
        for (j, row) in generator.rows().iter().enumerate() {
            if row[i] {
                column.push(-1.0, select[j]);
            }
        }
        program.add_eq(column, f64::from(t));

        // raw[i] - 2 * carry[i] - residual[i] = 0
        program.add_eq(
            LinExpr::new()
                .plus(1.0, raw_i)
                .plus(-2.0, carry_i)
                .plus(-1.0, residual_i),
            0.0,
        );

        residual.push(residual_i);
    }

    if let Some(half) = options.forbidden_half {
        let h = half_of(n, "axis restriction")?;
        let range = match half {
            Half::X => 0..h,
            Half::Z => h..n,
        };
        program.add_eq(residual[range].iter().map(|&v| (v, 1.0)).collect(), 0.0);
    }

    let objective = match options.objective {
        ObjectiveModel::Linear => residual.iter().map(|&v| (v, 1.0)).collect(),
        ObjectiveModel::Depolarizing => {
            let h = half_of(n, "depolarizing objective")?;
            let mut objective = LinExpr::new();
            for q in 0..h {
                let zx = residual[q];
                let zz = residual[q + h];
                let p = program.add_binary(format!("both[{q}]"));
                program.add_le(LinExpr::new().plus(1.0, p).plus(-1.0, zx), 0.0);
                program.add_le(LinExpr::new().plus(1.0, p).plus(-1.0, zz), 0.0);
                program.add_ge(
                    LinExpr::new().plus(1.0, p).plus(-1.0, zx).plus(-1.0, zz),
                    -1.0,
                );
                objective.push(1.0, zx);
                objective.push(1.0, zz);
                objective.push(-1.0, p);
            }
            objective
        }
    };
    program.minimise(objective);

    Ok(CosetProgram {
        program,
        select,
        residual,
    })
}

/// Finds a minimum-weight vector in `target + rowspan(generator)`.
///
/// Every call builds a fresh program. After the solve, the assignment is
/// checked against every constraint and the correction is recomputed from
/// the selected generator rows; either mismatch is reported as
/// `ModelInfeasible`.
///
/// # Arguments
///
/// * `solver` - Backend used for this call
/// * `generator` - Rows that may be added to the target
/// * `target` - Coset representative
/// * `options` - Objective and optional axis restriction
/// * `config` - Thread hint, verbosity, and time limit for the backend
///
/// # Returns
///
/// The correction with diagnostics. If the time limit stopped the search
/// after an incumbent was found, that best-effort outcome is returned
/// inside `SolverTimeout`; otherwise the timeout carries no outcome.
pub fn decode<S: IpSolver + ?Sized>(
    solver: &S,
    generator: &BinaryMatrix,
    target: &Bits,
    options: &DecodeOptions,
    config: &SolverConfig,
) -> Result<DecodeOutcome, QecError> {
    let coset = build_program(generator, target, options)?;
    debug!(
        rows = generator.num_rows(),
        width = generator.width(),
        variables = coset.program.variables().len(),
        constraints = coset.program.constraints().len(),
        objective = ?options.objective,
        "built coset program"
    );

    let solution = solver.solve(&coset.program, config)?;
    let assignment = &solution.assignment;
    if !coset.program.is_satisfied_by(assignment, FEASIBILITY_TOLERANCE) {
        return Err(QecError::ModelInfeasible(format!(
            "{} returned an assignment that violates the program",
            solver.name()
        )));
    }

    let selection: BitVector = coset.select.iter().map(|&v| assignment.parity(v)).collect();
    let correction: BitVector = coset
        .residual
        .iter()
        .map(|&v| assignment.parity(v))
        .collect();

    let expected = generator.combine(target, &selection)?;
    if expected != correction {
        return Err(QecError::ModelInfeasible(format!(
            "{} returned a vector outside the requested coset",
            solver.name()
        )));
    }

    let outcome = DecodeOutcome {
        correction,
        selection,
        diagnostics: solution.diagnostics,
    };
    match solution.status {
        SolveStatus::Optimal => Ok(outcome),
        SolveStatus::TimeLimitReached => Err(QecError::SolverTimeout {
            outcome: Some(Box::new(outcome)),
        }),
    }
}
