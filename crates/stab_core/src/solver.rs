//! Integer-program solver backends.
//!
//! The decoder only sees the `IpSolver` trait: hand over a program and a
//! configuration, get back an assignment with diagnostics. Backends are
//! swappable without touching the formulation. `MicroLpSolver` translates
//! programs into `good_lp` models solved by the pure-Rust `microlp`
//! branch-and-bound solver.

use crate::QecError;
use crate::model::{
    Assignment, Diagnostics, IntegerProgram, LinExpr, Sense, Solution, SolveStatus, VarKind,
};
use good_lp::solvers::microlp::microlp;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolutionStatus, SolverModel,
    Variable, WithTimeLimit, constraint, variable,
};
use stab_common::SolverConfig;
use tracing::{debug, info, warn};

/// Narrow interface to an integer-program solver.
///
/// Implementations must treat each call as independent: no model state may
/// survive between calls, so one solver value can serve many threads.
pub trait IpSolver {
    /// Short backend name used in log output.
    fn name(&self) -> &'static str;

    /// Solves `program` to optimality or until the configured time limit.
    ///
    /// # Arguments
    ///
    /// * `program` - Minimization problem to solve
    /// * `config` - Thread hint, verbosity, and time limit
    ///
    /// # Returns
    ///
    /// The assignment with diagnostics and a status telling whether
    /// optimality was proven, `ModelInfeasible` when no assignment exists,
    /// or `Solver` for any other backend failure.
    fn solve(&self, program: &IntegerProgram, config: &SolverConfig)
    -> Result<Solution, QecError>;
}

/// Backend built on `good_lp` with the `microlp` solver.
///
/// `microlp` runs single-threaded, so the thread hint is ignored. The time
/// limit is handed to the branch-and-bound search, which stops with its best
/// incumbent when the budget runs out. A search stopped before any feasible
/// point was found surfaces as `SolverTimeout` with no outcome attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

fn to_expression(expr: &LinExpr, vars: &[Variable]) -> Expression {
    expr.terms
        .iter()
        .map(|&(id, coef)| coef * vars[id.0])
        .sum::<Expression>()
}

impl IpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        config: &SolverConfig,
    ) -> Result<Solution, QecError> {
        if config.threads > 1 {
            debug!(threads = config.threads, "microlp is single-threaded, ignoring thread hint");
        }

        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = program
            .variables()
            .iter()
            .map(|v| match v.kind {
                VarKind::Binary => problem.add(variable().binary().name(v.name.clone())),
                VarKind::Integer { min, max } => problem.add(
                    variable()
                        .integer()
                        .min(min)
                        .max(max)
                        .name(v.name.clone()),
                ),
            })
            .collect();

        let mut model = problem
            .minimise(to_expression(program.objective(), &vars))
            .using(microlp);
        if let Some(limit) = config.time_limit {
            model = model.with_time_limit(limit.as_secs_f64());
        }
        for c in program.constraints() {
            let lhs = to_expression(&c.expr, &vars);
            model = model.with(match c.sense {
                Sense::Eq => constraint::eq(lhs, c.rhs),
                Sense::Le => constraint::leq(lhs, c.rhs),
                Sense::Ge => constraint::geq(lhs, c.rhs),
            });
        }

        let solution = match model.solve() {
            Ok(s) => s,
            Err(ResolutionError::Infeasible) => {
                return Err(QecError::ModelInfeasible(format!(
                    "{} proved the program infeasible ({} variables, {} constraints)",
                    self.name(),
                    vars.len(),
                    program.constraints().len()
                )));
            }
            // The backend's only `Other` error is a time limit hit before any incumbent.
            Err(ResolutionError::Other(reason)) if config.time_limit.is_some() => {
                warn!(
                    limit = ?config.time_limit,
                    %reason,
                    "solve stopped without a feasible point"
                );
                return Err(QecError::SolverTimeout { outcome: None });
            }
            Err(other) => return Err(QecError::Solver(other.to_string())),
        };

        let assignment = Assignment {
            values: vars.iter().map(|&v| solution.value(v)).collect(),
        };
        let status = match solution.status() {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::TimeLimitReached,
        };
        let stats = solution.into_inner().stats();
        let diagnostics = Diagnostics {
            objective_value: program.objective().evaluate(&assignment),
            best_bound: stats.best_bound,
            gap: stats.gap,
            iterations: Some(stats.lp_iterations),
            elapsed: stats.elapsed,
        };

        if status == SolveStatus::TimeLimitReached {
            warn!(
                elapsed = ?diagnostics.elapsed,
                limit = ?config.time_limit,
                gap = ?diagnostics.gap,
                "time limit reached with a feasible incumbent"
            );
        } else if config.verbose {
            info!(
                backend = self.name(),
                objective = diagnostics.objective_value,
                iterations = stats.lp_iterations,
                elapsed = ?diagnostics.elapsed,
                "solve finished"
            );
        } else {
            debug!(
                backend = self.name(),
                objective = diagnostics.objective_value,
                iterations = stats.lp_iterations,
                elapsed = ?diagnostics.elapsed,
                "solve finished"
            );
        }

        Ok(Solution {
            assignment,
            diagnostics,
            status,
        })
    }
}
