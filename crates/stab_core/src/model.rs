//! Solver-agnostic integer program description.
//!
//! The decoder builds an `IntegerProgram` out of binary and bounded integer
//! variables, linear constraints, and a linear objective to minimize. A
//! backend translates it into its own model, solves it, and hands back an
//! `Assignment` with `Diagnostics`. Nothing here depends on a particular
//! solver.

use core::time::Duration;

/// Index of a variable inside one `IntegerProgram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// Integer restricted to {0, 1}.
    Binary,

    /// Integer in the closed range `[min, max]`.
    Integer { min: f64, max: f64 },
}

/// A named decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
}

/// Linear combination of variables, without a constant term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    pub terms: Vec<(VarId, f64)>,
}

impl LinExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coef * var` and returns the expression for chaining.
    pub fn plus(mut self, coef: f64, var: VarId) -> Self {
        self.terms.push((var, coef));
        self
    }

    pub fn push(&mut self, coef: f64, var: VarId) {
        self.terms.push((var, coef));
    }

    /// Evaluates the expression under an assignment.
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * assignment.value(var))
            .sum()
    }
}

impl FromIterator<(VarId, f64)> for LinExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Eq,
    Le,
    Ge,
}

/// `expr (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub expr: LinExpr,
    pub sense: Sense,
    pub rhs: f64,
}

/// Minimization problem over binary and bounded integer variables.
#[derive(Debug, Clone, Default)]
pub struct IntegerProgram {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinExpr,
}

impl IntegerProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name.into(), VarKind::Binary)
    }

    pub fn add_integer(&mut self, name: impl Into<String>, min: f64, max: f64) -> VarId {
        self.add_variable(name.into(), VarKind::Integer { min, max })
    }

    fn add_variable(&mut self, name: String, kind: VarKind) -> VarId {
        self.variables.push(Variable { name, kind });
        VarId(self.variables.len() - 1)
    }

    pub fn add_eq(&mut self, expr: LinExpr, rhs: f64) {
        self.add_constraint(expr, Sense::Eq, rhs);
    }

    pub fn add_le(&mut self, expr: LinExpr, rhs: f64) {
        self.add_constraint(expr, Sense::Le, rhs);
    }

    pub fn add_ge(&mut self, expr: LinExpr, rhs: f64) {
        self.add_constraint(expr, Sense::Ge, rhs);
    }

    fn add_constraint(&mut self, expr: LinExpr, sense: Sense, rhs: f64) {
        self.constraints.push(Constraint { expr, sense, rhs });
    }

    /// Replaces the objective. The program always minimizes.
    pub fn minimise(&mut self, objective: LinExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }

    /// Checks every constraint and variable domain against an assignment.
    ///
    /// Values are compared with `tolerance` to absorb solver round-off.
    pub fn is_satisfied_by(&self, assignment: &Assignment, tolerance: f64) -> bool {
        if assignment.values.len() != self.variables.len() {
            return false;
        }
        let domains_ok = self.variables.iter().enumerate().all(|(i, var)| {
            let v = assignment.values[i];
            let integral = (v - v.round()).abs() <= tolerance;
            match var.kind {
                VarKind::Binary => integral && v > -tolerance && v < 1.0 + tolerance,
                VarKind::Integer { min, max } => {
                    integral && v >= min - tolerance && v <= max + tolerance
                }
            }
        });
        domains_ok
            && self.constraints.iter().all(|c| {
                let lhs = c.expr.evaluate(assignment);
                match c.sense {
                    Sense::Eq => (lhs - c.rhs).abs() <= tolerance,
                    Sense::Le => lhs <= c.rhs + tolerance,
                    Sense::Ge => lhs >= c.rhs - tolerance,
                }
            })
    }
}

/// Values for every variable of a program, indexed by `VarId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub values: Vec<f64>,
}

impl Assignment {
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.0]
    }

    /// Value rounded to the nearest integer and reduced mod 2.
    pub fn parity(&self, var: VarId) -> bool {
        (self.value(var).round() as i64).rem_euclid(2) == 1
    }
}

/// Solve statistics passed through from the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Objective value of the returned assignment.
    pub objective_value: f64,

    /// Best proven lower bound on the objective, when the backend reports one.
    pub best_bound: Option<f64>,

    /// Relative gap between the assignment and the bound. `Some(0.0)` once
    /// optimality is proven.
    pub gap: Option<f64>,

    /// Solver iteration count, when the backend reports one.
    pub iterations: Option<u64>,

    /// Wall-clock time spent inside the backend.
    pub elapsed: Duration,
}

/// Whether the backend proved its assignment optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    TimeLimitReached,
}

/// Assignment, diagnostics, and status of one solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub assignment: Assignment,
    pub diagnostics: Diagnostics,
    pub status: SolveStatus,
}
