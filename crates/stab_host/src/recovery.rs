//! Monte-Carlo recovery sweep over error weights.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use stab_common::{CodeConfig, DecodingModel, ErrorModel, SolverConfig};
use stab_core::recovery::{RecoveryProblem, TrialOutcome};
use stab_core::{MicroLpSolver, QecError};
use stab_io::load_matrix;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

use crate::stats::SolveStats;

/// Everything one `recovery` invocation needs.
pub struct RecoveryRun {
    pub stabilizers: String,
    pub logicals: String,
    pub isf: String,
    pub css: bool,
    pub error_model: ErrorModel,
    pub decoding_model: DecodingModel,
    pub test_logicals: Vec<usize>,
    pub samples: usize,
    pub max_weight: usize,
    pub seed: u64,
    pub output: Option<String>,
    pub solver: SolverConfig,
}

/// Derives an independent RNG seed for one trial.
///
/// Mixes the run seed, the error weight, and the trial index through the
/// splitmix64 finalizer so that trials are reproducible regardless of
/// which worker thread runs them.
pub fn trial_seed(seed: u64, weight: usize, trial: usize) -> u64 {
    let mut z = seed
        ^ (weight as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (trial as u64).wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Aggregated results for one error weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSummary {
    pub weight: usize,
    /// Failure mean per tested logical, in the configured order.
    pub failure_means: Vec<f64>,
    pub samples: usize,
    pub timed_out: usize,

    /// Trials whose decode hit the time limit before any feasible point.
    pub unresolved: usize,
}

impl WeightSummary {
    /// Folds trial outcomes into per-logical failure means.
    ///
    /// `None` entries are unresolved trials; they count towards `samples`
    /// but not towards the means.
    pub fn from_trials(
        weight: usize,
        num_logicals: usize,
        trials: &[Option<TrialOutcome>],
    ) -> Self {
        let mut failures = vec![0usize; num_logicals];
        let mut timed_out = 0;
        let resolved: Vec<&TrialOutcome> = trials.iter().flatten().collect();
        for trial in &resolved {
            for (slot, outcome) in failures.iter_mut().zip(&trial.outcomes) {
                if outcome.failed {
                    *slot += 1;
                }
            }
            if trial.timed_out {
                timed_out += 1;
            }
        }
        let decided = resolved.len();
        let failure_means = failures
            .into_iter()
            .map(|f| if decided == 0 { 0.0 } else { f as f64 / decided as f64 })
            .collect();
        Self {
            weight,
            failure_means,
            samples: trials.len(),
            timed_out,
            unresolved: trials.len() - decided,
        }
    }

    /// Formats the summary as
    /// `weight,mean_0,...,mean_k,samples,timed_out,unresolved`.
    pub fn to_line(&self) -> String {
        let mut line = format!("{},", self.weight);
        for mean in &self.failure_means {
            line.push_str(&format!("{mean:.6},"));
        }
        line.push_str(&format!(
            "{},{},{}",
            self.samples, self.timed_out, self.unresolved
        ));
        line
    }
}

pub fn run_recovery(run: &RecoveryRun) -> Result<()> {
    println!("Loading stabilizers from {}...", run.stabilizers);
    let stabilizers = load_matrix(&run.stabilizers)?;
    let logicals = load_matrix(&run.logicals)?;
    let isf = load_matrix(&run.isf)?;
    println!(
        "Code loaded. Bits: {}, Stabilizers: {}, Logicals: {}",
        stabilizers.width(),
        stabilizers.num_rows(),
        logicals.num_rows()
    );

    let code = if run.css {
        if run.error_model != ErrorModel::IndependentXz
            || run.decoding_model != DecodingModel::IndependentXz
        {
            warn!("css codes always use independent X/Z sampling and Hamming weight; model flags ignored");
        }
        CodeConfig::css()
    } else {
        CodeConfig::combined(run.error_model, run.decoding_model)
    };

    let problem = RecoveryProblem::new(
        stabilizers,
        logicals,
        isf,
        code,
        run.test_logicals.clone(),
    )
    .context("Invalid recovery problem")?;

    let mut sink = match &run.output {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open results file {path}"))?,
        ),
        None => None,
    };

    let solver = MicroLpSolver;
    let mut stats = SolveStats::new();
    let start = Instant::now();

    for weight in 0..=run.max_weight {
        let trials = (0..run.samples)
            .into_par_iter()
            .map(|trial| {
                let mut rng = StdRng::seed_from_u64(trial_seed(run.seed, weight, trial));
                match problem.run_trial(weight, &solver, &run.solver, &mut rng) {
                    Ok(trial) => Ok(Some(trial)),
                    Err(QecError::SolverTimeout { outcome: None }) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .collect::<Result<Vec<_>, QecError>>()
            .with_context(|| format!("Recovery trial at weight {weight} failed"))?;

        for trial in trials.iter().flatten() {
            stats.update(trial.diagnostics.elapsed);
        }

        let summary = WeightSummary::from_trials(weight, run.test_logicals.len(), &trials);
        if summary.timed_out > 0 {
            warn!(
                weight,
                timed_out = summary.timed_out,
                "best-effort corrections included"
            );
        }
        if summary.unresolved > 0 {
            warn!(
                weight,
                unresolved = summary.unresolved,
                "time limit reached before any feasible correction"
            );
        }
        let line = summary.to_line();
        println!("{line}");
        if let Some(file) = sink.as_mut() {
            writeln!(file, "{line}").context("Failed to write results file")?;
        }
    }

    info!(
        elapsed = ?start.elapsed(),
        decodes = stats.count,
        "recovery sweep finished"
    );
    stats.print_report();
    Ok(())
}
