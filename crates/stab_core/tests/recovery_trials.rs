//! Monte-Carlo recovery trials on the Steane and five-qubit codes.

mod common;

use rand::SeedableRng;
use rand::rngs::StdRng;
use stab_common::{CodeConfig, DecodingModel, ErrorModel, SolverConfig};
use stab_core::gf2::{BinaryMatrix, bits};
use stab_core::model::{IntegerProgram, SolveStatus, Solution};
use stab_core::recovery::RecoveryProblem;
use stab_core::{IpSolver, MicroLpSolver, QecError, syndrome};
use std::time::Duration;

/// Backend that solves to optimality but reports the limit as reached.
struct StoppedEarly;

impl IpSolver for StoppedEarly {
    fn name(&self) -> &'static str {
        "stopped-early"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        config: &SolverConfig,
    ) -> Result<Solution, QecError> {
        let mut solution = MicroLpSolver.solve(program, config)?;
        solution.status = SolveStatus::TimeLimitReached;
        Ok(solution)
    }
}

fn steane_problem() -> RecoveryProblem {
    let stabs = common::steane_stabilizers();
    let isf = common::inverse_syndrome(&stabs, false);
    RecoveryProblem::new(
        stabs,
        common::steane_logicals(),
        isf,
        CodeConfig::css(),
        vec![0, 1],
    )
    .unwrap()
}

fn five_qubit_problem() -> RecoveryProblem {
    let stabs = common::five_qubit_stabilizers();
    let isf = common::inverse_syndrome(&stabs, true);
    RecoveryProblem::new(
        stabs,
        common::five_qubit_logicals(),
        isf,
        CodeConfig::combined(ErrorModel::Depolarizing, DecodingModel::Depolarizing),
        vec![0, 1],
    )
    .unwrap()
}

#[test]
fn pure_errors_reproduce_their_syndromes() {
    let problem = steane_problem();
    for mask in 0u32..64 {
        let syn: stab_core::BitVector = (0..6).map(|k| mask >> k & 1 == 1).collect();
        let pure = problem.pure_error(&syn).unwrap();
        assert_eq!(syndrome(&pure, problem.stabilizers(), false).unwrap(), syn);
    }
}

#[test]
fn steane_corrects_every_single_bit_error() {
    let problem = steane_problem();
    for pos in 0..14 {
        let error = common::unit(14, pos);
        let syn = syndrome(&error, problem.stabilizers(), false).unwrap();
        let out = problem
            .decode_syndrome(&MicroLpSolver, &syn, &SolverConfig::default())
            .unwrap();
        assert_eq!(out.correction, error);
        let outcomes = stab_core::check_failure(
            &error,
            &out.correction,
            problem.stabilizers(),
            problem.logicals(),
            false,
            problem.tested_logicals(),
        )
        .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.failed));
    }
}

#[test]
fn low_weight_trials_never_fail() {
    let mut rng = StdRng::seed_from_u64(2024);
    let problem = steane_problem();
    for weight in 0..=1 {
        for _ in 0..10 {
            let trial = problem
                .run_trial(weight, &MicroLpSolver, &SolverConfig::default(), &mut rng)
                .unwrap();
            assert!(!trial.any_failed());
            assert!(!trial.timed_out);
            assert_eq!(trial.correction, trial.error);
        }
    }

    let problem = five_qubit_problem();
    for _ in 0..10 {
        let trial = problem
            .run_trial(1, &MicroLpSolver, &SolverConfig::default(), &mut rng)
            .unwrap();
        assert!(!trial.any_failed());
    }
}

#[test]
fn heavier_trials_keep_the_net_syndrome_trivial() {
    // Any miscorrection shows up as a logical failure, never as an invariant violation.
    let mut rng = StdRng::seed_from_u64(77);
    let problem = steane_problem();
    for weight in 2..=4 {
        for _ in 0..5 {
            let trial = problem
                .run_trial(weight, &MicroLpSolver, &SolverConfig::default(), &mut rng)
                .unwrap();
            assert_eq!(trial.outcomes.len(), 2);
        }
    }
}

#[test]
fn inconsistent_inverse_syndrome_is_fatal() {
    let stabs = common::steane_stabilizers();
    let zero_isf = BinaryMatrix::new(6, vec![stab_core::gf2::zeros(6); 14]).unwrap();
    let problem = RecoveryProblem::new(
        stabs,
        common::steane_logicals(),
        zero_isf,
        CodeConfig::css(),
        vec![0],
    )
    .unwrap();
    let err = problem
        .decode_syndrome(&MicroLpSolver, &bits(&[1, 0, 0, 0, 0, 0]), &SolverConfig::default())
        .unwrap_err();
    assert!(matches!(err, QecError::InvariantViolation(_)));
    assert!(err.is_fatal());
}

#[test]
fn malformed_problems_are_rejected_before_solving() {
    let stabs = common::steane_stabilizers();
    let bad_isf = BinaryMatrix::new(5, vec![stab_core::gf2::zeros(5); 14]).unwrap();
    assert!(matches!(
        RecoveryProblem::new(
            stabs.clone(),
            common::steane_logicals(),
            bad_isf,
            CodeConfig::css(),
            vec![0],
        ),
        Err(QecError::Dimension(_))
    ));

    let isf = common::inverse_syndrome(&stabs, false);
    assert!(matches!(
        RecoveryProblem::new(stabs, common::steane_logicals(), isf, CodeConfig::css(), vec![2]),
        Err(QecError::Dimension(_))
    ));

    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        steane_problem().run_trial(15, &MicroLpSolver, &SolverConfig::default(), &mut rng),
        Err(QecError::SampleSize { .. })
    ));
}

#[test]
fn time_limit_with_incumbent_is_accepted_and_flagged() {
    let mut rng = StdRng::seed_from_u64(9);
    let problem = steane_problem();
    for weight in 0..=2 {
        let trial = problem
            .run_trial(weight, &StoppedEarly, &SolverConfig::default(), &mut rng)
            .unwrap();
        assert!(trial.timed_out);
        assert_eq!(trial.outcomes.len(), 2);

        // The accepted correction still passes the net-syndrome check.
        let outcomes = stab_core::check_failure(
            &trial.error,
            &trial.correction,
            problem.stabilizers(),
            problem.logicals(),
            false,
            problem.tested_logicals(),
        )
        .unwrap();
        assert_eq!(outcomes, trial.outcomes);
        if weight <= 1 {
            assert!(!trial.any_failed());
        }
    }
}

#[test]
fn time_limit_without_incumbent_fails_the_trial() {
    let mut rng = StdRng::seed_from_u64(10);
    let config = SolverConfig::default().with_time_limit(Duration::ZERO);
    let err = steane_problem()
        .run_trial(1, &MicroLpSolver, &config, &mut rng)
        .unwrap_err();
    assert!(matches!(err, QecError::SolverTimeout { outcome: None }));
    assert!(!err.is_fatal());
}
