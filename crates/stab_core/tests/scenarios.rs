//! End-to-end decoding scenarios on small codes.

mod common;

use stab_common::{CodeConfig, DecodingModel, ErrorModel, SolverConfig};
use stab_core::decoder::{DecodeOptions, ObjectiveModel, decode};
use stab_core::gf2::{BinaryMatrix, add_mod2, bits, swap_halves};
use stab_core::{MicroLpSolver, QecError, check_failure, syndrome};

#[test]
fn repetition_single_bit_error_decodes_to_weight_one() {
    let stabs = BinaryMatrix::from_rows(&[[1u8, 1, 0], [0, 1, 1]]).unwrap();
    let error = bits(&[0, 1, 0]);
    let out = decode(
        &MicroLpSolver,
        &stabs,
        &error,
        &DecodeOptions::linear(),
        &SolverConfig::default(),
    )
    .unwrap();

    assert_eq!(out.weight(), 1);
    // The correction differs from the target by the selected stabilizer rows.
    let offset = add_mod2(&out.correction, &error).unwrap();
    assert_eq!(stabs.combine(&offset, &out.selection).unwrap(), bits(&[0, 0, 0]));
}

#[test]
fn stabilizer_cosets_keep_the_syndrome_trivial() {
    // Round-trip law: decoding an error against self-orthogonal stabilizers
    // lands in the same syndrome class.
    let stabs = common::steane_stabilizers();
    for pos in 0..14 {
        for other in [(pos + 3) % 14, (pos + 8) % 14] {
            let mut error = common::unit(14, pos);
            error.set(other, true);
            let out = decode(
                &MicroLpSolver,
                &stabs,
                &error,
                &DecodeOptions::linear(),
                &SolverConfig::default(),
            )
            .unwrap();
            let net = add_mod2(&out.correction, &error).unwrap();
            assert!(!syndrome(&net, &stabs, false).unwrap().any());
        }
    }

    let stabs = common::five_qubit_stabilizers();
    let error = bits(&[1, 0, 0, 0, 1, 0, 1, 0, 0, 0]);
    let out = decode(
        &MicroLpSolver,
        &stabs,
        &error,
        &DecodeOptions::linear(),
        &SolverConfig::default(),
    )
    .unwrap();
    let net = add_mod2(&out.correction, &error).unwrap();
    assert!(!syndrome(&net, &stabs, true).unwrap().any());
}

#[test]
fn combined_syndrome_distinguishes_swapped_errors() {
    let stabs = common::five_qubit_stabilizers();
    let error = bits(&[1, 1, 0, 0, 0, 0, 0, 1, 0, 0]);
    let swapped = swap_halves(&error).unwrap();
    assert_ne!(
        syndrome(&error, &stabs, true).unwrap(),
        syndrome(&swapped, &stabs, true).unwrap()
    );
}

#[test]
fn zero_generator_with_forbidden_target_is_infeasible() {
    let generator = BinaryMatrix::from_rows(&[[0u8, 0, 0, 0, 0, 0]]).unwrap();
    let options = DecodeOptions::for_code(&CodeConfig::combined(
        ErrorModel::XOnly,
        DecodingModel::XOnly,
    ));
    let result = decode(
        &MicroLpSolver,
        &generator,
        &bits(&[0, 0, 0, 0, 1, 0]),
        &options,
        &SolverConfig::default(),
    );
    assert!(matches!(result, Err(QecError::ModelInfeasible(_))));

    let options = DecodeOptions::for_code(&CodeConfig::combined(
        ErrorModel::ZOnly,
        DecodingModel::ZOnly,
    ));
    let result = decode(
        &MicroLpSolver,
        &generator,
        &bits(&[0, 1, 0, 0, 0, 0]),
        &options,
        &SolverConfig::default(),
    );
    assert!(matches!(result, Err(QecError::ModelInfeasible(_))));
}

#[test]
fn depolarizing_decode_of_five_qubit_errors_is_exact() {
    let stabs = common::five_qubit_stabilizers();
    let logicals = common::five_qubit_logicals();
    let generator = stabs.stacked(&logicals).unwrap();
    let options = DecodeOptions {
        objective: ObjectiveModel::Depolarizing,
        forbidden_half: None,
    };

    for q in 0..5 {
        for (x, z) in [(true, false), (true, true), (false, true)] {
            let mut error = stab_core::gf2::zeros(10);
            error.set(q, x);
            error.set(q + 5, z);
            let out = decode(
                &MicroLpSolver,
                &generator,
                &error,
                &options,
                &SolverConfig::default(),
            )
            .unwrap();
            assert_eq!(out.correction, error);
            assert!((out.diagnostics.objective_value - 1.0).abs() < 1e-6);

            let outcomes =
                check_failure(&error, &out.correction, &stabs, &logicals, true, &[0, 1]).unwrap();
            assert!(outcomes.iter().all(|o| !o.failed));
        }
    }
}
