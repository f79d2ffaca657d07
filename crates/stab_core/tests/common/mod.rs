//! Shared code fixtures for stab_core integration tests.
//!
//! Provides the Steane code in the plain (CSS) layout, the five-qubit code
//! in the combined X/Z layout, and a brute-force inverse-syndrome map so
//! tests do not depend on hand-derived pure errors.

#![allow(dead_code)] // Not every test file uses every fixture

use stab_core::gf2::{BinaryMatrix, BitVector};
use stab_core::syndrome;

const HAMMING: [[u8; 7]; 3] = [
    [1, 0, 1, 0, 1, 0, 1],
    [0, 1, 1, 0, 0, 1, 1],
    [0, 0, 0, 1, 1, 1, 1],
];

/// Steane [[7,1,3]] stabilizers as `[H 0; 0 H]`, 14 bits wide.
pub fn steane_stabilizers() -> BinaryMatrix {
    let mut rows = Vec::new();
    for h in HAMMING {
        let mut row = h.to_vec();
        row.extend([0u8; 7]);
        rows.push(row);
    }
    for h in HAMMING {
        let mut row = vec![0u8; 7];
        row.extend(h);
        rows.push(row);
    }
    BinaryMatrix::from_rows(&rows).unwrap()
}

/// Steane logicals: all-ones on the first half, then on the second half.
pub fn steane_logicals() -> BinaryMatrix {
    let mut x = vec![1u8; 7];
    x.extend([0u8; 7]);
    let mut z = vec![0u8; 7];
    z.extend([1u8; 7]);
    BinaryMatrix::from_rows(&[x, z]).unwrap()
}

/// Five-qubit [[5,1,3]] stabilizers XZZXI and its cyclic shifts, X half first.
pub fn five_qubit_stabilizers() -> BinaryMatrix {
    BinaryMatrix::from_rows(&[
        [1u8, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        [0, 1, 0, 0, 1, 0, 0, 1, 1, 0],
        [1, 0, 1, 0, 0, 0, 0, 0, 1, 1],
        [0, 1, 0, 1, 0, 1, 0, 0, 0, 1],
    ])
    .unwrap()
}

/// Five-qubit logicals XXXXX and ZZZZZ.
pub fn five_qubit_logicals() -> BinaryMatrix {
    BinaryMatrix::from_rows(&[
        [1u8, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    ])
    .unwrap()
}

fn from_mask(mask: u32, len: usize) -> BitVector {
    (0..len).map(|i| mask >> i & 1 == 1).collect()
}

/// Builds an inverse-syndrome map by searching for one error per unit syndrome.
///
/// Column k of the result is the lowest-mask error whose syndrome is the k-th
/// unit vector, so the map is linear and reproduces every syndrome.
pub fn inverse_syndrome(stabilizers: &BinaryMatrix, combined: bool) -> BinaryMatrix {
    let n = stabilizers.width();
    let m = stabilizers.num_rows();
    let mut columns = Vec::with_capacity(m);
    for k in 0..m {
        let found = (1u32..1 << n)
            .map(|mask| from_mask(mask, n))
            .find(|e| {
                let s = syndrome(e, stabilizers, combined).unwrap();
                s.count_ones() == 1 && s[k]
            })
            .expect("every unit syndrome is reachable");
        columns.push(found);
    }
    let rows = (0..n)
        .map(|i| columns.iter().map(|c| c[i]).collect::<BitVector>())
        .collect();
    BinaryMatrix::new(m, rows).unwrap()
}

/// Vector with a single bit set.
pub fn unit(len: usize, pos: usize) -> BitVector {
    let mut v = stab_core::gf2::zeros(len);
    v.set(pos, true);
    v
}
