//! Vector and matrix arithmetic over GF(2).
//!
//! Binary vectors are packed into u64 words with `bitvec`. Addition is XOR,
//! weight is population count, and every operation checks operand shapes
//! before touching data. Combined (non-CSS) vectors hold the X components in
//! the first half and the Z components in the second half; `swap_halves`
//! exchanges them.

use crate::QecError;
use bitvec::prelude::*;

/// Owned packed binary vector.
pub type BitVector = BitVec<u64, Lsb0>;

/// Borrowed view of a packed binary vector.
pub type Bits = BitSlice<u64, Lsb0>;

/// Builds a packed vector from 0/1 values. Only the low bit of each entry is used.
pub fn bits(values: &[u8]) -> BitVector {
    values.iter().map(|&b| b & 1 == 1).collect()
}

/// Returns the all-zero vector of the given length.
pub fn zeros(len: usize) -> BitVector {
    BitVector::repeat(false, len)
}

/// Hamming weight.
pub fn weight(v: &Bits) -> usize {
    v.count_ones()
}

/// Renders a vector as a string of '0' and '1' characters.
pub fn format_bits(v: &Bits) -> String {
    v.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

fn ensure_len(op: &str, expected: usize, actual: usize) -> Result<(), QecError> {
    if expected == actual {
        Ok(())
    } else {
        Err(QecError::Dimension(format!(
            "{op}: expected length {expected}, got {actual}"
        )))
    }
}

/// Toggles every bit of `acc` that is set in `v`. Lengths must already match.
pub(crate) fn xor_into(acc: &mut Bits, v: &Bits) {
    *acc ^= v;
}

/// Elementwise XOR of two vectors of equal length.
pub fn add_mod2(u: &Bits, v: &Bits) -> Result<BitVector, QecError> {
    ensure_len("add_mod2", u.len(), v.len())?;
    let mut out = u.to_bitvec();
    xor_into(&mut out, v);
    Ok(out)
}

/// GF(2) inner product: parity of the positions set in both vectors.
pub fn dot_mod2(u: &Bits, v: &Bits) -> Result<bool, QecError> {
    ensure_len("dot_mod2", u.len(), v.len())?;
    let mut overlap = u.to_bitvec();
    *overlap.as_mut_bitslice() &= v;
    Ok(overlap.count_ones() % 2 == 1)
}

/// Exchanges the first and second halves of an even-length vector.
///
/// Used only for combined X/Z representations. Odd lengths have no
/// well-defined halves and are rejected.
pub fn swap_halves(v: &Bits) -> Result<BitVector, QecError> {
    if v.len() % 2 != 0 {
        return Err(QecError::Dimension(format!(
            "swap_halves: length {} is odd",
            v.len()
        )));
    }
    let (first, second) = v.split_at(v.len() / 2);
    let mut out = BitVector::with_capacity(v.len());
    out.extend_from_bitslice(second);
    out.extend_from_bitslice(first);
    Ok(out)
}

/// Computes `(M · v) mod 2`, one output bit per matrix row.
pub fn matvec_mod2(m: &BinaryMatrix, v: &Bits) -> Result<BitVector, QecError> {
    ensure_len("matvec_mod2", m.width(), v.len())?;
    m.rows()
        .iter()
        .map(|row| dot_mod2(row, v))
        .collect::<Result<BitVector, QecError>>()
}

/// Row-major binary matrix with a fixed row width.
///
/// Holds stabilizer generators, logical operators, or the inverse-syndrome
/// map. Rows need not be linearly independent. The matrix is never mutated
/// once built; derived matrices (stacked, row removed) are new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    width: usize,
    rows: Vec<BitVector>,
}

impl BinaryMatrix {
    /// Builds a matrix from packed rows, all of which must have `width` bits.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns
    /// * `rows` - Row vectors in order
    ///
    /// # Returns
    ///
    /// The matrix, or a dimension error naming the first row of the wrong width.
    pub fn new(width: usize, rows: Vec<BitVector>) -> Result<Self, QecError> {
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(QecError::Dimension(format!(
                "row {idx} has width {}, expected {width}",
                row.len()
            )));
        }
        Ok(Self { width, rows })
    }

    /// Builds a matrix from rows of 0/1 values, taking the width from the first row.
    ///
    /// An empty slice yields a matrix with no rows and width zero; use
    /// [`BinaryMatrix::empty`] when the width matters.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, QecError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        Self::new(width, rows.iter().map(|r| bits(r.as_ref())).collect())
    }

    /// Matrix with no rows and the given width.
    pub fn empty(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[BitVector] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Bits> {
        self.rows.get(idx).map(|r| r.as_bitslice())
    }

    /// Number of rows with a 1 in the given column.
    pub fn column_weight(&self, col: usize) -> usize {
        self.rows.iter().filter(|r| r[col]).count()
    }

    /// Returns `self` with the rows of `other` appended below it.
    pub fn stacked(&self, other: &BinaryMatrix) -> Result<Self, QecError> {
        ensure_len("stacked", self.width, other.width)?;
        let mut rows = Vec::with_capacity(self.rows.len() + other.rows.len());
        rows.extend(self.rows.iter().cloned());
        rows.extend(other.rows.iter().cloned());
        Ok(Self {
            width: self.width,
            rows,
        })
    }

    /// Returns a copy with row `idx` removed.
    pub fn without_row(&self, idx: usize) -> Result<Self, QecError> {
        if idx >= self.rows.len() {
            return Err(QecError::Dimension(format!(
                "row {idx} out of range for {} rows",
                self.rows.len()
            )));
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, r)| r.clone())
            .collect();
        Ok(Self {
            width: self.width,
            rows,
        })
    }

    /// XOR of the rows whose bit is set in `selection`, added to `offset`.
    pub fn combine(&self, offset: &Bits, selection: &Bits) -> Result<BitVector, QecError> {
        ensure_len("combine offset", self.width, offset.len())?;
        ensure_len("combine selection", self.rows.len(), selection.len())?;
        let mut out = offset.to_bitvec();
        for j in selection.iter_ones() {
            xor_into(&mut out, &self.rows[j]);
        }
        Ok(out)
    }
}
