use core::fmt;

use crate::bitvec::BitVec;
use crate::constants::{KEY_BITS, MATRIX_DIM, MATRIX_ENTRIES};
use crate::error::MatrixError;

/**
    The Master Key Matrix: 1600 secret 56-bit values, logically a 40x40
    grid stored row-major (`index = row * 40 + column`).

    The matrix is supplied by the caller and never mutated; every
    [`DeviceKeySet`](crate::DeviceKeySet) borrows one, so a single matrix
    serves any number of derivations. Only the shape is checked here —
    where the values come from and whether they are authentic is the
    caller's problem.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct MasterMatrix {
    entries: Box<[BitVec<{ KEY_BITS }>; MATRIX_ENTRIES]>,
}

impl MasterMatrix {
    /**
        Build from exactly 1600 raw values, row-major. Values must fit in
        56 bits.
    */
    pub fn from_entries(entries: impl IntoIterator<Item = u64>) -> Result<Self, MatrixError> {
        let mut checked = Vec::with_capacity(MATRIX_ENTRIES);
        for (index, value) in entries.into_iter().enumerate() {
            if value > BitVec::<{ KEY_BITS }>::MASK {
                return Err(MatrixError::EntryTooWide { index, value });
            }
            checked.push(BitVec::new(value));
        }
        Self::from_vec(checked)
    }

    /**
        Matrix with every entry equal to `value`. Synthetic input for
        tests and known-answer vectors.
    */
    pub fn splat(value: u64) -> Result<Self, MatrixError> {
        Self::from_entries(core::iter::repeat_n(value, MATRIX_ENTRIES))
    }

    /**
        Parse 1600 whitespace-separated hex values (at most 14 digits
        each). This is the on-disk shape the CLI loads — the engine itself
        carries no built-in matrix.
    */
    pub fn from_hex_text(text: &str) -> Result<Self, MatrixError> {
        let mut entries = Vec::with_capacity(MATRIX_ENTRIES);
        for (index, token) in text.split_ascii_whitespace().enumerate() {
            let entry = BitVec::from_hex(token)
                .map_err(|source| MatrixError::Entry { index, source })?;
            entries.push(entry);
        }
        Self::from_vec(entries)
    }

    fn from_vec(entries: Vec<BitVec<{ KEY_BITS }>>) -> Result<Self, MatrixError> {
        let count = entries.len();
        let entries: Box<[BitVec<{ KEY_BITS }>; MATRIX_ENTRIES]> = entries
            .into_boxed_slice()
            .try_into()
            .map_err(|_| MatrixError::WrongCount { count })?;
        Ok(Self { entries })
    }

    /**
        Entry at a row-major linear index in `0..1600`.
    */
    pub fn at(&self, linear: usize) -> BitVec<{ KEY_BITS }> {
        self.entries[linear]
    }

    /**
        Entry at `(row, column)`, each in `0..40`.
    */
    pub fn entry(&self, row: usize, column: usize) -> BitVec<{ KEY_BITS }> {
        assert!(
            row < MATRIX_DIM && column < MATRIX_DIM,
            "matrix position out of range"
        );
        self.entries[row * MATRIX_DIM + column]
    }

    /**
        All 1600 entries, row-major.
    */
    pub fn entries(&self) -> &[BitVec<{ KEY_BITS }>; MATRIX_ENTRIES] {
        &self.entries
    }
}

impl fmt::Debug for MasterMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1600 hex values are noise in debug output.
        write!(f, "MasterMatrix({MATRIX_DIM}x{MATRIX_DIM})")
    }
}
