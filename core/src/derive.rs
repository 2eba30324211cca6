use core::fmt;
use core::ops::Index;

use crate::bitvec::BitVec;
use crate::constants::{KEY_BITS, KSV_BITS, MATRIX_DIM};
use crate::ksv::Ksv;
use crate::matrix::MasterMatrix;

/**
    A derived device key: 40 ordered 56-bit values, computed once from a
    KSV and the Master Key Matrix and immutable afterwards.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceKey {
    entries: [BitVec<{ KEY_BITS }>; MATRIX_DIM],
}

impl DeviceKey {
    /**
        All 40 entries in derivation order.
    */
    pub fn entries(&self) -> &[BitVec<{ KEY_BITS }>; MATRIX_DIM] {
        &self.entries
    }

    pub fn iter(&self) -> core::slice::Iter<'_, BitVec<{ KEY_BITS }>> {
        self.entries.iter()
    }
}

impl Index<usize> for DeviceKey {
    type Output = BitVec<{ KEY_BITS }>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a DeviceKey {
    type Item = &'a BitVec<{ KEY_BITS }>;
    type IntoIter = core::slice::Iter<'a, BitVec<{ KEY_BITS }>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Debug for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.to_hex()))
            .finish()
    }
}

/**
    Derive the *source* device key.

    Output slot `i` is the sum of the matrix entries at `z * 40 + i` over
    every set KSV bit `z` — one matrix *column* per slot, weighted by the
    KSV — reduced mod 2^56. Total for any 40-bit input: an invalid KSV
    still produces a well-defined (if cryptographically meaningless) key.
*/
pub fn derive_source(ksv: Ksv, matrix: &MasterMatrix) -> DeviceKey {
    derive(ksv, matrix, |i, z| z * MATRIX_DIM + i)
}

/**
    Derive the *sink* device key.

    Same accumulation as [`derive_source`] but indexed `i * 40 + z`,
    selecting matrix *rows* instead of columns. The row/column asymmetry
    is what makes paired source/sink keys converge on a shared secret.
*/
pub fn derive_sink(ksv: Ksv, matrix: &MasterMatrix) -> DeviceKey {
    derive(ksv, matrix, |i, z| i * MATRIX_DIM + z)
}

fn derive(ksv: Ksv, matrix: &MasterMatrix, linear: impl Fn(usize, usize) -> usize) -> DeviceKey {
    let entries = core::array::from_fn(|i| {
        // 40 terms below 2^56 each; the sum stays well under 2^64.
        let mut sum = 0u64;
        for z in 0..KSV_BITS {
            if ksv.bit(z) {
                sum += matrix.at(linear(i, z as usize)).value();
            }
        }
        BitVec::new(sum)
    });
    DeviceKey { entries }
}

/**
    Combine a device key with the *peer's* KSV: the sum of key entries at
    the peer's set bit positions, mod 2^56.

    For source key A and sink key B derived from KSVs `a` and `b` over the
    same matrix, `shared_secret(A, b) == shared_secret(B, a)` — the
    shared-secret property HDCP authentication rests on.
*/
pub fn shared_secret(key: &DeviceKey, peer_ksv: Ksv) -> BitVec<{ KEY_BITS }> {
    let mut sum = 0u64;
    for z in 0..KSV_BITS {
        if peer_ksv.bit(z) {
            sum += key[z as usize].value();
        }
    }
    BitVec::new(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW_20: Ksv = Ksv::new(0x00000fffff);

    #[test]
    fn unit_matrix_sums_to_weight() {
        let matrix = MasterMatrix::splat(1).unwrap();
        let source = derive_source(LOW_20, &matrix);
        let sink = derive_sink(LOW_20, &matrix);
        assert!(source.iter().all(|e| e.value() == 20));
        assert!(sink.iter().all(|e| e.value() == 20));
    }

    #[test]
    fn truncation_to_56_bits() {
        let matrix = MasterMatrix::splat(0xff_ffff_ffff_ffff).unwrap();
        let expected = (20u64 * 0xff_ffff_ffff_ffff) % (1 << 56);
        let source = derive_source(LOW_20, &matrix);
        assert!(source.iter().all(|e| e.value() == expected));
        let sink = derive_sink(LOW_20, &matrix);
        assert!(sink.iter().all(|e| e.value() == expected));
    }

    #[test]
    fn derivation_is_deterministic() {
        let matrix = MasterMatrix::from_entries(
            (0..1600).map(|i| (i as u64).wrapping_mul(0x9e3779b97f4a7c15) >> 8),
        )
        .unwrap();
        let ksv = Ksv::new(0x35a4_e39f_01);
        assert_eq!(derive_source(ksv, &matrix), derive_source(ksv, &matrix));
        assert_eq!(derive_sink(ksv, &matrix), derive_sink(ksv, &matrix));
    }

    #[test]
    fn source_and_sink_differ_on_asymmetric_matrix() {
        // Row-dependent entries make row sums differ from column sums.
        let matrix = MasterMatrix::from_entries((0..1600).map(|i| (i / 40) as u64)).unwrap();
        assert_ne!(derive_source(LOW_20, &matrix), derive_sink(LOW_20, &matrix));
    }

    #[test]
    fn column_and_row_indexing() {
        // Single set KSV bit z: source slot i must read matrix[z][i],
        // sink slot i must read matrix[i][z].
        let matrix = MasterMatrix::from_entries((0..1600).map(|i| i as u64)).unwrap();
        let ksv = Ksv::new(1 << 3);
        let source = derive_source(ksv, &matrix);
        let sink = derive_sink(ksv, &matrix);
        for i in 0..40 {
            assert_eq!(source[i], matrix.entry(3, i));
            assert_eq!(sink[i], matrix.entry(i, 3));
        }
    }

    #[test]
    fn invalid_ksv_is_still_accepted() {
        let matrix = MasterMatrix::splat(1).unwrap();
        let ksv = Ksv::new(0b111);
        assert!(!ksv.is_valid());
        let key = derive_source(ksv, &matrix);
        assert!(key.iter().all(|e| e.value() == 3));
    }

    #[test]
    fn shared_secret_converges() {
        let matrix = MasterMatrix::from_entries(
            (0..1600).map(|i| (i as u64).wrapping_mul(0x2545f4914f6cdd1d) & 0xff_ffff_ffff_ffff),
        )
        .unwrap();
        let mut rng = rand::rng();
        for _ in 0..20 {
            let a = Ksv::random_with(&mut rng);
            let b = Ksv::random_with(&mut rng);
            let source_a = derive_source(a, &matrix);
            let sink_b = derive_sink(b, &matrix);
            assert_eq!(shared_secret(&source_a, b), shared_secret(&sink_b, a));
        }
    }
}
