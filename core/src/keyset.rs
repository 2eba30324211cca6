use crate::derive::{DeviceKey, derive_sink, derive_source};
use crate::ksv::Ksv;
use crate::matrix::MasterMatrix;

/**
    A KSV together with both device keys derived from it.

    The keys are computed exactly once, at construction, and the set is
    read-only afterwards. The matrix is borrowed — it must outlive the
    set, and one matrix instance can back any number of sets (derivation
    never mutates it, so concurrent construction against a shared matrix
    is safe).
*/
#[derive(Debug, Clone)]
pub struct DeviceKeySet<'a> {
    matrix: &'a MasterMatrix,
    ksv: Ksv,
    source: DeviceKey,
    sink: DeviceKey,
}

impl<'a> DeviceKeySet<'a> {
    /**
        Derive both device keys for `ksv` against `matrix`.

        Any 40-bit KSV is accepted; check [`Ksv::is_valid`] first when a
        meaningful key is required.
    */
    pub fn new(matrix: &'a MasterMatrix, ksv: Ksv) -> Self {
        Self {
            matrix,
            ksv,
            source: derive_source(ksv, matrix),
            sink: derive_sink(ksv, matrix),
        }
    }

    pub fn ksv(&self) -> Ksv {
        self.ksv
    }

    pub fn source(&self) -> &DeviceKey {
        &self.source
    }

    pub fn sink(&self) -> &DeviceKey {
        &self.sink
    }

    pub fn matrix(&self) -> &'a MasterMatrix {
        self.matrix
    }
}
