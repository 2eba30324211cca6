#![allow(clippy::doc_overindented_list_items)]

mod bitvec;
mod constants;
mod derive;
mod error;
mod keyset;
mod ksv;
mod matrix;

pub use self::bitvec::BitVec;
pub use self::constants::{KEY_BITS, KSV_BITS, KSV_WEIGHT, MATRIX_DIM, MATRIX_ENTRIES};
pub use self::derive::{DeviceKey, derive_sink, derive_source, shared_secret};
pub use self::error::{HexError, MatrixError};
pub use self::keyset::DeviceKeySet;
pub use self::ksv::Ksv;
pub use self::matrix::MasterMatrix;
