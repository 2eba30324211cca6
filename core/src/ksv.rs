use core::fmt;
use core::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::bitvec::BitVec;
use crate::constants::{KSV_BITS, KSV_WEIGHT};
use crate::error::HexError;

/**
    Key Selection Vector: the public 40-bit device identifier of HDCP 1.x.

    A KSV is *valid* when exactly 20 of its 40 bits are set. Construction
    does not enforce this — the derivation engine accepts any 40-bit value —
    so callers gate on [`Ksv::is_valid`] before treating a KSV as
    cryptographically meaningful. `Display` renders the 10-digit lowercase
    hex form.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ksv(BitVec<{ KSV_BITS }>);

impl Ksv {
    /**
        Build from a raw value, truncating to 40 bits.
    */
    pub const fn new(value: u64) -> Self {
        Self(BitVec::new(value))
    }

    /**
        Raw 40-bit value.
    */
    pub const fn value(self) -> u64 {
        self.0.value()
    }

    /**
        Read bit `index` (0 = least significant).
    */
    pub const fn bit(self, index: u32) -> bool {
        self.0.bit(index)
    }

    /**
        Hamming weight.
    */
    pub const fn count_ones(self) -> u32 {
        self.0.count_ones()
    }

    /**
        `true` iff the Hamming weight is exactly 20.

        Positive polarity by construction: `is_valid` answers "is this a
        well-formed KSV", nothing else.
    */
    pub const fn is_valid(self) -> bool {
        self.count_ones() == KSV_WEIGHT
    }

    /**
        10-digit lowercase hex rendering.
    */
    pub fn to_hex(self) -> String {
        self.0.to_hex()
    }

    /**
        Strict hex parsing; see [`BitVec::from_hex`].
    */
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        BitVec::from_hex(s).map(Self)
    }

    /**
        Generate a uniformly random valid KSV.

        Takes the canonical weight-20 pattern (low 20 bits set) and applies
        a uniformly random permutation to the 40 bit positions, so the
        result always has Hamming weight 20 and every weight-20 pattern is
        equally likely.
    */
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /**
        [`Ksv::random`] with an injectable RNG, for deterministic tests.
    */
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut positions: [u32; KSV_BITS as usize] = core::array::from_fn(|i| i as u32);
        positions.shuffle(rng);

        let mut value = 0u64;
        for &bit in positions.iter().take(KSV_WEIGHT as usize) {
            value |= 1 << bit;
        }
        Self::new(value)
    }
}

impl fmt::Display for Ksv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Ksv {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<BitVec<{ KSV_BITS }>> for Ksv {
    fn from(bits: BitVec<{ KSV_BITS }>) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_matches_popcount() {
        for (value, weight) in [
            (0x00000fffffu64, 20u32),
            (0x00000aaaa0, 9),
            (0, 0),
            (0xff_ffff_ffff, 40),
            (0x55_5555_5555, 20),
            (0x00000ffffe, 19),
            (0x00001fffff, 21),
        ] {
            let ksv = Ksv::new(value);
            assert_eq!(ksv.count_ones(), weight);
            assert_eq!(ksv.is_valid(), weight == 20, "value {value:#x}");
        }
    }

    #[test]
    fn random_is_always_valid() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let ksv = Ksv::random_with(&mut rng);
            assert_eq!(ksv.count_ones(), 20, "ksv {ksv}");
        }
    }

    #[test]
    fn random_varies() {
        // 2^40-space collisions across 100 draws would point at a broken
        // permutation, not bad luck.
        let mut rng = rand::rng();
        let first = Ksv::random_with(&mut rng);
        assert!((0..100).any(|_| Ksv::random_with(&mut rng) != first));
    }

    #[test]
    fn parse_and_render() {
        let ksv: Ksv = "00000fffff".parse().unwrap();
        assert_eq!(ksv.value(), 0xfffff);
        assert!(ksv.is_valid());
        assert_eq!(ksv.to_hex(), "00000fffff");
        assert_eq!(format!("{ksv}"), "00000fffff");
    }

    #[test]
    fn parse_short_and_prefixed() {
        assert_eq!(Ksv::from_hex("fffff").unwrap().value(), 0xfffff);
        assert_eq!(Ksv::from_hex("0xFFFFF").unwrap().value(), 0xfffff);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Ksv::from_hex("00000ffffff").is_err());
        assert!(Ksv::from_hex("0000-fffff").is_err());
    }

    #[test]
    fn bit_order_is_lsb_first() {
        let ksv = Ksv::new(0x1);
        assert!(ksv.bit(0));
        assert!(!ksv.bit(39));
        let ksv = Ksv::new(1 << 39);
        assert!(ksv.bit(39));
    }
}
