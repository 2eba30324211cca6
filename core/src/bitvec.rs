use core::fmt;
use core::str::FromStr;

use crate::error::HexError;

/**
    Fixed-width unsigned bit vector backed by a `u64`.

    `N` is the width in bits. It must be positive, a multiple of 4 and at
    most 64; violations are caught at compile time when the width is first
    used. Bit index 0 is the least-significant bit.

    The HDCP scheme uses three widths: 40 (KSV), 56 (device key and matrix
    entries) and 64 (accumulator-sized scratch values).
*/
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitVec<const N: u32> {
    value: u64,
}

impl<const N: u32> BitVec<N> {
    /**
        Mask with the low `N` bits set.
    */
    pub const MASK: u64 = {
        assert!(N > 0 && N <= 64 && N % 4 == 0, "invalid bit vector width");
        if N == 64 { u64::MAX } else { (1u64 << N) - 1 }
    };

    /**
        Number of hex digits needed to render the full width.
    */
    pub const DIGITS: usize = {
        assert!(N > 0 && N <= 64 && N % 4 == 0, "invalid bit vector width");
        (N / 4) as usize
    };

    /**
        Build from a raw value, truncating to the low `N` bits.
    */
    pub const fn new(value: u64) -> Self {
        Self {
            value: value & Self::MASK,
        }
    }

    /**
        Raw value. Bits at index `N` and above are always zero.
    */
    pub const fn value(self) -> u64 {
        self.value
    }

    /**
        Read bit `index` (0 = least significant).
    */
    pub const fn bit(self, index: u32) -> bool {
        assert!(index < N, "bit index out of range");
        (self.value >> index) & 1 == 1
    }

    /**
        Hamming weight.
    */
    pub const fn count_ones(self) -> u32 {
        self.value.count_ones()
    }

    /**
        Render as exactly `N/4` lowercase hex digits, most significant
        nibble first.
    */
    pub fn to_hex(self) -> String {
        format!("{:0width$x}", self.value, width = Self::DIGITS)
    }

    /**
        Parse a hex string into an `N`-bit vector.

        Accepts an optional `0x`/`0X` prefix and surrounding ASCII
        whitespace. Inputs shorter than `N/4` digits are left-zero-padded
        to the full width; longer inputs and non-hex characters are
        rejected. Digits are packed most-significant-first.
    */
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        let s = s.trim_ascii();
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let digits = s.as_bytes();
        if digits.len() > Self::DIGITS {
            return Err(HexError::TooLong {
                len: digits.len(),
                max: Self::DIGITS,
            });
        }

        let mut value = 0u64;
        for (position, &byte) in digits.iter().enumerate() {
            let nibble = hex_digit(byte).ok_or(HexError::InvalidDigit {
                position,
                byte: byte as char,
            })?;
            value = (value << 4) | u64::from(nibble);
        }

        Ok(Self { value })
    }
}

impl<const N: u32> fmt::Debug for BitVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVec<{N}>({})", self.to_hex())
    }
}

impl<const N: u32> fmt::Display for BitVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: u32> fmt::LowerHex for BitVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl<const N: u32> FromStr for BitVec<N> {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/**
    Decode a single ASCII hex digit to its 4-bit value.
    Returns `None` for non-hex characters.
*/
pub(crate) const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
