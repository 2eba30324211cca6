use thiserror::Error;

/**
    Errors from fixed-width hex parsing.

    Note: the silent-fallback policy of older HDCP tooling (unrecognized
    characters decoded as zero nibbles, inputs padded against a fixed
    15-character threshold) is deliberately not reproduced. Parsing here
    fails loudly, and padding is derived from the target width.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex digit {byte:?} at position {position}")]
    InvalidDigit { position: usize, byte: char },

    #[error("hex string has {len} digits, at most {max} fit the target width")]
    TooLong { len: usize, max: usize },
}

/**
    Errors from Master Key Matrix construction.

    The matrix *values* stay opaque; only the shape (1600 entries, 56 bits
    each) is checked.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("master key matrix needs exactly 1600 entries, got {count}")]
    WrongCount { count: usize },

    #[error("matrix entry {index} is {value:#x}, wider than 56 bits")]
    EntryTooWide { index: usize, value: u64 },

    #[error("matrix entry {index}: {source}")]
    Entry { index: usize, source: HexError },
}
