/**
    Width of a Key Selection Vector in bits.
*/
pub const KSV_BITS: u32 = 40;

/**
    Hamming weight of a valid KSV: exactly half of its 40 bits are set.
*/
pub const KSV_WEIGHT: u32 = 20;

/**
    Width of a device key entry (and of a Master Key Matrix entry) in bits.
*/
pub const KEY_BITS: u32 = 56;

/**
    Side length of the Master Key Matrix grid, and the number of entries
    in a derived device key.
*/
pub const MATRIX_DIM: usize = 40;

/**
    Total entry count of the Master Key Matrix (40 x 40, row-major).
*/
pub const MATRIX_ENTRIES: usize = MATRIX_DIM * MATRIX_DIM;
