//! Conversions between timing-table indices and power-of-two sizes.

/// Returns `2^exponent`. The exponent must fit the `usize` bit width.
pub const fn exp2(exponent: u32) -> usize {
    assert!(exponent < usize::BITS);
    1usize << exponent
}

/// Returns the base-2 logarithm of a power of two.
pub const fn log2(power_of_two: usize) -> u32 {
    assert!(power_of_two.is_power_of_two());
    power_of_two.trailing_zeros()
}
