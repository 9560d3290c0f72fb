//! Bit-manipulation helpers.

use crate::errors::{contract_violation, messages};

/// Number of leading zero bits in the 64-bit two's-complement representation
/// of `value`, counted from the most significant bit.
///
/// Zero is defined: `count_leading_zeros(0) == 64`.
#[inline(always)]
pub fn count_leading_zeros(value: i64) -> i64 {
    (value as u64).leading_zeros() as i64
}

/// Native-width variant of [`count_leading_zeros`].
#[inline(always)]
pub fn count_leading_zeros_isize(value: isize) -> isize {
    (value as usize).leading_zeros() as isize
}

/// Returns if `x` is a power of 2.
#[inline]
pub fn is_power_of_two_unsigned(x: usize) -> bool {
    if x == 0 {
        return false;
    }
    // Wrapping subtraction: `x` is known to be non-zero here.
    x & x.wrapping_sub(1) == 0
}

/// Returns if `x` is a power of 2.
#[inline]
pub fn is_power_of_two_signed(x: isize) -> bool {
    if x <= 0 {
        return false;
    }
    // Wrapping subtraction: `x > 0` excludes both zero and `isize::MIN`.
    x & x.wrapping_sub(1) == 0
}

/// Returns `floor(log2(x))`, the index of the most significant set bit.
///
/// Only defined for positive `x`; anything else is a contract violation,
/// checked in every build profile.
///
/// ```
/// use rts_core::floor_log2;
///
/// assert_eq!(floor_log2(1), 0);
/// assert_eq!(floor_log2(2), 1);
/// assert_eq!(floor_log2(3), 1);
/// assert_eq!(floor_log2(9), 3);
/// assert_eq!(floor_log2(15), 3);
/// ```
#[inline]
#[track_caller]
pub fn floor_log2(x: i64) -> i64 {
    if x <= 0 {
        contract_violation(messages::FLOOR_LOG2_NON_POSITIVE);
    }
    // Cannot overflow: the leading-zero count of a positive value is 1..=63.
    63i64.wrapping_sub(count_leading_zeros(x))
}

/// Native-width variant of [`floor_log2`], with the same contract.
#[inline]
#[track_caller]
pub fn floor_log2_isize(x: isize) -> isize {
    if x <= 0 {
        contract_violation(messages::FLOOR_LOG2_NON_POSITIVE);
    }
    (isize::BITS as isize - 1).wrapping_sub(count_leading_zeros_isize(x))
}
