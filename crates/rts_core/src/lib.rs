//! Core runtime-support primitives.
//!
//! This crate contains the pieces the standard library leans on internally:
//! - `bits` - Leading-zero count, power-of-two tests and floor-log2
//! - `out_slot` - Scoped uninitialized slot for out-pointer style calls
//! - `errors` - Contract-violation reporting and diagnostic messages

pub mod bits;
pub mod errors;
pub mod out_slot;

pub use bits::{
    count_leading_zeros, count_leading_zeros_isize, floor_log2, floor_log2_isize,
    is_power_of_two_signed, is_power_of_two_unsigned,
};
pub use errors::contract_violation;
pub use out_slot::{OutSlot, with_uninitialized, with_uninitialized_string};
