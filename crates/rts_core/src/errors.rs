//! Contract-violation reporting and common diagnostic messages.

pub mod messages {
    pub const FLOOR_LOG2_NON_POSITIVE: &str = "floor_log2 operates only on positive integers";
    pub const OUT_SLOT_NOT_WRITTEN: &str = "out slot was not written before the body returned";
    pub const CAST_FAILED: &str = "value does not conform to capability";
    pub const DUPLICATE_CONFORMANCE: &str = "conformance already registered";
    pub const CONFLICTING_TYPE_NAME: &str = "conflicting type name registration";
}

/// Reports a violated precondition and unwinds.
///
/// Contract violations are programming errors: they are never turned into a
/// sentinel result. The panic message always starts with
/// `contract violation: ` followed by the violated precondition.
#[cold]
#[track_caller]
pub fn contract_violation(message: &str) -> ! {
    panic!("contract violation: {message}")
}
