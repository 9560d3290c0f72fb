//! Scoped uninitialized slot for out-pointer style calls.
//!
//! Native runtime entry points often return their result by writing through
//! an out-pointer. [`with_uninitialized`] adapts such a call into an ordinary
//! value-returning one: the slot lives on the caller's stack, the body gets a
//! one-shot [`OutSlot`] handle to fill it, and the value is moved out once the
//! body returns.
//!
//! The body is trusted to write before it returns. Writing twice is rejected
//! at compile time because [`OutSlot::write`] consumes the handle; returning
//! without a write is a contract violation reported at run time, never a read
//! of uninitialized memory.

use std::mem::MaybeUninit;

use crate::errors::{contract_violation, messages};

/// One-shot handle to an uninitialized slot owned by [`with_uninitialized`].
///
/// ```compile_fail
/// let ((), _v) = rts_core::with_uninitialized::<u32, ()>(|out| {
///     out.write(1);
///     out.write(2);
/// });
/// ```
pub struct OutSlot<'a, T> {
    cell: &'a mut MaybeUninit<T>,
    written: &'a mut bool,
}

impl<'a, T> OutSlot<'a, T> {
    /// Stores `value` in the slot.
    pub fn write(self, value: T) {
        self.cell.write(value);
        *self.written = true;
    }

    /// Raw out-pointer for native code that fills the slot itself.
    ///
    /// Pair with [`OutSlot::assume_written`] once the callee has written.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.cell.as_mut_ptr()
    }

    /// Marks the slot as written after it was filled through
    /// [`OutSlot::as_mut_ptr`].
    ///
    /// # Safety
    ///
    /// A valid, initialized `T` must have been written through the pointer
    /// returned by [`OutSlot::as_mut_ptr`].
    pub unsafe fn assume_written(self) {
        *self.written = true;
    }
}

/// Stack cell plus the flag that tracks whether it holds a value. Dropping it
/// releases a written value exactly once, including during unwinding.
struct Slot<T> {
    cell: MaybeUninit<T>,
    written: bool,
}

impl<T> Slot<T> {
    fn take(&mut self) -> Option<T> {
        if !self.written {
            return None;
        }
        self.written = false;
        // SAFETY: `written` is only set once the cell holds a valid `T`.
        Some(unsafe { self.cell.assume_init_read() })
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        if self.written {
            // SAFETY: see `take`; the flag is cleared when the value moves out.
            unsafe { self.cell.assume_init_drop() }
        }
    }
}

/// Invokes `body` with an uninitialized slot suitable for a `T` and returns
/// the body's result together with the value it wrote.
#[track_caller]
pub fn with_uninitialized<T, R>(body: impl FnOnce(OutSlot<'_, T>) -> R) -> (R, T) {
    let mut slot = Slot {
        cell: MaybeUninit::uninit(),
        written: false,
    };
    let result = body(OutSlot {
        cell: &mut slot.cell,
        written: &mut slot.written,
    });
    match slot.take() {
        Some(value) => (result, value),
        None => contract_violation(messages::OUT_SLOT_NOT_WRITTEN),
    }
}

/// Invokes `body` with an uninitialized slot suitable for a `String`.
///
/// Primarily useful to call runtime functions that produce text through an
/// out-pointer.
#[track_caller]
pub fn with_uninitialized_string<R>(body: impl FnOnce(OutSlot<'_, String>) -> R) -> (R, String) {
    with_uninitialized(body)
}
