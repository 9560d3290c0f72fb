//! The host runtime boundary.

use std::any::{Any, TypeId};

use rts_core::OutSlot;

use crate::capability::{Capability, CapabilityView};

/// Type identity handed to the host runtime when asking for a name.
///
/// `rust_name` is only known when the type was static at the call site; a
/// type-erased value carries its dynamic `TypeId` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub id: TypeId,
    pub rust_name: Option<&'static str>,
}

impl TypeDescriptor {
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            rust_name: Some(std::any::type_name::<T>()),
        }
    }

    pub fn erased(id: TypeId) -> Self {
        Self { id, rust_name: None }
    }

    pub fn display_name(&self) -> &'static str {
        self.rust_name.unwrap_or("dyn Any")
    }
}

/// A value the reflection facade can query.
///
/// Concrete types answer with their static type. `dyn Any` answers with the
/// dynamic type behind the reference, so `&*boxed` on a `Box<dyn Any>` is
/// looked up as the boxed value; `&boxed` is looked up as the box itself.
pub trait Reflectable {
    fn as_any(&self) -> &dyn Any;
    fn type_descriptor(&self) -> TypeDescriptor;
}

impl<T: Any> Reflectable for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::of::<T>()
    }
}

macro_rules! impl_reflectable_for_dyn_any {
    ($($ty:ty),*) => {$(
        impl Reflectable for $ty {
            fn as_any(&self) -> &dyn Any {
                self
            }

            fn type_descriptor(&self) -> TypeDescriptor {
                TypeDescriptor::erased(self.as_any().type_id())
            }
        }
    )*};
}

impl_reflectable_for_dyn_any!(dyn Any, dyn Any + Send, dyn Any + Send + Sync);

/// Capability queries, casts and naming provided by a host runtime.
///
/// Naming entry points follow the native out-pointer convention: they must
/// write exactly one `String` into `out` before returning.
pub trait RuntimeBridge {
    /// Whether `value` satisfies `capability`. Must not panic.
    fn conforms_to(&self, value: &dyn Any, capability: Capability) -> bool;

    /// Views `value` through `capability`, or `None` if it does not conform.
    fn cast<'v>(&self, value: &'v dyn Any, capability: Capability) -> Option<CapabilityView<'v>>;

    /// Writes the mangled name of `ty`.
    fn type_name(&self, ty: TypeDescriptor, out: OutSlot<'_, String>);

    /// Writes the human-readable form of `mangled`. Names the runtime cannot
    /// parse are written back unchanged.
    fn demangle_name(&self, mangled: &[u8], out: OutSlot<'_, String>);
}
