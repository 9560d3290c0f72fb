//! Capability descriptors and the views produced by a successful cast.

use std::any::{Any, TypeId};
use std::fmt;

/// Opaque identifier the host runtime assigns to a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityId(pub u32);

/// A named contract a value may or may not satisfy at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: &'static str,
}

impl Capability {
    pub const fn new(id: u32, name: &'static str) -> Self {
        Self {
            id: CapabilityId(id),
            name,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime-provided table describing how a concrete type satisfies a
/// capability. The facade never looks inside it.
pub type Witness = &'static (dyn Any + Send + Sync);

/// A value seen through a capability: the borrowed value, the capability and
/// the witness table the runtime resolved for it.
#[derive(Clone, Copy)]
pub struct CapabilityView<'v> {
    value: &'v dyn Any,
    capability: Capability,
    witness: Witness,
}

impl<'v> CapabilityView<'v> {
    pub fn new(value: &'v dyn Any, capability: Capability, witness: Witness) -> Self {
        Self {
            value,
            capability,
            witness,
        }
    }

    pub fn value(&self) -> &'v dyn Any {
        self.value
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn value_type_id(&self) -> TypeId {
        self.value.type_id()
    }

    /// Downcasts the witness table to the concrete type the host stored.
    pub fn witness<W: Any>(&self) -> Option<&'static W> {
        let witness: Witness = self.witness;
        witness.downcast_ref::<W>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&'v T> {
        self.value.downcast_ref::<T>()
    }
}

impl PartialEq for CapabilityView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.capability == other.capability
            && std::ptr::addr_eq(self.value as *const dyn Any, other.value as *const dyn Any)
            && std::ptr::addr_eq(
                self.witness as *const (dyn Any + Send + Sync),
                other.witness as *const (dyn Any + Send + Sync),
            )
    }
}

impl Eq for CapabilityView<'_> {}

impl fmt::Debug for CapabilityView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityView")
            .field("capability", &self.capability)
            .field("value_type", &self.value_type_id())
            .finish()
    }
}
