//! In-process host runtime backed by explicit registrations.
//!
//! Conformances and type names are recorded up front; queries are plain
//! table lookups keyed by `TypeId`. Unregistered types report their Rust
//! type name, and unknown mangled names are passed through unchanged.

use std::any::{Any, TypeId};

use ahash::RandomState;
use hashbrown::HashMap;
use rts_core::OutSlot;
use rts_core::errors::messages;
use smallvec::SmallVec;

use crate::bridge::{RuntimeBridge, TypeDescriptor};
use crate::capability::{Capability, CapabilityView, Witness};

type FastHashMap<K, V> = HashMap<K, V, RandomState>;

fn fast_map_new<K, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(RandomState::with_seeds(0, 0, 0, 0))
}

#[derive(Clone, Copy)]
struct Conformance {
    capability: Capability,
    witness: Witness,
}

/// Readable name a mangled name demangles to, and the type that owns it.
struct DemangledEntry {
    owner: TypeId,
    readable: String,
}

/// Host runtime answering from conformance and type-name tables.
pub struct RegistryBridge {
    conformances: FastHashMap<TypeId, SmallVec<[Conformance; 4]>>,
    type_names: FastHashMap<TypeId, String>,
    demangled: FastHashMap<String, DemangledEntry>,
    // Rust names of every registered type, for values queried type-erased.
    rust_names: FastHashMap<TypeId, &'static str>,
}

impl RegistryBridge {
    pub fn new() -> Self {
        Self {
            conformances: fast_map_new(),
            type_names: fast_map_new(),
            demangled: fast_map_new(),
            rust_names: fast_map_new(),
        }
    }

    /// Records that `T` satisfies `capability` through `witness`.
    pub fn register_conformance<T: Any>(
        &mut self,
        capability: Capability,
        witness: Witness,
    ) -> Result<(), String> {
        let entries = self.conformances.entry(TypeId::of::<T>()).or_default();
        if entries.iter().any(|c| c.capability.id == capability.id) {
            return Err(format!(
                "{}: {} as {}",
                messages::DUPLICATE_CONFORMANCE,
                std::any::type_name::<T>(),
                capability
            ));
        }
        entries.push(Conformance { capability, witness });
        self.remember_rust_name::<T>();
        Ok(())
    }

    /// Records `T`'s mangled name and the readable name it demangles to.
    ///
    /// A mangled name belongs to exactly one type. Registering the same
    /// `(T, mangled, readable)` again is a no-op; giving `T` another mangled
    /// name, or `mangled` another type or readable name, is an error.
    pub fn register_type_name<T: Any>(&mut self, mangled: &str, readable: &str) -> Result<(), String> {
        let id = TypeId::of::<T>();
        let conflict = self.type_names.get(&id).is_some_and(|m| m != mangled)
            || self
                .demangled
                .get(mangled)
                .is_some_and(|e| e.owner != id || e.readable != readable);
        if conflict {
            return Err(format!(
                "{}: {} as {mangled}",
                messages::CONFLICTING_TYPE_NAME,
                std::any::type_name::<T>()
            ));
        }
        self.type_names.insert(id, mangled.to_string());
        self.demangled.insert(
            mangled.to_string(),
            DemangledEntry {
                owner: id,
                readable: readable.to_string(),
            },
        );
        self.remember_rust_name::<T>();
        Ok(())
    }

    fn remember_rust_name<T: Any>(&mut self) {
        self.rust_names
            .insert(TypeId::of::<T>(), std::any::type_name::<T>());
    }

    pub fn conformance_count(&self) -> usize {
        self.conformances.values().map(|c| c.len()).sum()
    }

    fn lookup(&self, value: &dyn Any, capability: Capability) -> Option<&Conformance> {
        self.conformances
            .get(&value.type_id())?
            .iter()
            .find(|c| c.capability.id == capability.id)
    }
}

impl Default for RegistryBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeBridge for RegistryBridge {
    fn conforms_to(&self, value: &dyn Any, capability: Capability) -> bool {
        self.lookup(value, capability).is_some()
    }

    fn cast<'v>(&self, value: &'v dyn Any, capability: Capability) -> Option<CapabilityView<'v>> {
        self.lookup(value, capability)
            .map(|c| CapabilityView::new(value, c.capability, c.witness))
    }

    /// Falls back to the Rust type name; an erased value of a type this
    /// registry has never seen is named by its `TypeId`.
    fn type_name(&self, ty: TypeDescriptor, out: OutSlot<'_, String>) {
        if let Some(mangled) = self.type_names.get(&ty.id) {
            return out.write(mangled.clone());
        }
        match ty.rust_name.or_else(|| self.rust_names.get(&ty.id).copied()) {
            Some(rust_name) => out.write(rust_name.to_string()),
            None => out.write(format!("{:?}", ty.id)),
        }
    }

    fn demangle_name(&self, mangled: &[u8], out: OutSlot<'_, String>) {
        let name = String::from_utf8_lossy(mangled);
        match self.demangled.get(&*name) {
            Some(entry) => out.write(entry.readable.clone()),
            None => out.write(name.into_owned()),
        }
    }
}
