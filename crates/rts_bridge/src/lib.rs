//! Facade over a host runtime's reflection machinery.
//!
//! The host runtime is injected as a [`RuntimeBridge`] and answers
//! capability queries, capability casts, type naming and symbol demangling.
//! [`Reflection`] is what the rest of the library calls; [`RegistryBridge`]
//! is an in-process host backed by explicit registrations.

pub mod bridge;
pub mod capability;
pub mod config;
mod names;
pub mod reflection;
pub mod registry;

pub use bridge::{Reflectable, RuntimeBridge, TypeDescriptor};
pub use capability::{Capability, CapabilityId, CapabilityView, Witness};
pub use config::ReflectionConfig;
pub use reflection::{Reflection, TraceSink};
pub use registry::RegistryBridge;
