//! Reflection facade used by the rest of the library.

use rts_core::errors::{contract_violation, messages};
use rts_core::with_uninitialized_string;

use crate::bridge::{Reflectable, RuntimeBridge};
use crate::capability::{Capability, CapabilityView};
use crate::config::ReflectionConfig;
use crate::names::strip_module_paths;
use crate::registry::RegistryBridge;

/// Receives trace lines when `ReflectionConfig::trace` is set.
pub type TraceSink = Box<dyn Fn(&str)>;

/// Capability queries and type naming over an injected [`RuntimeBridge`].
///
/// Every entry point looks values up by their dynamic type, see
/// [`Reflectable`].
pub struct Reflection {
    bridge: Box<dyn RuntimeBridge>,
    config: ReflectionConfig,
    trace_sink: Option<TraceSink>,
}

impl Default for Reflection {
    fn default() -> Self {
        Self::new(Box::new(RegistryBridge::new()))
    }
}

impl Reflection {
    pub fn new(bridge: Box<dyn RuntimeBridge>) -> Self {
        Self::with_config(bridge, ReflectionConfig::default())
    }

    pub fn with_config(bridge: Box<dyn RuntimeBridge>, config: ReflectionConfig) -> Self {
        Self {
            bridge,
            config,
            trace_sink: None,
        }
    }

    pub fn set_bridge(&mut self, bridge: Box<dyn RuntimeBridge>) {
        self.bridge = bridge;
    }

    pub fn bridge(&self) -> &dyn RuntimeBridge {
        self.bridge.as_ref()
    }

    pub fn config(&self) -> ReflectionConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ReflectionConfig) {
        self.config = config;
    }

    /// Redirects trace lines away from stderr.
    pub fn set_trace_sink(&mut self, sink: TraceSink) {
        self.trace_sink = Some(sink);
    }

    /// Checks if `value` conforms to `capability`.
    pub fn conforms_to<T: ?Sized + Reflectable>(&self, value: &T, capability: Capability) -> bool {
        let ok = self.bridge.conforms_to(value.as_any(), capability);
        self.trace(|| {
            format!(
                "conforms_to {} {capability} -> {ok}",
                value.type_descriptor().display_name()
            )
        });
        ok
    }

    /// Casts `value` to `capability`. Returns `None` if it does not conform.
    pub fn try_cast_to_capability<'v, T: ?Sized + Reflectable>(
        &self,
        value: &'v T,
        capability: Capability,
    ) -> Option<CapabilityView<'v>> {
        let view = self.bridge.cast(value.as_any(), capability);
        self.trace(|| {
            format!(
                "cast {} as {capability} -> {}",
                value.type_descriptor().display_name(),
                if view.is_some() { "ok" } else { "none" }
            )
        });
        view
    }

    /// Casts `value` to `capability`. A value that does not conform is a
    /// contract violation.
    #[track_caller]
    pub fn cast_to_capability<'v, T: ?Sized + Reflectable>(
        &self,
        value: &'v T,
        capability: Capability,
    ) -> CapabilityView<'v> {
        match self.try_cast_to_capability(value, capability) {
            Some(view) => view,
            None => contract_violation(&format!(
                "{}: {} as {capability}",
                messages::CAST_FAILED,
                self.demangled_type_name(value)
            )),
        }
    }

    /// Returns the mangled type name for the given value.
    pub fn type_name<T: ?Sized + Reflectable>(&self, value: &T) -> String {
        let ty = value.type_descriptor();
        let ((), name) = with_uninitialized_string(|out| self.bridge.type_name(ty, out));
        self.trace(|| format!("type_name {} -> {name}", ty.display_name()));
        name
    }

    /// Returns the human-readable form of `mangled`, or `mangled` itself when
    /// the runtime cannot parse it.
    pub fn demangle_name(&self, mangled: &str) -> String {
        let ((), name) =
            with_uninitialized_string(|out| self.bridge.demangle_name(mangled.as_bytes(), out));
        self.trace(|| format!("demangle {mangled} -> {name}"));
        name
    }

    /// Returns the human-readable type name for the given value.
    pub fn demangled_type_name<T: ?Sized + Reflectable>(&self, value: &T) -> String {
        let name = self.demangle_name(&self.type_name(value));
        if self.config.qualified_names {
            name
        } else {
            strip_module_paths(&name)
        }
    }

    fn trace(&self, line: impl FnOnce() -> String) {
        if !self.config.trace {
            return;
        }
        let line = format!("reflection: {}", line());
        match &self.trace_sink {
            Some(sink) => sink(&line),
            None => eprintln!("{line}"),
        }
    }
}
