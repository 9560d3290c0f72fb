//! Reflection configuration.

/// Reflection facade configuration options.
#[derive(Clone, Copy, Debug)]
pub struct ReflectionConfig {
    /// Write one `reflection:` line per call to the trace sink (stderr by
    /// default).
    pub trace: bool,
    /// Keep module paths in demangled type names.
    pub qualified_names: bool,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            trace: trace_enabled(std::env::var("RTS_TRACE_REFLECTION").ok().as_deref()),
            qualified_names: true,
        }
    }
}

/// Interprets the `RTS_TRACE_REFLECTION` setting: `1` or `true` (any case).
pub(crate) fn trace_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
