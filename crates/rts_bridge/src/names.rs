/// Drops module paths from a Rust-style type name, keeping generic structure:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn strip_module_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    // Start of the path segment currently being copied.
    let mut seg_start = 0;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            if out.len() > seg_start {
                out.truncate(seg_start);
            } else {
                // Qualified path after `>`, e.g. `<T as Trait>::Output`.
                out.push_str("::");
                seg_start = out.len();
            }
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            seg_start = out.len();
        }
    }
    out
}
