/// Marker that switches a dialect file to verbatim passthrough.
pub const RAW_MARKER: &str = "@raw";

/// If `source` starts with the `@raw` marker (leading whitespace allowed),
/// return everything after the marker line. Otherwise `None`.
///
/// Nothing after the marker line is altered, including trailing newlines.
pub fn strip_marker(source: &str) -> Option<&str> {
    let rest = source.trim_start();
    if !rest.starts_with(RAW_MARKER) {
        return None;
    }
    Some(rest.split_once('\n').map_or("", |(_, body)| body))
}
