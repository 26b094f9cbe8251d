//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Codes are grouped by pipeline stage:
//! `ENG1xxx` parser, `ENG2xxx` import resolution, `ENG3xxx` output.

/// The parser required a specific token and found something else.
pub const PARSER_EXPECTED_TOKEN: &str = "ENG1001";

/// An imported dialect file could not be read.
pub const IMPORT_UNREADABLE: &str = "ENG2001";

/// An `import` statement has no `[path]`.
pub const IMPORT_MISSING_PATH: &str = "ENG2002";

/// A compiled import could not be written next to its source.
pub const SIDECAR_WRITE_FAILED: &str = "ENG3001";

/// Every code defined in this module, in numeric order.
pub const ALL: &[&str] = &[
    PARSER_EXPECTED_TOKEN,
    IMPORT_UNREADABLE,
    IMPORT_MISSING_PATH,
    SIDECAR_WRITE_FAILED,
];

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    match id {
        PARSER_EXPECTED_TOKEN => Some(
            "The parser reached a construct that requires a specific token (for example \
             the `function` keyword) and found a different one. This is the only hard \
             failure of the structural dialect; the whole compile is aborted.",
        ),
        IMPORT_UNREADABLE => Some(
            "An imported .seng or .ceng file could not be read. The import is rendered as \
             an external reference instead of being inlined; the compile still succeeds.",
        ),
        IMPORT_MISSING_PATH => Some(
            "An `import` statement has no bracketed path, so there is nothing to resolve. \
             Write it as `import seng from [app.seng]`.",
        ),
        SIDECAR_WRITE_FAILED => Some(
            "The compiled .js or .css output of an import could not be written next to its \
             source file. The HTML output is unaffected.",
        ),
        _ => None,
    }
}
