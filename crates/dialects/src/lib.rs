//! Line-oriented dialects of the ENG toolchain.
//!
//! - [`seng`]: statement dialect → JavaScript, driven by a block stack.
//! - [`ceng`]: styling dialect → CSS, a keyword substitution table.
//!
//! Both accept a leading `@raw` marker line, in which case the rest of the
//! file is passed through untouched (see [`raw`]).

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Styling dialect rewriter.
pub mod ceng;
/// `@raw` passthrough marker handling.
pub mod raw;
/// Statement dialect transpiler.
pub mod seng;

pub use ceng::rewrite as rewrite_ceng;
pub use seng::transpile as transpile_seng;

/// A dialect recognised by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `.seng` statement dialect, compiled to JavaScript.
    Seng,
    /// `.ceng` styling dialect, compiled to CSS.
    Ceng,
}

impl Dialect {
    /// Classify a path by its extension. Returns `None` for anything that is
    /// not a `.seng` or `.ceng` file.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension()?.to_str()? {
            "seng" => Some(Dialect::Seng),
            "ceng" => Some(Dialect::Ceng),
            _ => None,
        }
    }

    /// Source file extension (without the dot).
    pub fn source_extension(self) -> &'static str {
        match self {
            Dialect::Seng => "seng",
            Dialect::Ceng => "ceng",
        }
    }

    /// Extension of the compiled output (without the dot).
    pub fn output_extension(self) -> &'static str {
        match self {
            Dialect::Seng => "js",
            Dialect::Ceng => "css",
        }
    }

    /// Where the compiled output of `source` is written next to it.
    pub fn sidecar_path(self, source: &Path) -> PathBuf {
        source.with_extension(self.output_extension())
    }

    /// Compile dialect source text.
    pub fn compile(self, source: &str) -> String {
        match self {
            Dialect::Seng => seng::transpile(source),
            Dialect::Ceng => ceng::rewrite(source),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source_extension())
    }
}
