//! Import resolution: compiles `.seng`/`.ceng` imports and attaches the
//! output to a copy of the document.
//!
//! Resolution never fails. A missing or unreadable file leaves the import
//! uncompiled (the emitter then links to it instead) and records a warning.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::grammar::ast::{Document, Import, Node};
use crate::grammar::diag::{Diagnostic, codes};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Failure to obtain the source text of an imported file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// No source is registered under this path.
    #[error("no source for {}", .0.display())]
    NotFound(PathBuf),
}

/// Where import sources come from.
pub trait SourceLoader {
    /// Return the full text of `path`.
    fn load(&self, path: &Path) -> Result<String, LoadError>;
}

/// Reads imports from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory sources keyed by path, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` under `path` (builder style).
    pub fn with(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Register `source` under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }
}

/// Output of [`resolve_imports`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The document with compiled imports filled in.
    pub document: Document,
    /// Warnings for imports that could not be compiled.
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile every `.seng`/`.ceng` import at the top level of `doc` or
/// directly inside a top-level function.
///
/// Paths are joined onto `base_dir`. Imports are processed in document
/// order and one failure does not stop the rest. `doc` itself is not
/// modified.
pub fn resolve_imports(doc: &Document, base_dir: &Path, loader: &dyn SourceLoader) -> Resolution {
    let mut resolver = Resolver {
        base_dir,
        loader,
        diagnostics: Vec::new(),
    };
    let nodes = doc.nodes.iter().map(|node| resolver.top_level(node)).collect();
    Resolution {
        document: Document { nodes },
        diagnostics: resolver.diagnostics,
    }
}

struct Resolver<'a> {
    base_dir: &'a Path,
    loader: &'a dyn SourceLoader,
    diagnostics: Vec<Diagnostic>,
}

impl Resolver<'_> {
    fn top_level(&mut self, node: &Node) -> Node {
        match node {
            Node::Import(import) => Node::Import(self.import(import)),
            Node::Function {
                name,
                children,
                span,
            } => Node::Function {
                name: name.clone(),
                children: children
                    .iter()
                    .map(|child| match child {
                        Node::Import(import) => Node::Import(self.import(import)),
                        other => other.clone(),
                    })
                    .collect(),
                span: *span,
            },
            other => other.clone(),
        }
    }

    fn import(&mut self, import: &Import) -> Import {
        let mut resolved = import.clone();
        let Some(path) = import.path.as_deref() else {
            self.diagnostics.push(Diagnostic::warn(
                codes::IMPORT_MISSING_PATH,
                "import has no [path]; nothing will be emitted for it",
                Some(import.span),
            ));
            return resolved;
        };
        let Some(dialect) = import.dialect() else {
            return resolved;
        };

        let full = self.base_dir.join(path);
        match self.loader.load(&full) {
            Ok(source) => {
                resolved.compiled = Some(dialect.compile(&source));
                resolved.import_type = Some(dialect.to_string());
            }
            Err(e) => {
                self.diagnostics.push(
                    Diagnostic::warn(
                        codes::IMPORT_UNREADABLE,
                        format!("could not compile {path}: {e}"),
                        Some(import.span),
                    )
                    .with_context(ctx!(
                        "path" => full.display().to_string(),
                        "dialect" => dialect.to_string(),
                    )),
                );
            }
        }
        resolved
    }
}
