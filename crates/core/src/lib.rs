//! ENG toolchain core library.
//!
//! Tokenizes, parses, and renders the structural dialect (`.heng`) as
//! HTML, compiling imported statement (`.seng`) and styling (`.ceng`)
//! files inline. The main entry points are [`parse_str`] for parsing,
//! [`resolve_imports`] for import compilation, [`emit_html`] for output,
//! and [`compile`] for the whole pipeline.

#![warn(missing_docs)]

/// Whole-pipeline compilation.
pub mod compile;
/// HTML entity escaping.
pub mod escape;
/// Structural-dialect grammar: lexer, parser, AST, emitter, and helpers.
pub mod grammar;
/// Import resolution and source loading.
pub mod imports;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Lexer
pub use grammar::lexer::{KEYWORDS, TokKind, Token, tokenize};

// Parser
pub use grammar::parser::{ParseError, parse_str, parse_tokens};

// AST
pub use grammar::ast::{Document, Element, ElementKind, Import, Node, ScriptKind};

// Emitter
pub use grammar::emit::{EmitConfig, emit_html};

// Imports
pub use imports::{FsLoader, LoadError, MemoryLoader, Resolution, SourceLoader, resolve_imports};

// Pipeline
pub use compile::{CompileResult, Compilation, compile, compile_document, compile_with_loader};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Sibling crates
pub use eng_toolchain_config::Config;
pub use eng_toolchain_dialects::{Dialect, rewrite_ceng, transpile_seng};

// Serialization helpers
pub use grammar::dump::{to_pretty_json, tokens_to_pretty_json};
