/// Structural-dialect syntax tree types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for documents and tokens.
pub mod dump;
/// HTML emitter: renders a document as a complete page.
pub mod emit;
/// Lexer: tokenizes structural-dialect source.
pub mod lexer;
/// Parser: converts tokens into a document.
pub mod parser;
