//! The full structural-dialect pipeline: parse, resolve imports, emit.

use std::path::Path;

use eng_toolchain_config::Config;
use serde::Serialize;

use crate::grammar::ast::Document;
use crate::grammar::diag::Diagnostic;
use crate::grammar::emit::{EmitConfig, emit_html};
use crate::grammar::parser::{ParseError, parse_str};
use crate::imports::{FsLoader, SourceLoader, resolve_imports};

/// A successful compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// The document after import resolution.
    pub document: Document,
    /// The rendered page.
    pub html: String,
    /// Non-fatal findings, in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

/// Flat outcome of a compile, for callers that want a single value
/// (and for JSON output).
///
/// Exactly one of `html` and `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileResult {
    /// Whether the source parsed.
    pub success: bool,
    /// The rendered page on success.
    pub html: Option<String>,
    /// Human-readable parse failure.
    pub error: Option<String>,
    /// Warnings on success; the parse error on failure.
    pub diagnostics: Vec<Diagnostic>,
}

impl From<Result<Compilation, ParseError>> for CompileResult {
    fn from(result: Result<Compilation, ParseError>) -> Self {
        match result {
            Ok(c) => Self {
                success: true,
                html: Some(c.html),
                error: None,
                diagnostics: c.diagnostics,
            },
            Err(e) => Self {
                success: false,
                html: None,
                error: Some(e.to_string()),
                diagnostics: vec![e.to_diagnostic()],
            },
        }
    }
}

/// Parse `source`, resolve its imports against `base_dir` through
/// `loader` (unless `config.inline_imports` is off), and render HTML.
///
/// # Errors
///
/// Returns the first [`ParseError`]. Import problems are reported as
/// warnings in [`Compilation::diagnostics`] instead.
pub fn compile_document(
    source: &str,
    base_dir: &Path,
    loader: &dyn SourceLoader,
    config: &Config,
) -> Result<Compilation, ParseError> {
    let parsed = parse_str(source)?;
    let (document, diagnostics) = if config.inline_imports {
        let resolution = resolve_imports(&parsed, base_dir, loader);
        (resolution.document, resolution.diagnostics)
    } else {
        (parsed, Vec::new())
    };
    let html = emit_html(&document, &EmitConfig::from(config));
    Ok(Compilation {
        document,
        html,
        diagnostics,
    })
}

/// Compile with imports read from disk and default settings.
pub fn compile(source: &str, base_dir: &Path) -> CompileResult {
    compile_with_loader(source, base_dir, &FsLoader, &Config::default())
}

/// Compile through a custom loader and configuration.
pub fn compile_with_loader(
    source: &str,
    base_dir: &Path,
    loader: &dyn SourceLoader,
    config: &Config,
) -> CompileResult {
    compile_document(source, base_dir, loader, config).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::MemoryLoader;

    #[test]
    fn success_and_error_are_exclusive() {
        let ok = compile("create page\nadd heading \"Hi\"", Path::new("."));
        assert!(ok.success);
        assert!(ok.html.is_some() && ok.error.is_none());

        let bad = compile("add", Path::new("."));
        assert!(!bad.success);
        assert!(bad.html.is_none());
        assert_eq!(
            bad.error.as_deref(),
            Some("Expected KEYWORD or IDENTIFIER, got EOF")
        );
        assert!(bad.diagnostics[0].is_error());
    }

    #[test]
    fn result_serializes_with_nulls() {
        let bad = compile("add", Path::new("."));
        let v = serde_json::to_value(&bad).unwrap();
        assert_eq!(v["success"], false);
        assert!(v["html"].is_null());
        assert!(v["error"].is_string());
    }

    #[test]
    fn inline_imports_off_links_instead() {
        let loader = MemoryLoader::new().with("a.seng", "log(1)");
        let config = Config {
            inline_imports: false,
            ..Config::default()
        };
        let c = compile_document("import seng from [a.seng]", Path::new(""), &loader, &config)
            .unwrap();
        assert!(c.html.contains(r#"<script src="a.seng"></script>"#));
        assert!(!c.html.contains("console.log"));
    }

    #[test]
    fn configured_title_and_indent() {
        let config = Config {
            default_title: "Docs".into(),
            indent_width: 4,
            ..Config::default()
        };
        let c = compile_document("", Path::new(""), &MemoryLoader::new(), &config).unwrap();
        assert!(c.html.contains("\n    <head>\n        <meta charset"));
        assert!(c.html.contains("<title>Docs</title>"));
    }
}
