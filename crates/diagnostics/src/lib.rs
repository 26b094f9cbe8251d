//! Diagnostics for the ENG toolchain.
//!
//! Every stage that can report something without aborting (the import
//! resolver, sidecar writing in the CLI) produces [`Diagnostic`] values
//! instead of printing. The single hard failure, a parser expectation
//! mismatch, is also convertible into a [`Diagnostic`] so front ends can
//! render all problems the same way. Codes live in [`codes`].

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// How serious a diagnostic is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The compile was aborted.
    Error,
    /// Output was produced but degraded (e.g. an import left external).
    Warn,
    /// Informational note.
    Info,
}

/// Half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width spans.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable code from [`codes`] (e.g. `"ENG2001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Location in the structural-dialect source, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Free-form key/value details for tooling (`"path"`, `"expected"`, ...).
    /// `BTreeMap` keeps serialized key order deterministic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach context details (builder style).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Whether this diagnostic aborted the compile.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Explanation for this diagnostic's code, if one exists.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

/// True when any diagnostic in the slice is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explain(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
    }

    #[test]
    fn span_join_and_len() {
        let s = Span::new(4, 6).join(Span::new(1, 5));
        assert_eq!(s, Span::new(1, 6));
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
    }

    #[test]
    fn has_errors_ignores_warnings() {
        let warn = Diagnostic::warn(codes::IMPORT_UNREADABLE, "w", None);
        let err = Diagnostic::error(codes::PARSER_EXPECTED_TOKEN, "e", None);
        assert!(!has_errors(std::slice::from_ref(&warn)));
        assert!(has_errors(&[warn, err]));
    }

    #[test]
    fn span_empty() {
        let s = Span::empty(7);
        assert_eq!(s.start, 7);
        assert_eq!(s.end, 7);
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── Severity Display ────────────────────────────────────────────────

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    // ── Diagnostic constructors ─────────────────────────────────────────

    #[test]
    fn diagnostic_error_constructor() {
        let d = Diagnostic::error(codes::PARSER_EXPECTED_TOKEN, "expected KEYWORD", None);
        assert_eq!(d.id, "ENG1001");
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.message, "expected KEYWORD");
        assert!(d.span.is_none());
    }

    #[test]
    fn diagnostic_warn_constructor() {
        let d = Diagnostic::warn(
            codes::IMPORT_UNREADABLE,
            "could not read app.seng",
            Some(Span::new(0, 5)),
        );
        assert_eq!(d.severity, Severity::Warn);
        assert_eq!(d.span, Some(Span::new(0, 5)));
    }

    #[test]
    fn diagnostic_info_constructor() {
        let d = Diagnostic::info("CUSTOM", "custom message", None);
        assert_eq!(d.severity, Severity::Info);
        assert_eq!(d.id, "CUSTOM");
    }

    // ── Diagnostic Display ──────────────────────────────────────────────

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::warn(codes::IMPORT_MISSING_PATH, "import has no path", None);
        assert_eq!(format!("{}", d), "warn[ENG2002]: import has no path");
    }

    // ── Diagnostic explain ──────────────────────────────────────────────

    #[test]
    fn diagnostic_explain_known() {
        let d = Diagnostic::error(codes::PARSER_EXPECTED_TOKEN, "test", None);
        assert!(d.explain().is_some());
        assert!(d.explain().unwrap().contains("token"));
    }

    #[test]
    fn diagnostic_explain_unknown() {
        let d = Diagnostic::error("UNKNOWN_CODE", "test", None);
        assert!(d.explain().is_none());
    }

    #[test]
    fn all_codes_have_explanations() {
        for code in codes::ALL {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in codes::ALL {
            assert!(seen.insert(*code), "duplicate diagnostic code {code}");
        }
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn diagnostic_serde_roundtrip() {
        let d = Diagnostic::error(
            codes::PARSER_EXPECTED_TOKEN,
            "test message",
            Some(Span::new(10, 20)),
        );
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn diagnostic_serde_omits_none_span() {
        let d = Diagnostic::warn(codes::IMPORT_UNREADABLE, "test", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(
            !json.contains("span"),
            "None span should be omitted: {json}"
        );
        assert!(
            !json.contains("context"),
            "None context should be omitted: {json}"
        );
    }

    // ── Context ─────────────────────────────────────────────────────────

    #[test]
    fn diagnostic_with_context() {
        let d = Diagnostic::warn(codes::IMPORT_UNREADABLE, "unreadable", None).with_context(
            BTreeMap::from([
                ("path".into(), "app.seng".into()),
                ("reason".into(), "not found".into()),
            ]),
        );
        let ctx = d.context.as_ref().unwrap();
        assert_eq!(ctx.get("path").unwrap(), "app.seng");
        assert_eq!(ctx.get("reason").unwrap(), "not found");
    }

    #[test]
    fn diagnostic_context_deterministic_order() {
        let d = Diagnostic::error(codes::PARSER_EXPECTED_TOKEN, "test", None).with_context(
            BTreeMap::from([
                ("z_last".into(), "1".into()),
                ("a_first".into(), "2".into()),
                ("m_middle".into(), "3".into()),
            ]),
        );
        let json = serde_json::to_string(&d).unwrap();
        let a_pos = json.find("a_first").unwrap();
        let m_pos = json.find("m_middle").unwrap();
        let z_pos = json.find("z_last").unwrap();
        assert!(
            a_pos < m_pos && m_pos < z_pos,
            "BTreeMap should serialize in alphabetical key order: {json}"
        );
    }
}
