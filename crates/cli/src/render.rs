//! Diagnostic rendering for the `eng` binary.
//!
//! Pretty output goes through ariadne with the offending `.heng` source
//! underlined, on stderr. In JSON mode each command prints a single object
//! that carries its diagnostics, so nothing here writes to stdout.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use clap::ValueEnum;
use eng_toolchain_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// How results and diagnostics are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty for a terminal and JSON for a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<Format>) -> Self {
        explicit.unwrap_or_else(|| {
            if io::stdout().is_terminal() {
                Format::Pretty
            } else {
                Format::Json
            }
        })
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

/// `key=value, ...` from a diagnostic's context, if it has any.
fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics to stderr. Spanned diagnostics point into `source`;
/// the rest print as a single header line with notes.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let note = context_note(diag);
        let Some(span) = diag.span else {
            eprintln!("{diag}");
            if let Some(note) = &note {
                eprintln!("  = note: {note}");
            }
            if let Some(help) = diag.explain() {
                eprintln!("  = help: {help}");
            }
            continue;
        };

        // Clamp to the source so a stale span cannot panic the renderer.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut builder = Report::build(report_kind(&diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(note.clone().unwrap_or_else(|| diag.message.clone()))
                    .with_color(severity_color(&diag.severity)),
            );
        if let Some(note) = note {
            builder = builder.with_note(note);
        }
        if let Some(help) = diag.explain() {
            builder = builder.with_help(help);
        }
        builder.finish().eprint(&mut cache).ok();
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print `N errors, M warnings` to stderr. Silent when there is nothing
/// to report.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let infos = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Info)
        .count();
    let warnings = diagnostics.len() - errors - infos;

    let plural = |n: usize, word: &str| {
        let s = if n == 1 { "" } else { "s" };
        format!("{n} {word}{s}")
    };
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(plural(errors, "error").fg(Color::Red).to_string());
    }
    if warnings > 0 {
        parts.push(plural(warnings, "warning").fg(Color::Yellow).to_string());
    }
    if infos > 0 {
        parts.push(format!("{infos} info").fg(Color::Blue).to_string());
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
