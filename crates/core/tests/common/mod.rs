//! Shared test helpers for `eng_toolchain_core` integration tests.

#![allow(unreachable_pub)]

use std::path::Path;

use eng_toolchain_core::{Compilation, Config, Document, Element, MemoryLoader, Node, compile_document};

// ─── Compile helpers ─────────────────────────────────────────────────────────

/// Compile `source` with default settings against in-memory `files`
/// (paths relative to the document).
#[allow(dead_code)]
pub fn compile_with_files(source: &str, files: &[(&str, &str)]) -> Compilation {
    let loader = files
        .iter()
        .fold(MemoryLoader::new(), |l, (path, text)| l.with(*path, *text));
    compile_document(source, Path::new(""), &loader, &Config::default())
        .unwrap_or_else(|e| panic!("compile failed: {e}\n--- source ---\n{source}"))
}

/// Compile `source` with no import sources available.
#[allow(dead_code)]
pub fn compile_html(source: &str) -> String {
    compile_with_files(source, &[]).html
}

// ─── HTML helpers ────────────────────────────────────────────────────────────

/// Lines strictly between `<body>` and `</body>`, with indentation removed.
#[allow(dead_code)]
pub fn body_lines(html: &str) -> Vec<String> {
    section_lines(html, "<body>", "</body>")
}

/// Lines strictly between `<head>` and `</head>`, with indentation removed.
#[allow(dead_code)]
pub fn head_lines(html: &str) -> Vec<String> {
    section_lines(html, "<head>", "</head>")
}

fn section_lines(html: &str, open: &str, close: &str) -> Vec<String> {
    let lines: Vec<&str> = html.lines().map(str::trim).collect();
    let start = lines
        .iter()
        .position(|l| *l == open)
        .unwrap_or_else(|| panic!("no {open} line in:\n{html}"));
    let end = lines
        .iter()
        .rposition(|l| *l == close)
        .unwrap_or_else(|| panic!("no {close} line in:\n{html}"));
    lines[start + 1..end].iter().map(|l| l.to_string()).collect()
}

/// Number of non-overlapping occurrences of `needle`.
#[allow(dead_code)]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ─── AST helpers ─────────────────────────────────────────────────────────────

/// All element nodes at any depth, in document order.
#[allow(dead_code)]
pub fn elements(doc: &Document) -> Vec<&Element> {
    fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
        for node in nodes {
            match node {
                Node::Element(e) => out.push(e),
                Node::Page { children, .. } | Node::Function { children, .. } => {
                    walk(children, out)
                }
                _ => {}
            }
        }
    }
    let mut out = Vec::new();
    walk(&doc.nodes, &mut out);
    out
}
