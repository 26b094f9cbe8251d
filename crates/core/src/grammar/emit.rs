//! HTML emitter: renders a (resolved) [`Document`] as a complete page.
//!
//! Top-level imports, and imports and titles inside `setup*` functions,
//! go into `<head>`. Everything else renders into `<body>` in source order,
//! with the bodies of other functions spliced in where they appear.

use std::borrow::Cow;

use eng_toolchain_config::Config;
use eng_toolchain_dialects::Dialect;

use crate::escape::escape_html;
use crate::grammar::ast::{Document, Element, ElementKind, Import, Node, ScriptKind};

// ── Configuration ───────────────────────────────────────────────────────

/// Head title used when no `setup*` function supplies one.
pub const DEFAULT_TITLE: &str = "ENG Page";

/// Configuration for the HTML emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Text repeated once per nesting level.
    pub indent_unit: String,
    /// `<title>` text when the document sets none.
    pub default_title: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_unit: "  ".into(),
            default_title: DEFAULT_TITLE.into(),
        }
    }
}

impl From<&Config> for EmitConfig {
    fn from(config: &Config) -> Self {
        Self {
            indent_unit: config.indent_unit(),
            default_title: config.default_title.clone(),
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Render `doc` as an HTML document. Lines are joined with `\n`; there is
/// no trailing newline.
///
/// Pure: the same document and config always produce the same text.
pub fn emit_html(doc: &Document, config: &EmitConfig) -> String {
    let mut e = Emitter {
        lines: Vec::new(),
        depth: 0,
        config,
    };
    e.document(doc);
    e.lines.join("\n")
}

// ── Document structure ──────────────────────────────────────────────────

struct Emitter<'a> {
    lines: Vec<String>,
    depth: usize,
    config: &'a EmitConfig,
}

impl Emitter<'_> {
    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{text}", self.config.indent_unit.repeat(self.depth)));
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn document(&mut self, doc: &Document) {
        let (title, imports) = head_items(doc);

        self.line("<!DOCTYPE html>");
        self.line("<html>");
        self.indent();
        self.line("<head>");
        self.indent();
        self.line(r#"<meta charset="UTF-8">"#);
        self.line(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
        let config = self.config;
        let title = title.unwrap_or(config.default_title.as_str());
        self.line(format!("<title>{}</title>", escape_html(title)));
        for import in imports {
            self.head_import(import);
        }
        self.dedent();
        self.line("</head>");

        self.line("<body>");
        self.indent();
        for node in &doc.nodes {
            if !matches!(node, Node::Import(_)) {
                self.node(node);
            }
        }
        self.dedent();
        self.line("</body>");
        self.dedent();
        self.line("</html>");
    }

    fn head_import(&mut self, import: &Import) {
        let Some(path) = import.path.as_deref() else {
            return;
        };
        if let Some(compiled) = &import.compiled
            && let Some(tag) = inline_tag(import)
        {
            self.line(format!("<{tag}>"));
            self.indent();
            for l in compiled.strip_suffix('\n').unwrap_or(compiled).split('\n') {
                self.line(l);
            }
            self.dedent();
            self.line(format!("</{tag}>"));
            return;
        }

        let href = escape_html(path);
        let ty = import.import_type.as_deref().unwrap_or_default();
        let stylesheet = ty.contains("css")
            || ty.contains("ceng")
            || path.ends_with(".css")
            || path.ends_with(".ceng");
        let reference = if ty.contains("js") {
            format!(r#"<script src="{href}"></script>"#)
        } else if ty.contains("ts") {
            format!(r#"<script type="module" src="{href}"></script>"#)
        } else if stylesheet {
            format!(r#"<link rel="stylesheet" href="{href}">"#)
        } else {
            format!(r#"<script src="{href}"></script>"#)
        };
        self.line(reference);
    }

    // ── Body ────────────────────────────────────────────────────────────

    fn node(&mut self, node: &Node) {
        match node {
            Node::Page { children, .. } => self.nodes(children),
            Node::Function { children, .. } => {
                if !node.is_setup() {
                    self.nodes(children);
                }
            }
            Node::Import(_) => {}
            Node::Title { content, .. } => {
                let content = or_default(content, "Page Title");
                self.line(format!("<title>{}</title>", escape_html(content)));
            }
            Node::ScriptBlock { kind, attrs, .. } => self.script_block(*kind, attrs),
            Node::Element(element) => self.element(element),
        }
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn script_block(&mut self, kind: ScriptKind, attrs: &[String]) {
        let (open, body, close) = match kind {
            ScriptKind::Cstyle => ("<style>", "/* custom style block */", "</style>"),
            _ if attrs.iter().any(|a| a == "ts") => (
                r#"<script type="module">"#,
                "// TypeScript (transpile required in production)",
                "</script>",
            ),
            _ => ("<script>", "// Inline script", "</script>"),
        };
        self.line(open);
        self.indent();
        self.line(body);
        self.dedent();
        self.line(close);
    }

    fn element(&mut self, el: &Element) {
        let extra = attrs_html(&el.attrs);
        let text = |default: &str| escape_html(or_default(&el.content, default)).into_owned();
        let html = match &el.kind {
            ElementKind::Heading => format!("<h1{extra}>{}</h1>", text("Heading")),
            ElementKind::Paragraph => format!("<p{extra}>{}</p>", text("Paragraph")),
            ElementKind::Button => format!("<button{extra}>{}</button>", text("Button")),
            ElementKind::Link => format!(r##"<a href="#"{extra}>{}</a>"##, text("Link")),
            ElementKind::Label => format!("<label{extra}>{}</label>", text("Label")),
            ElementKind::Image => format!(r#"<img src="{}" alt="Image"{extra}>"#, text("")),
            ElementKind::Input => format!(r#"<input type="text"{extra}>"#),
            ElementKind::Div => {
                self.div(&el.content, &extra);
                return;
            }
            kind => match kind.plain_tag() {
                Some(tag) => format!("<{tag}{extra}>{}</{tag}>", text("")),
                None => return,
            },
        };
        self.line(html);
    }

    /// Content that already looks like markup is emitted verbatim, one
    /// source line per output line.
    fn div(&mut self, content: &str, extra: &str) {
        self.line(format!("<div{extra}>"));
        if !content.is_empty() {
            self.indent();
            if content.trim_start().starts_with('<') {
                for l in content.split('\n') {
                    self.line(l);
                }
            } else {
                self.line(escape_html(content));
            }
            self.dedent();
        }
        self.line("</div>");
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Last non-empty setup title, and imports bound for `<head>` in order.
fn head_items(doc: &Document) -> (Option<&str>, Vec<&Import>) {
    let mut title = None;
    let mut imports = Vec::new();
    for node in &doc.nodes {
        match node {
            Node::Import(import) => imports.push(import),
            Node::Function { children, .. } if node.is_setup() => {
                for child in children {
                    match child {
                        Node::Title { content, .. } if !content.is_empty() => {
                            title = Some(content.as_str());
                        }
                        Node::Import(import) => imports.push(import),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    (title, imports)
}

/// `<script>` or `<style>` for an import whose compiled text is inlined.
fn inline_tag(import: &Import) -> Option<&'static str> {
    let dialect = match import.import_type.as_deref() {
        Some("seng") => Some(Dialect::Seng),
        Some("ceng") => Some(Dialect::Ceng),
        _ => import.dialect(),
    }?;
    Some(match dialect {
        Dialect::Seng => "script",
        Dialect::Ceng => "style",
    })
}

fn or_default<'a>(content: &'a str, default: &'a str) -> &'a str {
    if content.is_empty() { default } else { content }
}

/// ` class="with-a with-b" data-with="a b"`, or nothing when there are no
/// attributes.
fn attrs_html(attrs: &[String]) -> Cow<'static, str> {
    if attrs.is_empty() {
        return Cow::Borrowed("");
    }
    let classes = attrs
        .iter()
        .map(|a| format!("with-{a}"))
        .collect::<Vec<_>>()
        .join(" ");
    let data = attrs.join(" ");
    Cow::Owned(format!(
        r#" class="{}" data-with="{}""#,
        escape_html(&classes),
        escape_html(&data)
    ))
}
