//! Statement dialect (`.seng`) → JavaScript.
//!
//! The dialect has no braces or indentation: scopes are opened by keyword
//! lines (`function`, `class`, `on`, `when`, `loop`, ...) and closed by a
//! blank line, by a construct that cannot nest inside the current scope, or
//! by end of input. [`BlockStack`] guarantees every opened scope is closed
//! exactly once and in reverse order.
//!
//! ```text
//! function greet(name)        function greet(name) {
//! log("hi " + name)     →     console.log("hi " + name);
//!                             }
//! ```

mod block;
mod preprocess;

pub use block::{BlockKind, BlockStack};
pub use preprocess::expand_idioms;

use std::sync::LazyLock;

use regex::Regex;

use crate::raw;

/// Start of an inline comment; the rest of the line is dropped.
const COMMENT: &str = "--";

/// Names that look like `name(...)` but are statements, not method headers.
const STATEMENT_WORDS: &[&str] = &["log", "print", "call", "when", "loop", "return"];

macro_rules! line_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect("line pattern is a valid regex"));
    };
}

line_regex!(
    TOP_LEVEL,
    r"(?i)^(function|class|for\s+|on\s+|import\s+|add\s+|create\s+|requestAnimationFrame\b|request animation frame\b)"
);
line_regex!(FUNCTION, r"(?i)^function\s+(\w+)(?:\s*\(([^)]*)\))?");
line_regex!(METHOD, r"(?i)^(static\s+)?(\w+)\s*\(([^)]*)\)\s*$");
line_regex!(CLASS, r"(?i)^class\s+(\w+)");
line_regex!(EVENT, r"(?i)^on\s+(\w+)\s+(\w+)(?:\s*\(([^)]*)\))?");
line_regex!(WHEN, r"(?i)^when\s*\((.+)\)");
line_regex!(ELSE, r"(?i)^else$");
line_regex!(LOOP, r"(?i)^loop\s*\((.+)\)");
line_regex!(VAR, r"(?i)^(?:var|varibal)\s+(\w+)(?:\s*=\s*(.+))?");
line_regex!(LOG, r"(?i)^(?:log|print)\s*\((.+)\)\s*;?$");
line_regex!(CALL, r"(?i)^(?:call\s+)?(\w+)\s*\((.*)\)\s*;?$");
line_regex!(RETURN, r"(?i)^return\s+(.+)$");

/// Transpile statement-dialect source into JavaScript.
///
/// A leading `@raw` line returns the remainder of the file unchanged.
/// Otherwise every emitted line ends in `\n` and all blocks are balanced.
pub fn transpile(source: &str) -> String {
    if let Some(body) = raw::strip_marker(source) {
        return body.to_owned();
    }
    let expanded = expand_idioms(source);
    let mut t = Transpiler::default();
    for line in expanded.split('\n') {
        t.line(strip_comment(line).trim());
    }
    t.finish()
}

fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT).map_or(line, |(code, _)| code)
}

/// Capture group `i`, trimmed, or `""` when it did not participate.
fn group<'t>(caps: &regex::Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str().trim())
}

fn trim_semicolon(expr: &str) -> &str {
    expr.strip_suffix(';').unwrap_or(expr).trim_end()
}

#[derive(Default)]
struct Transpiler {
    out: String,
    blocks: BlockStack,
}

impl Transpiler {
    fn finish(mut self) -> String {
        self.blocks.close_all(&mut self.out);
        self.out
    }

    fn emit(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn open(&mut self, kind: BlockKind, header: &str) {
        self.blocks.open(&mut self.out, kind, header);
    }

    fn close_all(&mut self) {
        self.blocks.close_all(&mut self.out);
    }

    /// Dispatch one trimmed, comment-free line. The first matching rule wins.
    fn line(&mut self, line: &str) {
        // A class body cannot stay open across a top-level construct.
        if self.blocks.contains(BlockKind::Class) && TOP_LEVEL.is_match(line) {
            self.close_all();
        }

        if line.is_empty() {
            self.blocks.close_innermost(&mut self.out);
            return;
        }

        if let Some(caps) = FUNCTION.captures(line) {
            self.close_all();
            let header = format!("function {}({}) {{", group(&caps, 1), group(&caps, 2));
            self.open(BlockKind::Function, &header);
            return;
        }

        if let Some(caps) = METHOD.captures(line)
            && self.in_class_body()
            && !is_statement_word(group(&caps, 2))
        {
            self.blocks
                .close_while(&mut self.out, |k| k == BlockKind::Method);
            let prefix = if caps.get(1).is_some() { "static " } else { "" };
            let header = format!("{prefix}{}({}) {{", group(&caps, 2), group(&caps, 3));
            self.open(BlockKind::Method, &header);
            return;
        }

        if line.ends_with('{') {
            self.open(BlockKind::Block, line);
            return;
        }

        if let Some(caps) = CLASS.captures(line) {
            self.close_all();
            let header = format!("class {} {{", group(&caps, 1));
            self.open(BlockKind::Class, &header);
            return;
        }

        if let Some(caps) = EVENT.captures(line) {
            let header = format!(
                "{}.addEventListener('{}', ({}) => {{",
                group(&caps, 1),
                group(&caps, 2),
                group(&caps, 3)
            );
            self.open(BlockKind::Event, &header);
            return;
        }

        if let Some(caps) = WHEN.captures(line) {
            let header = format!("if ({}) {{", group(&caps, 1));
            self.open(BlockKind::If, &header);
            return;
        }

        if ELSE.is_match(line) {
            if self.blocks.innermost() == Some(BlockKind::If) {
                self.blocks.chain(&mut self.out, BlockKind::Else, "} else {");
            } else {
                self.open(BlockKind::Else, "else {");
            }
            return;
        }

        if let Some(caps) = LOOP.captures(line) {
            let header = format!("while ({}) {{", group(&caps, 1));
            self.open(BlockKind::Loop, &header);
            return;
        }

        if let Some(caps) = VAR.captures(line) {
            let name = group(&caps, 1);
            let stmt = match caps.get(2) {
                Some(value) => format!("let {name} = {};", trim_semicolon(value.as_str().trim())),
                None => format!("let {name};"),
            };
            self.emit(&stmt);
            return;
        }

        if let Some(caps) = LOG.captures(line) {
            self.emit(&format!("console.log({});", group(&caps, 1)));
            return;
        }

        if let Some(caps) = CALL.captures(line) {
            self.emit(&format!("{}({});", group(&caps, 1), caps.get(2).map_or("", |m| m.as_str())));
            return;
        }

        if let Some(caps) = RETURN.captures(line) {
            self.emit(&format!("return {};", trim_semicolon(group(&caps, 1))));
            return;
        }

        if line.ends_with(';') || line.ends_with('{') || line.ends_with('}') {
            self.emit(line);
        } else {
            self.emit(&format!("{line};"));
        }
    }

    /// Method headers are only recognised directly inside a class body or
    /// right after another method's body.
    fn in_class_body(&self) -> bool {
        self.blocks.contains(BlockKind::Class)
            && matches!(
                self.blocks.innermost(),
                Some(BlockKind::Class | BlockKind::Method)
            )
    }
}

fn is_statement_word(name: &str) -> bool {
    STATEMENT_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(name))
}
