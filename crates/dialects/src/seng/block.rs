//! The block stack: every scope the transpiler opens is recorded here and
//! closed exactly once, innermost first.

use serde::Serialize;

/// Kind of an open scope in the generated JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `function name(...) {`
    Function,
    /// `class Name {`
    Class,
    /// `name(...) {` inside a class.
    Method,
    /// `target.addEventListener('event', (...) => {`
    Event,
    /// `if (...) {`
    If,
    /// `else {`
    Else,
    /// `while (...) {`
    Loop,
    /// Any source line that already ends in `{`.
    Block,
}

impl BlockKind {
    /// Text that closes a block of this kind.
    pub fn close_text(self) -> &'static str {
        match self {
            BlockKind::Event => "});",
            _ => "}",
        }
    }
}

/// Ordered record of open scopes. Opening and closing always go through
/// this type, so the generated text stays balanced.
#[derive(Debug, Default)]
pub struct BlockStack {
    open: Vec<BlockKind>,
}

impl BlockStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Innermost open block.
    pub fn innermost(&self) -> Option<BlockKind> {
        self.open.last().copied()
    }

    /// Whether a block of `kind` is open at any depth.
    pub fn contains(&self, kind: BlockKind) -> bool {
        self.open.contains(&kind)
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Emit `header` and push `kind`.
    pub fn open(&mut self, out: &mut String, kind: BlockKind, header: &str) {
        push_line(out, header);
        self.open.push(kind);
    }

    /// Close the innermost block, if any.
    pub fn close_innermost(&mut self, out: &mut String) -> Option<BlockKind> {
        let kind = self.open.pop()?;
        push_line(out, kind.close_text());
        Some(kind)
    }

    /// Close innermost blocks while `pred` holds for them.
    pub fn close_while(&mut self, out: &mut String, pred: impl Fn(BlockKind) -> bool) {
        while self.innermost().is_some_and(&pred) {
            self.close_innermost(out);
        }
    }

    /// Close every open block.
    pub fn close_all(&mut self, out: &mut String) {
        while self.close_innermost(out).is_some() {}
    }

    /// Replace the innermost block with `kind` using a single `header` line
    /// that both closes the old block and opens the new one (`} else {`).
    ///
    /// `header` must start with the old block's close text.
    pub fn chain(&mut self, out: &mut String, kind: BlockKind, header: &str) {
        if let Some(prev) = self.open.pop() {
            debug_assert!(header.starts_with(prev.close_text()));
        }
        self.open(out, kind, header);
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_all_is_lifo() {
        let mut out = String::new();
        let mut stack = BlockStack::new();
        stack.open(&mut out, BlockKind::Function, "function f() {");
        stack.open(&mut out, BlockKind::Event, "b.addEventListener('click', () => {");
        stack.open(&mut out, BlockKind::If, "if (x) {");
        stack.close_all(&mut out);
        assert_eq!(
            out,
            "function f() {\nb.addEventListener('click', () => {\nif (x) {\n}\n});\n}\n"
        );
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn close_innermost_on_empty_stack_emits_nothing() {
        let mut out = String::new();
        let mut stack = BlockStack::new();
        assert_eq!(stack.close_innermost(&mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn close_while_stops_at_first_mismatch() {
        let mut out = String::new();
        let mut stack = BlockStack::new();
        stack.open(&mut out, BlockKind::Class, "class A {");
        stack.open(&mut out, BlockKind::Method, "m() {");
        out.clear();
        stack.close_while(&mut out, |k| k == BlockKind::Method);
        assert_eq!(out, "}\n");
        assert_eq!(stack.innermost(), Some(BlockKind::Class));
    }

    #[test]
    fn chain_replaces_innermost() {
        let mut out = String::new();
        let mut stack = BlockStack::new();
        stack.open(&mut out, BlockKind::If, "if (a) {");
        stack.chain(&mut out, BlockKind::Else, "} else {");
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.innermost(), Some(BlockKind::Else));
        stack.close_all(&mut out);
        assert_eq!(out, "if (a) {\n} else {\n}\n");
    }
}
