use std::fmt;

use super::{
    ast::{Document, Element, ElementKind, Import, Node, ScriptKind},
    diag::{Diagnostic, Span, codes},
    lexer::{TokKind, Token, tokenize},
};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Keywords that begin a new statement and so end an attribute list.
const STATEMENT_WORDS: &[&str] = &["create", "add", "function", "import"];

/// Extension words accepted directly after an import path (`[app] js`).
const PATH_EXTENSIONS: &[&str] = &["js", "ts", "css", "ceng", "seng"];

/// Name given to a `function` with no identifier after it.
pub const ANONYMOUS_FUNCTION: &str = "anonymous";

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A token of one kind.
    Kind(TokKind),
    /// A keyword or an identifier.
    Word,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => kind.fmt(f),
            Expected::Word => f.write_str("KEYWORD or IDENTIFIER"),
        }
    }
}

/// A failed expectation. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The current token had the wrong kind.
    #[error("Expected {expected}, got {found}")]
    UnexpectedKind {
        /// What was required.
        expected: Expected,
        /// What was found.
        found: TokKind,
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// Byte span of the offending token.
        span: Span,
    },
    /// The current token had the right kind but the wrong text.
    #[error("Expected '{expected}', got '{found}'")]
    UnexpectedValue {
        /// The required text.
        expected: &'static str,
        /// The text found.
        found: String,
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// Byte span of the offending token.
        span: Span,
    },
}

impl ParseError {
    /// Byte span of the offending token.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedKind { span, .. } | ParseError::UnexpectedValue { span, .. } => {
                *span
            }
        }
    }

    /// `(line, column)` of the offending token, both 1-based.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnexpectedKind { line, column, .. }
            | ParseError::UnexpectedValue { line, column, .. } => (*line, *column),
        }
    }

    /// Render as an error diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (line, column) = self.position();
        Diagnostic::error(
            codes::PARSER_EXPECTED_TOKEN,
            self.to_string(),
            Some(self.span()),
        )
        .with_context(ctx!("line" => line.to_string(), "column" => column.to_string()))
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse structural-dialect source into a [`Document`].
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    parse_tokens(tokenize(input))
}

/// Parse an already tokenized input. `tokens` must end with an EOF token,
/// as produced by [`tokenize`].
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Document, ParseError> {
    Parser::new(tokens).parse()
}

struct Parser {
    toks: Vec<Token>,
    pos: usize,
    /// Span of the most recently consumed token.
    last: Span,
}

impl Parser {
    fn new(mut toks: Vec<Token>) -> Self {
        if toks.last().is_none_or(|t| t.kind != TokKind::Eof) {
            let end = toks.last().map_or(0, |t| t.span.end);
            let (line, column) = toks.last().map_or((1, 1), |t| (t.line, t.column));
            toks.push(Token {
                kind: TokKind::Eof,
                value: String::new(),
                line,
                column,
                span: Span::empty(end),
            });
        }
        Self {
            toks,
            pos: 0,
            last: Span::empty(0),
        }
    }

    fn parse(mut self) -> Result<Document, ParseError> {
        let mut nodes = Vec::new();
        while !self.at_end() {
            if let Some(node) = self.statement()? {
                nodes.push(node);
            }
        }
        Ok(Document { nodes })
    }

    // ── token cursor ────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        let idx = self.pos.min(self.toks.len() - 1);
        &self.toks[idx]
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.at_end() {
            self.pos += 1;
            self.last = tok.span;
        }
        tok
    }

    /// Consume the current token if it has `kind` (and, when given, exactly
    /// the text `value`), otherwise fail without consuming.
    fn expect(&mut self, kind: TokKind, value: Option<&'static str>) -> Result<Token, ParseError> {
        let tok = self.peek();
        if tok.kind != kind {
            return Err(ParseError::UnexpectedKind {
                expected: Expected::Kind(kind),
                found: tok.kind,
                line: tok.line,
                column: tok.column,
                span: tok.span,
            });
        }
        if let Some(value) = value
            && tok.value != value
        {
            return Err(ParseError::UnexpectedValue {
                expected: value,
                found: tok.value.clone(),
                line: tok.line,
                column: tok.column,
                span: tok.span,
            });
        }
        Ok(self.advance())
    }

    /// Consume a keyword or identifier.
    fn expect_word(&mut self) -> Result<Token, ParseError> {
        let tok = self.peek();
        if !tok.is_word() {
            return Err(ParseError::UnexpectedKind {
                expected: Expected::Word,
                found: tok.kind,
                line: tok.line,
                column: tok.column,
                span: tok.span,
            });
        }
        Ok(self.advance())
    }

    /// Consume a string token if one is next.
    fn optional_string(&mut self) -> Option<String> {
        (self.peek().kind == TokKind::String).then(|| self.advance().value)
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.join(self.last)
    }

    // ── statements ──────────────────────────────────────────────────────

    fn statement(&mut self) -> Result<Option<Node>, ParseError> {
        let tok = self.peek();
        if tok.kind != TokKind::Keyword {
            self.advance();
            return Ok(None);
        }
        let word = tok.value.clone();
        match word.as_str() {
            "create" => self.create(),
            "add" => self.add().map(Some),
            "function" => self.function().map(Some),
            "import" => self.import().map(Some),
            "script" | "cscript" | "cstyle" => Ok(Some(self.script_block())),
            "title" | "tite" => Ok(Some(self.title())),
            _ => {
                self.advance();
                Ok(None)
            }
        }
    }

    /// `create page` swallows every remaining statement; `create` followed
    /// by anything else produces nothing and leaves that token in place.
    fn create(&mut self) -> Result<Option<Node>, ParseError> {
        let start = self.expect(TokKind::Keyword, Some("create"))?.span;
        if !self.peek().is_keyword("page") {
            return Ok(None);
        }
        self.advance();
        let span = self.span_from(start);
        let mut children = Vec::new();
        while !self.at_end() {
            if let Some(node) = self.statement()? {
                children.push(node);
            }
        }
        Ok(Some(Node::Page { children, span }))
    }

    fn add(&mut self) -> Result<Node, ParseError> {
        let start = self.expect(TokKind::Keyword, Some("add"))?.span;
        let kind = self.expect_word()?.value;
        let content = self.optional_string().unwrap_or_default();
        let attrs = self.attr_list();
        let span = self.span_from(start);
        if kind == "title" || kind == "tite" {
            return Ok(Node::Title { content, span });
        }
        Ok(Node::Element(Element {
            kind: ElementKind::from_word(&kind),
            content,
            attrs,
            span,
        }))
    }

    /// `with a and b ...`. Stops at a non-word token or a statement keyword.
    fn attr_list(&mut self) -> Vec<String> {
        let mut attrs = Vec::new();
        if !self.peek().is_keyword("with") {
            return attrs;
        }
        self.advance();
        while self.peek().is_word() {
            let word = self.peek().value.as_str();
            if STATEMENT_WORDS.contains(&word) {
                break;
            }
            let tok = self.advance();
            if tok.value != "and" {
                attrs.push(tok.value);
            }
        }
        attrs
    }

    fn function(&mut self) -> Result<Node, ParseError> {
        let start = self.expect(TokKind::Keyword, Some("function"))?.span;
        let name = if self.peek().kind == TokKind::Identifier {
            self.advance().value
        } else {
            ANONYMOUS_FUNCTION.to_owned()
        };
        let span = self.span_from(start);
        let mut children = Vec::new();
        while !self.at_end() && !self.peek().is_keyword("function") {
            if let Some(node) = self.statement()? {
                children.push(node);
            }
        }
        Ok(Node::Function {
            name,
            children,
            span,
        })
    }

    fn import(&mut self) -> Result<Node, ParseError> {
        let start = self.expect(TokKind::Keyword, Some("import"))?.span;
        let is_from = |t: &Token| t.is_keyword("from") || t.is_keyword("form");

        let import_type = (self.peek().is_word() && !is_from(self.peek()))
            .then(|| self.advance().value);
        if is_from(self.peek()) {
            self.advance();
        }

        let mut path = None;
        if self.peek().kind == TokKind::Path {
            let mut p = self.advance().value;
            let next = self.peek();
            if next.kind == TokKind::Identifier && PATH_EXTENSIONS.contains(&next.value.as_str()) {
                p.push('.');
                p.push_str(&self.advance().value);
            }
            path = Some(p);
        }

        Ok(Node::Import(Import {
            import_type,
            path,
            compiled: None,
            span: self.span_from(start),
        }))
    }

    fn script_block(&mut self) -> Node {
        let tok = self.advance();
        let kind = ScriptKind::from_keyword(&tok.value).unwrap_or(ScriptKind::Script);
        let attrs = self.attr_list();
        Node::ScriptBlock {
            kind,
            attrs,
            span: self.span_from(tok.span),
        }
    }

    fn title(&mut self) -> Node {
        let start = self.advance().span;
        let content = self.optional_string().unwrap_or_default();
        Node::Title {
            content,
            span: self.span_from(start),
        }
    }
}
