use serde::Serialize;

use super::diag::Span;

/// Reserved words of the structural dialect. A word token whose lower-cased
/// text is in this list is a [`TokKind::Keyword`]; any other word is an
/// [`TokKind::Identifier`].
pub const KEYWORDS: &[&str] = &[
    // page structure
    "create", "page", "add", "function", "import", "from", "form", "with", "and",
    // elements
    "heading", "paragraph", "button", "link", "image", "div", "span", "style", "script",
    "input", "label", "select", "option", "textarea", "table", "row", "cell", "list", "item",
    "code", "section", "article", "nav", "footer", "header", "title", "meta",
    // embedded blocks
    "cscript", "cstyle",
    // document metadata
    "heng_verson", "html_verson", "tite",
];

/// Whether `word` (already lower-cased) is reserved.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Classification of a structural-dialect token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokKind {
    /// A reserved word from [`KEYWORDS`].
    Keyword,
    /// Any other word.
    Identifier,
    /// Double-quoted text, escapes decoded.
    String,
    /// Bracketed `[ ... ]` text, trimmed.
    Path,
    /// End of input. Always the last token, exactly once.
    Eof,
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokKind::Keyword => "KEYWORD",
            TokKind::Identifier => "IDENTIFIER",
            TokKind::String => "STRING",
            TokKind::Path => "PATH",
            TokKind::Eof => "EOF",
        })
    }
}

/// A token. Word values are lower-cased and string values are decoded, so
/// tokens own their text rather than borrowing the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The classification of this token.
    pub kind: TokKind,
    /// Normalized token text.
    pub value: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column (in characters) of the first character.
    pub column: usize,
    /// Byte range of the raw token text in the input.
    pub span: Span,
}

impl Token {
    /// True for the keyword `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokKind::Keyword && self.value == word
    }

    /// True for keywords and identifiers.
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokKind::Keyword | TokKind::Identifier)
    }
}

/// Tokenize structural-dialect source.
///
/// Never fails: characters that cannot start a token are dropped. The
/// result always ends with a single [`TokKind::Eof`] token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    toks: Vec<Token>,
}

/// Position of a token's first character.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            toks: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek() {
            match c {
                '"' => self.read_string(),
                '[' => self.read_path(),
                c if c.is_ascii_alphabetic() => self.read_word(),
                // Whitespace, newlines, and anything unrecognised.
                _ => {
                    self.bump();
                }
            }
        }
        let end = Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        };
        self.push(TokKind::Eof, String::new(), end);
        self.toks
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn push(&mut self, kind: TokKind, value: String, start: Mark) {
        self.toks.push(Token {
            kind,
            value,
            line: start.line,
            column: start.column,
            span: Span::new(start.pos, self.pos),
        });
    }

    /// `"..."` with `\n` decoded and any other escaped char taken literally.
    /// An unterminated string runs to end of input.
    fn read_string(&mut self) {
        let start = self.mark();
        self.bump();
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => break,
                '\\' => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some(escaped) => value.push(escaped),
                    None => value.push('\\'),
                },
                _ => value.push(c),
            }
        }
        self.push(TokKind::String, value, start);
    }

    /// `[ ... ]` with no escapes; the interior is trimmed.
    fn read_path(&mut self) {
        let start = self.mark();
        self.bump();
        let inner_start = self.pos;
        let mut inner_end = self.pos;
        while let Some(c) = self.bump() {
            if c == ']' {
                break;
            }
            inner_end = self.pos;
        }
        let value = self.input[inner_start..inner_end].trim().to_owned();
        self.push(TokKind::Path, value, start);
    }

    fn read_word(&mut self) {
        let start = self.mark();
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            self.bump();
        }
        let value = self.input[start.pos..self.pos].to_ascii_lowercase();
        let kind = if is_keyword(&value) {
            TokKind::Keyword
        } else {
            TokKind::Identifier
        };
        self.push(kind, value, start);
    }
}
