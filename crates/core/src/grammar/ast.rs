use std::path::Path;

use eng_toolchain_dialects::Dialect;
use serde::{Deserialize, Serialize};

use super::diag::Span;

/// Function-name prefix that marks a function as document setup: its
/// titles and imports are hoisted into `<head>` and its body never renders.
pub const SETUP_PREFIX: &str = "setup";

/// A parsed structural-dialect document (the tree root).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Document {
    /// Top-level statements in source order.
    pub nodes: Vec<Node>,
}

/// A statement in the structural dialect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Node {
    /// `create page`, holding every statement that follows it.
    Page {
        /// Statements inside the page.
        children: Vec<Node>,
        /// Source span of the `create page` header.
        span: Span,
    },
    /// `function <name>`, holding statements up to the next `function`.
    Function {
        /// Lower-cased function name, `anonymous` when omitted.
        name: String,
        /// Statements inside the function body.
        children: Vec<Node>,
        /// Source span of the `function` header.
        span: Span,
    },
    /// `import <type> from [<path>]`.
    Import(Import),
    /// `title "..."` (or the `tite` spelling).
    Title {
        /// Title text, empty when no string followed.
        content: String,
        /// Source span of the statement.
        span: Span,
    },
    /// `script`, `cscript` or `cstyle`, rendered as a placeholder block.
    ScriptBlock {
        /// Which keyword opened the block.
        kind: ScriptKind,
        /// Attribute words from the `with ... and ...` list.
        attrs: Vec<String>,
        /// Source span of the statement.
        span: Span,
    },
    /// `add <kind> ["content"] [with ...]`.
    Element(Element),
}

impl Node {
    /// Source span of the statement header.
    pub fn span(&self) -> Span {
        match self {
            Node::Page { span, .. }
            | Node::Function { span, .. }
            | Node::Title { span, .. }
            | Node::ScriptBlock { span, .. } => *span,
            Node::Import(import) => import.span,
            Node::Element(element) => element.span,
        }
    }

    /// True for a function whose name starts with [`SETUP_PREFIX`].
    pub fn is_setup(&self) -> bool {
        matches!(self, Node::Function { name, .. } if name.starts_with(SETUP_PREFIX))
    }
}

/// An `import` statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Import {
    /// The word between `import` and `from`, if any. Set to the dialect
    /// name once the import has been compiled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_type: Option<String>,
    /// Bracketed path, with any trailing extension word appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Compiled output of the imported file, filled in by import resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiled: Option<String>,
    /// Source span of the statement.
    pub span: Span,
}

impl Import {
    /// Dialect implied by the path suffix, if it names one.
    pub fn dialect(&self) -> Option<Dialect> {
        self.path.as_deref().and_then(|p| Dialect::from_path(Path::new(p)))
    }
}

/// The keyword that opened a [`Node::ScriptBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// `script`
    Script,
    /// `cscript`
    Cscript,
    /// `cstyle`
    Cstyle,
}

impl ScriptKind {
    /// Map a lower-cased keyword to its block kind.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "script" => Some(ScriptKind::Script),
            "cscript" => Some(ScriptKind::Cscript),
            "cstyle" => Some(ScriptKind::Cstyle),
            _ => None,
        }
    }
}

/// A markup element added with `add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// Element kind, from the word after `add`.
    pub kind: ElementKind,
    /// Quoted content, empty when none was given.
    pub content: String,
    /// Attribute words from the `with ... and ...` list, in order.
    pub attrs: Vec<String>,
    /// Source span of the statement.
    pub span: Span,
}

/// Kind of an [`Element`]. Serialized as the upper-cased source word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(missing_docs)]
pub enum ElementKind {
    Heading,
    Paragraph,
    Button,
    Link,
    Image,
    Div,
    Input,
    Label,
    Span,
    Section,
    Article,
    Nav,
    Footer,
    Header,
    Code,
    Form,
    Textarea,
    Select,
    Option,
    Table,
    Row,
    Cell,
    List,
    Item,
    /// Any other word; renders nothing.
    Other(String),
}

impl ElementKind {
    /// Classify a source word (case-insensitive).
    pub fn from_word(word: &str) -> Self {
        match word.to_ascii_lowercase().as_str() {
            "heading" => ElementKind::Heading,
            "paragraph" => ElementKind::Paragraph,
            "button" => ElementKind::Button,
            "link" => ElementKind::Link,
            "image" => ElementKind::Image,
            "div" => ElementKind::Div,
            "input" => ElementKind::Input,
            "label" => ElementKind::Label,
            "span" => ElementKind::Span,
            "section" => ElementKind::Section,
            "article" => ElementKind::Article,
            "nav" => ElementKind::Nav,
            "footer" => ElementKind::Footer,
            "header" => ElementKind::Header,
            "code" => ElementKind::Code,
            "form" => ElementKind::Form,
            "textarea" => ElementKind::Textarea,
            "select" => ElementKind::Select,
            "option" => ElementKind::Option,
            "table" => ElementKind::Table,
            "row" => ElementKind::Row,
            "cell" => ElementKind::Cell,
            "list" => ElementKind::List,
            "item" => ElementKind::Item,
            other => ElementKind::Other(other.to_owned()),
        }
    }

    /// Lower-cased source word for this kind.
    pub fn word(&self) -> &str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Button => "button",
            ElementKind::Link => "link",
            ElementKind::Image => "image",
            ElementKind::Div => "div",
            ElementKind::Input => "input",
            ElementKind::Label => "label",
            ElementKind::Span => "span",
            ElementKind::Section => "section",
            ElementKind::Article => "article",
            ElementKind::Nav => "nav",
            ElementKind::Footer => "footer",
            ElementKind::Header => "header",
            ElementKind::Code => "code",
            ElementKind::Form => "form",
            ElementKind::Textarea => "textarea",
            ElementKind::Select => "select",
            ElementKind::Option => "option",
            ElementKind::Table => "table",
            ElementKind::Row => "row",
            ElementKind::Cell => "cell",
            ElementKind::List => "list",
            ElementKind::Item => "item",
            ElementKind::Other(word) => word,
        }
    }

    /// HTML tag for the plain-tag kinds. The core kinds with bespoke
    /// markup (heading, link, image, div, input, ...) and unknown kinds
    /// return `None`.
    pub fn plain_tag(&self) -> Option<&'static str> {
        Some(match self {
            ElementKind::Span => "span",
            ElementKind::Section => "section",
            ElementKind::Article => "article",
            ElementKind::Nav => "nav",
            ElementKind::Footer => "footer",
            ElementKind::Header => "header",
            ElementKind::Code => "code",
            ElementKind::Form => "form",
            ElementKind::Textarea => "textarea",
            ElementKind::Select => "select",
            ElementKind::Option => "option",
            ElementKind::Table => "table",
            ElementKind::Row => "tr",
            ElementKind::Cell => "td",
            ElementKind::List => "ul",
            ElementKind::Item => "li",
            _ => return None,
        })
    }
}

impl From<String> for ElementKind {
    fn from(word: String) -> Self {
        ElementKind::from_word(&word)
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.word().to_ascii_uppercase()
    }
}

impl Document {
    /// Every import that resolution considers: top-level imports and
    /// imports that are direct children of a top-level function, in
    /// document order.
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.nodes.iter().flat_map(|node| {
            let nested: &[Node] = match node {
                Node::Function { children, .. } => children,
                _ => &[],
            };
            std::iter::once(node).chain(nested).filter_map(|n| match n {
                Node::Import(import) => Some(import),
                _ => None,
            })
        })
    }
}
