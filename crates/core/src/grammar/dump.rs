use super::{ast::Document, lexer::Token};

/// Serialize a document to a pretty-printed JSON string.
pub fn to_pretty_json(doc: &Document) -> String {
    serde_json::to_string_pretty(doc).expect("Document serialization cannot fail")
}

/// Serialize a token stream to a pretty-printed JSON string.
pub fn tokens_to_pretty_json(tokens: &[Token]) -> String {
    serde_json::to_string_pretty(tokens).expect("Token serialization cannot fail")
}
