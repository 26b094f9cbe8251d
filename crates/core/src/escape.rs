//! HTML escaping for text content and attribute values.
//!
//! The five characters `& < > " '` are replaced with entity references.
//! Input with none of them is returned borrowed.

use std::borrow::Cow;

fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#039;"),
        _ => None,
    }
}

/// Escape `text` for use in HTML content or a double-quoted attribute.
///
/// Not idempotent: escaping `&amp;` again yields `&amp;amp;`. Callers
/// escape each value exactly once while rendering.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
