//! Whole-text English idiom rewrites applied before line dispatch.

use std::sync::LazyLock;

use regex::Regex;

/// `(pattern, replacement)` pairs, applied in order to the whole source.
static IDIOMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r#"(?i)get element by id\s+["']([^"']+)["']"#,
            r#"document.getElementById("${1}")"#,
        ),
        (
            r#"(?i)get element by selector\s+["']([^"']+)["']"#,
            r#"document.querySelector("${1}")"#,
        ),
        (
            r"(?i)requestAnimationFrame\s+(\w+)",
            "requestAnimationFrame(${1})",
        ),
        (
            r"(?i)request animation frame\s+(\w+)",
            "requestAnimationFrame(${1})",
        ),
        (
            r"(?i)for\s+(\w+)\s+from\s+(\d+)\s+to\s+(\d+)",
            "for (let ${1} = ${2}; ${1} <= ${3}; ${1}++) {",
        ),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("idiom pattern is a valid regex"),
            replacement,
        )
    })
    .collect()
});

/// Rewrite DOM lookup phrases, animation-frame shorthand, and counting
/// loops into JavaScript syntax.
pub fn expand_idioms(source: &str) -> String {
    IDIOMS
        .iter()
        .fold(source.to_owned(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}
