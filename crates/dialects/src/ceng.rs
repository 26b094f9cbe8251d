//! Styling dialect (`.ceng`) → CSS.
//!
//! Purely line-local: selectors get `class`/`id`/`when` sugar rewritten,
//! property lines get alias names expanded and a trailing `;`.

use std::sync::LazyLock;

use regex::Regex;

use crate::raw;

/// Property aliases, matched case-insensitively as `alias:` at line start.
/// The first matching entry wins.
pub const PROPERTY_ALIASES: &[(&str, &str)] = &[
    ("background", "background-color"),
    ("bg", "background-color"),
    ("size", "font-size"),
    ("color", "color"),
    ("padding", "padding"),
    ("margin", "margin"),
    ("border", "border"),
    ("font", "font-family"),
    ("width", "width"),
    ("height", "height"),
    ("display", "display"),
    ("flex", "flex-direction"),
];

static LEADING_FOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^for\s+").expect("valid regex"));
static CLASS_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^class\s+(\w+)(\s*\{|\s+when\s|$)").expect("valid regex")
});
static ID_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^id\s+(\w+)(\s*\{|\s+when\s|$)").expect("valid regex")
});
static PSEUDO_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+when\s+(\w+)\s*\{").expect("valid regex"));
static PROPERTY: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PROPERTY_ALIASES
        .iter()
        .map(|(alias, property)| {
            let re = Regex::new(&format!(r"(?i)^{alias}:\s*")).expect("valid regex");
            (re, *property)
        })
        .collect()
});

/// Rewrite styling-dialect source into CSS.
///
/// A leading `@raw` line returns the remainder of the file unchanged.
/// Blank lines and `--` comment lines are dropped.
pub fn rewrite(source: &str) -> String {
    if let Some(body) = raw::strip_marker(source) {
        return body.to_owned();
    }
    let mut out = String::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        out.push_str(&rewrite_line(line));
        out.push('\n');
    }
    out
}

fn rewrite_line(line: &str) -> String {
    let mut line = LEADING_FOR.replace(line, "").into_owned();

    if let Some(selector) = sugar_selector(&CLASS_SELECTOR, '.', &line)
        .or_else(|| sugar_selector(&ID_SELECTOR, '#', &line))
    {
        line = selector;
    }

    let pseudo = PSEUDO_STATE
        .captures(&line)
        .map(|caps| format!("{}:{} {{", &caps[1], &caps[2]));
    if let Some(pseudo) = pseudo {
        line = pseudo;
    }

    if let Some((re, property)) = PROPERTY.iter().find(|(re, _)| re.is_match(&line)) {
        line = re.replace(&line, format!("{property}: ")).into_owned();
    }

    if !(line.ends_with('{') || line.ends_with('}') || line.ends_with(';')) {
        line.push(';');
    }
    line
}

/// `class NAME ...` → `.NAME ...` (or `#` for `id`), keeping whatever
/// follows the name.
fn sugar_selector(re: &Regex, sigil: char, line: &str) -> Option<String> {
    let caps = re.captures(line)?;
    let name = caps.get(1)?;
    Some(format!("{sigil}{}{}", name.as_str(), &line[name.end()..]))
}
