//! Parser tests: statement dispatch, attribute lists, imports, and failures.

mod common;

use common::elements;
use eng_toolchain_core::grammar::parser::ANONYMOUS_FUNCTION;
use eng_toolchain_core::{Document, ElementKind, Import, Node, ParseError, ScriptKind, parse_str};

fn parse(input: &str) -> Document {
    parse_str(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
}

fn only_import(input: &str) -> Import {
    match parse(input).nodes.as_slice() {
        [Node::Import(i)] => i.clone(),
        other => panic!("expected a single import, got {other:?}"),
    }
}

// ── create page ─────────────────────────────────────────────────────────────

#[test]
fn create_page_swallows_everything_after_it() {
    let doc = parse("create page\nadd heading\nfunction main\nadd paragraph");
    assert_eq!(doc.nodes.len(), 1);
    let Node::Page { children, .. } = &doc.nodes[0] else {
        panic!("expected page");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(children[1], Node::Function { .. }));
}

#[test]
fn create_without_page_produces_nothing() {
    let doc = parse("create heading\nadd paragraph");
    assert_eq!(doc.nodes.len(), 1);
    assert_eq!(elements(&doc)[0].kind, ElementKind::Paragraph);
}

#[test]
fn keywords_are_case_insensitive() {
    let doc = parse("CREATE Page\nADD Heading \"Hi\"");
    let els = elements(&doc);
    assert_eq!(els.len(), 1);
    assert_eq!(els[0].kind, ElementKind::Heading);
    assert_eq!(els[0].content, "Hi");
}

// ── add ─────────────────────────────────────────────────────────────────────

#[test]
fn add_with_content_and_attributes() {
    let doc = parse("add button \"Go\" with primary and large");
    let el = elements(&doc)[0];
    assert_eq!(el.kind, ElementKind::Button);
    assert_eq!(el.content, "Go");
    assert_eq!(el.attrs, ["primary", "large"]);
}

#[test]
fn attribute_list_stops_at_statement_keyword() {
    let doc = parse("add div with a and b add heading create page");
    let els = elements(&doc);
    assert_eq!(els.len(), 2);
    assert_eq!(els[0].attrs, ["a", "b"]);
    assert_eq!(els[1].kind, ElementKind::Heading);
    assert!(els[1].attrs.is_empty());
}

#[test]
fn attribute_list_stops_at_non_word() {
    let doc = parse("add link with nav \"stray\" add label");
    let els = elements(&doc);
    assert_eq!(els[0].attrs, ["nav"]);
    assert_eq!(els[0].content, "");
    assert_eq!(els[1].kind, ElementKind::Label);
}

#[test]
fn non_statement_keywords_are_valid_attributes() {
    let doc = parse("add paragraph with title and style");
    assert_eq!(elements(&doc)[0].attrs, ["title", "style"]);
}

#[test]
fn unknown_element_kind_is_kept() {
    let doc = parse("add marquee \"x\"");
    assert_eq!(elements(&doc)[0].kind, ElementKind::Other("marquee".into()));
}

#[test]
fn add_title_is_a_title() {
    let doc = parse("add title \"Home\"");
    assert!(matches!(
        &doc.nodes[0],
        Node::Title { content, .. } if content == "Home"
    ));
}

#[test]
fn string_escapes_reach_content() {
    let doc = parse(r#"add div "line one\nline \"two\"""#);
    assert_eq!(elements(&doc)[0].content, "line one\nline \"two\"");
}

// ── function ────────────────────────────────────────────────────────────────

#[test]
fn function_collects_until_next_function() {
    let doc = parse("function setup\ntitle \"T\"\nfunction main\nadd heading\nadd paragraph");
    assert_eq!(doc.nodes.len(), 2);
    let Node::Function { name, children, .. } = &doc.nodes[0] else {
        panic!("expected function");
    };
    assert_eq!(name, "setup");
    assert_eq!(children.len(), 1);
    assert!(doc.nodes[0].is_setup());
    let Node::Function { name, children, .. } = &doc.nodes[1] else {
        panic!("expected function");
    };
    assert_eq!(name, "main");
    assert_eq!(children.len(), 2);
}

#[test]
fn function_without_identifier_is_anonymous() {
    let doc = parse("function \"x\" add heading");
    let Node::Function { name, children, .. } = &doc.nodes[0] else {
        panic!("expected function");
    };
    assert_eq!(name, ANONYMOUS_FUNCTION);
    assert_eq!(children.len(), 1);
}

// ── import ──────────────────────────────────────────────────────────────────

#[test]
fn import_with_type_and_path() {
    let i = only_import("import seng from [scripts/app.seng]");
    assert_eq!(i.import_type.as_deref(), Some("seng"));
    assert_eq!(i.path.as_deref(), Some("scripts/app.seng"));
    assert_eq!(i.compiled, None);
}

#[test]
fn import_accepts_form_spelling() {
    let i = only_import("import ceng form [site.ceng]");
    assert_eq!(i.path.as_deref(), Some("site.ceng"));
}

#[test]
fn import_extension_word_is_appended() {
    for ext in ["js", "ts", "css", "ceng", "seng"] {
        let i = only_import(&format!("import x from [lib] {ext}"));
        assert_eq!(i.path.as_deref(), Some(format!("lib.{ext}").as_str()));
    }
}

#[test]
fn import_unknown_extension_word_is_not_appended() {
    let doc = parse("import x from [lib] html");
    let Node::Import(i) = &doc.nodes[0] else {
        panic!("expected import");
    };
    assert_eq!(i.path.as_deref(), Some("lib"));
}

#[test]
fn import_type_and_path_are_optional() {
    let i = only_import("import from [a.js]");
    assert_eq!(i.import_type, None);
    assert_eq!(i.path.as_deref(), Some("a.js"));

    let i = only_import("import seng");
    assert_eq!(i.import_type.as_deref(), Some("seng"));
    assert_eq!(i.path, None);
}

// ── script blocks and titles ────────────────────────────────────────────────

#[test]
fn script_blocks() {
    let doc = parse("cscript\nscript with ts add heading\ncstyle with dark and wide");
    let kinds: Vec<_> = doc
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::ScriptBlock { kind, attrs, .. } => Some((*kind, attrs.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        [
            (ScriptKind::Cscript, vec![]),
            (ScriptKind::Script, vec!["ts".to_string()]),
            (ScriptKind::Cstyle, vec!["dark".to_string(), "wide".to_string()]),
        ]
    );
    assert_eq!(elements(&doc).len(), 1);
}

#[test]
fn title_spellings() {
    let doc = parse("tite \"A\"\ntitle");
    let titles: Vec<_> = doc
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Title { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, ["A", ""]);
}

#[test]
fn stray_tokens_are_skipped() {
    let doc = parse("hello \"world\" [path] page with and\nadd heading");
    assert_eq!(doc.nodes.len(), 1);
}

// ── failures ────────────────────────────────────────────────────────────────

#[test]
fn add_followed_by_path_fails_with_position() {
    let err = parse_str("create page\n  add [x]").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedKind { .. }));
    assert_eq!(err.position(), (2, 7));
    assert_eq!(err.to_string(), "Expected KEYWORD or IDENTIFIER, got PATH");
}

#[test]
fn failure_stops_parsing() {
    assert!(parse_str("add heading\nadd \"oops\"\nadd paragraph").is_err());
}
