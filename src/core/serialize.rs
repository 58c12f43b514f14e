//! Canonical JavaScript literal rendering.
//!
//! The generated literal is diffed byte-for-byte between runs, so the layout
//! is fixed:
//!
//! ```text
//! Object.freeze({
//!   greeting: {
//!     en: Object.freeze({ text: `Hello`, rtl: false, languageId: `en` }),
//!     sv: Object.freeze({ text: `Hej`, rtl: false, languageId: `sv` }),
//!   },
//! })
//! ```
//!
//! Strings are template literals, so `"` and `'` in translated text are kept
//! as they are.

use std::{fmt::Write, sync::LazyLock};

use regex::Regex;

use crate::core::{Node, ResolvedEntry, ResolvedTree};

/// Indentation per nesting level.
pub const INDENT: &str = "  ";

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Render a resolved tree as a frozen object literal.
pub fn serialize(tree: &ResolvedTree) -> String {
    let mut out = String::from("Object.freeze(");
    write_branch(&mut out, tree.iter(), 0);
    out.push(')');
    out
}

/// Render a single node at the given nesting depth.
pub fn serialize_node(node: &Node, depth: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, node, depth);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Leaf(entry) => write_entry(out, entry),
        Node::Branch(children) => write_branch(out, children.iter(), depth),
        Node::List(items) => {
            let items: Vec<String> = items.iter().map(|item| template_literal(item)).collect();
            let _ = write!(out, "Object.freeze([{}])", items.join(", "));
        }
    }
}

fn write_branch<'a>(
    out: &mut String,
    children: impl ExactSizeIterator<Item = (&'a String, &'a Node)>,
    depth: usize,
) {
    if children.len() == 0 {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (key, child) in children {
        out.push_str(&INDENT.repeat(depth + 1));
        out.push_str(&object_key(key));
        out.push_str(": ");
        write_node(out, child, depth + 1);
        out.push_str(",\n");
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}

// Always one line, whatever the depth.
fn write_entry(out: &mut String, entry: &ResolvedEntry) {
    let _ = write!(
        out,
        "Object.freeze({{ text: {}, rtl: {}, languageId: {} }})",
        template_literal(entry.text()),
        entry.rtl(),
        template_literal(entry.language_id())
    );
}

/// Identifier-like keys stay bare, anything else is double-quoted.
pub fn object_key(key: &str) -> String {
    if IDENTIFIER_REGEX.is_match(key) {
        key.to_string()
    } else {
        double_quoted(key)
    }
}

/// Quote text as a template literal.
///
/// Backslashes, backticks and `${` are escaped, as are line breaks and other
/// control characters so an entry always stays on one line.
pub fn template_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('`');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('`');
    out
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
