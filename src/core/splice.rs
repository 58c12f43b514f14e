//! Splicing generated translations back into source files.
//!
//! Two layouts are supported:
//!
//! - **Inline**: the literal is appended to the file as
//!   `const translations = Object.freeze({...})`. Everything from that line to
//!   the end of the file belongs to the generator and is replaced on each run.
//! - **Sibling**: the literal lives in a separate module next to the source
//!   file, and the source gets a single `import translations from "..."` line
//!   at the top.
//!
//! Both are idempotent: splicing the output again with the same literal
//! returns it unchanged. With nothing to inject, previously generated code is
//! removed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Start of a generated inline block. `const translations = {` is what older
// versions of the generator emitted.
static INLINE_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^const translations = (?:Object\.freeze\(|\{)").unwrap()
});

// An import of a generated sibling module, including its line break.
static IMPORT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^import translations from ["'][^"'\n]*translations\.[A-Za-z]+["'];?[ \t]*(?:\r?\n|$)"#,
    )
    .unwrap()
});

/// Where generated translations go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SpliceMode {
    /// Append the literal at the end of the source file.
    #[default]
    Inline,
    /// Write the literal to a sibling module and import it.
    Sibling,
}

impl std::fmt::Display for SpliceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpliceMode::Inline => write!(f, "inline"),
            SpliceMode::Sibling => write!(f, "sibling"),
        }
    }
}

/// Splice target of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceTarget {
    Inline,
    /// `module_ref` is the import specifier of the sibling module,
    /// e.g. `./page.translations.js`.
    Sibling { module_ref: String },
}

/// The source text without any generated inline block.
pub fn strip_inline_block(source: &str) -> &str {
    match INLINE_BLOCK_REGEX.find(source) {
        Some(block) => &source[..block.start()],
        None => source,
    }
}

/// Replace the generated inline block with `literal`, or remove it.
pub fn splice_inline(source: &str, literal: Option<&str>) -> String {
    let block_start = INLINE_BLOCK_REGEX.find(source).map(|block| block.start());

    match (block_start, literal) {
        (None, None) => source.to_string(),
        (Some(start), None) => {
            let body = source[..start].trim_end();
            if body.is_empty() {
                String::new()
            } else {
                format!("{}\n", body)
            }
        }
        (start, Some(literal)) => {
            let body = source[..start.unwrap_or(source.len())].trim_end();
            if body.is_empty() {
                format!("const translations = {}\n", literal)
            } else {
                format!("{}\n\nconst translations = {}\n", body, literal)
            }
        }
    }
}

/// The import line for a sibling module.
pub fn import_line(module_ref: &str) -> String {
    format!("import translations from \"{}\"", module_ref)
}

/// Drop every import of a generated module and, when `module_ref` is given,
/// put exactly one fresh import at the top.
pub fn splice_import(source: &str, module_ref: Option<&str>) -> String {
    let body = IMPORT_LINE_REGEX.replace_all(source, "");
    match module_ref {
        Some(module_ref) => format!("{}\n{}", import_line(module_ref), body),
        None => body.into_owned(),
    }
}

/// Content of a sibling translations module.
pub fn sibling_module(literal: &str) -> String {
    format!("export default translations = {}\n", literal)
}

/// Whether two texts differ only in what a code formatter rewrites:
/// whitespace and semicolons outside template literals.
pub fn same_modulo_formatting(a: &str, b: &str) -> bool {
    significant_chars(a) == significant_chars(b)
}

fn significant_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_template = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_template {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '`' {
                in_template = false;
            }
        } else if c == '`' {
            in_template = true;
            out.push(c);
        } else if !c.is_whitespace() && c != ';' {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::splice::*;

    const LITERAL: &str = "Object.freeze({\n  a: {},\n})";

    #[test]
    fn test_inline_appends_block() {
        let out = splice_inline("show(translations.a.en)\n", Some(LITERAL));
        assert_eq!(
            out,
            "show(translations.a.en)\n\nconst translations = Object.freeze({\n  a: {},\n})\n"
        );
    }

    #[test]
    fn test_inline_is_idempotent() {
        let once = splice_inline("show(translations.a.en)\n\n\n", Some(LITERAL));
        let twice = splice_inline(&once, Some(LITERAL));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inline_replaces_stale_block() {
        let stale = "code()\n\nconst translations = Object.freeze({\n  old: {},\n})\n";
        let out = splice_inline(stale, Some(LITERAL));
        assert_eq!(out, format!("code()\n\nconst translations = {}\n", LITERAL));
    }

    #[test]
    fn test_inline_replaces_legacy_block() {
        let stale = "code()\n\nconst translations = {\"old\":{}}";
        let out = splice_inline(stale, Some(LITERAL));
        assert_eq!(out, format!("code()\n\nconst translations = {}\n", LITERAL));
    }

    #[test]
    fn test_inline_teardown() {
        let generated = format!("code()\n\nconst translations = {}\n", LITERAL);
        let out = splice_inline(&generated, None);
        assert_eq!(out, "code()\n");
        assert_eq!(splice_inline(&out, None), out);
    }

    #[test]
    fn test_inline_untouched_without_block_or_keys() {
        let source = "const x = 1   \n\n";
        assert_eq!(splice_inline(source, None), source);
    }

    #[test]
    fn test_inline_block_only_file() {
        let out = splice_inline("", Some(LITERAL));
        assert_eq!(out, format!("const translations = {}\n", LITERAL));
        assert_eq!(splice_inline(&out, None), "");
    }

    #[test]
    fn test_strip_inline_block() {
        let source = format!("code()\n\nconst translations = {}\n", LITERAL);
        assert_eq!(strip_inline_block(&source), "code()\n\n");
        assert_eq!(strip_inline_block("code()"), "code()");
    }

    #[test]
    fn test_block_must_start_a_line() {
        let source = "let x; x = 1; const translations = Object.freeze({})";
        assert_eq!(strip_inline_block(source), source);
    }

    #[test]
    fn test_import_prepended() {
        let out = splice_import("translations.simple.en", Some("./test.translations.js"));
        assert_eq!(
            out,
            "import translations from \"./test.translations.js\"\ntranslations.simple.en"
        );
    }

    #[test]
    fn test_import_is_idempotent() {
        let once = splice_import("translations.simple.en\n", Some("./test.translations.js"));
        let twice = splice_import(&once, Some("./test.translations.js"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_all_stale_imports_removed() {
        let source = "import translations from './old.translations.js';\n\
                      import React from \"react\"\n\
                      import translations from \"./page/translations.js\"\n\
                      render(translations.a.en)\n";
        let out = splice_import(source, Some("./page.translations.js"));
        assert_eq!(
            out,
            "import translations from \"./page.translations.js\"\n\
             import React from \"react\"\n\
             render(translations.a.en)\n"
        );
    }

    #[test]
    fn test_import_teardown() {
        let source = "import translations from \"./page.translations.js\"\nconst x = 1\n";
        assert_eq!(splice_import(source, None), "const x = 1\n");
    }

    #[test]
    fn test_unrelated_imports_kept() {
        let source = "import translations from \"./i18n\"\nconst x = 1\n";
        assert_eq!(splice_import(source, None), source);
    }

    #[test]
    fn test_formatter_changes_are_ignored() {
        let generated = splice_inline("show(a)\n", Some(LITERAL));
        let formatted = "show(a);\n\nconst translations = Object.freeze({\n  a: {},\n});\n";
        assert!(same_modulo_formatting(&generated, formatted));

        let rewrapped = "Object.freeze({ text: `Hej`,\n    rtl: false })";
        assert!(same_modulo_formatting(
            "Object.freeze({ text: `Hej`, rtl: false })",
            rewrapped
        ));
    }

    #[test]
    fn test_template_text_changes_are_not_ignored() {
        assert!(!same_modulo_formatting("{ text: `a b` }", "{ text: `a  b` }"));
        assert!(!same_modulo_formatting("{ text: `a;` }", "{ text: `a` }"));
        assert!(!same_modulo_formatting(r"{ text: `\` ;` }", r"{ text: `\``}"));
        assert!(!same_modulo_formatting("{ a: {} }", "{ b: {} }"));
    }

    #[test]
    fn test_sibling_module() {
        assert_eq!(
            sibling_module("Object.freeze({})"),
            "export default translations = Object.freeze({})\n"
        );
    }
}
