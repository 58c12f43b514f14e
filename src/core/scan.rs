//! Translation key usage scanning.
//!
//! Source files reference translations through a root binding named
//! `translations`: `translations.greeting.en` or `translations.animal[lang]`.
//! Only the first segment after the root (`greeting`, `animal`) is a catalog
//! key; the rest is looked up at runtime in the generated data.
//!
//! The default scanner is lexical. It does not parse the file, so a
//! `translations.x.y` inside a string or comment is also reported. That is an
//! accepted tradeoff; an AST-based scanner can replace it behind the
//! [`UsageScanner`] trait without touching the rest of the pipeline.
//!
//! Scanning resumes right after each key, so a reference used as an index
//! (`translations.animal[translations.kind.en]`) is found as well.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

// `translations.<key>` followed by a member access or an index access.
static USAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btranslations\.([A-Za-z_$][A-Za-z0-9_$]*)(?:\.[A-Za-z_$]|\[[^\]]+\])").unwrap()
});

/// One reference to a translation key in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub key: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    /// The full source line containing the reference.
    pub source_line: String,
}

/// Finds the translation keys a source text refers to.
pub trait UsageScanner: Sync {
    /// Every reference, in source order.
    fn usages(&self, source: &str) -> Vec<KeyUsage>;

    /// Distinct root keys, sorted.
    fn used_keys(&self, source: &str) -> BTreeSet<String> {
        self.usages(source).into_iter().map(|usage| usage.key).collect()
    }
}

/// Regex-based [`UsageScanner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScanner;

impl UsageScanner for RegexScanner {
    fn usages(&self, source: &str) -> Vec<KeyUsage> {
        let line_index = build_line_index(source);

        let mut usages = Vec::new();
        let mut pos = 0;
        while let Some(caps) = USAGE_REGEX.captures_at(source, pos) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            pos = key.end();

            let line = offset_to_line(&line_index, whole.start());
            let line_start = line_index[line - 1];
            let line_end = source[line_start..]
                .find('\n')
                .map_or(source.len(), |end| line_start + end);
            let source_line = source[line_start..line_end].trim_end_matches('\r');
            let col = source[line_start..whole.start()].chars().count() + 1;

            usages.push(KeyUsage {
                key: key.as_str().to_string(),
                line,
                col,
                source_line: source_line.to_string(),
            });
        }
        usages
    }
}

/// Byte offsets where each line starts. Line 1 starts at offset 0.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number of a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
