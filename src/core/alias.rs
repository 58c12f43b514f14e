//! `use(<language>)` alias resolution.
//!
//! A cell containing exactly `use(en)` borrows the English entry for the same
//! key. Resolution runs in two passes: every direct cell is materialized
//! first, then each alias copies the already materialized target entry. An
//! alias therefore never follows another alias; such chains are reported and
//! left untranslated.

use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

use regex::Regex;

use crate::core::{LanguageId, LanguageRegistry, TranslationTable};

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^use\(([a-zA-Z-]+)\)$").unwrap());

/// A single translated text, ready to be emitted.
///
/// The text direction is derived from the language id; there is no way to
/// set it independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    text: String,
    rtl: bool,
    language_id: LanguageId,
}

impl ResolvedEntry {
    pub fn new(
        text: impl Into<String>,
        language_id: impl Into<String>,
        registry: &LanguageRegistry,
    ) -> Self {
        let language_id = language_id.into();
        Self {
            text: text.into(),
            rtl: registry.is_rtl(&language_id),
            language_id,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rtl(&self) -> bool {
        self.rtl
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Empty or whitespace-only text counts as a missing translation.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An alias whose target is itself an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedAlias {
    pub key: String,
    pub language: LanguageId,
    pub target: LanguageId,
}

/// Flat entries per language after alias resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolvedEntries {
    pub entries: HashMap<LanguageId, BTreeMap<String, ResolvedEntry>>,
    pub chained: Vec<ChainedAlias>,
}

impl ResolvedEntries {
    pub fn get(&self, language: &str, key: &str) -> Option<&ResolvedEntry> {
        self.entries.get(language).and_then(|flat| flat.get(key))
    }
}

/// The target language of an alias cell, if the text is one.
pub fn alias_target(text: &str) -> Option<&str> {
    ALIAS_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Materialize every cell of the table, resolving aliases one level deep.
pub fn resolve_aliases(table: &TranslationTable, registry: &LanguageRegistry) -> ResolvedEntries {
    let mut entries: HashMap<LanguageId, BTreeMap<String, ResolvedEntry>> = table
        .languages()
        .iter()
        .map(|language| (language.clone(), BTreeMap::new()))
        .collect();
    let mut aliases = Vec::new();

    for key in table.keys() {
        for language in table.languages() {
            let text = table.text(language, key);
            match alias_target(text) {
                Some(target) => aliases.push((language.as_str(), key.as_str(), target)),
                None => {
                    if let Some(flat) = entries.get_mut(language) {
                        flat.insert(key.clone(), ResolvedEntry::new(text, language, registry));
                    }
                }
            }
        }
    }

    let mut chained = Vec::new();
    let mut borrowed = Vec::with_capacity(aliases.len());
    for (language, key, target) in aliases {
        let untranslated = || ResolvedEntry::new("", language, registry);

        let entry = if alias_target(table.text(target, key)).is_some() {
            chained.push(ChainedAlias {
                key: key.to_string(),
                language: language.to_string(),
                target: target.to_string(),
            });
            untranslated()
        } else {
            match entries.get(target).and_then(|flat| flat.get(key)) {
                Some(entry) if !entry.is_blank() => entry.clone(),
                _ => untranslated(),
            }
        };
        borrowed.push((language, key, entry));
    }

    for (language, key, entry) in borrowed {
        if let Some(flat) = entries.get_mut(language) {
            flat.insert(key.to_string(), entry);
        }
    }

    ResolvedEntries { entries, chained }
}
