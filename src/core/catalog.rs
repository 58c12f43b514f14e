//! Catalog normalization.
//!
//! Turns the flattened spreadsheet (header + rows of cells) into a
//! [`TranslationTable`]: language → key → raw text.
//!
//! Spreadsheet conventions:
//! - The `id` column holds the translation key.
//! - Rows whose id is empty or starts with `#` are comments.
//! - Language columns look like locale codes (`en`, `sv`, `fa-AF`).
//!   Columns starting with `_`, `.` or an uppercase letter are notes for
//!   translators and never language columns.
//! - Cells that are empty, `...` or start with `#` are treated as untranslated.

use std::{
    collections::{BTreeSet, HashMap},
    sync::LazyLock,
};

use regex::Regex;

use crate::core::{CatalogError, LanguageId};

/// Name of the key column.
pub const ID_COLUMN: &str = "id";

/// Metadata columns that are never languages, even when they look like one.
pub const RESERVED_COLUMNS: &[&str] = &[ID_COLUMN, "batch", "context", "examples"];

/// Cell value translators use for "not translated yet".
const PLACEHOLDER: &str = "...";

// Two or three letters, optionally followed by a region/script suffix: en, fil, fa-AF, zh_Hant
static LANGUAGE_COLUMN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]{2,3}(?:[-_][a-z0-9]{2,8})?$").unwrap());

/// Raw tabular extraction of the catalog, independent of the transport it
/// came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCatalog {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawCatalog {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }
}

/// Language → key → raw text.
///
/// All languages share one key set: the ids of all data rows. A key without a
/// cell in some language reads as empty text there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    languages: Vec<LanguageId>,
    keys: BTreeSet<String>,
    texts: HashMap<LanguageId, HashMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(language, [(key, text)])` groups.
    ///
    /// Languages keep the given order.
    pub fn from_languages<L, K, T>(groups: impl IntoIterator<Item = (L, Vec<(K, T)>)>) -> Self
    where
        L: Into<String>,
        K: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::new();
        for (language, entries) in groups {
            let language = language.into();
            table.add_language(&language);
            for (key, text) in entries {
                table.insert(&language, key.into(), text.into());
            }
        }
        table
    }

    /// Register a language column. Adding a known language is a no-op.
    pub fn add_language(&mut self, language: &str) {
        if !self.texts.contains_key(language) {
            self.languages.push(language.to_string());
            self.texts.insert(language.to_string(), HashMap::new());
        }
    }

    /// Register a key for all languages, without text.
    pub fn add_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn insert(&mut self, language: &str, key: String, text: String) {
        self.add_language(language);
        self.keys.insert(key.clone());
        if let Some(texts) = self.texts.get_mut(language) {
            texts.insert(key, text);
        }
    }

    /// Raw text of `key` in `language`; empty when untranslated.
    pub fn text(&self, language: &str, key: &str) -> &str {
        self.texts
            .get(language)
            .and_then(|texts| texts.get(key))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Languages in column order.
    pub fn languages(&self) -> &[LanguageId] {
        &self.languages
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.texts.contains_key(language)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// The language other languages are compared against.
    ///
    /// Returns `preferred` when the catalog has it, otherwise the first column.
    pub fn reference_language<'a>(&'a self, preferred: &'a str) -> Option<&'a str> {
        if self.has_language(preferred) {
            Some(preferred)
        } else {
            self.languages.first().map(String::as_str)
        }
    }
}

/// Whether a header cell names a language column.
pub fn is_language_column(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if first == '_' || first == '.' || first.is_uppercase() {
        return false;
    }
    if RESERVED_COLUMNS.contains(&name) {
        return false;
    }
    LANGUAGE_COLUMN_REGEX.is_match(name)
}

/// Whether a cell holds a usable translation.
fn is_translated_cell(cell: &str) -> bool {
    !cell.is_empty() && cell != PLACEHOLDER && !cell.starts_with('#')
}

/// Whether a row id marks a data row (not blank, not a `#` comment).
pub fn is_data_row_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('#')
}

/// Normalize a raw catalog into a translation table.
///
/// Fails on a header without `id` column or a data row shorter than the
/// header. Sparse cells are not errors.
pub fn normalize(raw: &RawCatalog) -> Result<TranslationTable, CatalogError> {
    let id_index = raw
        .header
        .iter()
        .position(|column| column == ID_COLUMN)
        .ok_or_else(|| CatalogError::MissingIdColumn {
            columns: raw.header.join(", "),
        })?;

    let language_columns: Vec<(usize, &str)> = raw
        .header
        .iter()
        .enumerate()
        .filter(|(_, name)| is_language_column(name))
        .map(|(index, name)| (index, name.as_str()))
        .collect();

    let mut table = TranslationTable::new();
    for (_, language) in &language_columns {
        table.add_language(language);
    }

    for (row_index, row) in raw.rows.iter().enumerate() {
        if row.len() < raw.header.len() {
            return Err(CatalogError::RowShape {
                row: row_index + 2,
                expected: raw.header.len(),
                found: row.len(),
            });
        }

        let id = row[id_index].as_str();
        if !is_data_row_id(id) {
            continue;
        }
        table.add_key(id);

        for (column, language) in &language_columns {
            let cell = row[*column].as_str();
            if is_translated_cell(cell) {
                table.insert(language, id.to_string(), cell.to_string());
            }
        }
    }

    Ok(table)
}
