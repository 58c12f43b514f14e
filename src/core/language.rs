//! Language registry.
//!
//! The registry maps a language id (e.g. `"en"`, `"fa-AF"`) to its text
//! direction. It is built from configuration and passed into the resolver, so
//! tests and projects can extend it without touching the code.

use serde::{Deserialize, Serialize};

/// Language identifier as it appears in the catalog header (e.g. `"sv"`).
pub type LanguageId = String;

/// A known language and its text direction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageSpec {
    pub id: LanguageId,
    #[serde(default)]
    pub rtl: bool,
}

impl LanguageSpec {
    pub fn new(id: impl Into<String>, rtl: bool) -> Self {
        Self { id: id.into(), rtl }
    }
}

/// Ordered set of known languages.
///
/// Lookups for ids that are not registered fall back to left-to-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<LanguageSpec>,
}

impl LanguageRegistry {
    pub fn new(languages: Vec<LanguageSpec>) -> Self {
        Self { languages }
    }

    /// Whether the language is written right-to-left.
    pub fn is_rtl(&self, id: &str) -> bool {
        self.languages
            .iter()
            .find(|lang| lang.id == id)
            .is_some_and(|lang| lang.rtl)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.languages.iter().any(|lang| lang.id == id)
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.languages.iter().map(|lang| lang.id.clone()).collect()
    }

    pub fn languages(&self) -> &[LanguageSpec] {
        &self.languages
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new(default_languages())
    }
}

/// The languages the catalog has historically been maintained in.
pub fn default_languages() -> Vec<LanguageSpec> {
    [
        ("en", false),
        ("sv", false),
        ("es", false),
        ("fr", false),
        ("de", false),
        ("it", false),
        ("pt", false),
        ("ar", true),
        ("fa", true),
        ("fa-AF", true),
        ("so", false),
        ("ti", false),
        ("tr", false),
        ("pl", false),
        ("ru", false),
        ("uk", false),
        ("th", false),
    ]
    .into_iter()
    .map(|(id, rtl)| LanguageSpec::new(id, rtl))
    .collect()
}
