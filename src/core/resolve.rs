//! Translation resolution.
//!
//! [`CompiledCatalog`] holds the catalog after normalization, alias resolution
//! and family expansion. It is built once per run and shared read-only by
//! every file. [`CompiledCatalog::resolve`] then picks exactly the keys one
//! file uses and reports what is missing for them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::{
    CatalogError, ChainedAlias, KeyPath, LanguageId, LanguageRegistry, LanguageTrees, Node,
    RawCatalog, ResolvedEntry, TranslationTable, build_trees, normalize, parse_keys,
    resolve_aliases,
};

/// Pseudo key listing the registry languages instead of catalog data.
pub const AVAILABLE_LANGUAGES_KEY: &str = "availableLanguages";

/// Used key → language → subtree (or the language list).
pub type ResolvedTree = BTreeMap<String, Node>;

/// A non-fatal problem found while resolving the keys of one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionWarning {
    /// The key has no row in the catalog.
    UnknownKey { key: String },
    /// At least one text under the key is empty in this language.
    MissingTranslation { key: String, language: LanguageId },
    /// The language borrows its text through an alias of an alias.
    ChainedAlias {
        key: String,
        language: LanguageId,
        target: LanguageId,
    },
}

impl ResolutionWarning {
    /// The root key the warning is about.
    pub fn key(&self) -> &str {
        match self {
            ResolutionWarning::UnknownKey { key }
            | ResolutionWarning::MissingTranslation { key, .. }
            | ResolutionWarning::ChainedAlias { key, .. } => key,
        }
    }
}

impl std::fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionWarning::UnknownKey { key } => write!(
                f,
                "The key '{}' was requested, but there is no such row in the document",
                key
            ),
            ResolutionWarning::MissingTranslation { key, language } => {
                write!(f, "Missing translation: {}.{}", key, language)
            }
            ResolutionWarning::ChainedAlias {
                key,
                language,
                target,
            } => write!(
                f,
                "Chained alias: {}.{} points at '{}', which is itself an alias",
                key, language, target
            ),
        }
    }
}

/// Result of resolving the keys of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub tree: ResolvedTree,
    pub warnings: Vec<ResolutionWarning>,
}

/// The catalog, fully prepared for per-file resolution.
#[derive(Debug, Clone)]
pub struct CompiledCatalog {
    reference_language: LanguageId,
    languages: Vec<LanguageId>,
    registry: LanguageRegistry,
    trees: LanguageTrees,
    /// Chained aliases grouped by root key.
    chained: HashMap<String, Vec<ChainedAlias>>,
}

impl CompiledCatalog {
    /// Normalize and compile a raw catalog.
    pub fn from_raw(
        raw: &RawCatalog,
        registry: LanguageRegistry,
        reference_language: &str,
    ) -> Result<Self, CatalogError> {
        let table = normalize(raw)?;
        Self::compile(&table, registry, reference_language)
    }

    /// Resolve aliases and expand key families of a normalized table.
    ///
    /// `reference_language` is used when the catalog has that column,
    /// otherwise the first language column is the reference.
    pub fn compile(
        table: &TranslationTable,
        registry: LanguageRegistry,
        reference_language: &str,
    ) -> Result<Self, CatalogError> {
        let paths = parse_keys(table.keys())?;
        let resolved = resolve_aliases(table, &registry);
        let trees = build_trees(table.languages(), &paths, &resolved);

        let mut chained: HashMap<String, Vec<ChainedAlias>> = HashMap::new();
        for alias in resolved.chained {
            let root = KeyPath::parse(&alias.key).root().to_string();
            chained.entry(root).or_default().push(alias);
        }

        Ok(Self {
            reference_language: table
                .reference_language(reference_language)
                .unwrap_or(reference_language)
                .to_string(),
            languages: table.languages().to_vec(),
            registry,
            trees,
            chained,
        })
    }

    pub fn reference_language(&self) -> &str {
        &self.reference_language
    }

    /// Catalog languages in column order.
    pub fn languages(&self) -> &[LanguageId] {
        &self.languages
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Whether the reference language has a row for this root key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.trees
            .get(&self.reference_language)
            .is_some_and(|tree| tree.contains_key(key))
    }

    /// Number of root keys in the catalog.
    pub fn key_count(&self) -> usize {
        self.trees
            .get(&self.reference_language)
            .map_or(0, BTreeMap::len)
    }

    /// Resolve the given root keys into the subtree a file needs.
    ///
    /// Keys are processed in sorted order, so the output is deterministic.
    pub fn resolve(&self, used_keys: &BTreeSet<String>) -> Resolution {
        let mut resolution = Resolution::default();

        for key in used_keys {
            if key == AVAILABLE_LANGUAGES_KEY {
                resolution
                    .tree
                    .insert(key.clone(), Node::List(self.registry.ids()));
                continue;
            }

            if !self.contains_key(key) {
                resolution.warnings.push(ResolutionWarning::UnknownKey { key: key.clone() });
                resolution.tree.insert(key.clone(), self.fallback(key));
                continue;
            }

            let mut per_language = BTreeMap::new();
            for language in &self.languages {
                let Some(node) = self.trees.get(language).and_then(|tree| tree.get(key)) else {
                    continue;
                };

                if node.leaves().iter().any(|entry| entry.is_blank()) {
                    resolution.warnings.push(ResolutionWarning::MissingTranslation {
                        key: key.clone(),
                        language: language.clone(),
                    });
                }
                for alias in self.chained.get(key).into_iter().flatten() {
                    if &alias.language == language {
                        resolution.warnings.push(ResolutionWarning::ChainedAlias {
                            key: key.clone(),
                            language: language.clone(),
                            target: alias.target.clone(),
                        });
                    }
                }

                per_language.insert(language.clone(), node.clone());
            }
            resolution.tree.insert(key.clone(), Node::Branch(per_language));
        }

        resolution
    }

    /// Placeholder for a key the catalog does not have, so generated code
    /// still finds an entry for every language.
    fn fallback(&self, key: &str) -> Node {
        let entry = ResolvedEntry::new(
            format!("[{}]", key),
            self.reference_language.clone(),
            &self.registry,
        );
        Node::Branch(
            self.languages
                .iter()
                .map(|language| (language.clone(), Node::Leaf(entry.clone())))
                .collect(),
        )
    }
}
