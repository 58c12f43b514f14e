//! Key family expansion.
//!
//! Catalog keys of the form `base[arg1,arg2]` form a family: every argument
//! becomes one nesting level under `base`, and the last argument holds the
//! entry. `car[tesla,expensive]` is reachable as `translations.car.en.tesla.expensive`.
//!
//! All keys of one family must have the same number of arguments across the
//! whole catalog.

use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

use regex::Regex;

use crate::core::{CatalogError, LanguageId, ResolvedEntries, ResolvedEntry};

static FAMILY_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]]+)\[([^\]]+)\]$").unwrap());

/// A parsed catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPath {
    /// `simple`
    Simple(String),
    /// `base[arg1,arg2,...]`
    Family { base: String, args: Vec<String> },
}

impl KeyPath {
    pub fn parse(key: &str) -> Self {
        if let Some(caps) = FAMILY_KEY_REGEX.captures(key) {
            let args: Vec<String> = caps[2]
                .split(',')
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .map(String::from)
                .collect();
            if !args.is_empty() {
                return KeyPath::Family {
                    base: caps[1].to_string(),
                    args,
                };
            }
        }
        KeyPath::Simple(key.to_string())
    }

    /// The top-level name this key is reachable under.
    pub fn root(&self) -> &str {
        match self {
            KeyPath::Simple(name) => name,
            KeyPath::Family { base, .. } => base,
        }
    }
}

/// A node of the resolved translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(ResolvedEntry),
    Branch(BTreeMap<String, Node>),
    /// Plain list of strings (used for the language list).
    List(Vec<String>),
}

impl Node {
    /// Visit every leaf below this node.
    pub fn leaves(&self) -> Vec<&ResolvedEntry> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ResolvedEntry>) {
        match self {
            Node::Leaf(entry) => out.push(entry),
            Node::Branch(children) => {
                for child in children.values() {
                    child.collect_leaves(out);
                }
            }
            Node::List(_) => {}
        }
    }

    /// Follow a path of branch keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, segment| match node {
            Node::Branch(children) => children.get(*segment),
            _ => None,
        })
    }
}

/// Per-language top-level trees: language → root key → node.
pub type LanguageTrees = HashMap<LanguageId, BTreeMap<String, Node>>;

/// Parse every key and check family consistency across the catalog.
pub fn parse_keys<'a>(
    keys: impl IntoIterator<Item = &'a String>,
) -> Result<Vec<(&'a str, KeyPath)>, CatalogError> {
    let parsed: Vec<(&str, KeyPath)> = keys
        .into_iter()
        .map(|key| (key.as_str(), KeyPath::parse(key)))
        .collect();

    let mut arities: HashMap<&str, usize> = HashMap::new();
    for (key, path) in &parsed {
        if let KeyPath::Family { base, args } = path {
            match arities.get(base.as_str()) {
                Some(&expected) if expected != args.len() => {
                    return Err(CatalogError::ArityMismatch {
                        base: base.clone(),
                        expected,
                        found: args.len(),
                        key: key.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    arities.insert(base.as_str(), args.len());
                }
            }
        }
    }

    for (_, path) in &parsed {
        if let KeyPath::Simple(name) = path
            && arities.contains_key(name.as_str())
        {
            let family_key = parsed
                .iter()
                .find(|(_, other)| matches!(other, KeyPath::Family { base, .. } if base == name))
                .map(|(key, _)| key.to_string())
                .unwrap_or_default();
            return Err(CatalogError::KeyConflict {
                base: name.clone(),
                key: family_key,
            });
        }
    }

    Ok(parsed)
}

/// Build the nested tree of every language from alias-resolved flat entries.
///
/// Each language gets its own freshly built tree; no nodes are shared between
/// languages.
pub fn build_trees(
    languages: &[LanguageId],
    paths: &[(&str, KeyPath)],
    resolved: &ResolvedEntries,
) -> LanguageTrees {
    languages
        .iter()
        .map(|language| {
            let mut root: BTreeMap<String, Node> = BTreeMap::new();
            for (key, path) in paths {
                let Some(entry) = resolved.get(language, key) else {
                    continue;
                };
                insert_path(&mut root, path, entry.clone());
            }
            (language.clone(), root)
        })
        .collect()
}

fn insert_path(root: &mut BTreeMap<String, Node>, path: &KeyPath, entry: ResolvedEntry) {
    match path {
        KeyPath::Simple(name) => {
            root.insert(name.clone(), Node::Leaf(entry));
        }
        KeyPath::Family { base, args } => {
            let mut node = root
                .entry(base.clone())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            let (last, parents) = match args.split_last() {
                Some(split) => split,
                None => return,
            };
            for arg in parents {
                let Node::Branch(children) = node else {
                    return;
                };
                node = children
                    .entry(arg.clone())
                    .or_insert_with(|| Node::Branch(BTreeMap::new()));
            }
            if let Node::Branch(children) = node {
                children.insert(last.clone(), Node::Leaf(entry));
            }
        }
    }
}
