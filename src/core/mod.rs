//! Translation injection engine.
//!
//! A catalog is compiled once and then applied to every source file:
//!
//! 1. **Catalog**: raw rows → `TranslationTable` (`catalog`), aliases resolved
//!    (`alias`), keys grouped into per-language trees (`tree`), all bundled in
//!    a `CompiledCatalog` (`resolve`).
//! 2. **Per file**: used keys scanned (`scan`), resolved against the catalog
//!    (`resolve`), rendered (`serialize`) and spliced back (`splice`,
//!    `sibling`). `inject` runs these steps for one source text.
//!
//! ## Module Structure
//!
//! - `catalog`, `error`, `language`: catalog model and fatal errors
//! - `alias`, `tree`, `resolve`: compilation and per-file resolution
//! - `scan`, `serialize`, `splice`, `sibling`, `inject`: per-file pipeline
//! - `parsers`, `fetch`: catalog transport
//! - `file_scanner`, `context`: project-level orchestration

pub mod alias;
pub mod catalog;
pub mod context;
pub mod error;
pub mod fetch;
pub mod file_scanner;
pub mod inject;
pub mod language;
pub mod parsers;
pub mod resolve;
pub mod scan;
pub mod serialize;
pub mod sibling;
pub mod splice;
pub mod tree;

pub use alias::{ChainedAlias, ResolvedEntries, ResolvedEntry, resolve_aliases};
pub use catalog::{RawCatalog, TranslationTable, normalize};
pub use context::{CatalogSource, FileOutcome, InjectContext, InjectOptions};
pub use error::{CatalogError, UsageError};
pub use inject::{Injection, inject};
pub use language::{LanguageId, LanguageRegistry, LanguageSpec};
pub use resolve::{CompiledCatalog, Resolution, ResolutionWarning, ResolvedTree};
pub use scan::{KeyUsage, RegexScanner, UsageScanner};
pub use serialize::serialize;
pub use sibling::{SiblingFile, is_sibling_file, sibling_for};
pub use splice::{
    SpliceMode, SpliceTarget, same_modulo_formatting, sibling_module, splice_import,
    splice_inline, strip_inline_block,
};
pub use tree::{KeyPath, LanguageTrees, Node, build_trees, parse_keys};
