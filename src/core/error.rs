//! Fatal errors.
//!
//! Any of these aborts the run before a single source file is written.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The header has no `id` column.
    #[error("The catalog header has no 'id' column (found: {columns})")]
    MissingIdColumn { columns: String },

    /// A data row is shorter than the header.
    #[error("Row {row} of the catalog has {found} cells, but the header has {expected}")]
    RowShape {
        /// 1-based row number, header included.
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The same key family is used with two different argument counts.
    #[error(
        "The key '{base}' was used with arrays of length {expected} as well as {found}. Failed on looking at '{key}'"
    )]
    ArityMismatch {
        base: String,
        expected: usize,
        found: usize,
        key: String,
    },

    /// A plain key has the same name as a key family.
    #[error("The key '{base}' is used both as a plain key and as a family ('{key}')")]
    KeyConflict { base: String, key: String },
}

/// Problems with how the tool was invoked, as opposed to what it found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error(
        "No catalog source: set the TRANSLATIONS_URL environment variable, pass --url or --catalog, or set 'catalogUrl' in the config file"
    )]
    MissingCatalogSource,

    #[error("Cannot read path: {}", path.display())]
    UnreadablePath { path: PathBuf },
}
