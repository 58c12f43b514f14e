//! Catalog parsers.
//!
//! - `tsv`: tab-separated spreadsheet exports

pub mod tsv;
