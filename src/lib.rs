//! Transject - per-file translation injection for JavaScript sources
//!
//! Transject reads a translation catalog exported from a spreadsheet, finds
//! the `translations.<key>` references in each source file and writes exactly
//! the translations that file uses next to it, either inline at the end of
//! the file or in a sibling module.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Injection engine (catalog compilation and the per-file pipeline)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
