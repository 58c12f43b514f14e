use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use crate::core::RawCatalog;

/// Parse a tab-separated catalog export.
///
/// Lines with fewer than two cells are skipped, which drops blank lines and
/// trailing newlines. The first remaining line is the header. Cells are kept
/// verbatim, including surrounding whitespace.
pub fn parse_tsv(content: &str) -> Result<RawCatalog> {
    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| line.split('\t').map(str::to_string).collect::<Vec<_>>())
        .filter(|cells| cells.len() >= 2);

    let Some(header) = lines.next() else {
        bail!("Catalog has no header row");
    };

    Ok(RawCatalog::new(header, lines.collect()))
}

/// Read and parse a local catalog file.
pub fn parse_tsv_file(path: &Path) -> Result<RawCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    parse_tsv(&content).with_context(|| format!("Failed to parse catalog file: {:?}", path))
}
