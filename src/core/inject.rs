//! Per-file pipeline: scan → resolve → serialize → splice.

use std::collections::BTreeSet;

use crate::core::{
    CompiledCatalog, KeyUsage, ResolutionWarning, SpliceTarget, UsageScanner, serialize,
    sibling_module, splice_import, splice_inline, strip_inline_block,
};

/// Outcome of injecting translations into one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The new source text.
    pub output: String,
    /// Sibling module content. `None` means the file has nothing to import
    /// and any existing sibling module should go.
    pub sibling: Option<String>,
    /// References found in the source, in source order.
    pub usages: Vec<KeyUsage>,
    pub warnings: Vec<ResolutionWarning>,
}

impl Injection {
    /// First reference to `key`, for diagnostics.
    pub fn first_usage(&self, key: &str) -> Option<&KeyUsage> {
        self.usages.iter().find(|usage| usage.key == key)
    }
}

/// Inject the translations a source text uses.
///
/// Any previously generated inline block is ignored while scanning, so the
/// generated data never feeds back into the key set.
pub fn inject(
    source: &str,
    catalog: &CompiledCatalog,
    scanner: &dyn UsageScanner,
    target: &SpliceTarget,
) -> Injection {
    let usages = scanner.usages(strip_inline_block(source));
    let used_keys: BTreeSet<String> = usages.iter().map(|usage| usage.key.clone()).collect();
    let resolution = catalog.resolve(&used_keys);

    let literal = if used_keys.is_empty() {
        None
    } else {
        Some(serialize(&resolution.tree))
    };

    let (output, sibling) = match target {
        SpliceTarget::Inline => {
            // Drop a leftover sibling import when switching layouts.
            let without_import = splice_import(source, None);
            (splice_inline(&without_import, literal.as_deref()), None)
        }
        SpliceTarget::Sibling { module_ref } => {
            // Drop a leftover inline block when switching layouts.
            let without_block = splice_inline(source, None);
            let output = splice_import(
                &without_block,
                literal.as_ref().map(|_| module_ref.as_str()),
            );
            (output, literal.as_deref().map(sibling_module))
        }
    };

    Injection {
        output,
        sibling,
        usages,
        warnings: resolution.warnings,
    }
}
