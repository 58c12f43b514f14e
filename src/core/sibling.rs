//! Location of sibling translation modules.
//!
//! For `src/page.js` the module is `src/page.translations.js`, imported as
//! `./page.translations.js`. When a directory `src/page/` exists, the module
//! goes inside it instead: `src/page/translations.js`, imported as
//! `./page/translations.js`.

use std::path::{Path, PathBuf};

/// Marker between the file stem and its extension for sibling modules.
const SIBLING_MARKER: &str = "translations";

/// A sibling module path and the specifier the source file imports it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingFile {
    pub path: PathBuf,
    pub module_ref: String,
}

/// Derive the sibling module of a source file.
///
/// Returns `None` for paths without a file stem or extension.
pub fn sibling_for(source_path: &Path) -> Option<SiblingFile> {
    let stem = source_path.file_stem()?.to_str()?;
    let extension = source_path.extension()?.to_str()?;
    let parent = source_path.parent().unwrap_or_else(|| Path::new(""));

    let directory = parent.join(stem);
    if directory.is_dir() {
        let file_name = format!("{}.{}", SIBLING_MARKER, extension);
        return Some(SiblingFile {
            path: directory.join(&file_name),
            module_ref: format!("./{}/{}", stem, file_name),
        });
    }

    let file_name = format!("{}.{}.{}", stem, SIBLING_MARKER, extension);
    Some(SiblingFile {
        path: parent.join(&file_name),
        module_ref: format!("./{}", file_name),
    })
}

/// Whether a path is itself a generated sibling module.
pub fn is_sibling_file(path: &Path) -> bool {
    let (Some(name), Some(extension)) = (
        path.file_name().and_then(|n| n.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) else {
        return false;
    };

    if name.ends_with(&format!(".{}.{}", SIBLING_MARKER, extension)) {
        return true;
    }

    // `page/translations.js` only counts when `page.js` exists next to `page/`.
    name == format!("{}.{}", SIBLING_MARKER, extension)
        && path
            .parent()
            .is_some_and(|dir| dir.with_extension(extension).is_file())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::core::sibling::*;

    #[test]
    fn test_sibling_next_to_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("page.js");

        let sibling = sibling_for(&source).unwrap();
        assert_eq!(sibling.path, dir.path().join("page.translations.js"));
        assert_eq!(sibling.module_ref, "./page.translations.js");
    }

    #[test]
    fn test_sibling_inside_same_named_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("page")).unwrap();
        let source = dir.path().join("page.js");

        let sibling = sibling_for(&source).unwrap();
        assert_eq!(sibling.path, dir.path().join("page").join("translations.js"));
        assert_eq!(sibling.module_ref, "./page/translations.js");
    }

    #[test]
    fn test_sibling_requires_extension() {
        assert_eq!(sibling_for(Path::new("Makefile")), None);
    }

    #[test]
    fn test_is_sibling_file() {
        let dir = tempdir().unwrap();
        assert!(is_sibling_file(&dir.path().join("page.translations.js")));
        assert!(!is_sibling_file(&dir.path().join("page.js")));

        let nested = dir.path().join("page").join("translations.js");
        assert!(!is_sibling_file(&nested));

        fs::create_dir(dir.path().join("page")).unwrap();
        fs::write(dir.path().join("page.js"), "").unwrap();
        assert!(is_sibling_file(&nested));
    }
}
