use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::core::is_sibling_file;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths relative to the target.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files to process, sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect the source files under `target`.
///
/// A file target is returned as-is. A directory is walked recursively, keeping
/// files with one of `extensions` that are neither ignored nor generated
/// sibling modules.
pub fn scan_files(
    target: &Path,
    extensions: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    if target.is_file() {
        return ScanResult {
            files: vec![target.to_path_buf()],
            skipped_count: 0,
        };
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(target.join(p));
        }
    }

    for entry in WalkDir::new(target) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file()
            && has_extension(path, extensions)
            && !is_sibling_file(path)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|ext| ext == e))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::core::file_scanner::*;

    fn js() -> Vec<String> {
        vec!["js".to_string()]
    }

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_js_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("util.ts")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(dir_path, &js(), &[], false);
        assert_eq!(names(&result, dir_path), vec!["app.js"]);
    }

    #[test]
    fn test_scan_configured_extensions() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("util.ts")).unwrap();

        let extensions = vec!["js".to_string(), "ts".to_string()];
        let result = scan_files(dir_path, &extensions, &[], false);
        assert_eq!(names(&result, dir_path), vec!["app.js", "util.ts"]);
    }

    #[test]
    fn test_scan_is_sorted_and_nested() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir_all(dir_path.join("b")).unwrap();
        fs::create_dir_all(dir_path.join("a")).unwrap();
        File::create(dir_path.join("b").join("z.js")).unwrap();
        File::create(dir_path.join("a").join("y.js")).unwrap();
        File::create(dir_path.join("c.js")).unwrap();

        let result = scan_files(dir_path, &js(), &[], false);
        assert_eq!(names(&result, dir_path), vec!["a/y.js", "b/z.js", "c.js"]);
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("lib.js")).unwrap();
        File::create(dir_path.join("app.js")).unwrap();

        let result = scan_files(dir_path, &js(), &["**/node_modules/**".to_owned()], false);
        assert_eq!(names(&result, dir_path), vec!["app.js"]);
    }

    #[test]
    fn test_scan_ignores_literal_directory_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let vendor = dir_path.join("src").join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        File::create(vendor.join("lib.js")).unwrap();
        File::create(dir_path.join("src").join("app.js")).unwrap();

        let result = scan_files(dir_path, &js(), &["src/vendor".to_owned()], false);
        assert_eq!(names(&result, dir_path), vec!["src/app.js"]);
    }

    #[test]
    fn test_scan_skips_sibling_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("page.js")).unwrap();
        File::create(dir_path.join("page.translations.js")).unwrap();
        fs::create_dir(dir_path.join("page")).unwrap();
        File::create(dir_path.join("page").join("translations.js")).unwrap();
        File::create(dir_path.join("page").join("part.js")).unwrap();

        let result = scan_files(dir_path, &js(), &[], false);
        assert_eq!(names(&result, dir_path), vec!["page/part.js", "page.js"]);
    }

    #[test]
    fn test_scan_single_file_target() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("one.js");
        File::create(&file).unwrap();
        File::create(dir.path().join("two.js")).unwrap();

        let result = scan_files(&file, &js(), &[], false);
        assert_eq!(result.files, vec![file]);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("**/*.translations.js"));
        assert!(!is_glob_pattern("src/vendor"));
    }
}
