use std::{
    fs,
    path::{Component, Path, PathBuf},
    process::Command,
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        CompiledCatalog, RegexScanner, SpliceMode, SpliceTarget, UsageError,
        fetch::{FetchOptions, fetch_catalog},
        file_scanner::scan_files,
        inject,
        parsers::tsv::parse_tsv_file,
        same_modulo_formatting, sibling_for,
    },
    issues::{FileErrorIssue, Issue},
};

/// Prefix of every generated sibling module.
const SIBLING_MODULE_PREFIX: &str = "export default translations = ";

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Command-line overrides for a run. `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct InjectOptions {
    pub path: Option<PathBuf>,
    pub catalog: Option<CatalogSource>,
    pub mode: Option<SpliceMode>,
    pub reference_language: Option<String>,
    /// Run the configured formatter on written files.
    pub format: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Change to a sibling module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiblingChange {
    Write { path: PathBuf, content: String },
    Remove { path: PathBuf },
}

impl SiblingChange {
    pub fn path(&self) -> &Path {
        match self {
            SiblingChange::Write { path, .. } | SiblingChange::Remove { path } => path,
        }
    }
}

/// Result of processing one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// New source text, only when it differs from the file on disk.
    pub output: Option<String>,
    /// Only set when the sibling module on disk needs to change.
    pub sibling: Option<SiblingChange>,
    pub issues: Vec<Issue>,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        self.output.is_some() || self.sibling.is_some()
    }
}

/// What `apply` did to the file system.
#[derive(Debug, Default)]
pub struct ApplySummary {
    /// Paths written, source files and sibling modules alike.
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub issues: Vec<Issue>,
}

/// Project-level orchestration of one injection run.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments and the `TRANSLATIONS_URL` environment variable
/// 2. `.transjectrc.json`
/// 3. Built-in defaults
pub struct InjectContext {
    pub config: Config,
    /// File or directory being processed.
    pub target: PathBuf,
    /// Source files to process, sorted.
    pub files: Vec<PathBuf>,
    pub catalog_source: CatalogSource,
    pub mode: SpliceMode,
    pub format: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl InjectContext {
    /// Load configuration and collect the files to process.
    ///
    /// Relative paths on the command line are resolved against `start_dir`,
    /// relative paths in the config file against the directory holding it.
    ///
    /// # Errors
    ///
    /// - [`UsageError::UnreadablePath`] if the target does not exist
    /// - [`UsageError::MissingCatalogSource`] if no catalog is configured
    /// - config file errors
    pub fn new(options: &InjectOptions, start_dir: &Path) -> Result<Self> {
        let verbose = options.verbose;

        let explicit_target = options.path.as_ref().map(|p| join_relative(start_dir, p));
        let config_dir = match &explicit_target {
            Some(target) if target.is_file() => target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf()),
            Some(target) => target.clone(),
            None => start_dir.to_path_buf(),
        };

        let config_result = load_config(&config_dir)?;
        if verbose && !config_result.from_file() {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config_base = config_result
            .base_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| start_dir.to_path_buf());
        let mut config = config_result.config;

        if let Some(ref reference_language) = options.reference_language {
            config.reference_language = reference_language.clone();
        }
        let mode = options.mode.unwrap_or(config.mode);

        let target = explicit_target
            .unwrap_or_else(|| join_relative(&config_base, Path::new(&config.source_root)));
        if !target.exists() {
            return Err(UsageError::UnreadablePath { path: target }.into());
        }

        let catalog_source = match &options.catalog {
            Some(CatalogSource::File(path)) => CatalogSource::File(join_relative(start_dir, path)),
            Some(source) => source.clone(),
            None => match (&config.catalog_file, &config.catalog_url) {
                (Some(file), _) => CatalogSource::File(join_relative(&config_base, Path::new(file))),
                (None, Some(url)) => CatalogSource::Url(url.clone()),
                (None, None) => return Err(UsageError::MissingCatalogSource.into()),
            },
        };

        let scan_result = scan_files(&target, &config.extensions, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            target,
            files: scan_result.files,
            catalog_source,
            mode,
            format: options.format,
            dry_run: options.dry_run,
            verbose,
        })
    }

    /// Acquire and compile the catalog. Runs once per invocation.
    pub fn load_catalog(&self) -> Result<CompiledCatalog> {
        let raw = match &self.catalog_source {
            CatalogSource::Url(url) => fetch_catalog(url, &FetchOptions::default(), self.verbose)?,
            CatalogSource::File(path) => parse_tsv_file(path)?,
        };

        let catalog =
            CompiledCatalog::from_raw(&raw, self.config.registry(), &self.config.reference_language)
                .with_context(|| format!("Invalid catalog: {}", self.catalog_source))?;

        if self.verbose {
            eprintln!(
                "Note: Loaded {} key(s) in {} language(s) from {}",
                catalog.key_count(),
                catalog.languages().len(),
                self.catalog_source
            );
        }
        Ok(catalog)
    }

    /// Compute the new content of every file, without touching the disk.
    ///
    /// Files are processed in parallel; the result is in path order.
    pub fn process(&self, catalog: &CompiledCatalog) -> Vec<FileOutcome> {
        let mut outcomes: Vec<FileOutcome> = self
            .files
            .par_iter()
            .map(|path| self.process_file(path, catalog))
            .collect();
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        outcomes
    }

    fn process_file(&self, path: &Path, catalog: &CompiledCatalog) -> FileOutcome {
        let file_path = path.display().to_string();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                if self.verbose {
                    eprintln!("{} {} - {}", "warning:".bold().yellow(), file_path, e);
                }
                return FileOutcome {
                    path: path.to_path_buf(),
                    output: None,
                    sibling: None,
                    issues: vec![Issue::FileError(FileErrorIssue {
                        file_path,
                        error: format!("Failed to read file: {}", e),
                    })],
                };
            }
        };

        let sibling = sibling_for(path);
        let target = match (self.mode, &sibling) {
            (SpliceMode::Sibling, Some(sibling)) => SpliceTarget::Sibling {
                module_ref: sibling.module_ref.clone(),
            },
            _ => SpliceTarget::Inline,
        };

        let injection = inject(&source, catalog, &RegexScanner, &target);

        let mut issues: Vec<Issue> = injection
            .warnings
            .iter()
            .map(|warning| {
                Issue::from_warning(
                    &file_path,
                    warning.clone(),
                    injection.first_usage(warning.key()),
                )
            })
            .collect();

        // Files the formatter ran on are compared modulo formatting.
        let formatted = self.format && self.config.formatter.is_some();
        let unchanged =
            |new: &str, old: &str| new == old || (formatted && same_modulo_formatting(new, old));

        let mut output = (!unchanged(&injection.output, &source)).then_some(injection.output);

        let sibling_change = sibling.and_then(|sibling| {
            let existing = fs::read_to_string(&sibling.path).ok();
            match (injection.sibling, existing) {
                (Some(_), Some(existing)) if !is_generated_module(&existing) => {
                    issues.push(Issue::FileError(FileErrorIssue {
                        file_path: sibling.path.display().to_string(),
                        error: format!(
                            "Refusing to overwrite {}: it was not generated by transject",
                            sibling.path.display()
                        ),
                    }));
                    output = None;
                    None
                }
                (Some(content), existing)
                    if existing.as_deref().is_none_or(|old| !unchanged(&content, old)) =>
                {
                    Some(SiblingChange::Write {
                        path: sibling.path,
                        content,
                    })
                }
                (None, Some(existing)) if existing.starts_with(SIBLING_MODULE_PREFIX) => {
                    Some(SiblingChange::Remove { path: sibling.path })
                }
                _ => None,
            }
        });

        FileOutcome {
            path: path.to_path_buf(),
            output,
            sibling: sibling_change,
            issues,
        }
    }

    /// Write the changes of `outcomes` to disk and run the formatter on
    /// written files. Does nothing in dry-run mode.
    pub fn apply(&self, outcomes: &[FileOutcome]) -> ApplySummary {
        let mut summary = ApplySummary::default();
        if self.dry_run {
            return summary;
        }

        for outcome in outcomes {
            if let Some(output) = &outcome.output {
                match fs::write(&outcome.path, output) {
                    Ok(()) => summary.written.push(outcome.path.clone()),
                    Err(e) => summary.issues.push(write_error(&outcome.path, e)),
                }
            }

            match &outcome.sibling {
                Some(SiblingChange::Write { path, content }) => {
                    let result = path
                        .parent()
                        .map_or(Ok(()), fs::create_dir_all)
                        .and_then(|()| fs::write(path, content));
                    match result {
                        Ok(()) => summary.written.push(path.clone()),
                        Err(e) => summary.issues.push(write_error(path, e)),
                    }
                }
                Some(SiblingChange::Remove { path }) => match fs::remove_file(path) {
                    Ok(()) => summary.removed.push(path.clone()),
                    Err(e) => summary.issues.push(write_error(path, e)),
                },
                None => {}
            }
        }

        if self.format
            && let Some(formatter) = &self.config.formatter
        {
            for path in &summary.written {
                run_formatter(formatter, path, self.verbose);
            }
        }

        summary
    }
}

/// An empty file or one carrying the generated module prefix.
fn is_generated_module(content: &str) -> bool {
    content.trim().is_empty() || content.starts_with(SIBLING_MODULE_PREFIX)
}

fn write_error(path: &Path, e: std::io::Error) -> Issue {
    Issue::FileError(FileErrorIssue {
        file_path: path.display().to_string(),
        error: format!("Failed to write file: {}", e),
    })
}

/// Run `formatter` with `path` appended. Failures are only reported in
/// verbose mode.
fn run_formatter(formatter: &[String], path: &Path, verbose: bool) {
    let Some((program, args)) = formatter.split_first() else {
        return;
    };

    match Command::new(program).args(args).arg(path).output() {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            if verbose {
                eprintln!(
                    "{} {} exited with {} on {}",
                    "warning:".bold().yellow(),
                    program,
                    output.status,
                    path.display()
                );
            }
        }
        Err(e) => {
            if verbose {
                eprintln!(
                    "{} Cannot run formatter '{}': {}",
                    "warning:".bold().yellow(),
                    program,
                    e
                );
            }
        }
    }
}

/// Join `path` onto `base`, keeping paths relative when `base` is the
/// current directory.
fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let is_cur_dir = base.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        path.to_path_buf()
    } else {
        let rel = path.strip_prefix(Path::new(".")).unwrap_or(path);
        base.join(rel)
    }
}
