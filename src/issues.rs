//! Issue types reported after an injection run.
//!
//! Each issue is self-contained: it carries the file it belongs to and, for
//! translation problems, where the key is first used, so the reporter can
//! print a cargo-style diagnostic without going back to the source.

use enum_dispatch::enum_dispatch;

use crate::core::{KeyUsage, LanguageId, ResolutionWarning};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnknownKey,
    MissingTranslation,
    ChainedAlias,
    FileError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::ChainedAlias => write!(f, "chained-alias"),
            Rule::FileError => write!(f, "file-error"),
        }
    }
}

// ============================================================
// Source Context
// ============================================================

/// Where in a source file a key is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(file_path: impl Into<String>, usage: &KeyUsage) -> Self {
        Self {
            file_path: file_path.into(),
            line: usage.line,
            col: usage.col,
            source_line: usage.source_line.clone(),
        }
    }

    /// File-level context, for keys whose usage could not be located.
    pub fn file(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line: 0,
            col: 0,
            source_line: String::new(),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A used key that has no row in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyIssue {
    pub context: SourceContext,
    pub key: String,
}

impl UnknownKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// A used key with empty text in some language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub context: SourceContext,
    pub key: String,
    pub language: LanguageId,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// A used key whose alias points at another alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedAliasIssue {
    pub context: SourceContext,
    pub key: String,
    pub language: LanguageId,
    pub target: LanguageId,
}

impl ChainedAliasIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ChainedAlias
    }
}

/// A source or sibling file could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl FileErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::FileError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while injecting translations.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnknownKey(UnknownKeyIssue),
    MissingTranslation(MissingTranslationIssue),
    ChainedAlias(ChainedAliasIssue),
    FileError(FileErrorIssue),
}

impl Issue {
    /// Convert a resolution warning of `file_path`, located at `usage`.
    pub fn from_warning(
        file_path: &str,
        warning: ResolutionWarning,
        usage: Option<&KeyUsage>,
    ) -> Self {
        let context = match usage {
            Some(usage) => SourceContext::new(file_path, usage),
            None => SourceContext::file(file_path),
        };
        match warning {
            ResolutionWarning::UnknownKey { key } => {
                Issue::UnknownKey(UnknownKeyIssue { context, key })
            }
            ResolutionWarning::MissingTranslation { key, language } => {
                Issue::MissingTranslation(MissingTranslationIssue {
                    context,
                    key,
                    language,
                })
            }
            ResolutionWarning::ChainedAlias {
                key,
                language,
                target,
            } => Issue::ChainedAlias(ChainedAliasIssue {
                context,
                key,
                language,
                target,
            }),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnknownKey(_) => UnknownKeyIssue::severity(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::severity(),
            Issue::ChainedAlias(_) => ChainedAliasIssue::severity(),
            Issue::FileError(_) => FileErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnknownKey(_) => UnknownKeyIssue::rule(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::rule(),
            Issue::ChainedAlias(_) => ChainedAliasIssue::rule(),
            Issue::FileError(_) => FileErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only, no line context.
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for UnknownKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        ResolutionWarning::UnknownKey {
            key: self.key.clone(),
        }
        .to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add a row with this id to the catalog, or fix the key name")
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        ResolutionWarning::MissingTranslation {
            key: self.key.clone(),
            language: self.language.clone(),
        }
        .to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ChainedAliasIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        ResolutionWarning::ChainedAlias {
            key: self.key.clone(),
            language: self.language.clone(),
            target: self.target.clone(),
        }
        .to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("point the alias at a language with its own text")
    }
}

impl Report for FileErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.line, ctx.col),
            ReportLocation::File { .. } => (0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_position().cmp(&other.sort_position()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
