use std::path::PathBuf;

use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Inject(InjectSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct InjectSummary {
    pub files_checked: usize,
    /// Source files and sibling modules that were (or, in a dry run, would be) written.
    pub updated: Vec<PathBuf>,
    /// Sibling modules that were (or would be) removed.
    pub removed: Vec<PathBuf>,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: PathBuf,
}

/// Result of running a transject command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Sorted issues found during the run.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut issues: Vec<Issue>) -> Self {
        issues.sort();
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            summary,
            issues,
            error_count,
            warning_count,
        }
    }
}
