//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style to stderr; the run summary goes to stdout.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary, InjectSummary};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print the outcome of an inject run to stdout.
pub fn print_inject(summary: &InjectSummary, verbose: bool) {
    print_inject_to(summary, verbose, &mut io::stdout().lock());
}

pub fn print_inject_to<W: Write>(summary: &InjectSummary, verbose: bool, writer: &mut W) {
    if summary.is_dry_run || verbose {
        let (update_verb, remove_verb) = if summary.is_dry_run {
            ("Would update", "Would remove")
        } else {
            ("Updated", "Removed")
        };
        print_paths(&summary.updated, update_verb, writer);
        print_paths(&summary.removed, remove_verb, writer);
    }

    let changed = summary.updated.len() + summary.removed.len();
    let files = plural(summary.files_checked, "file", "files");
    let msg = if summary.is_dry_run {
        format!(
            "Checked {} source {}, {} would change (dry run)",
            summary.files_checked, files, changed
        )
    } else if changed == 0 {
        format!(
            "Checked {} source {} - everything up to date",
            summary.files_checked, files
        )
    } else {
        format!(
            "Checked {} source {}, updated {} {}",
            summary.files_checked,
            files,
            changed,
            plural(changed, "file", "files")
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

pub fn print_init(summary: &InitSummary) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.created.display()).green()
    );
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Inject(summary) => {
            report(&result.issues);
            print_inject(summary, verbose);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_paths<W: Write>(paths: &[PathBuf], verb: &str, writer: &mut W) {
    for path in paths {
        let _ = writeln!(writer, "{:>12} {}", verb.green().bold(), path.display());
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based and counted in characters
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) if ctx.line > 0 => (
            &ctx.file_path,
            ctx.line,
            ctx.col,
            Some(&ctx.source_line),
        ),
        ReportLocation::Source(ctx) => (&ctx.file_path, 0, 0, None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
