use std::process::ExitCode;

use crate::core::UsageError;

/// Exit status of the CLI.
///
/// - `Success` (0): all files processed; warnings do not affect the status
/// - `MissingConfiguration` (1): no catalog URL or file was given
/// - `BadArgument` (2): invalid command line, reported by clap
/// - `Failure` (3): unreadable path, catalog fetch or catalog error, or a
///   file that could not be read or written
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    MissingConfiguration,
    BadArgument,
    Failure,
}

impl ExitStatus {
    /// Status for an error that aborted the run.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<UsageError>() {
            Some(UsageError::MissingCatalogSource) => ExitStatus::MissingConfiguration,
            Some(UsageError::UnreadablePath { .. }) | None => ExitStatus::Failure,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::MissingConfiguration => ExitCode::from(1),
            ExitStatus::BadArgument => ExitCode::from(2),
            ExitStatus::Failure => ExitCode::from(3),
        }
    }
}
