use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use transject::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitStatus::BadArgument.into()
            } else {
                ExitStatus::Success.into()
            };
        }
    };

    match transject::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::from_error(&err).into()
        }
    }
}
