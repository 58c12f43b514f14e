//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `inject`: Inject the translations each source file uses
//! - `init`: Initialize a transject configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::SpliceMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Inject(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Args)]
pub struct InjectCommand {
    /// File or directory to process (defaults to the configured source root)
    pub path: Option<PathBuf>,

    /// URL of the tab-separated catalog export
    #[arg(long, env = "TRANSLATIONS_URL")]
    pub url: Option<String>,

    /// Local tab-separated catalog file (takes precedence over --url)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Where generated translations go (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<SpliceMode>,

    /// Language used for placeholder entries (overrides config file)
    #[arg(long)]
    pub reference_language: Option<String>,

    /// Do not run the formatter on written files
    #[arg(long)]
    pub no_format: bool,

    /// Report which files would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inject the translations each source file uses
    Inject(InjectCommand),
    /// Initialize a new .transjectrc.json configuration file
    Init,
}
