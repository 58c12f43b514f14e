use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, inject::inject},
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Inject(cmd)) => inject(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
