use std::{fs, path::Path};

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, apply::apply, extract::extract},
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Dispatch to the appropriate command handler based on the parsed
/// arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Apply(cmd)) => apply(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(CommandResult::clean())
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
