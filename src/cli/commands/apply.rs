//! The apply command: the consumed side of the editing collaborator's
//! transactional update contract.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::catalog::TranslationCatalog;
use crate::catalog::updates::{apply_updates, load_updates};
use crate::cli::args::ApplyCommand;
use crate::cli::commands::CommandResult;
use crate::config::load_config;
use crate::reporter::SUCCESS_MARK;

pub fn apply(cmd: ApplyCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let config = load_config(&cwd)?.config;

    let catalog_path = args
        .common
        .catalog
        .unwrap_or_else(|| PathBuf::from(&config.catalog));

    let mut catalog = TranslationCatalog::load(&catalog_path)?;
    let updates = load_updates(&args.updates)?;
    apply_updates(&mut catalog, &updates)?;
    catalog.save(&catalog_path)?;

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Applied {} {} to {}",
            updates.len(),
            if updates.len() == 1 {
                "update"
            } else {
                "updates"
            },
            catalog_path.display()
        )
        .green()
    );

    Ok(CommandResult::clean())
}
