//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan source files for marker-function calls and reconcile
//!   the translation catalog
//! - `apply`: Apply an editor-submitted update list to the catalog
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

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
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Target language of the catalog (overrides config file)
    #[arg(short, long, env = "LOCSYNC_LANGUAGE")]
    pub language: Option<String>,

    /// Catalog file path (overrides config file)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source root directory to scan (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Keep catalog entries no current call site references
    #[arg(long)]
    pub keep_unused: bool,

    /// Fail on unterminated comments and literals instead of closing them
    /// silently at end of input
    #[arg(long)]
    pub strict: bool,

    /// Print the resulting catalog to stdout
    #[arg(long)]
    pub show: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON file holding the update list
    pub updates: PathBuf,
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    #[command(flatten)]
    pub args: ApplyArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract marker-function calls and reconcile the translation catalog
    Extract(ExtractCommand),
    /// Apply a translation update list to the catalog
    Apply(ApplyCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
