//! The extract command: scan, reconcile, persist, report.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::catalog::TranslationCatalog;
use crate::catalog::reconcile::{ReconcileOptions, reconcile};
use crate::cli::args::ExtractCommand;
use crate::cli::commands::CommandResult;
use crate::config::{CONFIG_FILE_NAME, load_config};
use crate::diagnostic::Severity;
use crate::file_scanner::scan_files;
use crate::pipeline::extract_files;
use crate::reporter::{print_diagnostics, print_extract_summary};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let config = load_config(&cwd)?.config;

    // An unspecified target language is the one configuration error that is
    // fatal before any scanning happens.
    let Some(language) = args.common.language.clone().or_else(|| config.language.clone())
    else {
        bail!(
            "No target language configured. Pass --language or set \"language\" in {}",
            CONFIG_FILE_NAME
        );
    };

    let table = config.pattern_table()?;
    let strict = args.strict || config.strict;
    let keep_unused = args.keep_unused || config.keep_unused;

    let source_root = args
        .source_root
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.source_root.clone());

    let scan = scan_files(
        &source_root,
        &config.includes,
        &config.ignores,
        &config.extensions,
        args.common.verbose,
    );
    let files: Vec<String> = scan.files.into_iter().collect();
    let records = extract_files(&files, &table, strict)?;

    let catalog_path = args
        .common
        .catalog
        .unwrap_or_else(|| PathBuf::from(&config.catalog));
    let prior = TranslationCatalog::load(&catalog_path)?;

    let options = ReconcileOptions {
        language,
        keep_unused,
    };
    let outcome = reconcile(&prior, &records, &options);

    print_diagnostics(&outcome.diagnostics);
    outcome.catalog.save(&catalog_path)?;

    if args.show {
        print!("{}", outcome.catalog.to_pretty_json()?);
    }
    print_extract_summary(
        files.len(),
        outcome.catalog.len(),
        outcome.drafts_seeded,
        outcome.pruned,
    );

    let error_count = outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();

    Ok(CommandResult {
        error_count,
        warning_count: outcome.diagnostics.len() - error_count,
        exit_on_errors: true,
    })
}
