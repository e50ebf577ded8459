//! Diagnostic formatting and printing.
//!
//! Separate from the core logic so the crate can be used as a library
//! without printing side effects.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::diagnostic::{Diagnostic, Severity};

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print diagnostics in a cargo-style format: severity and message, the
/// reference line, the source line with a caret, and the offending snippet.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let severity_str = match diagnostic.severity() {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        };

        eprintln!(
            "{}: {}  {}",
            severity_str,
            diagnostic.message,
            diagnostic.kind.to_string().dimmed().cyan()
        );
        eprintln!("  {} {}", "-->".blue(), diagnostic.reference);

        if let Some(source_line) = &diagnostic.source_line {
            let caret = match diagnostic.severity() {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };

            // Caret positioning uses display width so CJK text and emoji in
            // the source line do not skew the column.
            let col = diagnostic.column.max(1);
            let prefix: String = source_line.chars().take(col - 1).collect();
            let padding = UnicodeWidthStr::width(prefix.as_str());

            eprintln!("   {}", "|".blue());
            eprintln!("   {} {}", "|".blue(), source_line);
            eprintln!("   {} {:>padding$}{}", "|".blue(), "", caret, padding = padding);
        }

        eprintln!(
            "   {} {} {}",
            "=".blue(),
            "snippet:".bold(),
            diagnostic.snippet
        );
        eprintln!();
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    if !diagnostics.is_empty() {
        eprintln!(
            "{} {} offending call {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            diagnostics.len(),
            if diagnostics.len() == 1 { "site" } else { "sites" },
            errors,
            if errors == 1 { "error" } else { "errors" }.red(),
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }.yellow()
        );
    }
}

/// Print the end-of-run summary for an extraction.
pub fn print_extract_summary(
    files_scanned: usize,
    entries_written: usize,
    drafts_seeded: usize,
    pruned: usize,
) {
    let mut details = vec![format!(
        "{} source {}",
        files_scanned,
        if files_scanned == 1 { "file" } else { "files" }
    )];
    details.push(format!(
        "{} {}",
        entries_written,
        if entries_written == 1 {
            "catalog entry"
        } else {
            "catalog entries"
        }
    ));
    if drafts_seeded > 0 {
        details.push(format!("{} drafts seeded", drafts_seeded));
    }
    if pruned > 0 {
        details.push(format!("{} pruned", pruned));
    }

    println!("{} {}", SUCCESS_MARK.green(), details.join(", ").green());
}
