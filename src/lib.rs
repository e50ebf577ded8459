//! Locsync - keeps a translation catalog synchronized with source code.
//!
//! Locsync scans source files for calls to gettext-style marker functions
//! (`_("…")`, `_d("domain", "…")`, `_n(n, "one", "many")`, …), tracking
//! lexical context without parsing a grammar, and reconciles the extracted
//! strings into a persisted JSON translation catalog. Human translations
//! survive renames and reordering through tiered fuzzy matching.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `scanner`: Context-aware source scanner, pattern table, record builder
//! - `catalog`: Catalog store, reconciliation, editor update contract
//! - `pipeline`: Per-file extraction and parallel aggregation
//! - `file_scanner`: Source-file discovery
//! - `diagnostic` / `reporter`: Offending call-site reporting
//! - `utils`: Shared utility functions

pub mod catalog;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod file_scanner;
pub mod pipeline;
pub mod reporter;
pub mod scanner;
pub mod utils;
