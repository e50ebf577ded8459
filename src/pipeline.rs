//! Per-file extraction and cross-file aggregation.
//!
//! Each file is scanned sequentially (a scan step's starting cursor depends
//! on its caller's ending state), but files share no mutable state, so the
//! file set fans out across rayon workers. Aggregation order is the sorted
//! path order, independent of scheduling, and every record keeps its
//! originating file for references.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::scanner::Scanner;
use crate::scanner::patterns::PatternTable;
use crate::scanner::record::{SourceRecord, build_record};

/// Extract the records of one source text.
pub fn extract_source(
    code: &str,
    file: &str,
    table: &PatternTable,
    strict: bool,
) -> Result<Vec<SourceRecord>> {
    let scanner = Scanner::new(table, strict);
    let sites = scanner
        .scan(code)
        .with_context(|| format!("Failed to scan {}", file))?;

    Ok(sites
        .into_iter()
        .filter_map(|site| {
            let rule = table.rule(&site.name)?;
            let arguments = scanner.split_arguments(&site.arguments);
            Some(build_record(site, rule, &arguments, file))
        })
        .collect())
}

/// Extract the records of one file on disk.
pub fn extract_file(file: &str, table: &PatternTable, strict: bool) -> Result<Vec<SourceRecord>> {
    let code =
        fs::read_to_string(file).with_context(|| format!("Failed to read file: {}", file))?;
    extract_source(&code, file, table, strict)
}

/// Extract and aggregate the records of many files, scanning in parallel.
pub fn extract_files(
    files: &[String],
    table: &PatternTable,
    strict: bool,
) -> Result<Vec<SourceRecord>> {
    let mut sorted = files.to_vec();
    sorted.sort();

    let per_file: Vec<Result<Vec<SourceRecord>>> = sorted
        .par_iter()
        .map(|file| extract_file(file, table, strict))
        .collect();

    let mut records = Vec::new();
    for result in per_file {
        records.extend(result?);
    }
    Ok(records)
}
