//! The editing collaborator's update contract.
//!
//! An external editor reads the same catalog document and submits a partial
//! list of updates keyed by (source, isJson, domain, context) — isPlural is
//! not part of the match tuple. The batch is transactional: every update
//! must match an existing entry before any entry is mutated.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::catalog::TranslationCatalog;

/// One submitted update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUpdate {
    pub source: String,
    #[serde(default)]
    pub is_json: bool,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
}

/// Read an update list from a JSON file.
pub fn load_updates(path: &Path) -> Result<Vec<TranslationUpdate>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read updates file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse updates file: {}", path.display()))
}

/// Apply a batch of updates to the catalog, all or nothing.
pub fn apply_updates(catalog: &mut TranslationCatalog, updates: &[TranslationUpdate]) -> Result<()> {
    // Resolve every update before mutating anything.
    let mut targets = Vec::with_capacity(updates.len());
    for update in updates {
        let index = catalog.entries.iter().position(|entry| {
            entry.source == update.source
                && entry.is_json == update.is_json
                && entry.domain == update.domain
                && entry.context == update.context
        });

        match index {
            Some(index) => targets.push(index),
            None => bail!(
                "No catalog entry matches source: {}, isJson: {}, domain: {:?}, context: {:?}",
                update.source,
                update.is_json,
                update.domain,
                update.context
            ),
        }
    }

    for (update, index) in updates.iter().zip(targets) {
        let entry = &mut catalog.entries[index];
        entry.translation = update.translation.clone();
        entry.is_draft = update.is_draft;
    }

    Ok(())
}
