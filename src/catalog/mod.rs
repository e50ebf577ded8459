//! The persisted translation catalog.
//!
//! The catalog document is JSON: an array of entries, or (in older files) a
//! map from source text to the rest of the entry. Loading a missing file
//! yields an empty catalog; a malformed document is a fatal error. Saving
//! always writes the pretty-printed array form, overwritten wholesale.

pub mod reconcile;
pub mod updates;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One translation entry.
///
/// `source` is the scalar source text, or a JSON-encoded ordered sequence of
/// plural forms when `is_json` is set (so a one-element sequence is never
/// confused with a scalar). Unknown document fields are kept in `extra` and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub source: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_plural: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_draft: bool,
    /// Accumulated reference text, newline-joined across occurrences.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// The identity of an entry within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub source: String,
    pub is_plural: bool,
    pub is_json: bool,
    pub domain: Option<String>,
    pub context: Option<String>,
}

impl TranslationEntry {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            source: self.source.clone(),
            is_plural: self.is_plural,
            is_json: self.is_json,
            domain: self.domain.clone(),
            context: self.context.clone(),
        }
    }
}

/// A collection of entries uniquely keyed by
/// (source, isPlural, isJson, domain, context).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationCatalog {
    pub entries: Vec<TranslationEntry>,
}

impl TranslationCatalog {
    /// Load a catalog document. A missing file is an empty catalog, not an
    /// error; a document that does not parse is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        Self::from_document(value)
            .with_context(|| format!("Malformed catalog file: {}", path.display()))
    }

    fn from_document(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).context("Invalid catalog entry")
                })
                .collect::<Result<Vec<TranslationEntry>>>()?,
            // Map form: { "<source>": { ...entry } }.
            Value::Object(map) => map
                .into_iter()
                .map(|(source, item)| {
                    let Value::Object(mut fields) = item else {
                        bail!("Invalid catalog entry for source \"{}\"", source);
                    };
                    fields.insert("source".to_string(), Value::String(source.clone()));
                    serde_json::from_value(Value::Object(fields))
                        .with_context(|| format!("Invalid catalog entry for source \"{}\"", source))
                })
                .collect::<Result<Vec<TranslationEntry>>>()?,
            _ => bail!("Catalog document must be an array or an object"),
        };

        Ok(Self { entries })
    }

    /// Save the pretty-printed array form with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = self.to_pretty_json()?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write catalog file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize catalog")?;
        Ok(format!("{}\n", json))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.iter()
    }
}
