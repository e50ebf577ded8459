//! Catalog reconciliation.
//!
//! One sequential pass over the aggregated source records, against the
//! catalog loaded from disk: exact-keyed entries keep their translation,
//! renamed or re-scoped strings inherit the closest prior translation as a
//! draft through tiered key relaxation, entries no current record touches
//! are pruned (unless retention is requested), and the result is sorted into
//! a deterministic snapshot.

use std::collections::HashMap;

use serde_json::Map;

use crate::catalog::{EntryKey, TranslationCatalog, TranslationEntry};
use crate::diagnostic::Diagnostic;
use crate::scanner::record::SourceRecord;
use crate::utils::strip_quotes;

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Target language stamped on every reconciled entry. Mandatory; the
    /// caller fails before scanning when it is not configured.
    pub language: String,
    /// Retain prior entries no current record matched.
    pub keep_unused: bool,
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub catalog: TranslationCatalog,
    pub diagnostics: Vec<Diagnostic>,
    /// Entries seeded from an inexact prior match, pending confirmation.
    pub drafts_seeded: usize,
    /// Entries with no prior match at all.
    pub new_entries: usize,
    /// Prior entries dropped because nothing referenced them.
    pub pruned: usize,
}

/// Key-relaxation tiers, applied in order: exact, drop context, drop domain,
/// drop both. Each tier is a pure lookup over an index built once from the
/// prior catalog.
struct TierIndex {
    exact: HashMap<EntryKey, usize>,
    no_context: HashMap<(String, bool, bool, Option<String>), usize>,
    no_domain: HashMap<(String, bool, bool, Option<String>), usize>,
    source_only: HashMap<(String, bool, bool), usize>,
}

impl TierIndex {
    fn build(catalog: &TranslationCatalog) -> Self {
        let mut exact = HashMap::new();
        let mut no_context = HashMap::new();
        let mut no_domain = HashMap::new();
        let mut source_only = HashMap::new();

        for (index, entry) in catalog.iter().enumerate() {
            let key = entry.key();
            no_context
                .entry((
                    key.source.clone(),
                    key.is_plural,
                    key.is_json,
                    key.domain.clone(),
                ))
                .or_insert(index);
            no_domain
                .entry((
                    key.source.clone(),
                    key.is_plural,
                    key.is_json,
                    key.context.clone(),
                ))
                .or_insert(index);
            source_only
                .entry((key.source.clone(), key.is_plural, key.is_json))
                .or_insert(index);
            exact.entry(key).or_insert(index);
        }

        Self {
            exact,
            no_context,
            no_domain,
            source_only,
        }
    }

    fn exact(&self, key: &EntryKey) -> Option<usize> {
        self.exact.get(key).copied()
    }

    /// First inexact tier that hits, tried in relaxation order.
    fn fuzzy(&self, key: &EntryKey) -> Option<usize> {
        self.no_context
            .get(&(
                key.source.clone(),
                key.is_plural,
                key.is_json,
                key.domain.clone(),
            ))
            .or_else(|| {
                self.no_domain.get(&(
                    key.source.clone(),
                    key.is_plural,
                    key.is_json,
                    key.context.clone(),
                ))
            })
            .or_else(|| {
                self.source_only
                    .get(&(key.source.clone(), key.is_plural, key.is_json))
            })
            .copied()
    }
}

/// Merge the records into the catalog and produce the next snapshot.
pub fn reconcile(
    prior: &TranslationCatalog,
    records: &[SourceRecord],
    options: &ReconcileOptions,
) -> ReconcileOutcome {
    let tiers = TierIndex::build(prior);
    let mut used = vec![false; prior.len()];

    let mut entries: Vec<TranslationEntry> = Vec::new();
    let mut emitted: HashMap<EntryKey, usize> = HashMap::new();
    let mut diagnostics = Vec::new();
    let mut drafts_seeded = 0;
    let mut new_entries = 0;

    for record in records {
        if let Some(message) = &record.error {
            diagnostics.push(Diagnostic::insufficient_parameters(record, message));
            continue;
        }

        let Some((source, is_json)) = normalize_source(record) else {
            diagnostics.push(Diagnostic::non_literal_argument(record));
            continue;
        };

        let key = EntryKey {
            source,
            is_plural: record.is_plural,
            is_json,
            domain: non_empty(&record.domain),
            context: non_empty(&record.context),
        };

        // Repeated occurrence within this run: accumulate the reference.
        if let Some(&index) = emitted.get(&key) {
            append_reference(&mut entries[index], &record.reference);
            continue;
        }

        let entry = if let Some(index) = tiers.exact(&key) {
            // The exact match keeps its translation, draft flag and
            // pass-through metadata; only the references are regenerated.
            used[index] = true;
            let prior_entry = &prior.entries[index];
            TranslationEntry {
                language: Some(options.language.clone()),
                references: Some(record.reference.clone()),
                extra: prior_entry.extra.clone(),
                translation: prior_entry.translation.clone(),
                is_draft: prior_entry.is_draft,
                ..entry_for_key(&key)
            }
        } else if let Some(index) = tiers.fuzzy(&key) {
            // Closest prior translation, seeded as a draft under the new
            // key; the old reference and metadata are discarded.
            drafts_seeded += 1;
            TranslationEntry {
                language: Some(options.language.clone()),
                references: Some(record.reference.clone()),
                translation: prior.entries[index].translation.clone(),
                is_draft: true,
                ..entry_for_key(&key)
            }
        } else {
            new_entries += 1;
            TranslationEntry {
                language: Some(options.language.clone()),
                references: Some(record.reference.clone()),
                ..entry_for_key(&key)
            }
        };

        emitted.insert(key, entries.len());
        entries.push(entry);
    }

    let mut pruned = 0;
    for (index, entry) in prior.iter().enumerate() {
        if used[index] {
            continue;
        }
        if options.keep_unused {
            entries.push(entry.clone());
        } else {
            pruned += 1;
        }
    }

    entries.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then_with(|| a.domain.cmp(&b.domain))
            .then_with(|| a.context.cmp(&b.context))
    });

    ReconcileOutcome {
        catalog: TranslationCatalog { entries },
        diagnostics,
        drafts_seeded,
        new_entries,
        pruned,
    }
}

fn entry_for_key(key: &EntryKey) -> TranslationEntry {
    TranslationEntry {
        source: key.source.clone(),
        is_plural: key.is_plural,
        is_json: key.is_json,
        domain: key.domain.clone(),
        context: key.context.clone(),
        language: None,
        translation: None,
        is_draft: false,
        references: None,
        extra: Map::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(String::from)
}

fn append_reference(entry: &mut TranslationEntry, reference: &str) {
    match &mut entry.references {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(reference);
        }
        None => entry.references = Some(reference.to_string()),
    }
}

/// Normalize a record's source slots into the catalog representation.
///
/// Every populated slot must be a symmetrically enquoted constant; template
/// (backtick) literals additionally have carriage returns removed. A single
/// populated slot becomes the scalar text; anything else becomes a
/// JSON-encoded ordered sequence flagged `is_json`. Returns `None` when a
/// required slot is not a literal.
fn normalize_source(record: &SourceRecord) -> Option<(String, bool)> {
    let mut texts: Vec<Option<String>> = Vec::with_capacity(record.source.len());

    for slot in &record.source {
        match slot {
            Some(raw) => {
                let is_template = raw.starts_with('`');
                let stripped = strip_quotes(raw)?;
                let text = if is_template {
                    stripped.replace('\r', "")
                } else {
                    stripped.to_string()
                };
                texts.push(Some(text));
            }
            None => texts.push(None),
        }
    }

    match texts.as_slice() {
        [Some(text)] => Some((text.clone(), false)),
        _ => {
            // serde_json cannot fail on a list of optional strings.
            let encoded = serde_json::to_string(&texts).unwrap_or_default();
            Some((encoded, true))
        }
    }
}
