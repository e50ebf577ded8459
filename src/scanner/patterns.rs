//! Marker-function pattern table.
//!
//! The table maps marker-function names to extraction rules. It is an ordered
//! list, not a map: when several names could match at the same position the
//! first table entry wins, so table order is a significant configuration
//! property.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Extraction rule for one marker function.
///
/// `source_map` is indexed by destination slot: `source_map[dest]` names the
/// call argument captured into that slot, `None` being an explicit "no value"
/// (used for plural forms without a "none" text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    /// Argument index carrying the translation domain, if the marker has one.
    pub domain_index: Option<usize>,
    /// Argument index carrying the disambiguation context, if any.
    pub context_index: Option<usize>,
    /// Argument index carrying the plural count. The count itself is never
    /// evaluated; the index is only bounds-checked.
    pub n_index: Option<usize>,
    pub source_map: Vec<Option<usize>>,
    pub is_plural: bool,
}

impl MarkerRule {
    fn single(source_index: usize) -> Self {
        Self {
            domain_index: None,
            context_index: None,
            n_index: None,
            source_map: vec![Some(source_index)],
            is_plural: false,
        }
    }

    fn with_domain(mut self, index: usize) -> Self {
        self.domain_index = Some(index);
        self
    }

    fn with_context(mut self, index: usize) -> Self {
        self.context_index = Some(index);
        self
    }

    fn plural(n_index: usize, source_map: &[Option<usize>]) -> Self {
        Self {
            domain_index: None,
            context_index: None,
            n_index: Some(n_index),
            source_map: source_map.to_vec(),
            is_plural: true,
        }
    }
}

/// Ordered list of (marker name, rule) pairs.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<(String, MarkerRule)>,
}

impl PatternTable {
    /// The default table, covering the whole marker-function family:
    /// `_` plain, `d`/`c` domain/context variants, `n`/`nn` plural variants
    /// (with and without a "none" form), and the deferred `f` twins that
    /// share their base rule.
    pub fn default_table() -> Self {
        let mut entries: Vec<(String, MarkerRule)> =
            vec![("gt".to_string(), MarkerRule::single(0))];

        // Each (base, rule) pair also registers the deferred-format "<base>f"
        // marker with the same rule.
        let pairs = [
            ("_", MarkerRule::single(0)),
            ("_d", MarkerRule::single(1).with_domain(0)),
            ("_c", MarkerRule::single(1).with_context(0)),
            ("_dc", MarkerRule::single(2).with_domain(0).with_context(1)),
            ("_n", MarkerRule::plural(0, &[None, Some(1), Some(2)])),
            ("_nn", MarkerRule::plural(0, &[Some(1), Some(2), Some(3)])),
            (
                "_nd",
                MarkerRule::plural(1, &[None, Some(2), Some(3)]).with_domain(0),
            ),
            (
                "_nc",
                MarkerRule::plural(1, &[None, Some(2), Some(3)]).with_context(0),
            ),
            (
                "_ndc",
                MarkerRule::plural(2, &[None, Some(3), Some(4)])
                    .with_domain(0)
                    .with_context(1),
            ),
            (
                "_nnd",
                MarkerRule::plural(1, &[Some(2), Some(3), Some(4)]).with_domain(0),
            ),
            (
                "_nnc",
                MarkerRule::plural(1, &[Some(2), Some(3), Some(4)]).with_context(0),
            ),
            (
                "_nndc",
                MarkerRule::plural(2, &[Some(3), Some(4), Some(5)])
                    .with_domain(0)
                    .with_context(1),
            ),
        ];

        for (name, rule) in pairs {
            entries.push((name.to_string(), rule.clone()));
            entries.push((format!("{}f", name), rule));
        }

        Self { entries }
    }

    /// Build a table from the config file's `patterns` object, preserving the
    /// file's key order.
    pub fn from_config(patterns: &Map<String, Value>) -> Result<Self> {
        let mut entries = Vec::with_capacity(patterns.len());

        for (name, value) in patterns {
            let raw: RawRule = serde_json::from_value(value.clone())
                .with_context(|| format!("Invalid rule for marker \"{}\"", name))?;
            entries.push((name.clone(), raw.compile(name)?));
        }

        if entries.is_empty() {
            bail!("Pattern table is empty; at least one marker is required");
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, MarkerRule)> {
        self.entries.iter()
    }

    /// Look up the rule for a marker name (first table entry wins).
    pub fn rule(&self, name: &str) -> Option<&MarkerRule> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::default_table()
    }
}

/// Rule as written in the config file.
///
/// `sourceMap` keys are destination-slot indices encoded as JSON object keys
/// (strings); they are parsed and densified into `MarkerRule::source_map`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    domain_index: Option<usize>,
    context_index: Option<usize>,
    n_index: Option<usize>,
    #[serde(default)]
    source_map: HashMap<String, Option<usize>>,
    #[serde(default)]
    is_plural: bool,
}

impl RawRule {
    fn compile(self, name: &str) -> Result<MarkerRule> {
        let mut slots: Vec<(usize, Option<usize>)> = Vec::with_capacity(self.source_map.len());
        for (dest, source) in self.source_map {
            let dest: usize = dest.parse().with_context(|| {
                format!(
                    "Invalid sourceMap slot \"{}\" for marker \"{}\": keys must be non-negative integers",
                    dest, name
                )
            })?;
            slots.push((dest, source));
        }

        let len = slots.iter().map(|(dest, _)| dest + 1).max().unwrap_or(0);
        let mut source_map = vec![None; len];
        for (dest, source) in slots {
            source_map[dest] = source;
        }

        Ok(MarkerRule {
            domain_index: self.domain_index,
            context_index: self.context_index,
            n_index: self.n_index,
            source_map,
            is_plural: self.is_plural,
        })
    }
}
