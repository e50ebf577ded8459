//! Source records: the structured result of one matched marker call.
//!
//! A [`SourceRecord`] is transient: produced per scan, consumed by catalog
//! reconciliation, then discarded.

use crate::scanner::patterns::MarkerRule;
use crate::scanner::{RawCallSite, SourcePosition};
use crate::utils::try_strip_quotes;

/// Error message attached to a record whose rule points past the call's
/// argument list.
pub const INSUFFICIENT_PARAMETERS: &str = "Not enough parameters to extract.";

/// Structured result of one matched call site.
///
/// `source` is indexed by destination slot and holds the raw (still quoted)
/// argument texts; `None` marks an explicit "no value" slot. Whether an
/// argument is actually a literal is decided at reconcile time.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub source: Vec<Option<String>>,
    pub domain: Option<String>,
    pub context: Option<String>,
    pub is_plural: bool,
    /// File the record came from; kept so records from parallel scans can be
    /// aggregated without losing their origin.
    pub file: String,
    pub position: SourcePosition,
    /// `"<file> [<line>,<column>]"`, 1-based.
    pub reference: String,
    pub snippet: String,
    pub arguments: String,
    pub source_line: String,
    /// Non-fatal builder error; the record is still emitted but excluded
    /// from reconciliation.
    pub error: Option<String>,
}

/// Apply a rule to a captured call and its split arguments.
///
/// Out-of-range domain/context/plural-count/source indices attach the
/// insufficient-parameters error instead of failing the scan.
pub fn build_record(
    site: RawCallSite,
    rule: &MarkerRule,
    arguments: &[String],
    file: &str,
) -> SourceRecord {
    let mut error = None;

    let domain = match rule.domain_index {
        Some(index) => match arguments.get(index) {
            Some(argument) => Some(try_strip_quotes(argument).to_string()),
            None => {
                error = Some(INSUFFICIENT_PARAMETERS.to_string());
                None
            }
        },
        None => None,
    };

    let context = match rule.context_index {
        Some(index) => match arguments.get(index) {
            Some(argument) => Some(try_strip_quotes(argument).to_string()),
            None => {
                error = Some(INSUFFICIENT_PARAMETERS.to_string());
                None
            }
        },
        None => None,
    };

    // The count argument is never evaluated, only bounds-checked.
    if let Some(index) = rule.n_index
        && index >= arguments.len()
    {
        error = Some(INSUFFICIENT_PARAMETERS.to_string());
    }

    let mut source = Vec::with_capacity(rule.source_map.len());
    for mapped in &rule.source_map {
        match mapped {
            Some(index) => match arguments.get(*index) {
                Some(argument) => source.push(Some(argument.clone())),
                None => {
                    error = Some(INSUFFICIENT_PARAMETERS.to_string());
                    source.push(None);
                }
            },
            None => source.push(None),
        }
    }

    let reference = format!(
        "{} [{},{}]",
        file, site.position.line, site.position.column
    );

    SourceRecord {
        source,
        domain,
        context,
        is_plural: rule.is_plural,
        file: file.to_string(),
        position: site.position,
        reference,
        snippet: site.snippet,
        arguments: site.arguments,
        source_line: site.source_line,
        error,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scanner::patterns::PatternTable;
    use crate::scanner::Scanner;

    fn records_for(text: &str) -> Vec<SourceRecord> {
        let table = PatternTable::default_table();
        let scanner = Scanner::new(&table, false);
        scanner
            .scan(text)
            .unwrap()
            .into_iter()
            .filter_map(|site| {
                let rule = table.rule(&site.name)?;
                let arguments = scanner.split_arguments(&site.arguments);
                Some(build_record(site, rule, &arguments, "app.js"))
            })
            .collect()
    }

    #[test]
    fn test_single_source_record() {
        let records = records_for(r#"_("Hello")"#);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.source, vec![Some(r#""Hello""#.to_string())]);
        assert_eq!(record.domain, None);
        assert_eq!(record.context, None);
        assert!(!record.is_plural);
        assert_eq!(record.reference, "app.js [1,1]");
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_domain_and_context_are_unquoted() {
        let records = records_for(r#"_dc("ui", 'menu', "Open")"#);

        let record = &records[0];
        assert_eq!(record.domain.as_deref(), Some("ui"));
        assert_eq!(record.context.as_deref(), Some("menu"));
        assert_eq!(record.source, vec![Some(r#""Open""#.to_string())]);
    }

    #[test]
    fn test_unquoted_domain_kept_raw() {
        let records = records_for(r#"_d(domainVar, "Open")"#);
        assert_eq!(records[0].domain.as_deref(), Some("domainVar"));
    }

    #[test]
    fn test_plural_record_keeps_empty_slot() {
        let records = records_for(r#"_n(count, "one item", "%s items")"#);

        let record = &records[0];
        assert!(record.is_plural);
        assert_eq!(
            record.source,
            vec![
                None,
                Some(r#""one item""#.to_string()),
                Some(r#""%s items""#.to_string()),
            ]
        );
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_missing_source_argument_is_nonfatal() {
        let records = records_for(r#"_d("ui")"#);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].error.as_deref(),
            Some(INSUFFICIENT_PARAMETERS)
        );
    }

    #[test]
    fn test_missing_count_argument_is_nonfatal() {
        let records = records_for(r#"_n()"#);
        assert_eq!(
            records[0].error.as_deref(),
            Some(INSUFFICIENT_PARAMETERS)
        );
    }

    #[test]
    fn test_reference_uses_call_position() {
        let records = records_for("\n  _(\"Hi\")");
        assert_eq!(records[0].reference, "app.js [2,3]");
    }
}
