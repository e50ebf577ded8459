//! Diagnostics for offending call sites.
//!
//! Two severities exist: hard errors exclude a record that could not be
//! built (rule indices past the argument list), warnings drop a record whose
//! required text was not a constant literal. Neither aborts the run; the
//! catalog is still written from every record that validated.

use std::fmt;

use crate::scanner::record::SourceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A rule index pointed past the call's argument list; the record is
    /// excluded from the catalog.
    InsufficientParameters,
    /// A required source argument was not an enquoted constant; the record
    /// is dropped.
    NonLiteralArgument,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::InsufficientParameters => Severity::Error,
            DiagnosticKind::NonLiteralArgument => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::InsufficientParameters => write!(f, "insufficient-parameters"),
            DiagnosticKind::NonLiteralArgument => write!(f, "non-literal-argument"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Offending call text, marker through closing parenthesis.
    pub snippet: String,
    /// `"<file> [<line>,<column>]"` of the call.
    pub reference: String,
    /// Full source line of the call start, when available.
    pub source_line: Option<String>,
    /// 1-based column of the call on `source_line`.
    pub column: usize,
}

impl Diagnostic {
    pub fn insufficient_parameters(record: &SourceRecord, message: &str) -> Self {
        Self {
            kind: DiagnosticKind::InsufficientParameters,
            message: message.to_string(),
            snippet: record.snippet.clone(),
            reference: record.reference.clone(),
            source_line: Some(record.source_line.clone()),
            column: record.position.column,
        }
    }

    pub fn non_literal_argument(record: &SourceRecord) -> Self {
        Self {
            kind: DiagnosticKind::NonLiteralArgument,
            message: "Text is not a constant string; the argument is not enquoted.".to_string(),
            snippet: record.snippet.clone(),
            reference: record.reference.clone(),
            source_line: Some(record.source_line.clone()),
            column: record.position.column,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}
