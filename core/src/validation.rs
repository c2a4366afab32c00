//! Curation report types for KPI sheets
//!
//! The validator in the service crate lints parsed rows and records its
//! findings here, keyed by spreadsheet row and column so curators can go
//! straight to the offending cell.

use crate::types::KpiField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    /// Informational message
    Info,
    /// Value is dropped or only partly understood
    Warning,
    /// The row would produce a broken ontology
    Error,
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single curation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Severity level of the message
    pub severity: ValidationSeverity,
    /// Human-readable message
    pub message: String,
    /// Sheet row (1-based, header is row 1)
    pub row: Option<usize>,
    /// Column the finding refers to
    pub column: Option<KpiField>,
    /// Indicator name of the row
    pub indicator: Option<String>,
    /// Check that produced the finding
    pub rule: Option<String>,
}

impl ValidationMessage {
    /// Create a new validation message
    pub fn new(severity: ValidationSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            row: None,
            column: None,
            indicator: None,
            rule: None,
        }
    }

    /// Set the sheet row
    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the column
    #[must_use]
    pub fn with_column(mut self, column: KpiField) -> Self {
        self.column = Some(column);
        self
    }

    /// Set the indicator name
    #[must_use]
    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = Some(indicator.into());
        self
    }

    /// Set the rule that was violated
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.severity)?;

        if let Some(row) = self.row {
            write!(f, " row {row}")?;
        }
        if let Some(column) = self.column {
            write!(f, " '{column}'")?;
        }
        if let Some(indicator) = &self.indicator {
            write!(f, " ({indicator})")?;
        }

        write!(f, ": {}", self.message)?;

        if let Some(rule) = &self.rule {
            write!(f, " [rule: {rule}]")?;
        }

        Ok(())
    }
}

/// Result of linting a KPI sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of KPI records checked
    pub records: usize,
    /// Findings in row order
    pub messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    /// Create an empty report for `records` rows
    #[must_use]
    pub fn new(records: usize) -> Self {
        Self {
            records,
            messages: Vec::new(),
        }
    }

    /// Add a finding
    pub fn push(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    /// Number of findings with the given severity
    #[must_use]
    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    /// Number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(ValidationSeverity::Error)
    }

    /// Number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(ValidationSeverity::Warning)
    }

    /// Whether the sheet can be published
    ///
    /// In strict mode warnings block publishing as well.
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        self.error_count() == 0 && (!strict || self.warning_count() == 0)
    }

    /// Sort findings by row, then severity (most severe first)
    pub fn sort(&mut self) {
        self.messages.sort_by(|a, b| {
            a.row
                .cmp(&b.row)
                .then_with(|| b.severity.cmp(&a.severity))
        });
    }
}
