//! KPI record and the typed interpretation of its free-text cells

use crate::utils::{clean_cell, normalize_description, split_list};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One curated KPI, as found in a row of the indicator spreadsheet
///
/// All text fields are already cleaned: missing-value markers are `None` and
/// surrounding whitespace is trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRecord {
    /// 1-based row number in the sheet, counting the header as row 1
    pub row: usize,
    /// Originating organisation or framework
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_set: Option<String>,
    /// Name of the metric
    pub indicator: String,
    /// What is measured, whitespace normalised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw service category cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    /// Quantitative or qualitative
    pub indicator_type: IndicatorType,
    /// Illustrative usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Stakeholders requesting the KPI
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_groups: Vec<String>,
    /// Whether the KPI is mandatory for its service category
    pub mandatory: MandatoryFlag,
    /// Method or tool for collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
    /// Underlying raw signal (hits, citations, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Tools that can automate collection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub automation_tools: Vec<String>,
    /// Reference URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl KpiRecord {
    /// Start a record for the named indicator found on `row`
    #[must_use]
    pub fn new(row: usize, indicator: impl Into<String>) -> Self {
        Self {
            row,
            indicator: indicator.into(),
            ..Default::default()
        }
    }

    /// Assign a spreadsheet column by its canonical field
    ///
    /// The raw cell is cleaned according to the field's interpretation, so
    /// callers can pass spreadsheet text straight through.
    pub fn set_field(&mut self, field: KpiField, raw: &str) {
        let cell = clean_cell(raw);
        match field {
            KpiField::IndicatorSet => self.indicator_set = cell,
            KpiField::Indicator => self.indicator = cell.unwrap_or_default(),
            KpiField::Description => {
                self.description = cell.map(|d| normalize_description(&d));
            }
            KpiField::ServiceCategory => self.service_category = cell,
            KpiField::IndicatorType => {
                self.indicator_type = IndicatorType::parse(cell.as_deref());
            }
            KpiField::Example => self.example = cell,
            KpiField::TargetGroup => {
                self.target_groups = cell.map(|c| split_list(&c)).unwrap_or_default();
            }
            KpiField::Mandatory => self.mandatory = MandatoryFlag::parse(cell.as_deref()),
            KpiField::Measurement => self.measurement = cell,
            KpiField::Source => self.source = cell,
            KpiField::AutomationPossible => {
                self.automation_tools = cell.map(|c| split_list(&c)).unwrap_or_default();
            }
            KpiField::Link => self.link = cell,
        }
    }

    /// Link value if it points to a web resource
    #[must_use]
    pub fn web_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| l.starts_with("http"))
    }
}

/// Canonical KPI spreadsheet columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiField {
    /// `Indicator set`
    IndicatorSet,
    /// `Indicator`
    Indicator,
    /// `Description`
    Description,
    /// `Service Category`
    ServiceCategory,
    /// `Type of indicator`
    IndicatorType,
    /// `Example`
    Example,
    /// `Target Group`
    TargetGroup,
    /// `Mandatory`
    Mandatory,
    /// `Measurement (tool/estimation etc)`
    Measurement,
    /// `Source`
    Source,
    /// `Automation possible`
    AutomationPossible,
    /// `Link`
    Link,
}

impl KpiField {
    /// All fields in sheet order
    pub const ALL: [KpiField; 12] = [
        KpiField::IndicatorSet,
        KpiField::Indicator,
        KpiField::Description,
        KpiField::ServiceCategory,
        KpiField::IndicatorType,
        KpiField::Example,
        KpiField::TargetGroup,
        KpiField::Mandatory,
        KpiField::Measurement,
        KpiField::Source,
        KpiField::AutomationPossible,
        KpiField::Link,
    ];

    /// Recognise a column header
    ///
    /// Matching is case-insensitive on the trimmed header. Any header that
    /// starts with "measurement" maps to [`KpiField::Measurement`], since the
    /// sheet carries a parenthesised hint in that column name.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().to_lowercase();
        let field = match header.as_str() {
            "indicator set" | "indicator_set" => Self::IndicatorSet,
            "indicator" | "kpi" => Self::Indicator,
            "description" | "desc" => Self::Description,
            "service category" | "service_category" => Self::ServiceCategory,
            "type of indicator" | "indicator type" | "type" => Self::IndicatorType,
            "example" => Self::Example,
            "target group" | "target_group" => Self::TargetGroup,
            "mandatory" => Self::Mandatory,
            "source" => Self::Source,
            "automation possible" | "automation" => Self::AutomationPossible,
            "link" | "url" => Self::Link,
            h if h.starts_with("measurement") => Self::Measurement,
            _ => return None,
        };
        Some(field)
    }

    /// Column header as written in the curated sheet
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::IndicatorSet => "Indicator set",
            Self::Indicator => "Indicator",
            Self::Description => "Description",
            Self::ServiceCategory => "Service Category",
            Self::IndicatorType => "Type of indicator",
            Self::Example => "Example",
            Self::TargetGroup => "Target Group",
            Self::Mandatory => "Mandatory",
            Self::Measurement => "Measurement (tool/estimation etc)",
            Self::Source => "Source",
            Self::AutomationPossible => "Automation possible",
            Self::Link => "Link",
        }
    }
}

impl fmt::Display for KpiField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Whether an indicator is measured by numbers or by assessment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// Numeric measurement
    Quantitative,
    /// Assessment or description
    Qualitative,
    /// Cell empty or not recognised
    #[default]
    Unspecified,
}

impl IndicatorType {
    /// Interpret the "Type of indicator" cell
    ///
    /// A cell mentioning both kinds counts as qualitative.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Unspecified;
        };
        let lowered = value.to_lowercase();
        if lowered.contains("qualit") {
            Self::Qualitative
        } else if lowered.contains("quant") {
            Self::Quantitative
        } else {
            Self::Unspecified
        }
    }

    /// `Some(true)` for qualitative, `Some(false)` for quantitative
    #[must_use]
    pub fn is_qualitative(self) -> Option<bool> {
        match self {
            Self::Qualitative => Some(true),
            Self::Quantitative => Some(false),
            Self::Unspecified => None,
        }
    }
}

/// The "Mandatory" column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryFlag {
    /// yes / true / 1
    Mandatory,
    /// no / false / 0
    Recommended,
    /// Any other text, kept verbatim
    Other(String),
    /// Empty cell
    #[default]
    Unspecified,
}

impl MandatoryFlag {
    /// Interpret the "Mandatory" cell
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Unspecified;
        };
        match value.trim().to_lowercase().as_str() {
            "yes" | "true" | "1" => Self::Mandatory,
            "no" | "false" | "0" => Self::Recommended,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Boolean value when the flag is a recognised yes/no
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Mandatory => Some(true),
            Self::Recommended => Some(false),
            Self::Other(_) | Self::Unspecified => None,
        }
    }
}
