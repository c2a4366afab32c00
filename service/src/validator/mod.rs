//! Curation lint for KPI sheets
//!
//! Row rules flag values the generators would drop or only partly
//! understand. Identifier clashes across rows are errors because both rows
//! would be merged into one indicator or one KPI instance.

pub mod rules;

use crate::loader::BaseOntology;
use crate::namespace::Namespace;
use rimo_core::utils::{indicator_local_name, local_name, slug_camel};
use rimo_core::{
    KpiField, KpiRecord, Result, ValidationMessage, ValidationReport, ValidationSeverity, Vocabulary,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

pub use rules::{
    AutomationToolRule, DescriptionRule, IdentifierIriRule, IndicatorTypeRule,
    InstanceIdentifierRule, LinkRule, MandatoryFlagRule, ServiceCategoryRule, TargetGroupRule,
};

/// What rules may consult besides the record itself
pub struct RuleContext<'a> {
    /// Controlled vocabularies
    pub vocabulary: &'a Vocabulary,
    /// Category local names declared by a base ontology file
    pub declared_categories: &'a BTreeSet<String>,
    /// Namespace identifiers are minted in, when known
    pub namespace: Option<&'a Namespace>,
}

impl<'a> RuleContext<'a> {
    /// Create a context
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, declared_categories: &'a BTreeSet<String>) -> Self {
        Self {
            vocabulary,
            declared_categories,
            namespace: None,
        }
    }

    /// Check identifiers against `namespace`
    #[must_use]
    pub fn with_namespace(mut self, namespace: &'a Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Whether a "Service Category" cell resolves to at least one category
    #[must_use]
    pub fn knows_category(&self, value: &str) -> bool {
        self.declared_categories.contains(&local_name(value))
            || !self.vocabulary.resolve_category(value).is_empty()
    }
}

/// A check applied to each record independently
pub trait RecordRule: Send + Sync {
    /// Rule name, reported with every finding
    fn name(&self) -> &str;

    /// Findings for one record
    fn check(&self, record: &KpiRecord, context: &RuleContext<'_>) -> Vec<ValidationMessage>;
}

/// Runs every rule over a parsed sheet
pub struct RecordValidator {
    vocabulary: Vocabulary,
    declared_categories: BTreeSet<String>,
    namespace: Option<Namespace>,
    rules: Vec<Box<dyn RecordRule>>,
}

impl RecordValidator {
    /// Create a validator with the default rule set
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        let rules: Vec<Box<dyn RecordRule>> = vec![
            Box::new(DescriptionRule),
            Box::new(ServiceCategoryRule),
            Box::new(IndicatorTypeRule),
            Box::new(TargetGroupRule),
            Box::new(MandatoryFlagRule),
            Box::new(AutomationToolRule),
            Box::new(LinkRule),
            Box::new(InstanceIdentifierRule),
            Box::new(IdentifierIriRule),
        ];
        Self {
            vocabulary,
            declared_categories: BTreeSet::new(),
            namespace: None,
            rules,
        }
    }

    /// Check that identifiers can be minted in `namespace`
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Also accept the categories declared by a base ontology
    ///
    /// Identifiers are then checked against the base file's `rimo`
    /// namespace, or `fallback_namespace` if it binds none.
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the base file binds `rimo` to an
    /// invalid IRI.
    pub fn with_base(mut self, base: &BaseOntology, fallback_namespace: &str) -> Result<Self> {
        let namespace = Namespace::new(base.rimo_namespace().unwrap_or(fallback_namespace))?;
        self.declared_categories = base.declared_categories(&namespace)?.into_iter().collect();
        self.namespace = Some(namespace);
        Ok(self)
    }

    /// Add a custom rule
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn RecordRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Names of the active rules
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        names.push("unique-identifier");
        names
    }

    /// Lint `records`
    #[must_use]
    pub fn validate(&self, records: &[KpiRecord]) -> ValidationReport {
        let mut report = ValidationReport::new(records.len());
        let mut context = RuleContext::new(&self.vocabulary, &self.declared_categories);
        if let Some(namespace) = &self.namespace {
            context = context.with_namespace(namespace);
        }

        for record in records {
            for rule in &self.rules {
                for message in rule.check(record, &context) {
                    report.push(message);
                }
            }
        }

        for message in duplicate_identifiers(records) {
            report.push(message);
        }

        report.sort();
        debug!("Applied {} rules to {} records", self.rules.len() + 1, records.len());
        info!(
            "Validation finished: {} errors, {} warnings",
            report.error_count(),
            report.warning_count()
        );
        report
    }
}

/// Rows whose indicator maps to an identifier already used by an earlier row
///
/// Base ontology identifiers are checked first. KPI instance identifiers are
/// `UpperCamelCase` and collide more easily ("Number of users" and "Number of
/// Users"), so rows that pass the first check are checked again on those.
fn duplicate_identifiers(records: &[KpiRecord]) -> Vec<ValidationMessage> {
    let mut indicator_rows: HashMap<String, usize> = HashMap::new();
    let mut instance_rows: HashMap<String, usize> = HashMap::new();
    let mut messages = Vec::new();

    for record in records {
        let id = indicator_local_name(&record.indicator);
        if let Some(first) = indicator_rows.get(&id) {
            messages.push(duplicate(
                record,
                format!("identifier '{id}' is already used by row {first}"),
            ));
            continue;
        }
        indicator_rows.insert(id, record.row);

        let instance_id = slug_camel(&record.indicator);
        if instance_id.is_empty() {
            continue;
        }
        match instance_rows.get(&instance_id) {
            Some(first) => messages.push(duplicate(
                record,
                format!("KPI identifier '{instance_id}' is already used by row {first}"),
            )),
            None => {
                instance_rows.insert(instance_id, record.row);
            }
        }
    }

    messages
}

fn duplicate(record: &KpiRecord, message: String) -> ValidationMessage {
    ValidationMessage::new(ValidationSeverity::Error, message)
        .with_row(record.row)
        .with_column(KpiField::Indicator)
        .with_indicator(record.indicator.as_str())
        .with_rule("unique-identifier")
}
