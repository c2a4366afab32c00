//! Per-row curation rules

use super::{RecordRule, RuleContext};
use rimo_core::utils::{indicator_local_name, slug_camel};
use rimo_core::{IndicatorType, KpiField, KpiRecord, MandatoryFlag, ValidationMessage, ValidationSeverity};
use url::Url;

fn warning(rule: &str, record: &KpiRecord, column: KpiField, message: impl Into<String>) -> ValidationMessage {
    ValidationMessage::new(ValidationSeverity::Warning, message)
        .with_row(record.row)
        .with_column(column)
        .with_indicator(record.indicator.as_str())
        .with_rule(rule)
}

/// Every KPI should carry a description
pub struct DescriptionRule;

impl RecordRule for DescriptionRule {
    fn name(&self) -> &str {
        "description-present"
    }

    fn check(&self, record: &KpiRecord, _context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        if record.description.is_some() {
            return Vec::new();
        }
        vec![warning(self.name(), record, KpiField::Description, "description is missing")]
    }
}

/// Service categories must resolve to a known category
pub struct ServiceCategoryRule;

impl RecordRule for ServiceCategoryRule {
    fn name(&self) -> &str {
        "known-category"
    }

    fn check(&self, record: &KpiRecord, context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        match &record.service_category {
            Some(value) if !context.knows_category(value) => vec![warning(
                self.name(),
                record,
                KpiField::ServiceCategory,
                format!("unknown service category '{value}'"),
            )],
            _ => Vec::new(),
        }
    }
}

/// Target groups outside the vocabulary are dropped from the base ontology
pub struct TargetGroupRule;

impl RecordRule for TargetGroupRule {
    fn name(&self) -> &str {
        "known-target-group"
    }

    fn check(&self, record: &KpiRecord, context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        record
            .target_groups
            .iter()
            .filter(|group| context.vocabulary.resolve_target_group(group).is_none())
            .map(|group| {
                warning(
                    self.name(),
                    record,
                    KpiField::TargetGroup,
                    format!("unknown target group '{group}'"),
                )
            })
            .collect()
    }
}

/// Automation tools outside the vocabulary are dropped from the base ontology
pub struct AutomationToolRule;

impl RecordRule for AutomationToolRule {
    fn name(&self) -> &str {
        "known-automation-tool"
    }

    fn check(&self, record: &KpiRecord, context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        record
            .automation_tools
            .iter()
            .filter(|tool| context.vocabulary.resolve_automation_tool(tool).is_none())
            .map(|tool| {
                warning(
                    self.name(),
                    record,
                    KpiField::AutomationPossible,
                    format!("unknown automation tool '{tool}'"),
                )
            })
            .collect()
    }
}

/// The mandatory flag should read yes or no
pub struct MandatoryFlagRule;

impl RecordRule for MandatoryFlagRule {
    fn name(&self) -> &str {
        "mandatory-flag"
    }

    fn check(&self, record: &KpiRecord, _context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        match &record.mandatory {
            MandatoryFlag::Other(text) => vec![warning(
                self.name(),
                record,
                KpiField::Mandatory,
                format!("'{text}' is neither yes nor no, no relevance is recorded"),
            )],
            _ => Vec::new(),
        }
    }
}

/// The indicator type should be quantitative or qualitative
pub struct IndicatorTypeRule;

impl RecordRule for IndicatorTypeRule {
    fn name(&self) -> &str {
        "indicator-type"
    }

    fn check(&self, record: &KpiRecord, _context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        if record.indicator_type != IndicatorType::Unspecified {
            return Vec::new();
        }
        vec![warning(
            self.name(),
            record,
            KpiField::IndicatorType,
            "type of indicator is missing or neither quantitative nor qualitative",
        )]
    }
}

/// Links should be web addresses
pub struct LinkRule;

impl RecordRule for LinkRule {
    fn name(&self) -> &str {
        "web-link"
    }

    fn check(&self, record: &KpiRecord, _context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        let Some(link) = &record.link else {
            return Vec::new();
        };
        if !link.starts_with("http") {
            return vec![warning(
                self.name(),
                record,
                KpiField::Link,
                format!("link '{link}' is not a web address, kept as plain text"),
            )];
        }
        match Url::parse(link) {
            Ok(_) => Vec::new(),
            Err(e) => vec![warning(
                self.name(),
                record,
                KpiField::Link,
                format!("link '{link}' is not a valid IRI: {e}"),
            )],
        }
    }
}

/// Indicator names need alphanumeric characters to mint an instance IRI
pub struct InstanceIdentifierRule;

impl RecordRule for InstanceIdentifierRule {
    fn name(&self) -> &str {
        "instance-identifier"
    }

    fn check(&self, record: &KpiRecord, _context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        if !slug_camel(&record.indicator).is_empty() {
            return Vec::new();
        }
        vec![warning(
            self.name(),
            record,
            KpiField::Indicator,
            "indicator has no letters or digits, no KPI instance is generated",
        )]
    }
}

/// Indicator identifiers must mint valid IRIs in the target namespace
///
/// Generation aborts on a term that cannot be minted, so this is an error
/// rather than a warning.
pub struct IdentifierIriRule;

impl RecordRule for IdentifierIriRule {
    fn name(&self) -> &str {
        "identifier-iri"
    }

    fn check(&self, record: &KpiRecord, context: &RuleContext<'_>) -> Vec<ValidationMessage> {
        let Some(namespace) = context.namespace else {
            return Vec::new();
        };
        [indicator_local_name(&record.indicator), slug_camel(&record.indicator)]
            .into_iter()
            .filter(|local| !local.is_empty())
            .filter_map(|local| namespace.term(&local).err().map(|err| (local, err)))
            .map(|(local, err)| {
                ValidationMessage::new(
                    ValidationSeverity::Error,
                    format!("no valid IRI can be minted for '{local}': {err}"),
                )
                .with_row(record.row)
                .with_column(KpiField::Indicator)
                .with_indicator(record.indicator.as_str())
                .with_rule(self.name())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use rimo_core::Vocabulary;
    use std::collections::BTreeSet;

    fn check(rule: &dyn RecordRule, record: &KpiRecord) -> Vec<ValidationMessage> {
        let vocabulary = Vocabulary::default();
        let declared = BTreeSet::new();
        rule.check(record, &RuleContext::new(&vocabulary, &declared))
    }

    #[test]
    fn test_description_rule() {
        let mut record = KpiRecord::new(4, "Users");
        assert_eq!(check(&DescriptionRule, &record).len(), 1);
        record.set_field(KpiField::Description, "Number of users");
        assert!(check(&DescriptionRule, &record).is_empty());
    }

    #[test]
    fn test_category_rule() {
        let mut record = KpiRecord::new(4, "Users");
        record.set_field(KpiField::ServiceCategory, "Workflows / pipelines");
        assert!(check(&ServiceCategoryRule, &record).is_empty());

        record.set_field(KpiField::ServiceCategory, "Spaceships");
        let messages = check(&ServiceCategoryRule, &record);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].column, Some(KpiField::ServiceCategory));
        assert!(messages[0].message.contains("Spaceships"));
    }

    #[test]
    fn test_token_rules_report_each_unknown_token() {
        let mut record = KpiRecord::new(5, "Users");
        record.set_field(KpiField::TargetGroup, "End User, Journalists, Pets");
        record.set_field(KpiField::AutomationPossible, "Matomo, Excel");
        assert_eq!(check(&TargetGroupRule, &record).len(), 2);
        assert_eq!(check(&AutomationToolRule, &record).len(), 1);
    }

    #[test]
    fn test_mandatory_and_type_rules() {
        let mut record = KpiRecord::new(5, "Users");
        record.set_field(KpiField::Mandatory, "sometimes");
        assert_eq!(check(&MandatoryFlagRule, &record).len(), 1);
        assert_eq!(check(&IndicatorTypeRule, &record).len(), 1);

        record.set_field(KpiField::Mandatory, "No");
        record.set_field(KpiField::IndicatorType, "Qualitative");
        assert!(check(&MandatoryFlagRule, &record).is_empty());
        assert!(check(&IndicatorTypeRule, &record).is_empty());
    }

    #[test]
    fn test_link_rule() {
        let mut record = KpiRecord::new(5, "Users");
        assert!(check(&LinkRule, &record).is_empty());
        record.set_field(KpiField::Link, "see wiki");
        assert_eq!(check(&LinkRule, &record).len(), 1);
        record.set_field(KpiField::Link, "https://example.org/kpi");
        assert!(check(&LinkRule, &record).is_empty());
    }

    #[test]
    fn test_instance_identifier_rule() {
        assert_eq!(check(&InstanceIdentifierRule, &KpiRecord::new(5, "%%")).len(), 1);
        assert!(check(&InstanceIdentifierRule, &KpiRecord::new(5, "Users")).is_empty());
    }

    #[test]
    fn test_identifier_iri_rule() {
        let vocabulary = Vocabulary::default();
        let declared = BTreeSet::new();
        let namespace = Namespace::new("https://w3id.org/RIMO/").unwrap();
        let context = RuleContext::new(&vocabulary, &declared).with_namespace(&namespace);

        for name in ["% of FAIR datasets", "Uptime 100%", "Downloads [monthly]", "# of users"] {
            let record = KpiRecord::new(4, name);
            assert!(IdentifierIriRule.check(&record, &context).is_empty(), "{name}");
        }

        let without_namespace = RuleContext::new(&vocabulary, &declared);
        assert!(IdentifierIriRule
            .check(&KpiRecord::new(4, "Users"), &without_namespace)
            .is_empty());
    }
}
