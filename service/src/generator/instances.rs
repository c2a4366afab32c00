//! KPI instance graph generator
//!
//! Every sheet row becomes a `rimo:KPI` individual linked to the service
//! categories it applies to, the means used to measure it, the tools that can
//! collect it and the agents requesting it. When a base ontology file is
//! available the instances reuse its namespace and categories and import it.

use super::traits::OntologyGenerator;
use crate::graph::OntologyGraph;
use crate::loader::BaseOntology;
use crate::namespace::{Namespace, PrefixMap, dcterms, foaf, owl};
use oxigraph::model::vocab::rdfs;
use oxigraph::model::NamedNode;
use rimo_core::utils::{local_name, slug_camel};
use rimo_core::{KpiRecord, Result, RimoConfig, RimoError, Vocabulary};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Terms of the KPI model
struct KpiTerms {
    kpi: NamedNode,
    measurement_means: NamedNode,
    automation_tool: NamedNode,
    name: NamedNode,
    description: NamedNode,
    example: NamedNode,
    is_qualitative: NamedNode,
    applied_to: NamedNode,
    mandatory_for: NamedNode,
    recommended_for: NamedNode,
    measured_by: NamedNode,
    can_be_automated_by: NamedNode,
    requested_by: NamedNode,
}

impl KpiTerms {
    fn new(ns: &Namespace) -> Result<Self> {
        Ok(Self {
            kpi: ns.term("KPI")?,
            measurement_means: ns.term("MeasurementMeans")?,
            automation_tool: ns.term("AutomationTool")?,
            name: ns.term("name")?,
            description: ns.term("description")?,
            example: ns.term("example")?,
            is_qualitative: ns.term("isQualitativeIndicator")?,
            applied_to: ns.term("appliedTo")?,
            mandatory_for: ns.term("mandatoryFor")?,
            recommended_for: ns.term("recommendedFor")?,
            measured_by: ns.term("measuredBy")?,
            can_be_automated_by: ns.term("canBeAutomatedBy")?,
            requested_by: ns.term("requestedBy")?,
        })
    }
}

/// Generator for the KPI instance graph
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    namespace: Namespace,
    prefixes: PrefixMap,
    ontology_iri: NamedNode,
    instance_iri: NamedNode,
    title: String,
    language: String,
    vocabulary: Vocabulary,
    declared_categories: BTreeSet<String>,
}

impl InstanceGenerator {
    /// Create a generator from configuration alone
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if a configured IRI is invalid.
    pub fn new(config: &RimoConfig) -> Result<Self> {
        let namespace = Namespace::new(config.namespace.base.as_str())?;
        Ok(Self {
            prefixes: PrefixMap::standard(namespace.as_str()),
            namespace,
            ontology_iri: iri(&config.namespace.ontology_iri)?,
            instance_iri: iri(&config.namespace.instance_ontology_iri)?,
            title: config.metadata.instance_title.clone(),
            language: config.namespace.language.clone(),
            vocabulary: config.vocabulary.clone(),
            declared_categories: BTreeSet::new(),
        })
    }

    /// Align with an existing base ontology
    ///
    /// Adopts its `rimo` namespace and prefixes, imports its `owl:Ontology`
    /// and accepts the service categories it declares.
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the base file binds `rimo` to an
    /// invalid IRI.
    pub fn with_base(mut self, base: &BaseOntology) -> Result<Self> {
        if let Some(rimo) = base.rimo_namespace() {
            self.namespace = Namespace::new(rimo)?;
        }
        if let Some(ontology) = base.ontology_iri() {
            self.ontology_iri = ontology.clone();
        }

        let mut prefixes = PrefixMap::standard(self.namespace.as_str());
        prefixes.extend(base.prefixes());
        prefixes.add_prefix("rimo", self.namespace.as_str());
        self.prefixes = prefixes;

        self.declared_categories = base
            .declared_categories(&self.namespace)?
            .into_iter()
            .collect();
        debug!(
            "Base ontology declares {} service categories",
            self.declared_categories.len()
        );
        Ok(self)
    }

    /// Namespace of generated terms
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// IRI of the imported base ontology
    #[must_use]
    pub fn ontology_iri(&self) -> &NamedNode {
        &self.ontology_iri
    }

    /// Category local names for a "Service Category" cell
    ///
    /// Categories declared by the base file are matched first, then the
    /// vocabulary with its alias table.
    #[must_use]
    pub fn resolve_categories(&self, value: &str) -> Vec<String> {
        let local = local_name(value);
        if self.declared_categories.contains(&local) {
            return vec![local];
        }
        self.vocabulary
            .resolve_category(value)
            .into_iter()
            .map(rimo_core::Term::local_name)
            .collect()
    }

    fn add_kpi(&self, graph: &mut OntologyGraph, terms: &KpiTerms, record: &KpiRecord) -> Result<bool> {
        let id = slug_camel(&record.indicator);
        if id.is_empty() {
            warn!(
                "Row {}: indicator '{}' has no alphanumeric characters, skipping",
                record.row, record.indicator
            );
            return Ok(false);
        }
        let kpi = self.namespace.term(&id)?;
        debug!("Row {}: KPI {}", record.row, kpi);

        graph.add_type(&kpi, terms.kpi.as_ref());
        graph.add_text(&kpi, terms.name.as_ref(), &record.indicator)?;
        if let Some(description) = &record.description {
            graph.add_text(&kpi, terms.description.as_ref(), description)?;
        }
        if let Some(example) = &record.example {
            graph.add_text(&kpi, terms.example.as_ref(), example)?;
        }
        if let Some(qualitative) = record.indicator_type.is_qualitative() {
            graph.add_bool(&kpi, terms.is_qualitative.as_ref(), qualitative);
        }

        if let Some(value) = &record.service_category {
            let categories = self.resolve_categories(value);
            if categories.is_empty() {
                debug!("Row {}: service category '{}' not recognised", record.row, value);
            }
            let relevance = match record.mandatory.as_bool() {
                Some(true) => Some(&terms.mandatory_for),
                Some(false) => Some(&terms.recommended_for),
                None => None,
            };
            for category in categories {
                let node = self.namespace.term(&category)?;
                graph.add(&kpi, terms.applied_to.as_ref(), node.clone());
                if let Some(relevance) = relevance {
                    graph.add(&kpi, relevance.as_ref(), node);
                }
            }
        }

        if let Some(measurement) = &record.measurement {
            if let Some(means) = self.linked_node("means", measurement)? {
                graph.add_type(&means, terms.measurement_means.as_ref());
                graph.add_text(&means, rdfs::LABEL, measurement)?;
                graph.add(&kpi, terms.measured_by.as_ref(), means);
            }
        }

        for tool in &record.automation_tools {
            if let Some(node) = self.linked_node("tool", tool)? {
                graph.add_type(&node, terms.automation_tool.as_ref());
                graph.add_plain(&node, rdfs::LABEL, tool);
                graph.add(&kpi, terms.can_be_automated_by.as_ref(), node);
            }
        }

        for group in &record.target_groups {
            if let Some(node) = self.linked_node("agent", group)? {
                graph.add_type(&node, foaf::AGENT);
                graph.add_plain(&node, rdfs::LABEL, group);
                graph.add(&kpi, terms.requested_by.as_ref(), node);
            }
        }

        if let Some(link) = record.web_link() {
            match NamedNode::new(link) {
                Ok(node) => {
                    graph.add(&kpi, dcterms::RELATION, node);
                }
                Err(e) => warn!("Row {}: link '{}' is not a valid IRI: {}", record.row, link, e),
            }
        }

        Ok(true)
    }

    /// `rimo:<kind>/<SlugCamel>`, or `None` when the label has no usable characters
    fn linked_node(&self, kind: &str, label: &str) -> Result<Option<NamedNode>> {
        let id = slug_camel(label);
        if id.is_empty() {
            return Ok(None);
        }
        self.namespace.term(&format!("{kind}/{id}")).map(Some)
    }
}

impl OntologyGenerator for InstanceGenerator {
    fn name(&self) -> &str {
        "instances"
    }

    fn description(&self) -> &str {
        "RIMO KPI instance graph importing the base ontology"
    }

    fn get_default_filename(&self) -> &str {
        "KPIs.ttl"
    }

    fn generate(&self, records: &[KpiRecord]) -> Result<OntologyGraph> {
        let mut graph = OntologyGraph::new(self.prefixes.clone(), self.language.as_str());
        let terms = KpiTerms::new(&self.namespace)?;

        graph.add_type(&self.instance_iri, owl::ONTOLOGY);
        graph.add(&self.instance_iri, owl::IMPORTS, self.ontology_iri.clone());
        graph.add_text(&self.instance_iri, dcterms::TITLE, &self.title)?;

        let mut identifiers = HashSet::new();
        let mut generated = 0_usize;
        for record in records {
            if self.add_kpi(&mut graph, &terms, record)? {
                generated += 1;
                if !identifiers.insert(slug_camel(&record.indicator)) {
                    warn!(
                        "Row {}: KPI '{}' shares its identifier with an earlier row, values are merged",
                        record.row, record.indicator
                    );
                }
            }
        }

        info!(
            "Generated {} KPI instances ({} distinct, {} triples)",
            generated,
            identifiers.len(),
            graph.len()
        );
        Ok(graph)
    }
}

fn iri(value: &str) -> Result<NamedNode> {
    NamedNode::new(value).map_err(|e| RimoError::rdf(format!("invalid IRI '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::{rdf, xsd};
    use oxigraph::model::{Literal, Term};
    use pretty_assertions::assert_eq;
    use rimo_core::KpiField;

    fn generator() -> InstanceGenerator {
        InstanceGenerator::new(&RimoConfig::default()).unwrap()
    }

    fn rimo(local: &str) -> NamedNode {
        NamedNode::new(format!("https://w3id.org/RIMO/{local}")).unwrap()
    }

    fn record() -> KpiRecord {
        let mut record = KpiRecord::new(4, "Number of users");
        record.set_field(KpiField::Description, "Unique users\n per month");
        record.set_field(KpiField::ServiceCategory, "Web applications");
        record.set_field(KpiField::IndicatorType, "Quantitative");
        record.set_field(KpiField::TargetGroup, "Funding Agency, End User");
        record.set_field(KpiField::Mandatory, "yes");
        record.set_field(KpiField::Measurement, "Web analytics");
        record.set_field(KpiField::AutomationPossible, "Matomo, Google Analytics");
        record.set_field(KpiField::Link, "https://example.org/users");
        record
    }

    #[test]
    fn test_ontology_header() {
        let graph = generator().generate(&[]).unwrap();
        let onto = NamedNode::new("http://w3id.org/RIMOkpi").unwrap();
        assert!(graph.contains(&onto, rdf::TYPE, owl::ONTOLOGY.into_owned()));
        assert!(graph.contains(
            &onto,
            owl::IMPORTS,
            NamedNode::new("https://w3id.org/RIMO").unwrap()
        ));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_kpi_instance() {
        let graph = generator().generate(&[record()]).unwrap();
        let kpi = rimo("NumberOfUsers");

        assert!(graph.contains(&kpi, rdf::TYPE, rimo("KPI")));
        assert!(graph.contains(
            &kpi,
            rimo("name").as_ref(),
            Literal::new_language_tagged_literal("Number of users", "en").unwrap()
        ));
        assert!(graph.contains(
            &kpi,
            rimo("description").as_ref(),
            Literal::new_language_tagged_literal("Unique users per month", "en").unwrap()
        ));
        assert!(graph.contains(
            &kpi,
            rimo("isQualitativeIndicator").as_ref(),
            Literal::new_typed_literal("false", xsd::BOOLEAN)
        ));
        assert!(graph.contains(&kpi, rimo("appliedTo").as_ref(), rimo("Web_application")));
        assert!(graph.contains(&kpi, rimo("mandatoryFor").as_ref(), rimo("Web_application")));
        assert!(graph.objects(&kpi, rimo("recommendedFor").as_ref()).is_empty());
        assert!(graph.contains(&kpi, rimo("measuredBy").as_ref(), rimo("means/WebAnalytics")));
        assert!(graph.contains(
            &kpi,
            dcterms::RELATION,
            NamedNode::new("https://example.org/users").unwrap()
        ));
    }

    #[test]
    fn test_linked_nodes() {
        let graph = generator().generate(&[record()]).unwrap();
        let kpi = rimo("NumberOfUsers");

        assert_eq!(
            graph.objects(&kpi, rimo("canBeAutomatedBy").as_ref()),
            vec![
                Term::from(rimo("tool/GoogleAnalytics")),
                Term::from(rimo("tool/Matomo"))
            ]
        );
        assert!(graph.contains(&rimo("tool/Matomo"), rdf::TYPE, rimo("AutomationTool")));
        assert_eq!(
            graph.objects(&kpi, rimo("requestedBy").as_ref()),
            vec![
                Term::from(rimo("agent/EndUser")),
                Term::from(rimo("agent/FundingAgency"))
            ]
        );
        assert!(graph.contains(&rimo("agent/EndUser"), rdf::TYPE, foaf::AGENT.into_owned()));
        assert!(graph.contains(
            &rimo("means/WebAnalytics"),
            rdfs::LABEL,
            Literal::new_language_tagged_literal("Web analytics", "en").unwrap()
        ));
    }

    #[test]
    fn test_recommended_and_aliases() {
        let mut record = KpiRecord::new(6, "API calls");
        record.set_field(KpiField::ServiceCategory, "Libraries / APIs");
        record.set_field(KpiField::Mandatory, "No");
        let graph = generator().generate(&[record]).unwrap();
        let kpi = rimo("ApiCalls");

        assert_eq!(
            graph.objects(&kpi, rimo("recommendedFor").as_ref()),
            vec![Term::from(rimo("Library")), Term::from(rimo("Web_API"))]
        );
        assert!(graph.objects(&kpi, rimo("mandatoryFor").as_ref()).is_empty());
        assert!(graph.objects(&kpi, rimo("isQualitativeIndicator").as_ref()).is_empty());
    }

    #[test]
    fn test_symbol_only_indicator_is_skipped() {
        let record = KpiRecord::new(8, "???");
        let graph = generator().generate(&[record]).unwrap();
        assert!(graph.subjects_of_type(rimo("KPI").as_ref()).is_empty());
    }

    #[test]
    fn test_base_ontology_alignment() {
        let base = BaseOntology::parse_str(
            r"
@prefix rimo: <http://example.org/rimo#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/extra/> .
<http://example.org/rimo> a owl:Ontology .
rimo:Spaceport a rimo:ServiceCategory .
",
            "base.ttl",
        )
        .unwrap();
        let generator = generator().with_base(&base).unwrap();
        assert_eq!(generator.namespace().as_str(), "http://example.org/rimo#");
        assert_eq!(generator.ontology_iri().as_str(), "http://example.org/rimo");
        assert_eq!(generator.resolve_categories("Spaceport"), vec!["Spaceport"]);
        assert_eq!(generator.resolve_categories("Database"), vec!["Database_portal"]);

        let mut record = KpiRecord::new(4, "Launches");
        record.set_field(KpiField::ServiceCategory, "Spaceport");
        let graph = generator.generate(&[record]).unwrap();
        assert_eq!(graph.prefixes().get("ex"), Some("http://example.org/extra/"));
        assert!(graph.contains(
            &NamedNode::new("http://example.org/rimo#Launches").unwrap(),
            NamedNode::new("http://example.org/rimo#appliedTo").unwrap().as_ref(),
            NamedNode::new("http://example.org/rimo#Spaceport").unwrap()
        ));
    }
}
