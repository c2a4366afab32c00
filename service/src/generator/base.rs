//! Base ontology (RIMO) generator
//!
//! Emits the ontology header, the classes and properties of the KPI model,
//! the controlled vocabularies as individuals, and one `rimo:Indicator` per
//! KPI row with its cells as property values.

use super::traits::OntologyGenerator;
use crate::graph::OntologyGraph;
use crate::namespace::{Namespace, PrefixMap, dcterms, foaf, owl, pato};
use oxigraph::model::vocab::{rdf, rdfs, xsd};
use oxigraph::model::{NamedNode, NamedNodeRef};
use rimo_core::config::{NamespaceConfig, OntologyMetadata};
use rimo_core::utils::{humanize_property, indicator_local_name};
use rimo_core::{IndicatorType, KpiRecord, MandatoryFlag, Result, RimoConfig, RimoError, Vocabulary};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Properties describing an indicator, in declaration order
pub const INDICATOR_PROPERTIES: [&str; 11] = [
    "indicatorSet",
    "description",
    "serviceCategory",
    "valueType",
    "example",
    "targetGroup",
    "mandatory",
    "measurement",
    "source",
    "automationTool",
    "link",
];

/// Terms of the base namespace used while generating
struct BaseTerms {
    indicator: NamedNode,
    service_category: NamedNode,
    properties: IndexMap<&'static str, NamedNode>,
}

impl BaseTerms {
    fn new(ns: &Namespace) -> Result<Self> {
        Ok(Self {
            indicator: ns.term("Indicator")?,
            service_category: ns.term("ServiceCategory")?,
            properties: INDICATOR_PROPERTIES
                .iter()
                .map(|p| -> Result<(&'static str, NamedNode)> { Ok((*p, ns.term(p)?)) })
                .collect::<Result<_>>()?,
        })
    }

    /// `name` must be one of [`INDICATOR_PROPERTIES`]
    fn property(&self, name: &str) -> NamedNodeRef<'_> {
        self.properties[name].as_ref()
    }
}

/// Generator for the RIMO base ontology
#[derive(Debug, Clone)]
pub struct BaseOntologyGenerator {
    namespace: Namespace,
    settings: NamespaceConfig,
    metadata: OntologyMetadata,
    vocabulary: Vocabulary,
}

impl BaseOntologyGenerator {
    /// Create a generator from configuration
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the configured namespace is invalid.
    pub fn new(config: &RimoConfig) -> Result<Self> {
        Ok(Self {
            namespace: Namespace::new(config.namespace.base.as_str())?,
            settings: config.namespace.clone(),
            metadata: config.metadata.clone(),
            vocabulary: config.vocabulary.clone(),
        })
    }

    /// Namespace of generated terms
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn add_header(&self, graph: &mut OntologyGraph) -> Result<()> {
        let meta = &self.metadata;
        let onto = iri(&self.settings.ontology_iri)?;

        graph.add_type(&onto, owl::ONTOLOGY);
        graph.add_text(&onto, dcterms::TITLE, &meta.title)?;
        graph.add_text(&onto, dcterms::DESCRIPTION, &meta.description)?;
        graph.add_text(&onto, dcterms::CREATOR, &meta.creator)?;
        graph.add_text(&onto, dcterms::CONTRIBUTOR, &meta.contributor)?;
        graph.add_typed(&onto, dcterms::ISSUED, &meta.issued.to_string(), xsd::DATE);
        graph.add(&onto, dcterms::LICENSE, iri(&meta.license)?);
        graph.add_plain(&onto, owl::VERSION_INFO, &meta.version);
        graph.add_plain(&onto, dcterms::LANGUAGE, &meta.language);
        if let Some(see_also) = &meta.see_also {
            graph.add(&onto, rdfs::SEE_ALSO, iri(see_also)?);
        }
        Ok(())
    }

    fn add_model(&self, graph: &mut OntologyGraph, terms: &BaseTerms) -> Result<()> {
        graph.add_type(&terms.indicator, rdfs::CLASS);
        graph.add_text(&terms.indicator, rdfs::LABEL, "KPI Indicator")?;
        graph.add_type(&terms.service_category, rdfs::CLASS);
        graph.add_text(&terms.service_category, rdfs::LABEL, "Service Category")?;

        for (name, property) in &terms.properties {
            graph.add_type(property, rdf::PROPERTY);
            graph.add_text(property, rdfs::LABEL, &humanize_property(name))?;
        }
        Ok(())
    }

    fn add_vocabulary(&self, graph: &mut OntologyGraph, terms: &BaseTerms) -> Result<()> {
        let tables = [
            (&self.vocabulary.service_categories, terms.service_category.as_ref()),
            (&self.vocabulary.target_groups, foaf::GROUP),
            (&self.vocabulary.automation_tools, foaf::AGENT),
        ];
        for (table, class) in tables {
            for term in table {
                let node = self.namespace.term(&term.local_name())?;
                graph.add_type(&node, class);
                graph.add_text(&node, rdfs::LABEL, &term.label)?;
                graph.add_text(&node, rdfs::COMMENT, &term.definition)?;
            }
        }
        Ok(())
    }

    fn add_indicator(
        &self,
        graph: &mut OntologyGraph,
        terms: &BaseTerms,
        record: &KpiRecord,
    ) -> Result<()> {
        let kpi = self
            .namespace
            .term(&indicator_local_name(&record.indicator))?;
        debug!("Row {}: indicator {}", record.row, kpi);

        graph.add_type(&kpi, terms.indicator.as_ref());
        graph.add_text(&kpi, rdfs::LABEL, &record.indicator)?;

        let literals = [
            ("indicatorSet", &record.indicator_set),
            ("description", &record.description),
            ("example", &record.example),
            ("measurement", &record.measurement),
            ("source", &record.source),
        ];
        for (property, value) in literals {
            if let Some(value) = value {
                graph.add_plain(&kpi, terms.property(property), value);
            }
        }

        if let Some(category) = &record.service_category {
            for term in self.vocabulary.resolve_category(category) {
                let node = self.namespace.term(&term.local_name())?;
                graph.add(&kpi, terms.property("serviceCategory"), node);
            }
        }

        let value_type = match record.indicator_type {
            IndicatorType::Quantitative => Some(pato::QUANTITATIVE),
            IndicatorType::Qualitative => Some(pato::QUALITATIVE),
            IndicatorType::Unspecified => None,
        };
        if let Some(value_type) = value_type {
            graph.add(&kpi, terms.property("valueType"), value_type.into_owned());
        }

        for group in &record.target_groups {
            if let Some(term) = self.vocabulary.resolve_target_group(group) {
                let node = self.namespace.term(&term.local_name())?;
                graph.add(&kpi, terms.property("targetGroup"), node);
            }
        }

        match &record.mandatory {
            MandatoryFlag::Mandatory => {
                graph.add_bool(&kpi, terms.property("mandatory"), true);
            }
            MandatoryFlag::Recommended => {
                graph.add_bool(&kpi, terms.property("mandatory"), false);
            }
            MandatoryFlag::Other(text) => {
                graph.add_plain(&kpi, terms.property("mandatory"), text);
            }
            MandatoryFlag::Unspecified => {}
        }

        for tool in &record.automation_tools {
            if let Some(term) = self.vocabulary.resolve_automation_tool(tool) {
                let node = self.namespace.term(&term.local_name())?;
                graph.add(&kpi, terms.property("automationTool"), node);
            }
        }

        if let Some(link) = record.web_link() {
            graph.add_typed(&kpi, terms.property("link"), link, xsd::ANY_URI);
        } else if let Some(link) = &record.link {
            graph.add_plain(&kpi, terms.property("link"), link);
        }

        Ok(())
    }
}

impl OntologyGenerator for BaseOntologyGenerator {
    fn name(&self) -> &str {
        "base"
    }

    fn description(&self) -> &str {
        "RIMO base ontology: metadata, vocabularies, properties and indicators"
    }

    fn get_default_filename(&self) -> &str {
        "RIMO.ttl"
    }

    fn generate(&self, records: &[KpiRecord]) -> Result<OntologyGraph> {
        let prefixes = PrefixMap::standard(self.namespace.as_str());
        let mut graph = OntologyGraph::new(prefixes, self.settings.language.as_str());
        let terms = BaseTerms::new(&self.namespace)?;

        self.add_header(&mut graph)?;
        self.add_model(&mut graph, &terms)?;
        self.add_vocabulary(&mut graph, &terms)?;

        let mut seen = HashSet::new();
        for record in records {
            let local = indicator_local_name(&record.indicator);
            if !seen.insert(local.clone()) {
                warn!(
                    "Row {}: indicator '{}' shares identifier {} with an earlier row, values are merged",
                    record.row, record.indicator, local
                );
            }
            self.add_indicator(&mut graph, &terms, record)?;
        }

        info!(
            "Generated base ontology with {} indicators ({} triples)",
            seen.len(),
            graph.len()
        );
        Ok(graph)
    }
}

fn iri(value: &str) -> Result<NamedNode> {
    NamedNode::new(value).map_err(|e| RimoError::rdf(format!("invalid IRI '{value}': {e}")))
}
