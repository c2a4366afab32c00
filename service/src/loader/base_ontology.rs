//! Reader for an existing base ontology file
//!
//! The instance graph re-uses the prefixes, the ontology IRI and the
//! declared service categories of the base ontology it imports.

use crate::graph::OntologyGraph;
use crate::namespace::{Namespace, PrefixMap, owl};
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{Graph, NamedNode, Triple};
use percent_encoding::percent_decode_str;
use regex::Regex;
use rimo_core::{Result, RimoError};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// `@prefix p: <iri> .` and SPARQL-style `PREFIX p: <iri>` declarations
static PREFIX_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*(?:@prefix|prefix)\s+([A-Za-z0-9_.\-]*):\s*<([^>]*)>")
        .expect("Valid prefix declaration pattern")
});

/// A parsed base ontology
#[derive(Debug, Clone)]
pub struct BaseOntology {
    graph: OntologyGraph,
    ontology_iri: Option<NamedNode>,
}

impl BaseOntology {
    /// Read a Turtle file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid Turtle.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RimoError::io_error(format!("Failed to read base ontology {}: {e}", path.display()))
        })?;
        let base = Self::parse_str(&content, &path.display().to_string())?;
        info!(
            "Loaded base ontology {} ({} triples)",
            path.display(),
            base.graph.len()
        );
        Ok(base)
    }

    /// Parse Turtle text
    ///
    /// # Errors
    ///
    /// Returns `RimoError::ParseError` if `content` is not valid Turtle.
    pub fn parse_str(content: &str, location: &str) -> Result<Self> {
        let mut graph = Graph::new();
        for quad in RdfParser::from_format(RdfFormat::Turtle).for_reader(content.as_bytes()) {
            let quad = quad.map_err(|e| RimoError::parse_at(e.to_string(), location))?;
            graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
        }

        let prefixes = extract_prefixes(content);
        debug!("Base ontology declares {} prefixes", prefixes.len());

        Ok(Self::from_graph(OntologyGraph::from_parts(graph, prefixes, "en")))
    }

    /// Use a graph generated in the same run
    #[must_use]
    pub fn from_graph(graph: OntologyGraph) -> Self {
        let ontology_iri = graph.subjects_of_type(owl::ONTOLOGY).into_iter().next();
        Self {
            graph,
            ontology_iri,
        }
    }

    /// Prefixes declared in the file
    #[must_use]
    pub fn prefixes(&self) -> &PrefixMap {
        self.graph.prefixes()
    }

    /// Namespace bound to the `rimo` prefix, if declared
    #[must_use]
    pub fn rimo_namespace(&self) -> Option<&str> {
        self.prefixes().get("rimo")
    }

    /// IRI of the `owl:Ontology` declared in the file
    #[must_use]
    pub fn ontology_iri(&self) -> Option<&NamedNode> {
        self.ontology_iri.as_ref()
    }

    /// Parsed triples
    #[must_use]
    pub fn graph(&self) -> &OntologyGraph {
        &self.graph
    }

    /// Local names of the service categories declared in `namespace`
    ///
    /// Percent-encoded local names are decoded, so they match the names
    /// [`Namespace::term`] mints from.
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the category class IRI is invalid.
    pub fn declared_categories(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let class = namespace.term("ServiceCategory")?;
        Ok(self
            .graph
            .subjects_of_type(class.as_ref())
            .iter()
            .filter_map(|node| namespace.local_name(node.as_ref()))
            .filter_map(|local| percent_decode_str(local).decode_utf8().ok())
            .map(|local| local.into_owned())
            .collect())
    }
}

fn extract_prefixes(content: &str) -> PrefixMap {
    let mut prefixes = PrefixMap::new();
    for caps in PREFIX_DECLARATION.captures_iter(content) {
        prefixes.add_prefix(&caps[1], &caps[2]);
    }
    prefixes
}
