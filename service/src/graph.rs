//! In-memory RDF graph with prefix bindings and deterministic serialization

use crate::namespace::PrefixMap;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{
    Graph, GraphName, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, Term, TermRef, Triple,
    TripleRef,
};
use rimo_core::{Result, RimoError};
use std::fmt;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfSerializationFormat {
    /// Turtle format (.ttl)
    #[default]
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/`XML` format (.rdf, .owl)
    RdfXml,
}

impl RdfSerializationFormat {
    /// Convert to oxigraph `RdfFormat`
    #[must_use]
    pub fn to_oxigraph_format(self) -> RdfFormat {
        match self {
            Self::Turtle => RdfFormat::Turtle,
            Self::NTriples => RdfFormat::NTriples,
            Self::RdfXml => RdfFormat::RdfXml,
        }
    }

    /// Guess the format from a file extension
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "ttl" | "turtle" => Some(Self::Turtle),
            "nt" | "ntriples" => Some(Self::NTriples),
            "rdf" | "owl" | "xml" => Some(Self::RdfXml),
            _ => None,
        }
    }
}

impl fmt::Display for RdfSerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turtle => write!(f, "turtle"),
            Self::NTriples => write!(f, "ntriples"),
            Self::RdfXml => write!(f, "rdfxml"),
        }
    }
}

/// RDF graph under construction
///
/// Wraps an oxigraph [`Graph`] (a set, so repeated insertions are no-ops)
/// together with the prefixes to emit and the language tag used for
/// human-readable literals.
#[derive(Debug, Clone)]
pub struct OntologyGraph {
    graph: Graph,
    prefixes: PrefixMap,
    language: String,
}

impl OntologyGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new(prefixes: PrefixMap, language: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(),
            prefixes,
            language: language.into(),
        }
    }

    /// Wrap an existing graph, e.g. one parsed from a file
    #[must_use]
    pub fn from_parts(graph: Graph, prefixes: PrefixMap, language: impl Into<String>) -> Self {
        Self {
            graph,
            prefixes,
            language: language.into(),
        }
    }

    /// Prefix bindings of this graph
    #[must_use]
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    /// Language tag used by [`OntologyGraph::add_text`]
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Underlying oxigraph graph
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of triples
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Whether the graph has no triples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Insert a triple, returning `false` if it was already present
    pub fn add(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, object: impl Into<Term>) -> bool {
        let triple = Triple::new(subject.clone(), predicate.into_owned(), object);
        self.graph.insert(&triple)
    }

    /// Whether the graph contains the triple
    #[must_use]
    pub fn contains(&self, subject: &NamedNode, predicate: NamedNodeRef<'_>, object: impl Into<Term>) -> bool {
        let triple = Triple::new(subject.clone(), predicate.into_owned(), object);
        self.graph.contains(&triple)
    }

    /// Insert `subject rdf:type class`
    pub fn add_type(&mut self, subject: &NamedNode, class: NamedNodeRef<'_>) -> bool {
        self.add(subject, rdf::TYPE, class.into_owned())
    }

    /// Insert a literal tagged with the graph language
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the graph language is not a valid
    /// language tag.
    pub fn add_text(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, value: &str) -> Result<bool> {
        let literal = Literal::new_language_tagged_literal(value, self.language.as_str())
            .map_err(|e| RimoError::rdf(format!("invalid language tag '{}': {e}", self.language)))?;
        Ok(self.add(subject, predicate, literal))
    }

    /// Insert a plain (`xsd:string`) literal
    pub fn add_plain(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, value: &str) -> bool {
        self.add(subject, predicate, Literal::new_simple_literal(value))
    }

    /// Insert a typed literal
    pub fn add_typed(
        &mut self,
        subject: &NamedNode,
        predicate: NamedNodeRef<'_>,
        value: &str,
        datatype: NamedNodeRef<'_>,
    ) -> bool {
        self.add(subject, predicate, Literal::new_typed_literal(value, datatype.into_owned()))
    }

    /// Insert an `xsd:boolean` literal
    pub fn add_bool(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, value: bool) -> bool {
        let lexical = if value { "true" } else { "false" };
        self.add_typed(subject, predicate, lexical, xsd::BOOLEAN)
    }

    /// Named subjects typed with `class`
    #[must_use]
    pub fn subjects_of_type(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
        let mut subjects: Vec<NamedNode> = self
            .graph
            .iter()
            .filter(|t| t.predicate == rdf::TYPE && t.object == TermRef::NamedNode(class))
            .filter_map(|t| match t.subject.into_owned() {
                NamedOrBlankNode::NamedNode(node) => Some(node),
                NamedOrBlankNode::BlankNode(_) => None,
            })
            .collect();
        subjects.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        subjects
    }

    /// Objects of `subject predicate ?o`
    #[must_use]
    pub fn objects(&self, subject: &NamedNode, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        let mut objects: Vec<Term> = self
            .graph
            .iter()
            .filter(|t| t.predicate == predicate)
            .filter(|t| matches!(t.subject.into_owned(), NamedOrBlankNode::NamedNode(ref n) if n == subject))
            .map(|t| t.object.into_owned())
            .collect();
        objects.sort_by_cached_key(ToString::to_string);
        objects
    }

    /// Triples ordered by subject, then `rdf:type` first, then predicate and object
    #[must_use]
    pub fn sorted_triples(&self) -> Vec<Triple> {
        let mut triples: Vec<Triple> = self.graph.iter().map(TripleRef::into_owned).collect();
        triples.sort_by_cached_key(|t| {
            (
                t.subject.to_string(),
                t.predicate.as_ref() != rdf::TYPE,
                t.predicate.as_str().to_string(),
                t.object.to_string(),
            )
        });
        triples
    }

    /// Serialize the graph
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if a prefix IRI is invalid or writing
    /// fails.
    pub fn serialize(&self, format: RdfSerializationFormat) -> Result<Vec<u8>> {
        let mut serializer = RdfSerializer::from_format(format.to_oxigraph_format());
        for (prefix, iri) in self.prefixes.iter() {
            serializer = serializer
                .with_prefix(prefix, iri)
                .map_err(|e| RimoError::rdf(format!("invalid prefix '{prefix}' <{iri}>: {e}")))?;
        }

        let mut writer = serializer.for_writer(Vec::new());
        for triple in self.sorted_triples() {
            writer
                .serialize_quad(&triple.in_graph(GraphName::DefaultGraph))
                .map_err(|e| RimoError::rdf(format!("Failed to serialize triple: {e}")))?;
        }
        writer
            .finish()
            .map_err(|e| RimoError::rdf(format!("Failed to finish RDF serialization: {e}")))
    }

    /// Serialize the graph to a UTF-8 string
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if serialization fails.
    pub fn serialize_to_string(&self, format: RdfSerializationFormat) -> Result<String> {
        let bytes = self.serialize(format)?;
        String::from_utf8(bytes)
            .map_err(|e| RimoError::serialization(format!("Invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::io::RdfParser;
    use oxigraph::model::vocab::rdfs;

    fn sample_graph() -> OntologyGraph {
        let mut graph = OntologyGraph::new(PrefixMap::standard("https://w3id.org/RIMO/"), "en");
        let kpi = NamedNode::new("https://w3id.org/RIMO/NumberOfUsers").unwrap();
        let class = NamedNode::new("https://w3id.org/RIMO/KPI").unwrap();
        graph.add_type(&kpi, class.as_ref());
        graph.add_text(&kpi, rdfs::LABEL, "Number of users").unwrap();
        graph.add_bool(
            &kpi,
            NamedNodeRef::new_unchecked("https://w3id.org/RIMO/isQualitativeIndicator"),
            false,
        );
        graph
    }

    #[test]
    fn test_insertions_are_deduplicated() {
        let mut graph = sample_graph();
        let before = graph.len();
        let kpi = NamedNode::new("https://w3id.org/RIMO/NumberOfUsers").unwrap();
        assert!(!graph.add_text(&kpi, rdfs::LABEL, "Number of users").unwrap());
        assert_eq!(graph.len(), before);
        assert_eq!(before, 3);
    }

    #[test]
    fn test_subjects_and_objects() {
        let graph = sample_graph();
        let class = NamedNodeRef::new_unchecked("https://w3id.org/RIMO/KPI");
        let subjects = graph.subjects_of_type(class);
        assert_eq!(subjects.len(), 1);

        let labels = graph.objects(&subjects[0], rdfs::LABEL);
        assert_eq!(
            labels,
            vec![Term::from(
                Literal::new_language_tagged_literal("Number of users", "en").unwrap()
            )]
        );
    }

    #[test]
    fn test_invalid_language_tag() {
        let mut graph = OntologyGraph::new(PrefixMap::new(), "not a tag");
        let kpi = NamedNode::new("https://w3id.org/RIMO/X").unwrap();
        assert!(graph.add_text(&kpi, rdfs::LABEL, "x").is_err());
    }

    #[test]
    fn test_type_triple_sorted_first() {
        let graph = sample_graph();
        let triples = graph.sorted_triples();
        assert_eq!(triples[0].predicate.as_ref(), rdf::TYPE);
    }

    #[test]
    fn test_turtle_roundtrip_preserves_triples() {
        let graph = sample_graph();
        let turtle = graph
            .serialize_to_string(RdfSerializationFormat::Turtle)
            .unwrap();
        assert!(turtle.contains("@prefix rimo: <https://w3id.org/RIMO/>"));

        let parsed: Vec<_> = RdfParser::from_format(RdfFormat::Turtle)
            .for_reader(turtle.as_bytes())
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(parsed.len(), graph.len());
    }

    #[test]
    fn test_ntriples_one_line_per_triple() {
        let graph = sample_graph();
        let nt = graph
            .serialize_to_string(RdfSerializationFormat::NTriples)
            .unwrap();
        assert_eq!(nt.trim().lines().count(), graph.len());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            RdfSerializationFormat::from_extension("TTL"),
            Some(RdfSerializationFormat::Turtle)
        );
        assert_eq!(
            RdfSerializationFormat::from_extension("owl"),
            Some(RdfSerializationFormat::RdfXml)
        );
        assert_eq!(RdfSerializationFormat::from_extension("csv"), None);
    }
}
