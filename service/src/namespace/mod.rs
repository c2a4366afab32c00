//! Namespaces and well-known terms used by the RIMO graphs

pub mod prefixes;

pub use prefixes::PrefixMap;

use oxigraph::model::{NamedNode, NamedNodeRef};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rimo_core::{Result, RimoError};

/// `http://www.w3.org/2002/07/owl#`
pub mod owl {
    use oxigraph::model::NamedNodeRef;

    /// Namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    /// `owl:Ontology`
    pub const ONTOLOGY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
    /// `owl:imports`
    pub const IMPORTS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#imports");
    /// `owl:versionInfo`
    pub const VERSION_INFO: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
}

/// `http://purl.org/dc/terms/`
pub mod dcterms {
    use oxigraph::model::NamedNodeRef;

    /// Namespace IRI
    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";
    /// `dcterms:title`
    pub const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
    /// `dcterms:description`
    pub const DESCRIPTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
    /// `dcterms:creator`
    pub const CREATOR: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");
    /// `dcterms:contributor`
    pub const CONTRIBUTOR: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/contributor");
    /// `dcterms:issued`
    pub const ISSUED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/issued");
    /// `dcterms:license`
    pub const LICENSE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/license");
    /// `dcterms:language`
    pub const LANGUAGE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/language");
    /// `dcterms:relation`
    pub const RELATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/relation");
}

/// `http://xmlns.com/foaf/0.1/`
pub mod foaf {
    use oxigraph::model::NamedNodeRef;

    /// Namespace IRI
    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";
    /// `foaf:Agent`
    pub const AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Agent");
    /// `foaf:Group`
    pub const GROUP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Group");
}

/// `http://purl.obolibrary.org/obo/PATO_`
pub mod pato {
    use oxigraph::model::NamedNodeRef;

    /// Namespace IRI
    pub const NAMESPACE: &str = "http://purl.obolibrary.org/obo/PATO_";
    /// PATO:0103000, "quantitative"
    pub const QUANTITATIVE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.obolibrary.org/obo/PATO_0103000");
    /// PATO:0000068, "qualitative"
    pub const QUALITATIVE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.obolibrary.org/obo/PATO_0000068");
}

/// `http://edamontology.org/`
pub const EDAM_NAMESPACE: &str = "http://edamontology.org/";

/// `http://purl.obolibrary.org/obo/NCIT_`
pub const NCIT_NAMESPACE: &str = "http://purl.obolibrary.org/obo/NCIT_";

/// A namespace that mints term IRIs from local names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    iri: String,
}

impl Namespace {
    /// Create a namespace
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if `iri` is not a valid IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self> {
        let iri = iri.into();
        NamedNode::new(iri.as_str())
            .map_err(|e| RimoError::rdf(format!("invalid namespace IRI '{iri}': {e}")))?;
        Ok(Self { iri })
    }

    /// Namespace IRI
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    /// Term in this namespace
    ///
    /// Characters outside the IRI path-safe set are percent-encoded, so any
    /// local name derived from sheet text yields a valid term that stays in
    /// this namespace. `%`, `#`, `?`, `[` and `]` are encoded too.
    ///
    /// # Errors
    ///
    /// Returns `RimoError::RdfError` if the resulting IRI is invalid.
    pub fn term(&self, local: &str) -> Result<NamedNode> {
        let iri = format!("{}{}", self.iri, escape_local_name(local));
        NamedNode::new(iri.as_str())
            .map_err(|e| RimoError::rdf(format!("invalid term IRI '{iri}': {e}")))
    }

    /// Whether `node` belongs to this namespace
    #[must_use]
    pub fn contains(&self, node: NamedNodeRef<'_>) -> bool {
        node.as_str().starts_with(&self.iri)
    }

    /// Local name of `node` within this namespace
    #[must_use]
    pub fn local_name<'a>(&self, node: NamedNodeRef<'a>) -> Option<&'a str> {
        node.as_str().strip_prefix(self.iri.as_str())
    }
}

/// Bytes kept verbatim in minted local names: IRI unreserved characters,
/// sub-delimiters, `:`, `@` and `/`. Everything else, non-ASCII included,
/// is percent-encoded.
const LOCAL_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

fn escape_local_name(local: &str) -> String {
    utf8_percent_encode(local, LOCAL_NAME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_minting() {
        let ns = Namespace::new("https://w3id.org/RIMO/").unwrap();
        let term = ns.term("Web_application").unwrap();
        assert_eq!(term.as_str(), "https://w3id.org/RIMO/Web_application");
        assert!(ns.contains(term.as_ref()));
        assert_eq!(ns.local_name(term.as_ref()), Some("Web_application"));
    }

    #[test]
    fn test_term_escapes_invalid_characters() {
        let ns = Namespace::new("https://w3id.org/RIMO/").unwrap();
        let term = ns.term("Users \"active\" <30d>").unwrap();
        assert_eq!(
            term.as_str(),
            "https://w3id.org/RIMO/Users%20%22active%22%20%3C30d%3E"
        );
    }

    #[test]
    fn test_term_escapes_delimiters() {
        let ns = Namespace::new("https://w3id.org/RIMO/").unwrap();
        let cases = [
            ("%_of_FAIR_datasets", "%25_of_FAIR_datasets"),
            ("Uptime_100%", "Uptime_100%25"),
            ("Downloads_[monthly]", "Downloads_%5Bmonthly%5D"),
            ("#_of_users", "%23_of_users"),
            ("Active_users?", "Active_users%3F"),
            ("Données", "Donn%C3%A9es"),
        ];
        for (local, expected) in cases {
            let term = ns.term(local).unwrap();
            assert_eq!(term.as_str(), format!("https://w3id.org/RIMO/{expected}"));
            assert!(ns.contains(term.as_ref()));
        }
    }

    #[test]
    fn test_term_keeps_path_characters() {
        let ns = Namespace::new("https://w3id.org/RIMO/").unwrap();
        let term = ns.term("tool/Libraries_(R&D)").unwrap();
        assert_eq!(term.as_str(), "https://w3id.org/RIMO/tool/Libraries_(R&D)");
    }

    #[test]
    fn test_invalid_namespace() {
        assert!(Namespace::new("not an iri").is_err());
    }

    #[test]
    fn test_well_known_terms() {
        assert!(owl::ONTOLOGY.as_str().starts_with(owl::NAMESPACE));
        assert!(dcterms::RELATION.as_str().starts_with(dcterms::NAMESPACE));
        assert!(foaf::GROUP.as_str().starts_with(foaf::NAMESPACE));
        assert!(pato::QUALITATIVE.as_str().starts_with(pato::NAMESPACE));
    }
}
