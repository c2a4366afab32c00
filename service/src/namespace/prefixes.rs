//! Prefix bindings emitted in serialized graphs

use super::{EDAM_NAMESPACE, NCIT_NAMESPACE, dcterms, foaf, owl, pato};
use indexmap::IndexMap;

const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Ordered prefix to namespace IRI bindings
///
/// Later bindings of an existing prefix replace the earlier IRI but keep the
/// original position, so serialized headers stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: IndexMap<String, String>,
}

impl PrefixMap {
    /// Create an empty prefix map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings used by the RIMO base ontology, with `rimo` bound to `base`
    #[must_use]
    pub fn standard(base: &str) -> Self {
        let mut map = Self::new();
        map.add_prefix("rimo", base);
        map.add_prefix("rdf", RDF_NAMESPACE);
        map.add_prefix("rdfs", RDFS_NAMESPACE);
        map.add_prefix("dct", dcterms::NAMESPACE);
        map.add_prefix("xsd", XSD_NAMESPACE);
        map.add_prefix("foaf", foaf::NAMESPACE);
        map.add_prefix("pato", pato::NAMESPACE);
        map.add_prefix("edam", EDAM_NAMESPACE);
        map.add_prefix("ncit", NCIT_NAMESPACE);
        map.add_prefix("owl", owl::NAMESPACE);
        map
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
    }

    /// Add every binding of `other`, replacing clashing prefixes
    pub fn extend(&mut self, other: &PrefixMap) {
        for (prefix, iri) in other.iter() {
            self.add_prefix(prefix, iri);
        }
    }

    /// Namespace IRI bound to `prefix`
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expand a CURIE such as `rimo:KPI`
    ///
    /// Returns `None` for unknown prefixes and for strings without a colon.
    #[must_use]
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.get(prefix).map(|iri| format!("{iri}{local}"))
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the map has no bindings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_prefixes() {
        let map = PrefixMap::standard("https://w3id.org/RIMO/");
        assert_eq!(map.get("rimo"), Some("https://w3id.org/RIMO/"));
        assert_eq!(map.get("dct"), Some("http://purl.org/dc/terms/"));
        assert_eq!(
            map.expand("pato:0103000").as_deref(),
            Some("http://purl.obolibrary.org/obo/PATO_0103000")
        );
        assert_eq!(map.iter().next(), Some(("rimo", "https://w3id.org/RIMO/")));
    }

    #[test]
    fn test_rebinding_keeps_position() {
        let mut map = PrefixMap::standard("https://w3id.org/RIMO/");
        let mut other = PrefixMap::new();
        other.add_prefix("rimo", "https://example.org/rimo#");
        other.add_prefix("skos", "http://www.w3.org/2004/02/skos/core#");
        map.extend(&other);

        assert_eq!(map.iter().next(), Some(("rimo", "https://example.org/rimo#")));
        assert_eq!(map.len(), 11);
        assert!(map.expand("unknown:thing").is_none());
        assert!(map.expand("nocolon").is_none());
    }
}
