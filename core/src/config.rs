//! Configuration types for RIMO ontology builds
//!
//! Every section defaults to the values used for the published RIMO
//! ontology, so an empty configuration file is valid.

use crate::error::{Result, RimoError};
use crate::vocabulary::Vocabulary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// Complete RIMO configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RimoConfig {
    /// Where the KPI sheet comes from
    pub source: SourceConfig,
    /// IRIs of the generated ontologies
    pub namespace: NamespaceConfig,
    /// Ontology header metadata
    pub metadata: OntologyMetadata,
    /// Controlled vocabularies
    pub vocabulary: Vocabulary,
}

impl RimoConfig {
    /// Validate the configuration values
    ///
    /// # Errors
    ///
    /// Returns `RimoError::ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.namespace.validate()?;
        self.metadata.validate()?;
        self.vocabulary.check()
    }
}

/// Sheet source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Local CSV path or CSV export URL; the CLI `--input` flag overrides it
    pub location: Option<String>,
    /// Data rows below the header that carry column explanations, not KPIs
    pub skip_rows: usize,
    /// HTTP timeout in seconds for remote sheets
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: None,
            skip_rows: 2,
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(RimoError::config("source.timeout_secs must be positive"));
        }
        if let Some(location) = &self.location {
            if location.trim().is_empty() {
                return Err(RimoError::config("source.location must not be empty"));
            }
        }
        Ok(())
    }
}

/// IRIs of the base and instance ontologies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Namespace of RIMO terms, bound to the `rimo` prefix
    pub base: String,
    /// IRI of the base ontology
    pub ontology_iri: String,
    /// IRI of the KPI instance ontology
    pub instance_ontology_iri: String,
    /// Language tag of labels and descriptions
    pub language: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            base: "https://w3id.org/RIMO/".to_string(),
            ontology_iri: "https://w3id.org/RIMO".to_string(),
            instance_ontology_iri: "http://w3id.org/RIMOkpi".to_string(),
            language: "en".to_string(),
        }
    }
}

impl NamespaceConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("namespace.base", &self.base),
            ("namespace.ontology_iri", &self.ontology_iri),
            ("namespace.instance_ontology_iri", &self.instance_ontology_iri),
        ] {
            Url::parse(value)
                .map_err(|e| RimoError::config(format!("{name} '{value}' is not an IRI: {e}")))?;
        }
        if !(self.base.ends_with('/') || self.base.ends_with('#')) {
            return Err(RimoError::config(format!(
                "namespace.base '{}' must end with '/' or '#'",
                self.base
            )));
        }
        validate_language(&self.language)
    }
}

fn validate_language(tag: &str) -> Result<()> {
    let valid = !tag.is_empty()
        && tag
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if valid {
        Ok(())
    } else {
        Err(RimoError::config(format!("'{tag}' is not a language tag")))
    }
}

/// Ontology header metadata (Dublin Core terms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyMetadata {
    /// `dcterms:title`
    pub title: String,
    /// `dcterms:description`
    pub description: String,
    /// `dcterms:creator`
    pub creator: String,
    /// `dcterms:contributor`
    pub contributor: String,
    /// `dcterms:issued`
    pub issued: NaiveDate,
    /// `dcterms:license` IRI
    pub license: String,
    /// `owl:versionInfo`
    pub version: String,
    /// `dcterms:language`
    pub language: String,
    /// `rdfs:seeAlso` IRI
    pub see_also: Option<String>,
    /// `dcterms:title` of the instance ontology
    pub instance_title: String,
}

impl Default for OntologyMetadata {
    fn default() -> Self {
        Self {
            title: "Research Infrastructure Monitoring Ontology (RIMO)".to_string(),
            description: "An ontology for representing and harmonising Key Performance Indicators \
                across research infrastructures and life science services. It defines classes and \
                properties to describe indicators, measurement methods, relevance, and applicable \
                service categories. Developed during the BioHackathon Europe 2025."
                .to_string(),
            creator: "Julia Koblitz (Leibniz Institute DSMZ)".to_string(),
            contributor: "BioHackathon Europe 2025 KPI Monitoring Team".to_string(),
            issued: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap_or_default(),
            license: "https://creativecommons.org/licenses/by/4.0/".to_string(),
            version: "0.1.0".to_string(),
            language: "en".to_string(),
            see_also: Some("https://github.com/elixir-europe/biohackathon-kpi".to_string()),
            instance_title: "RIMO KPI Instances".to_string(),
        }
    }
}

impl OntologyMetadata {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(RimoError::config("metadata.title must not be empty"));
        }
        Url::parse(&self.license).map_err(|e| {
            RimoError::config(format!("metadata.license '{}' is not an IRI: {e}", self.license))
        })?;
        if let Some(see_also) = &self.see_also {
            Url::parse(see_also).map_err(|e| {
                RimoError::config(format!("metadata.see_also '{see_also}' is not an IRI: {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = RimoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source.skip_rows, 2);
        assert_eq!(config.namespace.base, "https://w3id.org/RIMO/");
        assert_eq!(config.metadata.issued.to_string(), "2025-11-05");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
source:
  location: kpis.csv
metadata:
  version: 0.2.0
  issued: 2026-01-15
";
        let config: RimoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source.location.as_deref(), Some("kpis.csv"));
        assert_eq!(config.source.skip_rows, 2);
        assert_eq!(config.metadata.version, "0.2.0");
        assert_eq!(config.metadata.issued.to_string(), "2026-01-15");
        assert_eq!(config.namespace, NamespaceConfig::default());
    }

    #[test]
    fn test_invalid_namespace() {
        let mut config = RimoConfig::default();
        config.namespace.base = "https://w3id.org/RIMO".to_string();
        assert!(config.validate().is_err());

        let mut config = RimoConfig::default();
        config.namespace.ontology_iri = "not an iri".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_language_tags() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("en-GB").is_ok());
        assert!(validate_language("").is_err());
        assert!(validate_language("en_GB").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = RimoConfig::default();
        config.source.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
