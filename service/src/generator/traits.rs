//! Core generator trait

use crate::graph::OntologyGraph;
use rimo_core::{KpiRecord, Result};

/// Builds an RDF graph from KPI records
pub trait OntologyGenerator: Send + Sync {
    /// Get generator name
    fn name(&self) -> &str;

    /// Get generator description
    fn description(&self) -> &str;

    /// Get the default filename for generated files
    fn get_default_filename(&self) -> &str;

    /// Build the graph for `records`
    ///
    /// # Errors
    /// Returns an error if a term cannot be expressed as RDF (invalid IRI or
    /// language tag)
    fn generate(&self, records: &[KpiRecord]) -> Result<OntologyGraph>;
}
