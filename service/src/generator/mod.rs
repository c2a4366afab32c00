//! RDF generation from KPI records
//!
//! Two generators share the [`OntologyGenerator`] trait: the base ontology
//! (`RIMO.ttl`) and the KPI instance graph (`KPIs.ttl`).

pub mod base;
pub mod instances;
pub mod traits;

pub use base::{BaseOntologyGenerator, INDICATOR_PROPERTIES};
pub use instances::InstanceGenerator;
pub use traits::OntologyGenerator;
