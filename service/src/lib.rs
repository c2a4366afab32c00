//! # RIMO
//!
//! Builds the Research Infrastructure Monitoring Ontology (RIMO) from the
//! community-curated KPI spreadsheet.
//!
//! ## Overview
//!
//! The KPI sheet (a Google Sheet CSV export or a local CSV file) lists one
//! Key Performance Indicator per row. This crate turns it into two RDF
//! graphs:
//!
//! - **Base ontology** (`RIMO.ttl`): ontology metadata, the KPI model's
//!   classes and properties, the controlled vocabularies, and one
//!   `rimo:Indicator` per row.
//! - **Instance graph** (`KPIs.ttl`): one `rimo:KPI` individual per row,
//!   linked to service categories, measurement means, automation tools and
//!   requesting agents, importing the base ontology.
//!
//! A curation lint reports cells the generators would drop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rimo_service::generator::{BaseOntologyGenerator, OntologyGenerator};
//! use rimo_service::graph::RdfSerializationFormat;
//! use rimo_service::loader::{FileSource, SheetReader};
//! use rimo_core::RimoConfig;
//!
//! # async fn example() -> rimo_core::Result<()> {
//! let records = SheetReader::new().load(&FileSource::new("kpis.csv")).await?;
//! let generator = BaseOntologyGenerator::new(&RimoConfig::default())?;
//! let turtle = generator
//!     .generate(&records)?
//!     .serialize_to_string(RdfSerializationFormat::Turtle)?;
//! println!("{turtle}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_self)]
#![allow(clippy::doc_markdown)] // RIMO, KPI, RDF, IRI are proper nouns
#![allow(clippy::missing_panics_doc)] // static regex patterns only

/// Command-line interface
pub mod cli;

/// Configuration loading
pub mod config;

/// RDF generators
pub mod generator;

/// In-memory RDF graphs
pub mod graph;

/// Sheet and base ontology loading
pub mod loader;

/// Namespaces and prefixes
pub mod namespace;

/// Curation lint
pub mod validator;

/// Prelude for common imports
pub mod prelude;

pub use generator::{BaseOntologyGenerator, InstanceGenerator, OntologyGenerator};
pub use graph::{OntologyGraph, RdfSerializationFormat};
pub use validator::RecordValidator;
