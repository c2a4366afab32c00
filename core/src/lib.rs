//! # RIMO Core
//!
//! Core types for building the Research Infrastructure Monitoring Ontology
//! (RIMO) from the curated KPI spreadsheet.
//!
//! This crate holds everything that does not touch I/O or RDF: the KPI
//! record model, the controlled vocabularies, cell normalisation helpers,
//! configuration types and curation report types.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for RIMO operations
pub mod error;

/// KPI record model
pub mod types;

/// Controlled vocabularies (service categories, target groups, tools)
pub mod vocabulary;

/// Configuration types
pub mod config;

/// Curation report types
pub mod validation;

/// Naming and cell normalisation helpers
pub mod utils;

// Re-export commonly used types
pub use config::RimoConfig;
pub use error::{Result, RimoError};
pub use types::{IndicatorType, KpiField, KpiRecord, MandatoryFlag};
pub use validation::{ValidationMessage, ValidationReport, ValidationSeverity};
pub use vocabulary::{Term, Vocabulary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Result, RimoError};
    pub use crate::types::*;
    pub use crate::validation::*;
    pub use crate::vocabulary::*;
}
