//! Prelude module for the RIMO builder
//!
//! This module re-exports commonly used types and functions for convenient import.

// Re-export core types
pub use rimo_core::prelude::*;

// Re-export loaders
pub use crate::loader::{BaseOntology, FileSource, HttpSource, SheetReader, SheetSource, source_for};

// Re-export generators
pub use crate::generator::{BaseOntologyGenerator, InstanceGenerator, OntologyGenerator};

// Re-export graph types
pub use crate::graph::{OntologyGraph, RdfSerializationFormat};

// Re-export configuration loading
pub use crate::config::load_rimo_config;

// Re-export validation
pub use crate::validator::RecordValidator;
