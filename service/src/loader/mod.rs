//! Loading KPI sheets and existing ontology files

pub mod base_ontology;
pub mod columns;
pub mod sheet;
pub mod source;

pub use base_ontology::BaseOntology;
pub use columns::ColumnMapping;
pub use sheet::{SheetOptions, SheetReader};
pub use source::{FileSource, HttpSource, SheetSource, source_for};
