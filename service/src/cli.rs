//! Command-line interface for building the RIMO ontologies.
//!
//! Commands:
//! - `build-base`: KPI sheet to the base ontology
//! - `build-instances`: KPI sheet to the KPI instance graph
//! - `build`: both graphs in one run
//! - `validate`: curation lint
//! - `inspect`: dump the parsed records

mod app;
mod types;

pub use app::RimoApp;
pub use types::{DumpFormat, RdfOutputFormat, ReportFormat, RimoCli, RimoCommand};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails or encounters invalid arguments.
pub async fn run() -> rimo_core::Result<()> {
    RimoApp::from_args().run().await
}
