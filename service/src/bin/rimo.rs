//! RIMO command-line interface
//!
//! This binary provides the `rimo` command-line tool for turning the KPI
//! spreadsheet into the RIMO ontology and KPI instance graph.

use rimo_service::cli;
use std::process::ExitCode;

/// Errors are already reported by the CLI, honouring `--quiet`
#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
