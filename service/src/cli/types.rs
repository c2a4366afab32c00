//! CLI type definitions and enums

use crate::graph::RdfSerializationFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// RIMO ontology builder
#[derive(Parser, Debug)]
#[command(
    name = "rimo",
    version,
    about = "Build the RIMO ontology and KPI instance graph from the KPI spreadsheet"
)]
pub struct RimoCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to $RIMO_CONFIG or config/rimo.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: RimoCommand,
}

/// RDF output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RdfOutputFormat {
    /// Turtle
    #[default]
    Turtle,
    /// N-Triples
    Ntriples,
    /// RDF/XML
    Rdfxml,
}

impl From<RdfOutputFormat> for RdfSerializationFormat {
    fn from(format: RdfOutputFormat) -> Self {
        match format {
            RdfOutputFormat::Turtle => Self::Turtle,
            RdfOutputFormat::Ntriples => Self::NTriples,
            RdfOutputFormat::Rdfxml => Self::RdfXml,
        }
    }
}

/// Validation report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON output
    Json,
}

/// Formats for dumping parsed records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// JSON array
    #[default]
    Json,
    /// YAML sequence
    Yaml,
}

/// RIMO subcommands
#[derive(Subcommand, Debug)]
pub enum RimoCommand {
    /// Generate the base ontology (RIMO.ttl)
    BuildBase {
        /// Sheet CSV file or export URL (defaults to source.location)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file, `-` for stdout
        #[arg(short, long, default_value = "RIMO.ttl")]
        output: PathBuf,
        /// RDF serialization
        #[arg(short, long, value_enum, default_value_t)]
        format: RdfOutputFormat,
    },

    /// Generate the KPI instance graph (KPIs.ttl)
    BuildInstances {
        /// Sheet CSV file or export URL (defaults to source.location)
        #[arg(short, long)]
        input: Option<String>,
        /// Base ontology (Turtle) to import and align with
        #[arg(short, long)]
        base: Option<PathBuf>,
        /// Output file, `-` for stdout
        #[arg(short, long, default_value = "KPIs.ttl")]
        output: PathBuf,
        /// RDF serialization
        #[arg(short, long, value_enum, default_value_t)]
        format: RdfOutputFormat,
    },

    /// Generate both graphs from one read of the sheet
    Build {
        /// Sheet CSV file or export URL (defaults to source.location)
        #[arg(short, long)]
        input: Option<String>,
        /// Base ontology output file
        #[arg(long, default_value = "RIMO.ttl")]
        base_output: PathBuf,
        /// Instance graph output file
        #[arg(long, default_value = "KPIs.ttl")]
        instances_output: PathBuf,
        /// RDF serialization
        #[arg(short, long, value_enum, default_value_t)]
        format: RdfOutputFormat,
    },

    /// Lint the sheet for values the generators would drop
    Validate {
        /// Sheet CSV file or export URL (defaults to source.location)
        #[arg(short, long)]
        input: Option<String>,
        /// Base ontology whose service categories count as known
        #[arg(short, long)]
        base: Option<PathBuf>,
        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
        /// Report format
        #[arg(short, long, value_enum, default_value_t)]
        report: ReportFormat,
    },

    /// Print the parsed KPI records
    Inspect {
        /// Sheet CSV file or export URL (defaults to source.location)
        #[arg(short, long)]
        input: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: DumpFormat,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
